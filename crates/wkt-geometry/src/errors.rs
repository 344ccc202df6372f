//! Geometry error types.

use thiserror::Error;

/// Errors that can occur when reading WKT.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// Invalid WKT format.
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Invalid coordinate value.
    #[error("Invalid coordinate value: {0}")]
    InvalidCoordinate(String),

    /// Unknown geometry keyword.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedType(String),

    /// Input ended in the middle of a geometry.
    #[error("Unexpected end of WKT input")]
    UnexpectedEnd,
}

/// Reasons a well-formed geometry is not geometrically valid.
#[derive(Debug, Error, PartialEq)]
pub enum InvalidGeometry {
    #[error("geometry is empty")]
    Empty,

    #[error("non-finite coordinate")]
    NonFiniteCoordinate,

    #[error("too few distinct points in {0}")]
    TooFewPoints(&'static str),

    #[error("ring is not closed")]
    RingNotClosed,

    #[error("ring self-intersection near ({x}, {y})")]
    SelfIntersection { x: f64, y: f64 },

    #[error("hole lies outside shell near ({x}, {y})")]
    HoleOutsideShell { x: f64, y: f64 },
}
