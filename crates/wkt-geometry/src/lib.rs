//! Well-known text (WKT) geometry support.
//!
//! Parses the 2-D, Z, M and ZM variants of the simple feature types, checks
//! basic geometric validity and reports bounding boxes.
//!
//! # Example
//!
//! ```rust
//! use wkt_geometry::inspect;
//!
//! let report = inspect("POLYGON((0 0, 4 0, 4 3, 0 0))").unwrap();
//! assert!(report.is_valid);
//! assert!(!report.has_z);
//! assert_eq!(report.bounds.unwrap().max_lon, 4.0);
//! ```

pub mod errors;
pub mod geometry;
pub mod parser;
pub mod validity;

pub use errors::{GeometryError, InvalidGeometry};
pub use geometry::{Coord, Dimension, Geometry};
pub use parser::parse_wkt;

use locations_common::BoundingBox;
use serde::Serialize;

/// What a caller needs to know about a parsed WKT string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeometryReport {
    /// Geometry type keyword, upper case (`POINT`, `POLYGON`, ...).
    pub kind: &'static str,
    pub is_valid: bool,
    /// Why the geometry is invalid, when it is.
    pub invalid_reason: Option<String>,
    /// Any coordinate carries a third (height) dimension.
    pub has_z: bool,
    /// `None` for empty geometries.
    pub bounds: Option<BoundingBox>,
}

/// Parse `wkt` and summarise its validity, dimensionality and bounds.
///
/// Malformed input is an error; a well-formed but invalid geometry is not.
pub fn inspect(wkt: &str) -> Result<GeometryReport, GeometryError> {
    let geometry = parse_wkt(wkt)?;
    let validity = geometry.validate();

    Ok(GeometryReport {
        kind: geometry.kind(),
        is_valid: validity.is_ok(),
        invalid_reason: validity.err().map(|e| e.to_string()),
        has_z: geometry.has_z(),
        bounds: geometry.bounds(),
    })
}
