//! Error types for location loading.

use thiserror::Error;

/// Result type alias using LocationsError.
pub type LocationsResult<T> = Result<T, LocationsError>;

/// Structural problems that make a locations sheet uninterpretable.
///
/// Any of these aborts the load; everything else is reported through
/// [`Diagnostics`](crate::Diagnostics) and processing continues.
#[derive(Debug, Error, PartialEq)]
pub enum LocationsError {
    #[error("Location sheet is empty")]
    EmptySheet,

    #[error("Location headers are not all text strings")]
    NonTextHeaders,

    #[error("Duplicated location sheet headers: {}", .0.join(", "))]
    DuplicateHeaders(Vec<String>),

    #[error("Location name column not found")]
    MissingLocationName,
}

/// Errors loading the gazetteer catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read gazetteer: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse gazetteer JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid bounding box for location '{name}': {source}")]
    InvalidBounds {
        name: String,
        #[source]
        source: locations_common::BboxError,
    },

    #[error("Alias '{alias}' refers to unknown location '{target}'")]
    DanglingAlias { alias: String, target: String },
}
