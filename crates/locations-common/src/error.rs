//! Error types for extent accumulation.

use thiserror::Error;

/// Result type alias using ExtentError.
pub type ExtentResult<T> = Result<T, ExtentError>;

/// Reasons an extent update is rejected.
///
/// A rejected update leaves the accumulated range untouched.
#[derive(Debug, Error, PartialEq)]
pub enum ExtentError {
    #[error("Non-finite {axis} values: {values:?}")]
    NonFinite { axis: String, values: Vec<f64> },

    #[error("{axis} values range ({min}, {max}) exceeds hard bounds ({lower}, {upper})")]
    OutsideHardBounds {
        axis: String,
        min: f64,
        max: f64,
        lower: f64,
        upper: f64,
    },
}
