//! Common types shared across the location validation crates.

pub mod bbox;
pub mod error;
pub mod extent;

pub use bbox::{BboxError, BoundingBox};
pub use error::{ExtentError, ExtentResult};
pub use extent::{Axis, AxisBounds, Extent, ExtentUpdate, ExtentsConfig, Range};
