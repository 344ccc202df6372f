//! Validation of dataset location tables.
//!
//! A locations sheet names the places a dataset refers to. Each name must
//! either exist in the gazetteer ([`ResourceCatalog`]) or be declared new
//! together with a type and, where available, a geometry. Loading a sheet
//! checks all of this, reports every data problem it finds through
//! [`Diagnostics`] and widens the caller's latitude and longitude
//! [`Extents`] to cover the locations used.
//!
//! The load runs in stages:
//!
//! 1. [`header`]: classify the header row
//! 2. [`row`]: decode and sanitize data rows
//! 3. [`partition`]: split rows on the "new" flag
//! 4. [`new_locations`]: type, collision and geometry checks
//! 5. [`existing_locations`]: gazetteer lookups
//! 6. [`index`]: assemble the location set and index
//!
//! Stages 4 and 5 work on disjoint rows and may run concurrently
//! ([`LoadOptions::parallel`]).
//!
//! # Example
//!
//! ```
//! use location_validator::{Diagnostics, Extents, Locations, RawCell, ResourceCatalog};
//! use locations_common::Axis;
//!
//! let catalog = ResourceCatalog::from_json_str(
//!     r#"{"locations": {"A1": [10, 20, 0, 5]}}"#,
//! ).unwrap();
//! let grid = vec![
//!     vec![RawCell::Text("Location name".into())],
//!     vec![RawCell::Text("A1".into())],
//! ];
//!
//! let extents = Extents::default();
//! let diagnostics = Diagnostics::new();
//! let result = Locations::default()
//!     .load(&grid, &catalog, &extents, &diagnostics)
//!     .unwrap();
//!
//! assert!(result.is_valid());
//! assert_eq!(extents.range(Axis::Longitude).unwrap().max, 20.0);
//! ```

pub mod catalog;
pub mod cell;
pub mod diagnostics;
pub mod error;
pub mod existing_locations;
pub mod extents;
pub mod header;
pub mod index;
pub mod loader;
pub mod new_locations;
pub mod partition;
mod references;
pub mod row;

pub use catalog::ResourceCatalog;
pub use cell::{CellValue, Field, RawCell, MISSING_SENTINEL};
pub use diagnostics::{Diagnostic, Diagnostics, Scope, Severity};
pub use error::{CatalogError, LocationsError, LocationsResult};
pub use extents::Extents;
pub use header::HeaderSet;
pub use index::{GeometrySpec, LocationIndexEntry};
pub use loader::{LoadOptions, Locations, ValidationResult};
pub use row::LocationRow;
