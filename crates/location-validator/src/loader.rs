//! The locations sheet load: header classification through index assembly.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::instrument;

use crate::catalog::ResourceCatalog;
use crate::cell::RawCell;
use crate::diagnostics::{Diagnostics, Scope};
use crate::error::{LocationsError, LocationsResult};
use crate::existing_locations::validate_existing_locations;
use crate::extents::Extents;
use crate::header::{classify_headers, HeaderSet};
use crate::index::{assemble_index, LocationIndexEntry};
use crate::new_locations::validate_new_locations;
use crate::partition::{partition_rows, Partition};
use crate::row::sanitize_rows;

/// Options for a load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Validate new and existing locations concurrently.
    pub parallel: bool,
}

/// Outcome of a load that was not structurally rejected.
///
/// A non-zero `error_count` means the sheet was interpretable but invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub locations: BTreeSet<String>,
    pub location_index: Vec<LocationIndexEntry>,
    pub error_count: usize,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }
}

/// Locations known to a dataset.
///
/// Filled by [`Locations::load`] and optionally by
/// [`Locations::add_known_locations`]; data tables are then checked against
/// it with [`Locations::check_references`].
#[derive(Debug, Clone, Default)]
pub struct Locations {
    pub(crate) locations: BTreeSet<String>,
    pub(crate) location_index: Vec<LocationIndexEntry>,
    options: LoadOptions,
}

impl Locations {
    pub fn new(options: LoadOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn locations(&self) -> &BTreeSet<String> {
        &self.locations
    }

    pub fn location_index(&self) -> &[LocationIndexEntry] {
        &self.location_index
    }

    /// Load a locations sheet.
    ///
    /// `grid` is the decoded sheet with the header row first. Data problems
    /// are reported to `diagnostics` and processing continues; only
    /// structural header problems return an error, in which case `self` and
    /// `extents` are left as they were. On success the loaded locations are
    /// added to `self`.
    #[instrument(skip_all, fields(rows = grid.len()))]
    pub fn load(
        &mut self,
        grid: &[Vec<RawCell>],
        catalog: &ResourceCatalog,
        extents: &Extents,
        diagnostics: &Diagnostics,
    ) -> LocationsResult<ValidationResult> {
        let start_errors = diagnostics.error_count();
        let root = diagnostics.root();

        let (header_row, data_rows) = match grid.split_first() {
            Some(split) => split,
            None => return Err(structural(LocationsError::EmptySheet, &root)),
        };

        root.info("Reading location headers");
        let headers = classify_headers(header_row, &root.nested()).map_err(|e| structural(e, &root))?;

        root.info("Reading location data");
        let partition = {
            let scope = root.nested();
            let rows = sanitize_rows(&headers, data_rows, &scope);
            partition_rows(&headers, rows, &scope)
        };

        self.validate_groups(&headers, &partition, catalog, extents, &root);

        let (locations, location_index) = assemble_index(&headers, &partition);
        let error_count = diagnostics.error_count() - start_errors;

        if error_count > 0 {
            root.info(format!("Locations contains {} errors", error_count));
        } else {
            root.info(format!("{} locations loaded correctly", locations.len()));
        }

        self.locations.extend(locations.iter().cloned());
        self.location_index.extend(location_index.iter().cloned());

        Ok(ValidationResult {
            locations,
            location_index,
            error_count,
        })
    }

    /// Stages over disjoint row groups. They share only the extents and the
    /// diagnostics, both of which serialise their own updates.
    fn validate_groups(
        &self,
        headers: &HeaderSet,
        partition: &Partition,
        catalog: &ResourceCatalog,
        extents: &Extents,
        scope: &Scope<'_>,
    ) {
        let new = || validate_new_locations(&partition.new, headers, catalog, extents, scope);
        let existing = || validate_existing_locations(&partition.existing, catalog, extents, scope);

        if self.options.parallel {
            rayon::join(new, existing);
        } else {
            new();
            existing();
        }
    }
}

fn structural(error: LocationsError, scope: &Scope<'_>) -> LocationsError {
    scope.error(error.to_string());
    error
}
