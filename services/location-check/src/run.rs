//! A single check run: read the sheet, load it and build the report.

use anyhow::{Context, Result};
use chrono::Utc;
use location_validator::{
    Diagnostics, Extents, LoadOptions, Locations, RawCell, ResourceCatalog,
};
use locations_common::Axis;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::config::LocationCheckConfig;
use crate::report::{CheckStatus, ExtentSummary, LocationReport};

/// Read a sheet stored as a JSON array of rows, header row first.
pub fn read_sheet<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<RawCell>>> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read sheet from {:?}", path.as_ref()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).context("Failed to parse sheet JSON")?;
    RawCell::grid_from_json(value).context("Sheet must be an array of rows of scalar cells")
}

/// Check `sheet` against `gazetteer` using the extent bounds and options in
/// `config`.
pub fn check_sheet(config: &LocationCheckConfig, gazetteer: &Path, sheet: &Path) -> Result<LocationReport> {
    let catalog = ResourceCatalog::from_json_file(gazetteer)
        .with_context(|| format!("Failed to load gazetteer {:?}", gazetteer))?;
    let grid = read_sheet(sheet)?;
    info!(sheet = %sheet.display(), rows = grid.len(), "Loaded sheet");

    let extents = Extents::new(&config.extents);
    let diagnostics = Diagnostics::new();
    let mut locations = Locations::new(LoadOptions {
        parallel: config.validation.parallel,
    });

    let outcome = locations.load(&grid, &catalog, &extents, &diagnostics);

    let (status, structural_error, location_index) = match outcome {
        Ok(result) if result.is_valid() => (CheckStatus::Valid, None, result.location_index),
        Ok(result) => (CheckStatus::Invalid, None, result.location_index),
        Err(e) => {
            warn!(error = %e, "Sheet rejected");
            (CheckStatus::Rejected, Some(e.to_string()), Vec::new())
        }
    };

    Ok(LocationReport {
        generated_at: Utc::now(),
        sheet: sheet.display().to_string(),
        gazetteer: gazetteer.display().to_string(),
        status,
        structural_error,
        error_count: diagnostics.error_count(),
        warning_count: diagnostics.warning_count(),
        locations: locations.locations().iter().cloned().collect(),
        location_index,
        extents: ExtentSummary {
            latitude: extents.range(Axis::Latitude),
            longitude: extents.range(Axis::Longitude),
        },
        diagnostics: diagnostics.records(),
    })
}
