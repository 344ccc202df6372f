//! Checks for locations that must already be in the gazetteer.

use locations_common::{Axis, BoundingBox};
use std::collections::BTreeSet;

use crate::catalog::ResourceCatalog;
use crate::diagnostics::Scope;
use crate::extents::Extents;
use crate::row::LocationRow;

/// Check existing location names against `catalog` and widen `extents` to
/// the catalog boxes of every name that resolves. Returns the distinct names.
pub fn validate_existing_locations(
    rows: &[LocationRow],
    catalog: &ResourceCatalog,
    extents: &Extents,
    scope: &Scope<'_>,
) -> BTreeSet<String> {
    if rows.is_empty() {
        return BTreeSet::new();
    }

    scope.info(format!("Checking {} existing locations", rows.len()));
    let scope = scope.nested();

    let names: BTreeSet<String> = rows.iter().map(|r| r.name.clone()).collect();

    let unknown: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| !catalog.is_known(n))
        .collect();
    if !unknown.is_empty() {
        scope.error_list("Unknown locations found: ", unknown, true);
    }

    let aliased: Vec<&str> = names
        .iter()
        .map(String::as_str)
        .filter(|n| catalog.is_alias(n))
        .collect();
    if !aliased.is_empty() {
        scope.warn_list(
            "Locations aliases used. Maybe change to primary location names: ",
            aliased,
            false,
        );
    }

    fold_catalog_bounds(&names, catalog, extents, &scope);

    names
}

/// Widen `extents` to cover the catalog boxes of all resolvable `names`.
/// Leaves the extents untouched when nothing resolves.
pub fn fold_catalog_bounds(
    names: &BTreeSet<String>,
    catalog: &ResourceCatalog,
    extents: &Extents,
    scope: &Scope<'_>,
) {
    let resolved: BTreeSet<&str> = names.iter().filter_map(|n| catalog.resolve(n)).collect();

    let combined = resolved
        .iter()
        .filter_map(|n| catalog.bounds(n))
        .fold(None, |acc: Option<BoundingBox>, bbox| {
            Some(acc.map_or(*bbox, |a| a.union(bbox)))
        });

    if let Some(bbox) = combined {
        extents.update(Axis::Longitude, &bbox.longitudes(), scope);
        extents.update(Axis::Latitude, &bbox.latitudes(), scope);
    }
}
