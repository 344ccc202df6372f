//! Checks for locations declared as new to the gazetteer.

use locations_common::Axis;
use std::collections::BTreeSet;
use tracing::debug;

use crate::catalog::ResourceCatalog;
use crate::cell::{is_not_available, CellValue, Field};
use crate::diagnostics::Scope;
use crate::extents::Extents;
use crate::header::HeaderSet;
use crate::row::LocationRow;

/// Accepted values of the type column, compared lower-cased.
pub const LOCATION_TYPES: [&str; 5] = ["point", "linestring", "polygon", "transect", "area"];

/// Validate new location rows and fold their coordinates into `extents`.
pub fn validate_new_locations(
    rows: &[LocationRow],
    headers: &HeaderSet,
    catalog: &ResourceCatalog,
    extents: &Extents,
    scope: &Scope<'_>,
) {
    if rows.is_empty() {
        return;
    }

    scope.info(format!("Checking {} new locations", rows.len()));
    let scope = scope.nested();

    check_types(rows, headers, &scope);

    let collisions: Vec<&str> = rows
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| catalog.is_known(name))
        .collect();
    if !collisions.is_empty() {
        scope.error_list(
            "New location names duplicate existing names and aliases: ",
            collisions,
            false,
        );
    }

    if !headers.has_lonlat() && !headers.has_wkt() {
        scope.error("New locations reported: you must provide Lat/Long or WKT");
        return;
    }

    if headers.has_lonlat() {
        scope.info("Validating lat / long data");
        for axis in Axis::ALL {
            check_coordinates(rows, axis, extents, &scope.nested());
        }
    }

    if headers.has_wkt() {
        scope.info("Validating WKT data");
        check_wkt(rows, extents, &scope.nested());
    }
}

fn check_types(rows: &[LocationRow], headers: &HeaderSet, scope: &Scope<'_>) {
    if !headers.has_type() {
        scope.error("New locations reported but Type field missing");
        return;
    }

    let types: Vec<Option<String>> = rows
        .iter()
        .map(|r| r.location_type.as_ref().map(CellValue::normalized))
        .collect();

    if types.iter().any(Option::is_none) {
        scope.error("Types for new locations contains blank entries.");
    }

    let unknown: BTreeSet<&str> = types
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|t| !LOCATION_TYPES.contains(t))
        .collect();
    if !unknown.is_empty() {
        scope.error_list("Unknown location types: ", unknown, true);
    }
}

fn axis_field(row: &LocationRow, axis: Axis) -> &Field {
    match axis {
        Axis::Latitude => &row.latitude,
        Axis::Longitude => &row.longitude,
    }
}

/// One axis of the lat/long path: sentinel values are skipped, blanks and
/// non-numeric values are errors, numbers go to the extent in one update.
fn check_coordinates(rows: &[LocationRow], axis: Axis, extents: &Extents, scope: &Scope<'_>) {
    let mut values = Vec::with_capacity(rows.len());
    let mut has_blank = false;
    let mut non_numeric = BTreeSet::new();

    for row in rows {
        match axis_field(row, axis) {
            None => has_blank = true,
            Some(CellValue::NotAvailable) => {}
            Some(CellValue::Number(n)) => values.push(*n),
            Some(other) => {
                non_numeric.insert(other.to_string());
            }
        }
    }

    if has_blank {
        scope.error(format!("Blank {} values for new locations: use NA.", axis));
    }
    if !non_numeric.is_empty() {
        scope.error_list(
            format!("Non-numeric {} values for new locations: ", axis),
            non_numeric,
            true,
        );
    }

    extents.update(axis, &values, scope);
}

/// The WKT path: parse each supplied geometry, collect every unusable one
/// into a single error and fold valid 2-D bounds into the extents.
fn check_wkt(rows: &[LocationRow], extents: &Extents, scope: &Scope<'_>) {
    let candidates: Vec<&LocationRow> = rows.iter().filter(|r| !is_not_available(&r.wkt)).collect();

    if candidates.iter().any(|r| r.wkt.is_none()) {
        scope.error("WKT field contains blanks for new locations, use NA");
    }

    let mut bad_wkt = Vec::new();
    let mut longitudes = Vec::new();
    let mut latitudes = Vec::new();

    for row in candidates {
        let Some(value) = &row.wkt else {
            continue;
        };

        match wkt_geometry::inspect(&value.to_string()) {
            Err(e) => {
                debug!(location = %row.name, error = %e, "WKT failed to parse");
                bad_wkt.push(row.name.as_str());
            }
            Ok(report) if !report.is_valid || report.has_z => {
                debug!(
                    location = %row.name,
                    reason = report.invalid_reason.as_deref().unwrap_or("has z"),
                    "WKT geometry rejected"
                );
                bad_wkt.push(row.name.as_str());
            }
            Ok(report) => {
                if let Some(bounds) = report.bounds {
                    longitudes.extend(bounds.longitudes());
                    latitudes.extend(bounds.latitudes());
                }
            }
        }
    }

    if !bad_wkt.is_empty() {
        scope.error_list(
            "WKT information badly formatted, not geometrically valid or 3D: ",
            bad_wkt,
            true,
        );
    }

    extents.update(Axis::Latitude, &latitudes, scope);
    extents.update(Axis::Longitude, &longitudes, scope);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::RawCell;
    use crate::diagnostics::{Diagnostics, Severity};
    use crate::header::classify_headers;
    use locations_common::Range;
    use test_utils::GAZETTEER_JSON;

    fn headers(names: &[&str]) -> HeaderSet {
        let cells: Vec<RawCell> = names.iter().map(|n| RawCell::Text(n.to_string())).collect();
        classify_headers(&cells, &Diagnostics::new().root()).unwrap()
    }

    fn new_row(name: &str, kind: &str) -> LocationRow {
        LocationRow {
            row: 2,
            name: name.into(),
            new_flag: Some(CellValue::Text("yes".into())),
            location_type: Some(CellValue::Text(kind.into())),
            latitude: None,
            longitude: None,
            wkt: None,
        }
    }

    fn catalog() -> ResourceCatalog {
        ResourceCatalog::from_json_str(GAZETTEER_JSON).unwrap()
    }

    #[test]
    fn test_type_column_required() {
        let diagnostics = Diagnostics::new();
        let mut row = new_row("N_1", "point");
        row.wkt = Some(CellValue::NotAvailable);
        validate_new_locations(
            &[row],
            &headers(&["Location name", "New", "WKT"]),
            &catalog(),
            &Extents::default(),
            &diagnostics.root(),
        );
        assert!(diagnostics.find(Severity::Error, "Type field missing").is_some());
        assert_eq!(diagnostics.error_count(), 1);
    }

    #[test]
    fn test_unknown_and_blank_types() {
        let diagnostics = Diagnostics::new();
        let mut blank = new_row("N_2", "");
        blank.location_type = None;
        let rows: Vec<LocationRow> = vec![new_row("N_1", "Blob"), blank, new_row("N_3", "AREA")]
            .into_iter()
            .map(|mut r| {
                r.wkt = Some(CellValue::NotAvailable);
                r
            })
            .collect();

        validate_new_locations(
            &rows,
            &headers(&["Location name", "New", "Type", "WKT"]),
            &catalog(),
            &Extents::default(),
            &diagnostics.root(),
        );

        let unknown = diagnostics.find(Severity::Error, "Unknown location types").unwrap();
        assert_eq!(unknown.values, vec!["blob".to_string()]);
        assert!(diagnostics.find(Severity::Error, "blank entries").is_some());
        assert_eq!(diagnostics.error_count(), 2);
    }

    #[test]
    fn test_collision_with_catalog() {
        let diagnostics = Diagnostics::new();
        let rows: Vec<LocationRow> = ["A_1", "Old_B", "N_1"]
            .iter()
            .map(|n| {
                let mut r = new_row(n, "point");
                r.wkt = Some(CellValue::NotAvailable);
                r
            })
            .collect();

        validate_new_locations(
            &rows,
            &headers(&["Location name", "New", "Type", "WKT"]),
            &catalog(),
            &Extents::default(),
            &diagnostics.root(),
        );

        let error = diagnostics.find(Severity::Error, "duplicate existing").unwrap();
        assert_eq!(error.values, vec!["A_1".to_string(), "Old_B".to_string()]);
    }

    #[test]
    fn test_geometry_required() {
        let diagnostics = Diagnostics::new();
        validate_new_locations(
            &[new_row("N_1", "point")],
            &headers(&["Location name", "New", "Type"]),
            &catalog(),
            &Extents::default(),
            &diagnostics.root(),
        );
        let errors = diagnostics.with_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].message,
            "New locations reported: you must provide Lat/Long or WKT"
        );
    }

    #[test]
    fn test_lonlat_sentinel_and_blanks() {
        let diagnostics = Diagnostics::new();
        let extents = Extents::default();

        let mut na = new_row("N_1", "point");
        na.latitude = Some(CellValue::NotAvailable);
        na.longitude = Some(CellValue::NotAvailable);
        let mut valued = new_row("N_2", "point");
        valued.latitude = Some(CellValue::Number(5.0));
        valued.longitude = None;

        validate_new_locations(
            &[na, valued],
            &headers(&["Location name", "New", "Type", "Latitude", "Longitude"]),
            &catalog(),
            &extents,
            &diagnostics.root(),
        );

        assert_eq!(extents.range(Axis::Latitude), Some(Range::new(5.0, 5.0)));
        assert_eq!(extents.range(Axis::Longitude), None);
        let errors = diagnostics.with_severity(Severity::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Blank longitude values for new locations: use NA.");
    }

    #[test]
    fn test_non_numeric_coordinates() {
        let diagnostics = Diagnostics::new();
        let mut row = new_row("N_1", "point");
        row.latitude = Some(CellValue::Text("north".into()));
        row.longitude = Some(CellValue::Number(116.0));

        validate_new_locations(
            &[row],
            &headers(&["Location name", "New", "Type", "Latitude", "Longitude"]),
            &catalog(),
            &Extents::default(),
            &diagnostics.root(),
        );
        let error = diagnostics.find(Severity::Error, "Non-numeric latitude").unwrap();
        assert_eq!(error.values, vec!["north".to_string()]);
    }

    #[test]
    fn test_wkt_path() {
        let diagnostics = Diagnostics::new();
        let extents = Extents::default();

        let wkt = |name: &str, value: Field| {
            let mut r = new_row(name, "polygon");
            r.wkt = value;
            r
        };
        let rows = vec![
            wkt("Good", Some(CellValue::Text("POLYGON((1 2, 3 2, 3 4, 1 4, 1 2))".into()))),
            wkt("Tall", Some(CellValue::Text("POINT Z (1 2 3)".into()))),
            wkt("Bowtie", Some(CellValue::Text("POLYGON((0 0, 1 1, 1 0, 0 1, 0 0))".into()))),
            wkt("Garbage", Some(CellValue::Text("not wkt".into()))),
            wkt("Skipped", Some(CellValue::NotAvailable)),
            wkt("Blank", None),
        ];

        validate_new_locations(
            &rows,
            &headers(&["Location name", "New", "Type", "WKT"]),
            &catalog(),
            &extents,
            &diagnostics.root(),
        );

        let bad = diagnostics.find(Severity::Error, "WKT information badly formatted").unwrap();
        assert_eq!(bad.values, vec!["Tall", "Bowtie", "Garbage"]);
        assert!(bad.quoted);
        assert!(diagnostics.find(Severity::Error, "contains blanks").is_some());
        assert_eq!(diagnostics.error_count(), 2);
        assert_eq!(extents.range(Axis::Longitude), Some(Range::new(1.0, 3.0)));
        assert_eq!(extents.range(Axis::Latitude), Some(Range::new(2.0, 4.0)));
    }
}
