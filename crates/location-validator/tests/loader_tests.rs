//! End-to-end loads of locations sheets.

use location_validator::{
    Diagnostics, Extents, GeometrySpec, LoadOptions, Locations, LocationsError, RawCell,
    ResourceCatalog, Severity, ValidationResult,
};
use locations_common::{Axis, Range};
use serde_json::{json, Value};
use test_utils::{assert_approx_eq, SheetBuilder, GAZETTEER_JSON};

struct Load {
    result: Result<ValidationResult, LocationsError>,
    extents: Extents,
    diagnostics: Diagnostics,
}

fn load_with(sheet: Value, options: LoadOptions) -> Load {
    let catalog = ResourceCatalog::from_json_str(GAZETTEER_JSON).unwrap();
    let grid = RawCell::grid_from_json(sheet).unwrap();
    let extents = Extents::default();
    let diagnostics = Diagnostics::new();
    let result = Locations::new(options).load(&grid, &catalog, &extents, &diagnostics);
    Load {
        result,
        extents,
        diagnostics,
    }
}

fn load(sheet: Value) -> Load {
    load_with(sheet, LoadOptions::default())
}

#[test]
fn test_non_text_header_aborts_load() {
    let sheet = SheetBuilder::with_raw_headers(vec![json!("Location name"), json!(3)])
        .row(vec![json!("A_1"), json!(1)])
        .build();
    let outcome = load(sheet);

    assert_eq!(outcome.result, Err(LocationsError::NonTextHeaders));
    assert_eq!(outcome.extents.range(Axis::Latitude), None);
}

#[test]
fn test_duplicate_headers_abort_load() {
    let sheet = SheetBuilder::new(["Location name", "Type", "TYPE"]).build();
    let outcome = load(sheet);
    assert!(matches!(outcome.result, Err(LocationsError::DuplicateHeaders(_))));
}

#[test]
fn test_blank_rows_dropped_without_error() {
    let sheet = SheetBuilder::new(["Location name", "Notes"])
        .row(vec![json!("A_1"), json!(null)])
        .blank_row()
        .row(vec![json!("A_2"), json!("edge")])
        .blank_row()
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    assert_eq!(result.error_count, 0);
    assert_eq!(result.location_index.len(), 2);
}

#[test]
fn test_new_locations_without_geometry_columns() {
    let sheet = SheetBuilder::new(["Location name", "New", "Type"])
        .row(vec![json!("N_1"), json!("yes"), json!("point")])
        .row(vec![json!("N_2"), json!("yes"), json!("area")])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    let matching: Vec<_> = outcome
        .diagnostics
        .with_severity(Severity::Error)
        .into_iter()
        .filter(|d| d.message.contains("must provide Lat/Long or WKT"))
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(result.error_count, 1);
}

#[test]
fn test_existing_location_extent() {
    let sheet = SheetBuilder::new(["Location name"]).row(vec![json!("A1")]).build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    assert_eq!(result.error_count, 0);
    assert_eq!(outcome.extents.range(Axis::Longitude), Some(Range::new(10.0, 20.0)));
    assert_eq!(outcome.extents.range(Axis::Latitude), Some(Range::new(0.0, 5.0)));
}

#[test]
fn test_missing_sentinel_respected() {
    let sheet = SheetBuilder::new(["Location name", "New", "Type", "Latitude", "Longitude"])
        .row(vec![json!("N_1"), json!("yes"), json!("Point"), json!("NA"), json!("NA")])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    assert_eq!(result.error_count, 0);
    assert_eq!(outcome.extents.range(Axis::Latitude), None);
    assert_eq!(outcome.extents.range(Axis::Longitude), None);
    assert_eq!(result.location_index[0].geometry, None);
}

#[test]
fn test_three_dimensional_wkt_rejected() {
    let sheet = SheetBuilder::new(["Location name", "New", "Type", "WKT"])
        .row(vec![json!("N_3D"), json!("yes"), json!("point"), json!("POINT Z (1 2 3)")])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    let bad = outcome
        .diagnostics
        .find(Severity::Error, "WKT information badly formatted")
        .unwrap();
    assert_eq!(bad.values, vec!["N_3D".to_string()]);
    assert_eq!(result.error_count, 1);
    assert_eq!(outcome.extents.range(Axis::Latitude), None);
    assert_eq!(outcome.extents.range(Axis::Longitude), None);
}

#[test]
fn test_point_geometry_from_lonlat() {
    let sheet = SheetBuilder::new(["Location name", "New", "Type", "Latitude", "Longitude"])
        .row(vec![json!("N_1"), json!("yes"), json!("point"), json!(5), json!(10)])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    let entry = &result.location_index[0];
    assert!(entry.is_new);
    assert_eq!(entry.declared_type.as_deref(), Some("point"));
    assert_eq!(
        entry.geometry.as_ref().map(GeometrySpec::to_string).as_deref(),
        Some("Point(10 5)")
    );
    assert_eq!(outcome.extents.range(Axis::Longitude), Some(Range::new(10.0, 10.0)));
}

#[test]
fn test_index_order_existing_then_new() {
    let sheet = SheetBuilder::new(["Location name", "New", "Type", "WKT"])
        .row(vec![json!("N_1"), json!("yes"), json!("polygon"), json!("NA")])
        .row(vec![json!("A_2"), json!("no"), json!(null), json!(null)])
        .row(vec![json!("N_2"), json!("Yes"), json!("linestring"), json!("LINESTRING (116 4, 117 5)")])
        .row(vec![json!("A_1"), json!("NO"), json!(null), json!(null)])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    let names: Vec<&str> = result.location_index.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["A_2", "A_1", "N_1", "N_2"]);
    assert_eq!(result.error_count, 0);

    let lon = outcome.extents.range(Axis::Longitude).unwrap();
    assert_approx_eq!(lon.min, 116.0, 1e-9);
    assert_approx_eq!(lon.max, 117.0, 1e-9);
}

#[test]
fn test_numeric_names_resolve() {
    let sheet = SheetBuilder::new(["Location name"])
        .row(vec![json!(1)])
        .row(vec![json!(2)])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    assert_eq!(result.error_count, 0);
    assert!(result.locations.contains("1"));
    assert!(result.locations.contains("2"));
}

#[test]
fn test_duplicate_names_kept_and_reported() {
    let sheet = SheetBuilder::new(["Location name"])
        .row(vec![json!("A_1")])
        .row(vec![json!("A_1")])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.location_index.len(), 2);
    assert_eq!(result.locations.len(), 1);
}

#[test]
fn test_alias_warning_is_not_an_error() {
    let sheet = SheetBuilder::new(["Location name"]).row(vec![json!("Old_B")]).build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    assert_eq!(result.error_count, 0);
    assert_eq!(outcome.diagnostics.warning_count(), 1);
    assert_eq!(outcome.extents.range(Axis::Longitude), Some(Range::new(117.50, 117.60)));
}

#[test]
fn test_parallel_matches_sequential() {
    let sheet = || {
        SheetBuilder::new(["Location name", "New", "Type", "Latitude", "Longitude"])
            .row(vec![json!("A_1"), json!("no"), json!(null), json!(null), json!(null)])
            .row(vec![json!("B_1"), json!("no"), json!(null), json!(null), json!(null)])
            .row(vec![json!("N_1"), json!("yes"), json!("point"), json!(-2.5), json!(120.5)])
            .row(vec![json!("Ghost"), json!("no"), json!(null), json!(null), json!(null)])
            .build()
    };

    let sequential = load(sheet());
    let parallel = load_with(sheet(), LoadOptions { parallel: true });

    assert_eq!(sequential.result, parallel.result);
    for axis in Axis::ALL {
        assert_eq!(sequential.extents.range(axis), parallel.extents.range(axis));
    }
    assert_eq!(
        parallel.extents.range(Axis::Latitude),
        Some(Range::new(-2.5, 5.10))
    );
    assert_eq!(parallel.result.unwrap().error_count, 1);
}

#[test]
fn test_error_count_is_per_load() {
    let catalog = ResourceCatalog::from_json_str(GAZETTEER_JSON).unwrap();
    let extents = Extents::default();
    let diagnostics = Diagnostics::new();
    let mut locations = Locations::default();

    let bad = RawCell::grid_from_json(
        SheetBuilder::new(["Location name"]).row(vec![json!("Ghost")]).build(),
    )
    .unwrap();
    let good = RawCell::grid_from_json(
        SheetBuilder::new(["Location name"]).row(vec![json!("A_2")]).build(),
    )
    .unwrap();

    let first = locations.load(&bad, &catalog, &extents, &diagnostics).unwrap();
    let second = locations.load(&good, &catalog, &extents, &diagnostics).unwrap();

    assert_eq!(first.error_count, 1);
    assert_eq!(second.error_count, 0);
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(locations.locations().len(), 2);
}

#[test]
fn test_deeply_nested_wkt_is_bad_wkt() {
    let depth = 1700;
    let nested = format!(
        "{}POINT(1 2){}",
        "GEOMETRYCOLLECTION(".repeat(depth),
        ")".repeat(depth)
    );
    let sheet = SheetBuilder::new(["Location name", "New", "Type", "WKT"])
        .row(vec![json!("N_Deep"), json!("yes"), json!("point"), json!(nested)])
        .row(vec![json!("N_Flat"), json!("yes"), json!("point"), json!("POINT (116.5 4.5)")])
        .build();
    let outcome = load(sheet);
    let result = outcome.result.unwrap();

    let bad = outcome
        .diagnostics
        .find(Severity::Error, "WKT information badly formatted")
        .unwrap();
    assert_eq!(bad.values, vec!["N_Deep".to_string()]);
    assert_eq!(result.error_count, 1);
    assert_eq!(outcome.extents.range(Axis::Longitude), Some(Range::new(116.5, 116.5)));
}
