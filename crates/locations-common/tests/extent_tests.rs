//! Tests for extent accumulation and extent bounds configuration.

use locations_common::{Axis, AxisBounds, Extent, ExtentError, ExtentsConfig, Range};
use test_utils::assert_approx_eq;

// ============================================================================
// Accumulation tests
// ============================================================================

#[test]
fn test_extent_starts_empty() {
    let extent = Extent::new(Axis::Longitude);
    assert_eq!(extent.range(), None);
    assert_eq!(extent.axis(), Axis::Longitude);
}

#[test]
fn test_extent_empty_update_is_noop() {
    let mut extent = Extent::new(Axis::Longitude);
    let update = extent.update(&[]).unwrap();
    assert_eq!(update.supplied, None);
    assert_eq!(extent.range(), None);
}

#[test]
fn test_extent_widens_over_updates() {
    let mut extent = Extent::new(Axis::Longitude);
    extent.update(&[116.75, 117.25]).unwrap();
    extent.update(&[115.5]).unwrap();
    extent.update(&[117.0]).unwrap();

    let range = extent.range().unwrap();
    assert_approx_eq!(range.min, 115.5, 1e-12);
    assert_approx_eq!(range.max, 117.25, 1e-12);
}

#[test]
fn test_extent_update_is_idempotent() {
    let mut once = Extent::new(Axis::Latitude);
    once.update(&[0.0, 5.0]).unwrap();

    let mut twice = Extent::new(Axis::Latitude);
    twice.update(&[0.0, 5.0]).unwrap();
    twice.update(&[0.0, 5.0]).unwrap();

    assert_eq!(once.range(), twice.range());
}

#[test]
fn test_extent_update_order_does_not_matter() {
    let mut a = Extent::new(Axis::Latitude);
    a.update(&[1.0]).unwrap();
    a.update(&[-3.0, 2.0]).unwrap();

    let mut b = Extent::new(Axis::Latitude);
    b.update(&[-3.0, 2.0]).unwrap();
    b.update(&[1.0]).unwrap();

    assert_eq!(a.range(), b.range());
    assert_eq!(a.range(), Some(Range::new(-3.0, 2.0)));
}

#[test]
fn test_extent_rejects_infinity() {
    let mut extent = Extent::new(Axis::Longitude);
    let err = extent.update(&[f64::INFINITY]).unwrap_err();
    assert!(matches!(err, ExtentError::NonFinite { ref axis, .. } if axis == "longitude"));
}

#[test]
fn test_extent_without_hard_bounds_accepts_anything_finite() {
    let mut extent = Extent::with_bounds(Axis::Longitude, AxisBounds::default());
    extent.update(&[540.0]).unwrap();
    assert_eq!(extent.range(), Some(Range::new(540.0, 540.0)));
}

#[test]
fn test_extent_hard_bound_error_message() {
    let mut extent = Extent::new(Axis::Longitude);
    let err = extent.update(&[-200.0, 10.0]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "longitude values range (-200, 10) exceeds hard bounds (-180, 180)"
    );
}

// ============================================================================
// Configuration tests
// ============================================================================

#[test]
fn test_extents_config_default_is_natural() {
    let config = ExtentsConfig::default();
    assert_eq!(config.latitude.hard, Some((-90.0, 90.0)));
    assert_eq!(config.longitude.hard, Some((-180.0, 180.0)));
    assert_eq!(config.latitude.soft, None);
}

#[test]
fn test_extents_config_from_yaml() {
    let yaml = r#"
latitude:
  hard: [-90, 90]
  soft: [-4, 8]
longitude:
  hard: [-180, 180]
  soft: [110, 120]
"#;
    let config: ExtentsConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.bounds(Axis::Latitude).soft, Some((-4.0, 8.0)));
    assert_eq!(config.bounds(Axis::Longitude).soft, Some((110.0, 120.0)));
}

#[test]
fn test_extents_config_partial_yaml_uses_defaults() {
    let yaml = "latitude:\n  soft: [-4, 8]\n";
    let config: ExtentsConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.latitude.hard, None);
    assert_eq!(config.latitude.soft, Some((-4.0, 8.0)));
    assert_eq!(config.longitude.hard, Some((-180.0, 180.0)));
}
