//! Latitude/longitude extent accumulation for a load.

use locations_common::{Axis, Extent, ExtentsConfig, Range};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use crate::diagnostics::Scope;

/// Extents for both axes, owned by the caller and widened by a load.
///
/// Each axis is behind its own mutex so concurrent stages serialise their
/// updates. Widening is commutative, so only atomicity matters.
#[derive(Debug)]
pub struct Extents {
    latitude: Mutex<Extent>,
    longitude: Mutex<Extent>,
}

impl Default for Extents {
    fn default() -> Self {
        Self::new(&ExtentsConfig::default())
    }
}

impl Extents {
    pub fn new(config: &ExtentsConfig) -> Self {
        Self {
            latitude: Mutex::new(Extent::with_bounds(Axis::Latitude, config.latitude)),
            longitude: Mutex::new(Extent::with_bounds(Axis::Longitude, config.longitude)),
        }
    }

    fn axis(&self, axis: Axis) -> &Mutex<Extent> {
        match axis {
            Axis::Latitude => &self.latitude,
            Axis::Longitude => &self.longitude,
        }
    }

    /// Current range of `axis`.
    pub fn range(&self, axis: Axis) -> Option<Range> {
        self.axis(axis)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .range()
    }

    /// Fold `values` into `axis`, reporting rejected updates as errors and
    /// soft-bound excursions as warnings.
    pub fn update(&self, axis: Axis, values: &[f64], scope: &Scope<'_>) {
        let result = self
            .axis(axis)
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .update(values);

        match result {
            Ok(update) => {
                if update.outside_soft {
                    if let Some(r) = update.supplied {
                        scope.warn(format!(
                            "{} values range ({}, {}) exceeds soft bounds",
                            capitalize(axis.as_str()),
                            r.min,
                            r.max
                        ));
                    }
                }
                debug!(axis = %axis, range = ?update.range, "Extent updated");
            }
            Err(e) => scope.error(capitalize(&e.to_string())),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
