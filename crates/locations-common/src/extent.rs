//! Extent accumulation along a single geographic axis.
//!
//! An [`Extent`] keeps only the reduction of everything it has been fed: the
//! narrowest [`Range`] covering all accepted values. Widening itself is the
//! pure function [`Range::widen`], so callers can compute a candidate range
//! without touching the accumulator.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ExtentError, ExtentResult};

/// Geographic axis of an extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Latitude, Axis::Longitude];

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    /// Physically meaningful limits for the axis in decimal degrees.
    pub fn natural_bounds(&self) -> (f64, f64) {
        match self {
            Axis::Latitude => (-90.0, 90.0),
            Axis::Longitude => (-180.0, 180.0),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range covering `values`, or `None` when there are none.
    pub fn covering(values: &[f64]) -> Option<Range> {
        values
            .iter()
            .map(|v| Range::new(*v, *v))
            .reduce(|a, b| a.union(&b))
    }

    /// Smallest range covering both ranges.
    pub fn union(&self, other: &Range) -> Range {
        Range::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Widen `current` to cover `values`. Pure: returns the new range.
    pub fn widen(current: Option<Range>, values: &[f64]) -> Option<Range> {
        match (current, Range::covering(values)) {
            (Some(cur), Some(new)) => Some(cur.union(&new)),
            (cur, new) => cur.or(new),
        }
    }

    pub fn within(&self, lower: f64, upper: f64) -> bool {
        self.min >= lower && self.max <= upper
    }
}

/// Optional hard and soft limits for one axis.
///
/// Values outside the hard limits are rejected; values outside the soft
/// limits are accepted but flagged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    #[serde(default)]
    pub hard: Option<(f64, f64)>,
    #[serde(default)]
    pub soft: Option<(f64, f64)>,
}

impl AxisBounds {
    /// Hard bounds set to the physical limits of `axis`, no soft bounds.
    pub fn natural(axis: Axis) -> Self {
        Self {
            hard: Some(axis.natural_bounds()),
            soft: None,
        }
    }
}

/// Extent bounds for both axes, as read from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtentsConfig {
    #[serde(default = "default_latitude_bounds")]
    pub latitude: AxisBounds,
    #[serde(default = "default_longitude_bounds")]
    pub longitude: AxisBounds,
}

fn default_latitude_bounds() -> AxisBounds {
    AxisBounds::natural(Axis::Latitude)
}

fn default_longitude_bounds() -> AxisBounds {
    AxisBounds::natural(Axis::Longitude)
}

impl Default for ExtentsConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude_bounds(),
            longitude: default_longitude_bounds(),
        }
    }
}

impl ExtentsConfig {
    pub fn bounds(&self, axis: Axis) -> AxisBounds {
        match axis {
            Axis::Latitude => self.latitude,
            Axis::Longitude => self.longitude,
        }
    }
}

/// Outcome of an accepted extent update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtentUpdate {
    /// Range of the values supplied in this update.
    pub supplied: Option<Range>,
    /// Accumulated range after the update.
    pub range: Option<Range>,
    /// The supplied values fall outside the soft bounds.
    pub outside_soft: bool,
}

/// Running range of values along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Extent {
    axis: Axis,
    bounds: AxisBounds,
    range: Option<Range>,
}

impl Extent {
    /// New empty extent with the natural hard bounds of `axis`.
    pub fn new(axis: Axis) -> Self {
        Self::with_bounds(axis, AxisBounds::natural(axis))
    }

    pub fn with_bounds(axis: Axis, bounds: AxisBounds) -> Self {
        Self {
            axis,
            bounds,
            range: None,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn bounds(&self) -> AxisBounds {
        self.bounds
    }

    /// Accumulated range, `None` until a non-empty update is accepted.
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// Widen the extent to cover `values`.
    ///
    /// Non-finite values or values outside the hard bounds reject the whole
    /// update. An empty slice is accepted and changes nothing.
    pub fn update(&mut self, values: &[f64]) -> ExtentResult<ExtentUpdate> {
        let non_finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_finite()).collect();
        if !non_finite.is_empty() {
            return Err(ExtentError::NonFinite {
                axis: self.axis.to_string(),
                values: non_finite,
            });
        }

        let supplied = Range::covering(values);

        if let (Some(r), Some((lower, upper))) = (supplied, self.bounds.hard) {
            if !r.within(lower, upper) {
                return Err(ExtentError::OutsideHardBounds {
                    axis: self.axis.to_string(),
                    min: r.min,
                    max: r.max,
                    lower,
                    upper,
                });
            }
        }

        let outside_soft = match (supplied, self.bounds.soft) {
            (Some(r), Some((lower, upper))) => !r.within(lower, upper),
            _ => false,
        };

        self.range = Range::widen(self.range, values);

        Ok(ExtentUpdate {
            supplied,
            range: self.range,
            outside_soft,
        })
    }
}
