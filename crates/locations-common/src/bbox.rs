//! Geographic bounding boxes as stored in the gazetteer.

use serde::{Deserialize, Serialize};

/// A geographic bounding box in decimal degrees.
///
/// Field order follows the gazetteer layout: `(lon_min, lon_max, lat_min, lat_max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from the gazetteer ordering.
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        }
    }

    /// Build a checked bounding box from a gazetteer 4-tuple.
    pub fn from_gazetteer(values: [f64; 4]) -> Result<Self, BboxError> {
        let bbox = Self::new(values[0], values[1], values[2], values[3]);
        bbox.validate()?;
        Ok(bbox)
    }

    /// The degenerate box covering a single point.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self::new(lon, lon, lat, lat)
    }

    /// Smallest box covering every `(lon, lat)` pair, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points
            .into_iter()
            .map(|(lon, lat)| Self::point(lon, lat))
            .reduce(|acc, b| acc.union(&b))
    }

    /// Check that all values are finite and each axis is ordered.
    pub fn validate(&self) -> Result<(), BboxError> {
        let values = [self.min_lon, self.max_lon, self.min_lat, self.max_lat];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(BboxError::NonFinite(format!("{:?}", values)));
        }
        if self.min_lon > self.max_lon {
            return Err(BboxError::Inverted {
                axis: "longitude",
                min: self.min_lon,
                max: self.max_lon,
            });
        }
        if self.min_lat > self.max_lat {
            return Err(BboxError::Inverted {
                axis: "latitude",
                min: self.min_lat,
                max: self.max_lat,
            });
        }
        Ok(())
    }

    /// Smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_lon: self.min_lon.min(other.min_lon),
            max_lon: self.max_lon.max(other.max_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    /// Longitude values spanned by the box, as `[min, max]`.
    pub fn longitudes(&self) -> [f64; 2] {
        [self.min_lon, self.max_lon]
    }

    /// Latitude values spanned by the box, as `[min, max]`.
    pub fn latitudes(&self) -> [f64; 2] {
        [self.min_lat, self.max_lat]
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BboxError {
    #[error("Non-finite value in bounding box: {0}")]
    NonFinite(String),

    #[error("Inverted {axis} range in bounding box: {min} > {max}")]
    Inverted {
        axis: &'static str,
        min: f64,
        max: f64,
    },
}
