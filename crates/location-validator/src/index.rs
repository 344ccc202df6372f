//! Location index assembly.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use crate::cell::{is_not_available, is_supplied};
use crate::header::HeaderSet;
use crate::partition::Partition;

/// Geometry recorded for a new location.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometrySpec {
    /// WKT text as supplied.
    Wkt(String),
    /// Point built from the latitude and longitude cells.
    Point { longitude: String, latitude: String },
}

impl fmt::Display for GeometrySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometrySpec::Wkt(wkt) => f.write_str(wkt),
            GeometrySpec::Point {
                longitude,
                latitude,
            } => write!(f, "Point({} {})", longitude, latitude),
        }
    }
}

impl Serialize for GeometrySpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One location of a loaded sheet.
///
/// The declared type and the geometry are independent: a "transect" may
/// carry a single point, and a "polygon" may have no geometry at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationIndexEntry {
    pub name: String,
    pub is_new: bool,
    pub declared_type: Option<String>,
    pub geometry: Option<GeometrySpec>,
}

/// Build the location set and index: existing rows first, then new rows,
/// each in sheet order.
pub fn assemble_index(
    headers: &HeaderSet,
    partition: &Partition,
) -> (BTreeSet<String>, Vec<LocationIndexEntry>) {
    let mut index: Vec<LocationIndexEntry> = partition
        .existing
        .iter()
        .map(|row| LocationIndexEntry {
            name: row.name.clone(),
            is_new: false,
            declared_type: None,
            geometry: None,
        })
        .collect();

    for row in &partition.new {
        // A WKT column entry other than the sentinel decides the geometry,
        // even when blank.
        let geometry = if headers.has_wkt() && !is_not_available(&row.wkt) {
            row.wkt.as_ref().map(|wkt| GeometrySpec::Wkt(wkt.to_string()))
        } else {
            match (&row.longitude, &row.latitude) {
                (Some(lon), Some(lat))
                    if headers.has_lonlat()
                        && is_supplied(&row.longitude)
                        && is_supplied(&row.latitude) =>
                {
                    Some(GeometrySpec::Point {
                        longitude: lon.to_string(),
                        latitude: lat.to_string(),
                    })
                }
                _ => None,
            }
        };

        index.push(LocationIndexEntry {
            name: row.name.clone(),
            is_new: true,
            declared_type: row.location_type.as_ref().map(|t| t.to_string()),
            geometry,
        });
    }

    let locations = index.iter().map(|e| e.name.clone()).collect();
    (locations, index)
}
