//! Header row classification.

use std::collections::BTreeSet;

use crate::cell::{decode_row, RawCell};
use crate::diagnostics::Scope;
use crate::error::{LocationsError, LocationsResult};

pub const LOCATION_NAME: &str = "location name";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const WKT: &str = "wkt";
pub const NEW: &str = "new";
pub const TYPE: &str = "type";

/// Column layout of a locations sheet.
///
/// Optional columns are held as indices so later stages never look a
/// column up by name. A latitude column without a longitude column (or the
/// reverse) is treated as if neither were present.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSet {
    /// Lower-cased header names in sheet order.
    pub columns: Vec<String>,
    pub location_name: usize,
    /// `(latitude, longitude)` column indices.
    pub lonlat: Option<(usize, usize)>,
    pub wkt: Option<usize>,
    pub new_flag: Option<usize>,
    pub location_type: Option<usize>,
}

impl HeaderSet {
    pub fn has_lonlat(&self) -> bool {
        self.lonlat.is_some()
    }

    pub fn has_wkt(&self) -> bool {
        self.wkt.is_some()
    }

    pub fn has_new_flag(&self) -> bool {
        self.new_flag.is_some()
    }

    pub fn has_type(&self) -> bool {
        self.location_type.is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

/// Classify the header row.
///
/// Non-text headers, duplicated headers and a missing location name column
/// are structural failures. A lone latitude or longitude column is reported
/// and processing continues without coordinates.
pub fn classify_headers(cells: &[RawCell], scope: &Scope<'_>) -> LocationsResult<HeaderSet> {
    if cells.is_empty() || !cells.iter().all(RawCell::is_text) {
        return Err(LocationsError::NonTextHeaders);
    }

    let decoded = decode_row(cells);
    if decoded.whitespace_only > 0 {
        return Err(LocationsError::NonTextHeaders);
    }
    if !decoded.padded.is_empty() {
        scope.error_list("Whitespace padded data in headers: ", &decoded.padded, false);
    }

    // The sentinel decodes to its own variant but is still a header name here.
    let columns: Vec<String> = decoded
        .values
        .iter()
        .map(|v| v.as_ref().map(|v| v.normalized()).unwrap_or_default())
        .collect();

    let duplicates: BTreeSet<String> = {
        let mut seen = BTreeSet::new();
        columns
            .iter()
            .filter(|c| !seen.insert(c.as_str()))
            .cloned()
            .collect()
    };
    if !duplicates.is_empty() {
        return Err(LocationsError::DuplicateHeaders(duplicates.into_iter().collect()));
    }

    let mut headers = HeaderSet {
        columns,
        location_name: 0,
        lonlat: None,
        wkt: None,
        new_flag: None,
        location_type: None,
    };

    headers.location_name = headers
        .position(LOCATION_NAME)
        .ok_or(LocationsError::MissingLocationName)?;

    match (headers.position(LATITUDE), headers.position(LONGITUDE)) {
        (Some(lat), Some(lon)) => headers.lonlat = Some((lat, lon)),
        (None, None) => {}
        _ => scope.error("Provide both or neither of latitude and longitude"),
    }

    headers.wkt = headers.position(WKT);
    headers.new_flag = headers.position(NEW);
    headers.location_type = headers.position(TYPE);

    Ok(headers)
}
