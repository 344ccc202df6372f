//! Row sanitizing: typed location records from raw data rows.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::cell::{decode_row, DecodedRow, Field, RawCell};
use crate::diagnostics::Scope;
use crate::header::HeaderSet;

/// One surviving data row of a locations sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRow {
    /// 1-based sheet row number.
    pub row: usize,
    /// Location name as text. Blank names are kept as an empty string.
    pub name: String,
    pub new_flag: Field,
    pub location_type: Field,
    pub latitude: Field,
    pub longitude: Field,
    pub wkt: Field,
}

fn column(values: &DecodedRow, index: Option<usize>) -> Field {
    index.and_then(|i| values.get(i))
}

/// Convert data rows to [`LocationRow`]s.
///
/// `rows` excludes the header row, so the first entry is sheet row 2.
/// Padding and whitespace anomalies are reported per row, fully blank rows
/// are dropped silently, and duplicated or blank names are reported across
/// the surviving set.
pub fn sanitize_rows(headers: &HeaderSet, rows: &[Vec<RawCell>], scope: &Scope<'_>) -> Vec<LocationRow> {
    let mut records = Vec::with_capacity(rows.len());

    for (offset, cells) in rows.iter().enumerate() {
        let row_number = offset + 2;
        let decoded = decode_row(cells);

        if !decoded.padded.is_empty() {
            scope.error_list(
                format!("Whitespace padded data in row {}: ", row_number),
                &decoded.padded,
                false,
            );
        }
        if decoded.whitespace_only > 0 {
            scope.error(format!("Blank cells with whitespace only in row {}", row_number));
        }
        if decoded.is_blank() {
            debug!(row = row_number, "Dropping blank row");
            continue;
        }

        let (lat, lon) = match headers.lonlat {
            Some((lat, lon)) => (Some(lat), Some(lon)),
            None => (None, None),
        };

        records.push(LocationRow {
            row: row_number,
            name: decoded
                .get(headers.location_name)
                .map(|v| v.to_string())
                .unwrap_or_default(),
            new_flag: column(&decoded, headers.new_flag),
            location_type: column(&decoded, headers.location_type),
            latitude: column(&decoded, lat),
            longitude: column(&decoded, lon),
            wkt: column(&decoded, headers.wkt),
        });
    }

    let blank_names: Vec<usize> = records
        .iter()
        .filter(|r| r.name.is_empty())
        .map(|r| r.row)
        .collect();
    if !blank_names.is_empty() {
        scope.error_list("Blank location names in rows: ", blank_names, false);
    }

    let duplicates = duplicated_names(&records);
    if !duplicates.is_empty() {
        scope.error_list("Duplicated location names: ", duplicates, true);
    }

    records
}

fn duplicated_names(records: &[LocationRow]) -> BTreeSet<&str> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.name.is_empty()) {
        *counts.entry(record.name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(name, _)| name)
        .collect()
}
