//! Cell values and row decoding.
//!
//! Raw cells arrive from the sheet reader already typed (text, number, bool
//! or empty). Decoding trims text, turns whitespace-only text into a blank
//! cell and recognises the explicit-missing sentinel, recording padding and
//! whitespace anomalies for the sanitizer to report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal marking a value as intentionally not available.
pub const MISSING_SENTINEL: &str = "NA";

/// A cell as produced by the sheet reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawCell {
    /// Decode a JSON grid (array of arrays of scalars) into raw cells.
    pub fn grid_from_json(value: serde_json::Value) -> Result<Vec<Vec<RawCell>>, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, RawCell::Text(_))
    }
}

/// A decoded, non-blank cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    /// The explicit-missing sentinel `NA`.
    NotAvailable,
}

/// A decoded cell: `None` is a blank cell.
pub type Field = Option<CellValue>;

impl CellValue {
    pub fn is_not_available(&self) -> bool {
        matches!(self, CellValue::NotAvailable)
    }

    /// Lower-cased text form, used for case-insensitive vocabularies.
    pub fn normalized(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            // f64 Display drops a zero fraction: 1.0 -> "1", 116.75 -> "116.75"
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::NotAvailable => f.write_str(MISSING_SENTINEL),
        }
    }
}

/// Field is present and is not the explicit-missing sentinel.
pub fn is_supplied(field: &Field) -> bool {
    matches!(field, Some(v) if !v.is_not_available())
}

/// Field is the explicit-missing sentinel.
pub fn is_not_available(field: &Field) -> bool {
    matches!(field, Some(CellValue::NotAvailable))
}

/// One sheet row after decoding.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedRow {
    pub values: Vec<Field>,
    /// Debug renderings of text cells with leading or trailing whitespace.
    pub padded: Vec<String>,
    /// Number of text cells containing only whitespace.
    pub whitespace_only: usize,
}

impl DecodedRow {
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Value at column `index`; cells past the end of a short row are blank.
    pub fn get(&self, index: usize) -> Field {
        self.values.get(index).cloned().flatten()
    }
}

/// Decode a row of raw cells.
pub fn decode_row(cells: &[RawCell]) -> DecodedRow {
    let mut row = DecodedRow::default();

    for cell in cells {
        let value = match cell {
            RawCell::Empty => None,
            RawCell::Bool(b) => Some(CellValue::Bool(*b)),
            RawCell::Number(n) => Some(CellValue::Number(*n)),
            RawCell::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    if !text.is_empty() {
                        row.whitespace_only += 1;
                    }
                    None
                } else {
                    if trimmed.len() != text.len() {
                        row.padded.push(format!("{:?}", text));
                    }
                    if trimmed == MISSING_SENTINEL {
                        Some(CellValue::NotAvailable)
                    } else {
                        Some(CellValue::Text(trimmed.to_string()))
                    }
                }
            }
        };
        row.values.push(value);
    }

    row
}
