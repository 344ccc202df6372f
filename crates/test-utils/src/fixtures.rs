//! Common test fixtures for location validation tests.
//!
//! Bounding boxes follow the gazetteer ordering `[lon_min, lon_max, lat_min, lat_max]`.

use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Small gazetteer document in the on-disk JSON layout.
pub const GAZETTEER_JSON: &str = r#"{
    "locations": {
        "A_1": [116.75, 116.80, 4.70, 4.75],
        "A_2": [116.90, 117.00, 4.60, 4.65],
        "B_1": [117.50, 117.60, 5.00, 5.10],
        "A1": [10, 20, 0, 5],
        "1": [115.00, 115.10, 4.00, 4.10],
        "2": [115.20, 115.30, 4.20, 4.30]
    },
    "aliases": {
        "Alias_A1": "A_1",
        "Old_B": "B_1"
    }
}"#;

/// Names present in [`GAZETTEER_JSON`] as primary locations.
pub const KNOWN_LOCATIONS: [&str; 6] = ["A_1", "A_2", "B_1", "A1", "1", "2"];

/// Builds a location sheet as a JSON grid: row 0 holds the headers.
///
/// Cells are JSON scalars: strings, numbers, booleans or `null` for an empty cell.
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    width: usize,
    rows: Vec<Vec<Value>>,
}

impl SheetBuilder {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header: Vec<Value> = headers.into_iter().map(|h| Value::String(h.into())).collect();
        Self {
            width: header.len(),
            rows: vec![header],
        }
    }

    /// Start from an arbitrary header row, e.g. one containing non-text cells.
    pub fn with_raw_headers(headers: Vec<Value>) -> Self {
        Self {
            width: headers.len(),
            rows: vec![headers],
        }
    }

    pub fn row(mut self, cells: Vec<Value>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Append a row of empty cells as wide as the header.
    pub fn blank_row(mut self) -> Self {
        self.rows.push(vec![Value::Null; self.width]);
        self
    }

    pub fn build(self) -> Value {
        json!(self.rows)
    }
}

/// Temporary directory holding fixture files. Removed on drop.
pub struct FixtureDir {
    dir: TempDir,
}

impl FixtureDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Write `contents` to `name` inside the directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path)?;
        file.write_all(contents.as_bytes())?;
        Ok(path)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}
