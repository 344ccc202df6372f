//! JSON report of a check run.

use chrono::{DateTime, Utc};
use location_validator::{Diagnostic, LocationIndexEntry};
use locations_common::Range;
use serde::Serialize;
use std::process::ExitCode;

/// Overall outcome of checking one sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Loaded without errors.
    Valid,
    /// Loaded, but with data errors.
    Invalid,
    /// The sheet could not be interpreted.
    Rejected,
}

impl CheckStatus {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CheckStatus::Valid => ExitCode::SUCCESS,
            CheckStatus::Invalid => ExitCode::from(1),
            CheckStatus::Rejected => ExitCode::from(2),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtentSummary {
    pub latitude: Option<Range>,
    pub longitude: Option<Range>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationReport {
    pub generated_at: DateTime<Utc>,
    pub sheet: String,
    pub gazetteer: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structural_error: Option<String>,
    pub error_count: usize,
    pub warning_count: usize,
    pub locations: Vec<String>,
    pub location_index: Vec<LocationIndexEntry>,
    pub extents: ExtentSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl LocationReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
