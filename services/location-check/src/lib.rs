//! Locations sheet checking: configuration, the check run and its report.

pub mod config;
pub mod report;
pub mod run;

pub use config::{load_config, LocationCheckConfig};
pub use report::{CheckStatus, LocationReport};
pub use run::{check_sheet, read_sheet};
