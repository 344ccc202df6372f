//! Splitting sanitized rows into new and existing locations.

use std::collections::BTreeSet;

use crate::diagnostics::Scope;
use crate::header::HeaderSet;
use crate::row::LocationRow;

const YES: &str = "yes";
const NO: &str = "no";

/// Rows split by the "new" flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub new: Vec<LocationRow>,
    pub existing: Vec<LocationRow>,
}

/// Split rows on the case-insensitive "new" column.
///
/// Without that column every row is existing. Rows with a blank or
/// unrecognised flag are reported and left out of both groups.
pub fn partition_rows(headers: &HeaderSet, rows: Vec<LocationRow>, scope: &Scope<'_>) -> Partition {
    if !headers.has_new_flag() {
        return Partition {
            new: Vec::new(),
            existing: rows,
        };
    }

    let mut partition = Partition::default();
    let mut has_blank = false;
    let mut invalid = BTreeSet::new();

    for row in rows {
        let flag = row.new_flag.as_ref().map(|v| v.normalized());
        match flag.as_deref() {
            Some(YES) => partition.new.push(row),
            Some(NO) => partition.existing.push(row),
            Some(other) => {
                invalid.insert(other.to_string());
            }
            None => has_blank = true,
        }
    }

    if has_blank {
        scope.error("New locations field contains blank rows.");
    }
    if !invalid.is_empty() {
        scope.error_list(
            "New field contains values other than yes and no: ",
            invalid,
            true,
        );
    }

    partition
}
