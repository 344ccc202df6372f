//! Location references from other data tables.

use std::collections::BTreeSet;
use std::fmt::Display;

use crate::cell::Field;
use crate::diagnostics::Scope;
use crate::loader::Locations;

impl Locations {
    /// Add names to the known location set without a sheet load.
    ///
    /// Numeric names are stored in their text form, so `1` and `"1"` are
    /// the same location.
    pub fn add_known_locations<I, T>(&mut self, names: I)
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.locations.extend(names.into_iter().map(|n| n.to_string()));
    }

    /// Check the values of a location field in a data table.
    ///
    /// Blank cells and names not in the known set are errors. Returns
    /// `true` when every reference is valid.
    pub fn check_references(&self, field: &str, values: &[Field], scope: &Scope<'_>) -> bool {
        let mut valid = true;

        if values.iter().any(Option::is_none) {
            scope.error(format!("Location field {} contains blank values", field));
            valid = false;
        }

        let unknown: BTreeSet<String> = values
            .iter()
            .flatten()
            .map(|v| v.to_string())
            .filter(|name| !self.locations.contains(name))
            .collect();
        if !unknown.is_empty() {
            scope.error_list(
                format!("Location field {} contains unknown locations: ", field),
                unknown,
                true,
            );
            valid = false;
        }

        valid
    }
}
