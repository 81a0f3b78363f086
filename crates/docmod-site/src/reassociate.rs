//! Type reassociation pass.
//!
//! Runs after every record of a package is built. Top-level constants,
//! variables and functions carrying a `type=Name` directive are moved to
//! the end of the matching member list of the named type. Records naming
//! an unknown type stay where they are and produce a warning.

use std::collections::HashMap;

use crate::record::{Type, TypeMember};

/// Moves directive-tagged records into their target types.
pub(crate) struct Reassociation<'a> {
    package: &'a str,
    types: &'a mut [Type],
    index: &'a HashMap<String, usize>,
    warnings: Vec<String>,
}

impl<'a> Reassociation<'a> {
    /// Create the pass over `types`, looked up by name through `index`.
    pub(crate) fn new(
        package: &'a str,
        types: &'a mut [Type],
        index: &'a HashMap<String, usize>,
    ) -> Self {
        Self {
            package,
            types,
            index,
            warnings: Vec::new(),
        }
    }

    /// Move every record of `items` that names a known type.
    ///
    /// Returns the records that stay top-level, in their original order.
    pub(crate) fn apply<T: TypeMember>(&mut self, items: Vec<T>) -> Vec<T> {
        let mut remaining = Vec::with_capacity(items.len());

        for item in items {
            let Some(type_name) = item.flags().type_target() else {
                remaining.push(item);
                continue;
            };

            if let Some(&idx) = self.index.get(type_name) {
                T::members_of(&mut self.types[idx]).push(item);
                continue;
            }

            tracing::warn!(
                package = %self.package,
                type_name = %type_name,
                kind = T::KIND,
                name = %item.first_name(),
                "Type not found for type directive"
            );
            self.warnings.push(format!(
                "type {type_name} not found in comment for {} {}",
                T::KIND,
                item.first_name()
            ));
            remaining.push(item);
        }

        remaining
    }

    /// Warnings for records whose target type does not exist.
    pub(crate) fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}
