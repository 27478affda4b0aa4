use crate::prelude::*;
use std::collections::BTreeSet;

/// Table and entity names are unique across the schema.
pub fn validate_unique_names(schema: &Schema, errs: &mut ErrorTree) {
    let mut tables = BTreeSet::new();
    for table in &schema.tables {
        if !tables.insert(table.name) {
            err!(errs, "duplicate table name '{}'", table.name);
        }
    }

    let mut entities = BTreeSet::new();
    for entity in &schema.entities {
        if !entities.insert(entity.name) {
            err!(errs, "duplicate entity name '{}'", entity.name);
        }
    }
}
