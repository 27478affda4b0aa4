use crate::prelude::*;

/// Every entity's table exists; every parent exists, lives on the same
/// table, and the inheritance graph has no cycles.
pub fn validate_relations(schema: &Schema, errs: &mut ErrorTree) {
    for entity in &schema.entities {
        let route = entity.route_key();

        if let Err(e) = schema.try_table(entity.table) {
            errs.add_at(&route, e);
        }

        let Some(parent) = entity.extends else {
            continue;
        };
        match schema.entity(parent) {
            Some(parent) if parent.table != entity.table => errs.add_at(
                &route,
                format!(
                    "parent '{}' is stored in table '{}', not '{}'",
                    parent.name, parent.table, entity.table
                ),
            ),
            Some(_) => {}
            None => errs.add_at(&route, format!("parent entity '{parent}' not found")),
        }

        // a missing parent was reported above
        if let Err(e @ NodeError::InheritanceCycle(_)) = schema.lineage(entity) {
            errs.add_at(&route, e);
        }
    }
}
