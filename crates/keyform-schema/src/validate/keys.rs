use crate::prelude::*;
use keyform_core::template::KeyTemplate;

/// Check each entity's key templates against its table and its merged
/// attribute list. Placeholders naming unknown attributes go to `refs`,
/// every other problem to `errs`.
///
/// Entities whose table or lineage cannot be resolved are skipped; those
/// problems are reported by the relation pass.
pub fn validate_entity_keys(schema: &Schema, errs: &mut ErrorTree, refs: &mut ErrorTree) {
    for entity in &schema.entities {
        let Ok(table) = schema.try_table(entity.table) else {
            continue;
        };
        let Ok(lineage) = schema.lineage(entity) else {
            continue;
        };
        let attributes = Schema::merged_attributes(&lineage);

        let mut entity_errs = ErrorTree::new();
        let mut entity_refs = ErrorTree::new();
        validate_primary_key(entity, table, &attributes, &mut entity_errs, &mut entity_refs);
        for index in entity.indexes {
            let mut index_errs = ErrorTree::new();
            let mut index_refs = ErrorTree::new();
            validate_index(index, table, &attributes, &mut index_errs, &mut index_refs);
            entity_errs.merge_at(&index.route_key(), index_errs);
            entity_refs.merge_at(&index.route_key(), index_refs);
        }

        if let Some(discriminator) = table.discriminator {
            if attributes.iter().any(|attr| attr.name == discriminator) {
                err!(
                    entity_errs,
                    "attribute '{discriminator}' is reserved for the table discriminator"
                );
            }
        }

        errs.merge_at(&entity.route_key(), entity_errs);
        refs.merge_at(&entity.route_key(), entity_refs);
    }
}

fn validate_primary_key(
    entity: &Entity,
    table: &Table,
    attributes: &[Attribute],
    errs: &mut ErrorTree,
    refs: &mut ErrorTree,
) {
    let mut pk_errs = ErrorTree::new();
    let mut pk_refs = ErrorTree::new();
    let pk = &entity.primary_key;

    match (table.sort_key, pk.sort) {
        (Some(field), None) => err!(
            pk_errs,
            "table '{}' has sort key '{field}' but no sort template is declared",
            table.name
        ),
        (None, Some(_)) => err!(
            pk_errs,
            "table '{}' has no sort key but a sort template is declared",
            table.name
        ),
        _ => {}
    }

    check_references(&mut pk_refs, pk.partition, attributes);
    if let Some(template) = pk.sort {
        check_references(&mut pk_refs, template, attributes);
    }

    errs.merge_at(&pk.route_key(), pk_errs);
    refs.merge_at(&pk.route_key(), pk_refs);
}

fn validate_index(
    index: &Index,
    table: &Table,
    attributes: &[Attribute],
    errs: &mut ErrorTree,
    refs: &mut ErrorTree,
) {
    let Some(table_index) = table.index(index.name) else {
        err!(
            errs,
            "index '{}' is not declared on table '{}'",
            index.name,
            table.name
        );
        return;
    };

    match table_index.kind {
        IndexKind::Global => {
            check_template_slot(errs, "partition", table_index.partition_key, index.partition);
        }
        IndexKind::Local => {
            if index.partition.is_some() {
                err!(
                    errs,
                    "local index '{}' shares the table partition key and must not declare a partition template",
                    index.name
                );
            }
        }
    }
    check_template_slot(errs, "sort", table_index.sort_key, index.sort);

    for template in index.templates() {
        check_references(refs, template, attributes);
    }
}

// A template is required exactly when the table index has the key field.
fn check_template_slot(
    errs: &mut ErrorTree,
    slot: &str,
    field: Option<&str>,
    template: Option<&str>,
) {
    match (field, template) {
        (Some(field), None) => err!(errs, "{slot} key '{field}' needs a template"),
        (None, Some(template)) => {
            err!(errs, "{slot} template '{template}' has no key field on the table");
        }
        _ => {}
    }
}

// Every placeholder must name an attribute of the entity (own or inherited).
fn check_references(errs: &mut ErrorTree, template: &str, attributes: &[Attribute]) {
    // syntax errors are reported by the node pass
    let Ok(compiled) = KeyTemplate::compile(template) else {
        return;
    };

    for name in compiled.interpolation_set() {
        if !attributes.iter().any(|attr| attr.name == name.as_str()) {
            err!(
                errs,
                "unknown attribute reference '{name}' in template '{template}'"
            );
        }
    }
}
