use crate::{
    error::ErrorTree,
    node::{Attribute, Entity, Index, Schema, Table, VisitableNode},
    registry::Registry,
};
use keyform_core::{
    model::{
        AttributeModel, Discriminator, EntityIndexModel, EntityModel, EntityVariant, IndexKind,
        KeyField, PrimaryKeyModel, TableIndexModel, TableModel,
    },
    template::KeyTemplate,
};
use std::{collections::BTreeMap, sync::Arc};

///
/// Lineage
/// One entity with its ancestor names (self included) and merged attributes.
///

struct Lineage<'a> {
    entity: &'a Entity,
    ancestors: Vec<&'static str>,
    attributes: Vec<AttributeModel>,
}

pub(super) fn resolve_schema(schema: &Schema) -> Result<Registry, ErrorTree> {
    let mut errs = ErrorTree::new();

    let tables: BTreeMap<&str, Arc<TableModel>> = schema
        .tables
        .iter()
        .map(|table| (table.name, Arc::new(table_model(table))))
        .collect();

    let mut lineages = Vec::with_capacity(schema.entities.len());
    for entity in &schema.entities {
        match resolve_lineage(schema, entity) {
            Ok(lineage) => lineages.push(lineage),
            Err(e) => errs.merge_at(&entity.route_key(), e),
        }
    }

    let mut entities = BTreeMap::new();
    for lineage in &lineages {
        match entity_model(lineage, &lineages, &tables) {
            Ok(model) => {
                entities.insert(model.name.clone(), Arc::new(model));
            }
            Err(e) => errs.merge_at(&lineage.entity.route_key(), e),
        }
    }

    errs.result()?;

    Ok(Registry::new(entities))
}

fn resolve_lineage<'a>(schema: &'a Schema, entity: &'a Entity) -> Result<Lineage<'a>, ErrorTree> {
    let chain = schema
        .lineage(entity)
        .map_err(|e| ErrorTree::from(e.to_string()))?;
    let table = schema
        .try_table(entity.table)
        .map_err(|e| ErrorTree::from(e.to_string()))?;

    let mut attributes: Vec<AttributeModel> = Schema::merged_attributes(&chain)
        .iter()
        .map(attribute_model)
        .collect();
    if let Some(discriminator) = table.discriminator {
        attributes.push(AttributeModel::internal(discriminator));
    }

    Ok(Lineage {
        entity,
        ancestors: chain.iter().map(|e| e.name).collect(),
        attributes,
    })
}

fn entity_model(
    lineage: &Lineage<'_>,
    all: &[Lineage<'_>],
    tables: &BTreeMap<&str, Arc<TableModel>>,
) -> Result<EntityModel, ErrorTree> {
    let entity = lineage.entity;
    let table = tables
        .get(entity.table)
        .cloned()
        .ok_or_else(|| ErrorTree::from(format!("table '{}' not found", entity.table)))?;

    let primary_key = PrimaryKeyModel {
        partition: key_field(&table.partition_key, entity.primary_key.partition)?,
        sort: match (&table.sort_key, entity.primary_key.sort) {
            (Some(field), Some(template)) => Some(key_field(field, template)?),
            _ => None,
        },
    };

    let indexes = entity
        .indexes
        .iter()
        .map(|index| index_model(&table, index))
        .collect::<Result<Vec<_>, _>>()?;

    let discriminator = table.discriminator.as_ref().map(|attribute| Discriminator {
        attribute: attribute.clone(),
        value: entity.name.to_string(),
    });

    // self plus every descendant, keyed by the tag each one writes
    let variants = if discriminator.is_some() {
        all.iter()
            .filter(|other| other.ancestors.contains(&entity.name))
            .map(|other| {
                let variant = EntityVariant {
                    entity: other.entity.name.to_string(),
                    attributes: other.attributes.clone(),
                };
                (variant.entity.clone(), variant)
            })
            .collect()
    } else {
        BTreeMap::new()
    };

    Ok(EntityModel {
        name: entity.name.to_string(),
        table,
        primary_key,
        indexes,
        attributes: lineage.attributes.clone(),
        discriminator,
        variants,
    })
}

fn index_model(table: &TableModel, index: &Index) -> Result<EntityIndexModel, ErrorTree> {
    let table_index = table.index(index.name).ok_or_else(|| {
        ErrorTree::from(format!(
            "index '{}' is not declared on table '{}'",
            index.name, table.name
        ))
    })?;

    let partition = match (table_index.kind, &table_index.partition_key, index.partition) {
        (IndexKind::Global, Some(field), Some(template)) => Some(key_field(field, template)?),
        _ => None,
    };
    let sort = match (&table_index.sort_key, index.sort) {
        (Some(field), Some(template)) => Some(key_field(field, template)?),
        _ => None,
    };

    Ok(EntityIndexModel {
        name: index.name.to_string(),
        kind: table_index.kind,
        partition,
        sort,
    })
}

fn key_field(field: &str, template: &str) -> Result<KeyField, ErrorTree> {
    let compiled = KeyTemplate::compile(template)
        .map_err(|e| ErrorTree::from(format!("template '{template}': {e}")))?;

    Ok(KeyField::new(field, compiled))
}

fn attribute_model(attr: &Attribute) -> AttributeModel {
    let model = if attr.internal {
        AttributeModel::internal(attr.name)
    } else {
        AttributeModel::new(attr.name)
    };

    match attr.auto_generate {
        Some(auto_generate) => model.with_auto_generate(auto_generate),
        None => model,
    }
}

fn table_model(table: &Table) -> TableModel {
    let indexes = table
        .indexes
        .iter()
        .map(|index| TableIndexModel {
            name: index.name.to_string(),
            kind: index.kind,
            partition_key: index.partition_key.map(str::to_string),
            sort_key: index.sort_key.map(str::to_string),
        })
        .collect();

    TableModel::new(
        table.name,
        table.partition_key,
        table.sort_key.map(str::to_string),
        indexes,
        table.discriminator.map(str::to_string),
    )
}
