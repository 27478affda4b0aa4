//! Module: transform
//! Responsibility: entity ↔ flat item conversion and key projections.
//! Does not own: update-path index invalidation (see `resolve`) or value
//! generation (see `generate`).
//!
//! Invariants:
//! - A key field is written only from a fully interpolated template.
//! - Sparse secondary keys are omitted silently; only the primary key is
//!   required. On the write path an index's fields are all-or-nothing.
//! - Key fields are written after attributes and win name collisions.

mod from_item;


use crate::{
    model::{EntityIndexModel, EntityModel, KeyField},
    obs::{TransformKind, sink::Span},
    record::Record,
    template::Interpolated,
    traits::FieldValues,
    value::Value,
};
use thiserror::Error as ThisError;

// re-exports
pub use from_item::{from_item, from_item_exact};

///
/// TransformError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TransformError {
    #[error("entity '{entity}': primary key field '{field}' is missing attributes {missing:?}")]
    MissingRequiredKeyAttribute {
        entity: String,
        field: String,
        missing: Vec<String>,
    },

    #[error(
        "entity '{entity}': discriminator '{attribute}' value {value:?} matches no known entity type"
    )]
    SchemaMismatch {
        entity: String,
        attribute: String,
        value: Option<String>,
    },

    #[error("entity '{entity}' has no index '{index}'")]
    UnknownIndex { entity: String, index: String },

    #[error("entity '{entity}': attribute '{attribute}' is part of the primary key and cannot be updated")]
    ImmutablePrimaryKeyAttribute { entity: String, attribute: String },

    #[error("entity '{entity}': attribute '{attribute}' has an unexpected {found} value")]
    InvalidAttributeValue {
        entity: String,
        attribute: String,
        found: &'static str,
    },
}

/// Build the flat item for an entity.
///
/// Attributes are copied first (non-internal, defined only), then the
/// discriminator tag, then primary and secondary key fields. A secondary
/// index whose key cannot be fully interpolated is left out entirely.
pub fn to_item<S: FieldValues + ?Sized>(
    model: &EntityModel,
    source: &S,
) -> Result<Record, TransformError> {
    let mut span = Span::new(TransformKind::ToItem, &model.name);
    let mut item = Record::new();

    for attr in model.visible_attributes() {
        if let Some(value) = defined_value(source, &attr.name) {
            item.set(attr.name.clone(), value);
        }
    }

    if let Some(discriminator) = &model.discriminator {
        item.set(discriminator.attribute.clone(), discriminator.value.as_str());
    }

    write_primary_key(model, source, &mut item, &mut span)?;

    for index in &model.indexes {
        write_index_keys(index, source, &mut item, &mut span);
    }

    Ok(item)
}

/// Project only the primary key fields (for get/delete addressing).
pub fn primary_key<S: FieldValues + ?Sized>(
    model: &EntityModel,
    source: &S,
) -> Result<Record, TransformError> {
    let mut span = Span::new(TransformKind::Key, &model.name);
    let mut key = Record::new();

    write_primary_key(model, source, &mut key, &mut span)?;

    Ok(key)
}

/// Project the key fields of one secondary index (for query addressing).
///
/// A local index is addressed through the table partition key, so the
/// primary partition field is included when it can be interpolated.
/// Fields that are not fully determined are omitted.
pub fn index_key<S: FieldValues + ?Sized>(
    model: &EntityModel,
    index: &str,
    source: &S,
) -> Result<Record, TransformError> {
    let mut span = Span::new(TransformKind::Key, &model.name);
    let index_model = model
        .index(index)
        .ok_or_else(|| TransformError::UnknownIndex {
            entity: model.name.clone(),
            index: index.to_string(),
        })?;

    let mut key = Record::new();
    if index_model.partition.is_none() {
        write_sparse_key(&model.primary_key.partition, source, &mut key, &mut span);
    }
    for field in index_model.key_fields() {
        write_sparse_key(field, source, &mut key, &mut span);
    }

    Ok(key)
}

fn write_primary_key<S: FieldValues + ?Sized>(
    model: &EntityModel,
    source: &S,
    out: &mut Record,
    span: &mut Span<'_>,
) -> Result<(), TransformError> {
    for key in model.primary_key.key_fields() {
        match key.template.interpolate(source) {
            Interpolated::Value(value) => {
                out.set(key.field.clone(), value);
                span.key_written();
            }
            Interpolated::Omitted => {
                return Err(TransformError::MissingRequiredKeyAttribute {
                    entity: model.name.clone(),
                    field: key.field.clone(),
                    missing: missing_attributes(key, source),
                });
            }
        }
    }

    Ok(())
}

// An entity participates in an index only with its complete key, so the
// index's fields are written together or not at all.
fn write_index_keys<S: FieldValues + ?Sized>(
    index: &EntityIndexModel,
    source: &S,
    out: &mut Record,
    span: &mut Span<'_>,
) {
    let mut fields = Vec::with_capacity(2);

    for key in index.key_fields() {
        match key.template.interpolate(source) {
            Interpolated::Value(value) => fields.push((key.field.clone(), value)),
            Interpolated::Omitted => {
                for _ in index.key_fields() {
                    span.key_omitted();
                }
                return;
            }
        }
    }

    for (field, value) in fields {
        out.set(field, value);
        span.key_written();
    }
}

// Sparse write: an omitted template leaves the field out entirely.
pub(crate) fn write_sparse_key<S: FieldValues + ?Sized>(
    key: &KeyField,
    source: &S,
    out: &mut Record,
    span: &mut Span<'_>,
) {
    match key.template.interpolate(source) {
        Interpolated::Value(value) => {
            out.set(key.field.clone(), value);
            span.key_written();
        }
        Interpolated::Omitted => span.key_omitted(),
    }
}

fn missing_attributes<S: FieldValues + ?Sized>(key: &KeyField, source: &S) -> Vec<String> {
    key.template
        .interpolation_set()
        .iter()
        .filter(|name| defined_value(source, name).is_none())
        .cloned()
        .collect()
}

pub(crate) fn defined_value<S: FieldValues + ?Sized>(source: &S, field: &str) -> Option<Value> {
    source.get_value(field).filter(Value::is_defined)
}
