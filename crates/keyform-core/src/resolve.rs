//! Module: resolve
//! Responsibility: the update path. Work out which secondary-index key
//! fields a partial attribute diff invalidates, and build the update item.
//!
//! The diff is the only attribute source. An index field that also depends
//! on attributes absent from the diff is left out rather than merged with
//! unknown stored state; the caller decides whether to re-read the entity.

use crate::{
    model::{EntityModel, KeyField},
    obs::{TransformKind, sink::Span},
    record::Record,
    traits::FieldValues,
    transform::{TransformError, defined_value, write_sparse_key},
};

/// Index key fields recomputable from `diff` alone.
///
/// Primary key fields are never returned. The result is empty when no
/// index template reads any attribute defined in the diff.
#[must_use]
pub fn affected_indexes<S: FieldValues + ?Sized>(model: &EntityModel, diff: &S) -> Record {
    let mut span = Span::new(TransformKind::AffectedIndexes, &model.name);

    collect_affected(model, diff, &mut span)
}

/// Build the item for a partial update.
///
/// Declared, non-internal attributes from the diff (nulls included, as
/// removals) merged with `affected_indexes`; index fields win name
/// collisions. Any diff attribute read by a primary key template is
/// rejected, whether set or cleared: the primary key is fixed for the
/// lifetime of an entity.
pub fn update_item(model: &EntityModel, diff: &Record) -> Result<Record, TransformError> {
    let mut span = Span::new(TransformKind::UpdateItem, &model.name);

    // null removals count too
    if let Some(attribute) = diff
        .keys()
        .find(|name| model.primary_key.references(name))
    {
        return Err(TransformError::ImmutablePrimaryKeyAttribute {
            entity: model.name.clone(),
            attribute: attribute.to_string(),
        });
    }

    let mut item: Record = diff
        .iter()
        .filter(|(name, _)| model.is_visible_attribute(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let keys = collect_affected(model, diff, &mut span);
    item.extend(keys);

    Ok(item)
}

fn collect_affected<S: FieldValues + ?Sized>(
    model: &EntityModel,
    diff: &S,
    span: &mut Span<'_>,
) -> Record {
    let mut out = Record::new();

    for index in &model.indexes {
        for key in index.key_fields() {
            if touches(key, diff) {
                write_sparse_key(key, diff, &mut out, span);
            }
        }
    }

    out
}

// A template is affected only when the diff defines one of its attributes.
fn touches<S: FieldValues + ?Sized>(key: &KeyField, diff: &S) -> bool {
    key.template
        .interpolation_set()
        .iter()
        .any(|name| defined_value(diff, name).is_some())
}
