use crate::{
    model::{AttributeModel, EntityModel},
    obs::{
        MetricsEvent, TransformKind,
        sink::{Span, record},
    },
    record::{Instance, Record},
    transform::TransformError,
};

/// Rebuild an entity instance from a stored item.
///
/// The concrete type is chosen by the item's discriminator (when the table
/// stores one). Only that type's non-internal attributes are surfaced; key
/// fields and undeclared fields are dropped, and declared attributes missing
/// from the item stay unset.
pub fn from_item(model: &EntityModel, item: &Record) -> Result<Instance, TransformError> {
    let _span = Span::new(TransformKind::FromItem, &model.name);

    read_instance(model, item).inspect_err(|_| record_mismatch(model))
}

/// Like `from_item`, but the item must resolve to the model's own type.
/// An item tagged as a descendant is a `SchemaMismatch`.
pub fn from_item_exact(model: &EntityModel, item: &Record) -> Result<Instance, TransformError> {
    let _span = Span::new(TransformKind::FromItem, &model.name);

    read_instance(model, item)
        .and_then(|instance| {
            if instance.entity == model.name {
                Ok(instance)
            } else {
                Err(TransformError::SchemaMismatch {
                    entity: model.name.clone(),
                    attribute: model
                        .discriminator
                        .as_ref()
                        .map_or_else(String::new, |d| d.attribute.clone()),
                    value: Some(instance.entity),
                })
            }
        })
        .inspect_err(|_| record_mismatch(model))
}

fn read_instance(model: &EntityModel, item: &Record) -> Result<Instance, TransformError> {
    let (entity, attributes) = resolve_variant(model, item)?;
    let mut instance = Instance::new(entity);

    for attr in attributes {
        if attr.internal || model.is_key_field(&attr.name) {
            continue;
        }
        if let Some(value) = item.get_defined(&attr.name) {
            instance.attributes.set(attr.name.clone(), value.clone());
        }
    }

    Ok(instance)
}

fn record_mismatch(model: &EntityModel) {
    record(MetricsEvent::SchemaMismatch {
        entity: &model.name,
    });
}

// Dispatch on the stored tag; never on anything else in the item.
fn resolve_variant<'a>(
    model: &'a EntityModel,
    item: &Record,
) -> Result<(&'a str, &'a [AttributeModel]), TransformError> {
    let Some(discriminator) = &model.discriminator else {
        return Ok((&model.name, &model.attributes));
    };

    let tag = item.get_defined(&discriminator.attribute);
    let variant = tag
        .and_then(|value| value.as_text())
        .and_then(|tag| model.variants.get(tag));

    match variant {
        Some(variant) => Ok((&variant.entity, &variant.attributes)),
        None => Err(TransformError::SchemaMismatch {
            entity: model.name.clone(),
            attribute: discriminator.attribute.clone(),
            value: tag.map(ToString::to_string),
        }),
    }
}
