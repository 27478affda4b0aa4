//! Module: mapper
//! Responsibility: typed and by-name entry points over a built `Registry`.
//! Does not own: any mapping rule; every call forwards to the core
//! transforms with the resolved model.

use crate::Error;
use keyform_core::{
    generate::{GenerateContext, apply_on_create, apply_on_update},
    model::EntityModel,
    record::{Instance, Record},
    resolve,
    traits::{EntityKind, FieldValues},
    transform,
    value::Value,
};
use keyform_schema::Registry;

///
/// Mapper
///
/// Borrowing view over a registry. Cheap to construct; build one wherever
/// a registry reference is at hand.
///

#[derive(Clone, Copy, Debug)]
pub struct Mapper<'a> {
    registry: &'a Registry,
}

impl<'a> Mapper<'a> {
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Resolved model for `E`.
    pub fn model<E: EntityKind>(&self) -> Result<&'a EntityModel, Error> {
        self.model_named(E::ENTITY_NAME)
    }

    /// Resolved model by entity name.
    pub fn model_named(&self, entity: &str) -> Result<&'a EntityModel, Error> {
        let model = self.registry.try_get(entity)?;

        Ok(model.as_ref())
    }

    // ------------------------------------------------------------------
    // Typed
    // ------------------------------------------------------------------

    /// Flat item for a typed entity.
    pub fn to_item<E: EntityKind>(&self, entity: &E) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        Ok(transform::to_item(model, entity)?)
    }

    /// Flat item for a typed entity after filling its missing auto-generated
    /// attributes from `ctx`.
    pub fn create_item<E: EntityKind>(
        &self,
        entity: &E,
        ctx: &GenerateContext,
    ) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        let mut attributes = snapshot(model, entity);
        apply_on_create(model, &mut attributes, ctx)?;

        Ok(transform::to_item(model, &attributes)?)
    }

    /// Typed entity from a stored item.
    ///
    /// The item must resolve to `E` itself; an item tagged as another type
    /// of the same family is a `SchemaMismatch`.
    pub fn from_item<E: EntityKind>(&self, item: &Record) -> Result<E, Error> {
        let model = self.model::<E>()?;
        let instance = transform::from_item_exact(model, item)?;

        Ok(E::from_instance(&instance)?)
    }

    /// Primary key fields of a typed entity.
    pub fn primary_key<E: EntityKind>(&self, entity: &E) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        Ok(transform::primary_key(model, entity)?)
    }

    /// Key fields of one index of `E`, interpolated from `source`.
    pub fn index_key<E: EntityKind, S: FieldValues + ?Sized>(
        &self,
        index: &str,
        source: &S,
    ) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        Ok(transform::index_key(model, index, source)?)
    }

    /// Index key fields invalidated by a partial update of `E`.
    pub fn affected_indexes<E: EntityKind>(&self, diff: &Record) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        Ok(resolve::affected_indexes(model, diff))
    }

    /// Update item for a partial update of `E`.
    pub fn update_item<E: EntityKind>(&self, diff: &Record) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        Ok(resolve::update_item(model, diff)?)
    }

    /// Update item for `E` after refreshing its `auto_update` attributes.
    pub fn update_item_generated<E: EntityKind>(
        &self,
        diff: &Record,
        ctx: &GenerateContext,
    ) -> Result<Record, Error> {
        let model = self.model::<E>()?;

        let mut diff = diff.clone();
        apply_on_update(model, &mut diff, ctx)?;

        Ok(resolve::update_item(model, &diff)?)
    }

    // ------------------------------------------------------------------
    // By name
    // ------------------------------------------------------------------

    /// Flat item for a dynamic instance, using `instance.entity` as the type.
    pub fn instance_to_item(&self, instance: &Instance) -> Result<Record, Error> {
        let model = self.model_named(&instance.entity)?;

        Ok(transform::to_item(model, instance)?)
    }

    /// Dynamic instance from a stored item read through the `entity` model.
    /// The result may be any type of the entity's family.
    pub fn item_to_instance(&self, entity: &str, item: &Record) -> Result<Instance, Error> {
        let model = self.model_named(entity)?;

        Ok(transform::from_item(model, item)?)
    }

    pub fn affected_indexes_named(&self, entity: &str, diff: &Record) -> Result<Record, Error> {
        let model = self.model_named(entity)?;

        Ok(resolve::affected_indexes(model, diff))
    }

    pub fn update_item_named(&self, entity: &str, diff: &Record) -> Result<Record, Error> {
        let model = self.model_named(entity)?;

        Ok(resolve::update_item(model, diff)?)
    }
}

// Declared attributes of a typed entity as a record, undefined ones left out.
fn snapshot<E: FieldValues>(model: &EntityModel, entity: &E) -> Record {
    model
        .visible_attributes()
        .filter_map(|attr| {
            entity
                .get_value(&attr.name)
                .filter(Value::is_defined)
                .map(|value| (attr.name.clone(), value))
        })
        .collect()
}
