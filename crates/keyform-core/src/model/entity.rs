use crate::{
    model::{AttributeModel, EntityIndexModel, TableModel},
    template::KeyTemplate,
};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};

///
/// KeyField
/// One key field name paired with the compiled template that fills it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct KeyField {
    pub field: String,
    pub template: KeyTemplate,
}

impl KeyField {
    #[must_use]
    pub fn new(field: impl Into<String>, template: KeyTemplate) -> Self {
        Self {
            field: field.into(),
            template,
        }
    }
}

///
/// PrimaryKeyModel
///
/// The sort key is absent on partition-key-only tables.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PrimaryKeyModel {
    pub partition: KeyField,
    pub sort: Option<KeyField>,
}

impl PrimaryKeyModel {
    pub fn key_fields(&self) -> impl Iterator<Item = &KeyField> {
        std::iter::once(&self.partition).chain(self.sort.iter())
    }

    /// Whether any primary key template reads `attribute`.
    #[must_use]
    pub fn references(&self, attribute: &str) -> bool {
        self.key_fields()
            .any(|key| key.template.references(attribute))
    }
}

///
/// Discriminator
/// Stored tag (`attribute` = `value`) naming the concrete entity type.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Discriminator {
    pub attribute: String,
    pub value: String,
}

///
/// EntityVariant
///
/// One concrete type of an inheritance family with its merged attribute
/// list (inherited first, then own).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityVariant {
    pub entity: String,
    pub attributes: Vec<AttributeModel>,
}

///
/// EntityModel
///
/// Resolved runtime model for one entity type. Built once by the registry;
/// every transform reads it immutably.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityModel {
    /// Stable entity name; also the discriminator value when one is stored.
    pub name: String,
    #[serde(skip)]
    pub table: Arc<TableModel>,
    pub primary_key: PrimaryKeyModel,
    /// Declaration order is preserved.
    pub indexes: Vec<EntityIndexModel>,
    /// Own and inherited attributes, internal ones included.
    pub attributes: Vec<AttributeModel>,
    pub discriminator: Option<Discriminator>,
    /// Self plus descendants, keyed by discriminator value.
    /// Empty when the table stores no discriminator.
    pub variants: BTreeMap<String, EntityVariant>,
}

impl EntityModel {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeModel> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Attributes that may appear on an entity instance.
    pub fn visible_attributes(&self) -> impl Iterator<Item = &AttributeModel> {
        self.attributes.iter().filter(|attr| !attr.internal)
    }

    #[must_use]
    pub fn is_visible_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some_and(|attr| !attr.internal)
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&EntityIndexModel> {
        self.indexes.iter().find(|index| index.name == name)
    }

    #[must_use]
    pub fn is_key_field(&self, field: &str) -> bool {
        self.table.is_key_field(field)
    }
}
