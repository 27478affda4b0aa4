use crate::{
    node::{validate_entity_name, validate_template},
    prelude::*,
};
use std::collections::BTreeSet;

///
/// PrimaryKey
///
/// Templates for the table's primary key fields. `sort` must be present
/// exactly when the table has a sort key.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PrimaryKey {
    pub partition: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<&'static str>,
}

impl PrimaryKey {
    #[must_use]
    pub const fn new(partition: &'static str, sort: &'static str) -> Self {
        Self {
            partition,
            sort: Some(sort),
        }
    }

    #[must_use]
    pub const fn partition_only(partition: &'static str) -> Self {
        Self {
            partition,
            sort: None,
        }
    }
}

impl ValidateNode for PrimaryKey {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.partition.is_empty() {
            err!(errs, "partition template is empty");
        }
        validate_template(&mut errs, "partition", self.partition);
        if let Some(template) = self.sort {
            validate_template(&mut errs, "sort", template);
        }

        errs.result()
    }
}

impl VisitableNode for PrimaryKey {
    fn route_key(&self) -> String {
        "primary_key".to_string()
    }
}

///
/// Entity
///
/// One logical entity type stored in a table. `extends` names the parent
/// whose attributes are inherited; keys and indexes are always declared on
/// the entity itself.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Entity {
    pub name: &'static str,
    pub table: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<&'static str>,

    pub primary_key: PrimaryKey,

    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub indexes: &'static [Index],

    pub attributes: &'static [Attribute],
}

impl Entity {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&Index> {
        self.indexes.iter().find(|index| index.name == name)
    }
}

impl ValidateNode for Entity {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_entity_name(self.name) {
            errs.add(e);
        }
        if self.table.is_empty() {
            err!(errs, "table is empty");
        }
        if self.extends == Some(self.name) {
            err!(errs, "entity '{}' extends itself", self.name);
        }

        let mut seen = BTreeSet::new();
        for attr in self.attributes {
            if !seen.insert(attr.name) {
                err!(errs, "duplicate attribute '{}'", attr.name);
            }
        }

        let mut seen = BTreeSet::new();
        for index in self.indexes {
            if !seen.insert(index.name) {
                err!(errs, "duplicate index '{}'", index.name);
            }
        }

        errs.result()
    }
}

impl VisitableNode for Entity {
    fn route_key(&self) -> String {
        format!("entity:{}", self.name)
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        self.primary_key.accept(v);
        for node in self.indexes {
            node.accept(v);
        }
        for node in self.attributes {
            node.accept(v);
        }
    }
}
