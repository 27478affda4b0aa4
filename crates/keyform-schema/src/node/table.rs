use crate::{
    MAX_ENTITY_NAME_LEN,
    node::{validate_field_name, validate_ident},
    prelude::*,
};
use std::collections::BTreeSet;

///
/// TableIndex
///
/// Physical key fields of one secondary index. Global indexes carry their
/// own partition field; local indexes reuse the table's.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TableIndex {
    pub name: &'static str,
    pub kind: IndexKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<&'static str>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<&'static str>,
}

impl TableIndex {
    #[must_use]
    pub const fn global(
        name: &'static str,
        partition_key: &'static str,
        sort_key: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            kind: IndexKind::Global,
            partition_key: Some(partition_key),
            sort_key,
        }
    }

    #[must_use]
    pub const fn local(name: &'static str, sort_key: &'static str) -> Self {
        Self {
            name,
            kind: IndexKind::Local,
            partition_key: None,
            sort_key: Some(sort_key),
        }
    }

    pub fn key_fields(&self) -> impl Iterator<Item = &'static str> {
        self.partition_key.into_iter().chain(self.sort_key)
    }
}

impl ValidateNode for TableIndex {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident("index name", self.name, MAX_ENTITY_NAME_LEN) {
            errs.add(e);
        }

        match self.kind {
            IndexKind::Global => {
                if self.partition_key.is_none() {
                    err!(errs, "global index requires a partition key field");
                }
            }
            IndexKind::Local => {
                if self.partition_key.is_some() {
                    err!(errs, "local index must not declare a partition key field");
                }
                if self.sort_key.is_none() {
                    err!(errs, "local index requires a sort key field");
                }
            }
        }

        for field in self.key_fields() {
            if let Err(e) = validate_field_name("key field", field) {
                errs.add(e);
            }
        }

        errs.result()
    }
}

impl VisitableNode for TableIndex {
    fn route_key(&self) -> String {
        format!("index:{}", self.name)
    }
}

///
/// Table
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Table {
    pub name: &'static str,
    pub partition_key: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<&'static str>,

    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub indexes: &'static [TableIndex],

    /// Attribute holding each item's entity name, when several entity types
    /// share the table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<&'static str>,
}

impl Table {
    #[must_use]
    pub fn index(&self, name: &str) -> Option<&TableIndex> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// Every key field on the table, primary first.
    pub fn key_fields(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.partition_key)
            .chain(self.sort_key)
            .chain(self.indexes.iter().flat_map(TableIndex::key_fields))
    }
}

impl ValidateNode for Table {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_ident("table name", self.name, MAX_ENTITY_NAME_LEN) {
            errs.add(e);
        }
        if let Err(e) = validate_field_name("partition key", self.partition_key) {
            errs.add(e);
        }
        if let Some(sort_key) = self.sort_key {
            if let Err(e) = validate_field_name("sort key", sort_key) {
                errs.add(e);
            }
        }

        // key field names
        let mut fields = BTreeSet::new();
        for field in self.key_fields() {
            if !fields.insert(field) {
                err!(errs, "key field '{field}' is declared more than once");
            }
        }

        // index names
        let mut names = BTreeSet::new();
        for index in self.indexes {
            if !names.insert(index.name) {
                err!(errs, "duplicate index '{}'", index.name);
            }
        }

        if let Some(discriminator) = self.discriminator {
            if let Err(e) = validate_field_name("discriminator", discriminator) {
                errs.add(e);
            }
            if fields.contains(discriminator) {
                err!(errs, "discriminator '{discriminator}' collides with a key field");
            }
        }

        errs.result()
    }
}

impl VisitableNode for Table {
    fn route_key(&self) -> String {
        format!("table:{}", self.name)
    }

    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in self.indexes {
            node.accept(v);
        }
    }
}
