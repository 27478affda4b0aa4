use crate::model::IndexKind;
use serde::Serialize;
use std::collections::BTreeSet;

///
/// TableIndexModel
/// Physical key fields of one secondary index declared on a table.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableIndexModel {
    pub name: String,
    pub kind: IndexKind,
    /// Always `None` for local indexes.
    pub partition_key: Option<String>,
    pub sort_key: Option<String>,
}

///
/// TableModel
///
/// Physical shape of one table: the primary key field names, every
/// secondary index, and the optional discriminator attribute shared by all
/// entities stored in it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TableModel {
    pub name: String,
    pub partition_key: String,
    pub sort_key: Option<String>,
    pub indexes: Vec<TableIndexModel>,
    pub discriminator: Option<String>,
    key_fields: BTreeSet<String>,
}

impl TableModel {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        partition_key: impl Into<String>,
        sort_key: Option<String>,
        indexes: Vec<TableIndexModel>,
        discriminator: Option<String>,
    ) -> Self {
        let partition_key = partition_key.into();

        let mut key_fields = BTreeSet::new();
        key_fields.insert(partition_key.clone());
        key_fields.extend(sort_key.iter().cloned());
        for index in &indexes {
            key_fields.extend(index.partition_key.iter().cloned());
            key_fields.extend(index.sort_key.iter().cloned());
        }

        Self {
            name: name.into(),
            partition_key,
            sort_key,
            indexes,
            discriminator,
            key_fields,
        }
    }

    #[must_use]
    pub fn index(&self, name: &str) -> Option<&TableIndexModel> {
        self.indexes.iter().find(|index| index.name == name)
    }

    /// Every key field name on the table (primary and secondary).
    #[must_use]
    pub const fn key_fields(&self) -> &BTreeSet<String> {
        &self.key_fields
    }

    #[must_use]
    pub fn is_key_field(&self, field: &str) -> bool {
        self.key_fields.contains(field)
    }
}
