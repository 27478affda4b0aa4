use crate::model::KeyField;
use serde::Serialize;
use std::fmt::{self, Display};

///
/// IndexKind
///
/// Global indexes are partitioned independently; local indexes share the
/// table's partition key and only add a sort key.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum IndexKind {
    Global,
    Local,
}

impl Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("GLOBAL"),
            Self::Local => f.write_str("LOCAL"),
        }
    }
}

///
/// EntityIndexModel
///
/// One secondary index as bound to an entity: the key fields it writes and
/// the compiled templates that produce them. A local index never carries a
/// partition field.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityIndexModel {
    pub name: String,
    pub kind: IndexKind,
    pub partition: Option<KeyField>,
    pub sort: Option<KeyField>,
}

impl EntityIndexModel {
    /// Key fields in write order: partition first, then sort.
    pub fn key_fields(&self) -> impl Iterator<Item = &KeyField> {
        self.partition.iter().chain(self.sort.iter())
    }
}

impl Display for EntityIndexModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .key_fields()
            .map(|key| format!("{}={}", key.field, key.template))
            .collect();

        write!(f, "{} {}({})", self.kind, self.name, fields.join(", "))
    }
}
