use crate::{
    traits::{FieldValue, FieldValues},
    transform::TransformError,
    value::Value,
};
use derive_more::{Deref, DerefMut, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Record
///
/// Flat mapping of field name to scalar value.
/// Serves as the stored item shape and as a partial attribute diff.
/// Ordered so iteration and serialization are deterministic.
///

#[repr(transparent)]
#[derive(Clone, Debug, Default, Deref, DerefMut, Deserialize, IntoIterator, PartialEq, Serialize)]
#[into_iterator(owned, ref)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Insert a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    /// Return the value for `field` only when it is defined (non-null).
    #[must_use]
    pub fn get_defined(&self, field: &str) -> Option<&Value> {
        self.0.get(field).filter(|v| v.is_defined())
    }

    /// Iterate the names of fields that carry a defined value.
    pub fn defined_fields(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, v)| v.is_defined())
            .map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }
}

impl FieldValues for Record {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.0.get(field).cloned()
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

///
/// Instance
///
/// Dynamically-typed entity instance: the concrete entity name resolved
/// from a stored item plus the attributes it exposes.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Instance {
    pub entity: String,
    pub attributes: Record,
}

impl Instance {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            attributes: Record::new(),
        }
    }

    /// Builder-style attribute insert.
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.set(attribute, value);
        self
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.attributes.get(attribute)
    }

    /// Read one attribute as a typed field.
    ///
    /// A missing attribute reads as `Value::Null`, so `Option<T>` fields
    /// accept it and required fields report it.
    pub fn read<T: FieldValue>(&self, attribute: &str) -> Result<T, TransformError> {
        let null = Value::Null;
        let value = self.attributes.get(attribute).unwrap_or(&null);

        T::from_value(value).ok_or_else(|| TransformError::InvalidAttributeValue {
            entity: self.entity.clone(),
            attribute: attribute.to_string(),
            found: value.kind_label(),
        })
    }
}

impl FieldValues for Instance {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.attributes.get_value(field)
    }
}
