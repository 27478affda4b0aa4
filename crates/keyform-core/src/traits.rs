use crate::{record::Instance, transform::TransformError, value::Value};
use std::collections::BTreeMap;

// ============================================================================
// ATTRIBUTE ACCESS
// ============================================================================
//
// These traits describe how attribute values are read from something that
// looks like an entity: a typed struct, a dynamic instance, or a diff.
//

///
/// FieldValues
///
/// Attribute-name lookup used as the source for key interpolation.
/// `None` and `Some(Value::Null)` both mean "undefined".
///

pub trait FieldValues {
    fn get_value(&self, field: &str) -> Option<Value>;
}

impl FieldValues for BTreeMap<String, Value> {
    fn get_value(&self, field: &str) -> Option<Value> {
        self.get(field).cloned()
    }
}

impl<T: FieldValues + ?Sized> FieldValues for &T {
    fn get_value(&self, field: &str) -> Option<Value> {
        (**self).get_value(field)
    }
}

///
/// FieldValue
///
/// Conversion between one Rust attribute type and its scalar `Value`.
///

pub trait FieldValue {
    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>
    where
        Self: Sized;
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(ToString::to_string)
    }
}

impl FieldValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FieldValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            Value::Uint(v) => Self::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FieldValue for u64 {
    fn to_value(&self) -> Value {
        Value::Uint(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Uint(v) => Some(*v),
            Value::Int(v) => Self::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FieldValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float64(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float64(v) => Some(*v),
            Value::Int(v) => Some(*v as Self),
            Value::Uint(v) => Some(*v as Self),
            _ => None,
        }
    }
}

// Option<T> reads a missing or null attribute as `None`; only a present
// value of the wrong shape fails.
impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        if value.is_null() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

// ============================================================================
// ENTITY IDENTITY
// ============================================================================

///
/// EntityKind
///
/// A typed application entity bound to one registered entity model by name.
///

pub trait EntityKind: FieldValues + Sized {
    const ENTITY_NAME: &'static str;

    /// Build the typed entity from an instance already resolved to this type.
    fn from_instance(instance: &Instance) -> Result<Self, TransformError>;
}
