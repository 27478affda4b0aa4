//! Core runtime for keyform: values, records, compiled key templates, entity
//! models, and the pure transforms between entities and flat key-value items.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod generate;
pub mod model;
pub mod obs;
pub mod record;
pub mod resolve;
pub mod template;
pub mod traits;
pub mod transform;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Maximum number of placeholders allowed in one key template.
///
/// Keys are composed from a handful of attributes in practice; the bound
/// keeps interpolation sets small enough to scan linearly.
pub const MAX_TEMPLATE_PLACEHOLDERS: usize = 8;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, transforms, or metrics are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::{EntityModel, IndexKind, TableModel},
        record::{Instance, Record},
        template::{Interpolated, KeyTemplate},
        traits::{EntityKind, FieldValue, FieldValues},
        value::Value,
    };
}
