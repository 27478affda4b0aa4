//! ## Crate layout
//! - `core`: values, records, key templates, entity models, and the pure
//!   transforms between entities and flat items.
//! - `schema`: declarative schema nodes, validation, and the `Registry`.
//! - `error`: the public error type.
//! - `mapper`: typed entry points over a built `Registry`.
//!
//! The `prelude` module covers what application code needs to declare a
//! schema and map entities.

pub use keyform_core as core;
pub use keyform_schema as schema;

pub mod error;
pub mod mapper;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::Error;
pub use mapper::Mapper;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::{
            generate::{AutoGenerate, GenerateContext, GenerateStrategy},
            model::IndexKind,
            record::{Instance, Record},
            traits::{EntityKind, FieldValue as _, FieldValues},
            transform::TransformError,
            value::Value,
        },
        error::Error,
        mapper::Mapper,
        schema::{
            Registry,
            node::{Attribute, Entity, Index, PrimaryKey, Schema, Table, TableIndex},
        },
    };
}
