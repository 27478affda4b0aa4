//! Declarative schema nodes for keyform, validated and resolved into the
//! immutable [`Registry`] the runtime transforms read from.

pub mod build;
pub mod error;
pub mod node;
pub mod registry;
pub mod validate;
pub mod visit;

/// Maximum length for entity and table identifiers.
pub const MAX_ENTITY_NAME_LEN: usize = 64;

/// Maximum length for attribute and key field identifiers.
pub const MAX_ATTRIBUTE_NAME_LEN: usize = 64;

use crate::{build::BuildError, node::NodeError};
use thiserror::Error as ThisError;

// re-exports
pub use registry::Registry;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        err,
        error::ErrorTree,
        node::*,
        registry::Registry,
        visit::{Event, Visitor},
    };
    pub use keyform_core::{
        generate::{AutoGenerate, GenerateStrategy},
        model::IndexKind,
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    NodeError(#[from] NodeError),
}
