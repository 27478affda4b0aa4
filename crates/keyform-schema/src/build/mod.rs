//! Module: build
//! Responsibility: turn a validated `Schema` into the immutable `Registry`
//! of resolved entity models.

mod resolve;

#[cfg(test)]
mod tests;

use crate::{error::ErrorTree, node::Schema, registry::Registry, validate::validate_schema};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("validation failed: {0}")]
    Validation(ErrorTree),

    /// Key templates name attributes the entity does not declare.
    #[error("unknown attribute reference: {0}")]
    UnknownAttributeReference(ErrorTree),
}

impl BuildError {
    /// The route-aware problems that stopped the build.
    #[must_use]
    pub const fn errors(&self) -> &ErrorTree {
        match self {
            Self::Validation(tree) | Self::UnknownAttributeReference(tree) => tree,
        }
    }

    #[must_use]
    pub fn into_errors(self) -> ErrorTree {
        match self {
            Self::Validation(tree) | Self::UnknownAttributeReference(tree) => tree,
        }
    }
}

impl Schema {
    /// Validate every node and schema-wide rule, then resolve each entity
    /// (inheritance, discriminator variants, compiled templates).
    ///
    /// Nothing is resolved unless the whole schema is valid.
    pub fn build(&self) -> Result<Registry, BuildError> {
        validate_schema(self)?;

        resolve::resolve_schema(self).map_err(BuildError::Validation)
    }
}
