use derive_more::Display;
use keyform_core::{
    error::{ErrorOrigin as CoreErrorOrigin, InternalError},
    generate::GenerateError,
    template::TemplateError,
    transform::TransformError,
};
use keyform_schema::{Error as SchemaError, build::BuildError, node::NodeError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Debug, Deserialize, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(ErrorKind::Internal, err.origin.into(), err.message)
    }
}

impl From<TransformError> for Error {
    fn from(err: TransformError) -> Self {
        let kind = match &err {
            TransformError::MissingRequiredKeyAttribute { .. } => {
                TransformErrorKind::MissingRequiredKeyAttribute
            }
            TransformError::SchemaMismatch { .. } => TransformErrorKind::SchemaMismatch,
            TransformError::UnknownIndex { .. } => TransformErrorKind::UnknownIndex,
            TransformError::ImmutablePrimaryKeyAttribute { .. } => {
                TransformErrorKind::ImmutablePrimaryKeyAttribute
            }
            TransformError::InvalidAttributeValue { .. } => {
                TransformErrorKind::InvalidAttributeValue
            }
        };
        let origin = InternalError::from(err.clone()).origin.into();

        Self::new(ErrorKind::Transform(kind), origin, err.to_string())
    }
}

impl From<TemplateError> for Error {
    fn from(err: TemplateError) -> Self {
        Self::new(
            ErrorKind::Schema(SchemaErrorKind::InvalidTemplate),
            ErrorOrigin::Template,
            err.to_string(),
        )
    }
}

impl From<GenerateError> for Error {
    fn from(err: GenerateError) -> Self {
        InternalError::from(err).into()
    }
}

impl From<BuildError> for Error {
    fn from(err: BuildError) -> Self {
        let kind = match &err {
            BuildError::Validation(_) => SchemaErrorKind::Invalid,
            BuildError::UnknownAttributeReference(_) => SchemaErrorKind::UnknownAttributeReference,
        };

        Self::new(ErrorKind::Schema(kind), ErrorOrigin::Schema, err.to_string())
    }
}

impl From<NodeError> for Error {
    fn from(err: NodeError) -> Self {
        let kind = match &err {
            NodeError::EntityNotFound(_) | NodeError::TableNotFound(_) => SchemaErrorKind::NotFound,
            NodeError::InheritanceCycle(_) => SchemaErrorKind::Invalid,
        };

        Self::new(ErrorKind::Schema(kind), ErrorOrigin::Schema, err.to_string())
    }
}

impl From<SchemaError> for Error {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::BuildError(err) => err.into(),
            SchemaError::NodeError(err) => err.into(),
        }
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Schema(SchemaErrorKind),
    Transform(TransformErrorKind),

    /// The caller cannot remediate this.
    Internal,
}

///
/// SchemaErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SchemaErrorKind {
    /// Structural schema defect (names, tables, inheritance, index shape).
    Invalid,

    /// A key template does not compile.
    InvalidTemplate,

    /// No entity or table registered under the requested name.
    NotFound,

    /// A key template names an attribute the entity does not declare.
    UnknownAttributeReference,
}

///
/// TransformErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TransformErrorKind {
    /// A primary key template could not be fully interpolated.
    MissingRequiredKeyAttribute,

    /// A stored item resolved to no known entity type, or to another one.
    SchemaMismatch,

    UnknownIndex,

    /// An update tried to change an attribute the primary key is built from.
    ImmutablePrimaryKeyAttribute,

    /// A stored value has the wrong shape for the typed field.
    InvalidAttributeValue,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Generate,
    Resolve,
    Schema,
    Template,
    Transform,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Generate => Self::Generate,
            CoreErrorOrigin::Resolve => Self::Resolve,
            CoreErrorOrigin::Template => Self::Template,
            CoreErrorOrigin::Transform => Self::Transform,
        }
    }
}
