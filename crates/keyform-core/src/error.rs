use crate::{generate::GenerateError, template::TemplateError, transform::TransformError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured runtime error with a stable internal classification.
/// Not a stable API; the facade maps it onto its public `Error`.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    #[must_use]
    pub const fn is_schema_mismatch(&self) -> bool {
        matches!(
            self.detail,
            Some(ErrorDetail::Transform(TransformError::SchemaMismatch { .. }))
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<TransformError> for InternalError {
    fn from(err: TransformError) -> Self {
        let class = match &err {
            TransformError::MissingRequiredKeyAttribute { .. }
            | TransformError::ImmutablePrimaryKeyAttribute { .. }
            | TransformError::InvalidAttributeValue { .. } => ErrorClass::InvalidInput,
            TransformError::SchemaMismatch { .. } => ErrorClass::Mismatch,
            TransformError::UnknownIndex { .. } => ErrorClass::NotFound,
        };
        let origin = match &err {
            TransformError::ImmutablePrimaryKeyAttribute { .. } => ErrorOrigin::Resolve,
            _ => ErrorOrigin::Transform,
        };

        Self {
            class,
            origin,
            message: err.to_string(),
            detail: Some(ErrorDetail::Transform(err)),
        }
    }
}

impl From<TemplateError> for InternalError {
    fn from(err: TemplateError) -> Self {
        Self {
            class: ErrorClass::InvalidInput,
            origin: ErrorOrigin::Template,
            message: err.to_string(),
            detail: Some(ErrorDetail::Template(err)),
        }
    }
}

impl From<GenerateError> for InternalError {
    fn from(err: GenerateError) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Generate, err.to_string())
    }
}

///
/// ErrorDetail
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Template(TemplateError),

    #[error("{0}")]
    Transform(TransformError),
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Internal,
    InvalidInput,
    Mismatch,
    NotFound,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Internal => "internal",
            Self::InvalidInput => "invalid_input",
            Self::Mismatch => "mismatch",
            Self::NotFound => "not_found",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Generate,
    Resolve,
    Template,
    Transform,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Generate => "generate",
            Self::Resolve => "resolve",
            Self::Template => "template",
            Self::Transform => "transform",
        };
        write!(f, "{label}")
    }
}
