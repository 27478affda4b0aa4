//! Module: template
//! Responsibility: compile `{{attribute}}` key templates and interpolate them
//! against an attribute source.
//! Does not own: checking placeholder names against a schema (the registry
//! does that at build time).

mod parse;

#[cfg(test)]
mod tests;

use crate::{MAX_TEMPLATE_PLACEHOLDERS, traits::FieldValues};
use serde::Serialize;
use std::fmt::{self, Display, Write as _};
use thiserror::Error as ThisError;

///
/// TemplateError
///
/// Syntax errors found while compiling a key template.
/// Offsets are byte positions into the template source.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TemplateError {
    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },

    #[error("invalid placeholder name '{name}' at byte {offset}")]
    InvalidPlaceholder { name: String, offset: usize },

    #[error("unexpected '}}}}' at byte {offset}")]
    UnexpectedClose { offset: usize },

    #[error("template has {count} placeholders (max {max})")]
    TooManyPlaceholders { count: usize, max: usize },
}

/// Whether `name` can be referenced from a `{{placeholder}}`: non-empty
/// ASCII letters, digits, `_`, `-`, `.` or `$`.
#[must_use]
pub fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '$'))
}

///
/// Segment
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

///
/// Interpolated
///
/// Outcome of interpolating one template.
/// `Omitted` is the sparse-key case: some referenced attribute was undefined,
/// so the key field must be left out entirely.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Interpolated {
    Value(String),
    Omitted,
}

///
/// KeyTemplate
///
/// Compiled key template: literal/placeholder segments in source order plus
/// the interpolation set (sorted, de-duplicated attribute names).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct KeyTemplate {
    source: String,
    segments: Vec<Segment>,
    interpolation_set: Vec<String>,
}

impl KeyTemplate {
    /// Compile a template string.
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let segments = parse::parse_segments(source)?;

        let mut interpolation_set: Vec<String> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name.clone()),
                Segment::Literal(_) => None,
            })
            .collect();

        let count = interpolation_set.len();
        if count > MAX_TEMPLATE_PLACEHOLDERS {
            return Err(TemplateError::TooManyPlaceholders {
                count,
                max: MAX_TEMPLATE_PLACEHOLDERS,
            });
        }

        interpolation_set.sort_unstable();
        interpolation_set.dedup();

        Ok(Self {
            source: source.to_string(),
            segments,
            interpolation_set,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Attribute names this template depends on.
    #[must_use]
    pub fn interpolation_set(&self) -> &[String] {
        &self.interpolation_set
    }

    /// Whether the template reads `attribute`.
    #[must_use]
    pub fn references(&self, attribute: &str) -> bool {
        self.interpolation_set
            .binary_search_by(|name| name.as_str().cmp(attribute))
            .is_ok()
    }

    /// A template without placeholders always yields its literal text.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.interpolation_set.is_empty()
    }

    /// Interpolate against `source`.
    ///
    /// Yields the full key only when every placeholder resolves to a defined
    /// value; otherwise `Omitted`, never a partially-filled string.
    #[must_use]
    pub fn interpolate<S: FieldValues + ?Sized>(&self, source: &S) -> Interpolated {
        let mut out = String::with_capacity(self.source.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match source.get_value(name) {
                    Some(value) if value.is_defined() => {
                        // Writing into a String cannot fail.
                        let _ = write!(out, "{value}");
                    }
                    _ => return Interpolated::Omitted,
                },
            }
        }

        Interpolated::Value(out)
    }
}

impl Display for KeyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
