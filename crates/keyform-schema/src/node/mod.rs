mod attribute;
mod entity;
mod index;
mod schema;
mod table;

pub use attribute::*;
pub use entity::*;
pub use index::*;
pub use schema::*;
pub use table::*;

use crate::{
    MAX_ATTRIBUTE_NAME_LEN, MAX_ENTITY_NAME_LEN,
    error::ErrorTree,
    visit::{Event, Visitor},
};
use keyform_core::template::{KeyTemplate, is_attribute_name};
use thiserror::Error as ThisError;

///
/// NodeError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum NodeError {
    #[error("entity '{0}' not found")]
    EntityNotFound(String),

    #[error("inheritance cycle through entity '{0}'")]
    InheritanceCycle(String),

    #[error("table '{0}' not found")]
    TableNotFound(String),
}

///
/// ValidateNode
/// Node-local checks that need no other part of the schema.
///

pub trait ValidateNode {
    fn validate(&self) -> Result<(), ErrorTree> {
        Ok(())
    }
}

///
/// VisitableNode
///

pub trait VisitableNode: ValidateNode {
    // route_key
    fn route_key(&self) -> String {
        String::new()
    }

    // accept
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        visitor.visit(self, Event::Enter);
        self.drive(visitor);
        visitor.visit(self, Event::Exit);
    }

    // drive
    fn drive<V: Visitor>(&self, _: &mut V) {}
}

// Identifiers are non-empty ASCII without whitespace, within `max` bytes.
pub(crate) fn validate_ident(label: &str, ident: &str, max: usize) -> Result<(), String> {
    if ident.is_empty() {
        return Err(format!("{label} is empty"));
    }
    if ident.len() > max {
        return Err(format!("{label} '{ident}' exceeds max length {max}"));
    }
    if !ident.is_ascii() || ident.chars().any(char::is_whitespace) {
        return Err(format!(
            "{label} '{ident}' must be ASCII without whitespace"
        ));
    }

    Ok(())
}

pub(crate) fn validate_entity_name(name: &str) -> Result<(), String> {
    validate_ident("entity name", name, MAX_ENTITY_NAME_LEN)
}

// Field names follow the placeholder rule so every attribute is templatable.
pub(crate) fn validate_field_name(label: &str, name: &str) -> Result<(), String> {
    validate_ident(label, name, MAX_ATTRIBUTE_NAME_LEN)?;
    if !is_attribute_name(name) {
        return Err(format!(
            "{label} '{name}' may only contain ASCII letters, digits, '_', '-', '.' or '$'"
        ));
    }

    Ok(())
}

// Compile a template for its syntax errors only.
pub(crate) fn validate_template(errs: &mut ErrorTree, label: &str, template: &str) {
    if let Err(e) = KeyTemplate::compile(template) {
        crate::err!(errs, "{label} template '{template}': {e}");
    }
}
