//! Runtime data model definitions.
//!
//! This module contains the *runtime representations* of schema-level
//! concepts, as opposed to their declarative forms in `keyform-schema`.
//! Models are resolved once by the registry and then shared read-only by
//! every transform.
//!
//! In general:
//! - Schema code defines *what exists*
//! - `model` defines *what runs*

mod attribute;
mod entity;
mod index;
mod table;

pub use attribute::AttributeModel;
pub use entity::{Discriminator, EntityModel, EntityVariant, KeyField, PrimaryKeyModel};
pub use index::{EntityIndexModel, IndexKind};
pub use table::{TableIndexModel, TableModel};
