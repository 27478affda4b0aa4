use crate::{node::validate_field_name, prelude::*};
use std::ops::Not;

///
/// Attribute
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Attribute {
    pub name: &'static str,

    #[serde(default, skip_serializing_if = "Not::not")]
    pub internal: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_generate: Option<AutoGenerate>,
}

impl Attribute {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            internal: false,
            auto_generate: None,
        }
    }

    /// Stored on the item but never surfaced on an instance.
    #[must_use]
    pub const fn internal(name: &'static str) -> Self {
        Self {
            name,
            internal: true,
            auto_generate: None,
        }
    }

    #[must_use]
    pub const fn generated(name: &'static str, auto_generate: AutoGenerate) -> Self {
        Self {
            name,
            internal: false,
            auto_generate: Some(auto_generate),
        }
    }
}

impl ValidateNode for Attribute {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if let Err(e) = validate_field_name("attribute name", self.name) {
            errs.add(e);
        }

        errs.result()
    }
}

impl VisitableNode for Attribute {
    fn route_key(&self) -> String {
        format!("attribute:{}", self.name)
    }
}
