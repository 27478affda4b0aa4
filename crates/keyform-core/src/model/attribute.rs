use crate::generate::AutoGenerate;
use serde::Serialize;

///
/// AttributeModel
/// Runtime attribute metadata used by the transforms.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AttributeModel {
    pub name: String,

    /// Bookkeeping attribute (e.g. the discriminator tag) that is stored but
    /// never surfaced on an entity instance.
    pub internal: bool,

    pub auto_generate: Option<AutoGenerate>,
}

impl AttributeModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            internal: false,
            auto_generate: None,
        }
    }

    #[must_use]
    pub fn internal(name: impl Into<String>) -> Self {
        Self {
            internal: true,
            ..Self::new(name)
        }
    }

    #[must_use]
    pub fn with_auto_generate(mut self, auto_generate: AutoGenerate) -> Self {
        self.auto_generate = Some(auto_generate);
        self
    }
}
