use crate::node::NodeError;
use derive_more::IntoIterator;
use keyform_core::model::EntityModel;
use std::{collections::BTreeMap, sync::Arc};

///
/// Registry
///
/// Resolved entity models keyed by entity name. Built once by
/// `Schema::build` and read-only afterwards; share it by reference or wrap
/// it in an `Arc`.
///

#[derive(Clone, Debug, Default, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct Registry {
    entities: BTreeMap<String, Arc<EntityModel>>,
}

impl Registry {
    pub(crate) const fn new(entities: BTreeMap<String, Arc<EntityModel>>) -> Self {
        Self { entities }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<EntityModel>> {
        self.entities.get(name)
    }

    pub fn try_get(&self, name: &str) -> Result<&Arc<EntityModel>, NodeError> {
        self.get(name)
            .ok_or_else(|| NodeError::EntityNotFound(name.to_string()))
    }

    /// Every model, in entity name order.
    pub fn entities(&self) -> impl Iterator<Item = &Arc<EntityModel>> {
        self.entities.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
