use crate::prelude::*;

///
/// Schema
///
/// Every declared table and entity. Cross-node rules (table references,
/// inheritance, template attribute references) are checked by
/// `validate::validate_schema`.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub entities: Vec<Entity>,
}

impl Schema {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tables: Vec::new(),
            entities: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name == name)
    }

    pub fn try_table(&self, name: &str) -> Result<&Table, NodeError> {
        self.table(name)
            .ok_or_else(|| NodeError::TableNotFound(name.to_string()))
    }

    pub fn try_entity(&self, name: &str) -> Result<&Entity, NodeError> {
        self.entity(name)
            .ok_or_else(|| NodeError::EntityNotFound(name.to_string()))
    }

    /// The inheritance chain of `entity`, root ancestor first and `entity`
    /// itself last.
    pub fn lineage<'a>(&'a self, entity: &'a Entity) -> Result<Vec<&'a Entity>, NodeError> {
        let mut chain = vec![entity];
        let mut current = entity;

        while let Some(parent) = current.extends {
            let parent = self.try_entity(parent)?;
            if chain.iter().any(|e| e.name == parent.name) {
                return Err(NodeError::InheritanceCycle(entity.name.to_string()));
            }
            chain.push(parent);
            current = parent;
        }
        chain.reverse();

        Ok(chain)
    }

    /// Attributes along a lineage, ancestors first. A redeclared attribute
    /// replaces the inherited one in place.
    #[must_use]
    pub fn merged_attributes(lineage: &[&Entity]) -> Vec<Attribute> {
        let mut merged: Vec<Attribute> = Vec::new();

        for entity in lineage {
            for attr in entity.attributes {
                match merged.iter_mut().find(|a| a.name == attr.name) {
                    Some(slot) => *slot = *attr,
                    None => merged.push(*attr),
                }
            }
        }

        merged
    }
}

impl ValidateNode for Schema {}

impl VisitableNode for Schema {
    fn drive<V: Visitor>(&self, v: &mut V) {
        for node in &self.tables {
            node.accept(v);
        }
        for node in &self.entities {
            node.accept(v);
        }
    }
}
