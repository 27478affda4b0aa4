//! Schema validation orchestration and shared helpers.

pub mod keys;
pub mod naming;
pub mod relation;

use crate::{
    build::BuildError,
    error::ErrorTree,
    node::{Schema, VisitableNode},
    visit::ValidateVisitor,
};

/// Run full schema validation in a staged, deterministic order.
///
/// Unknown attribute references get their own error only when they are the
/// sole problem; otherwise they are folded into the general tree.
pub(crate) fn validate_schema(schema: &Schema) -> Result<(), BuildError> {
    // Phase 1: validate each node (structural + local invariants).
    let mut errors = validate_nodes(schema);

    // Phase 2: enforce schema-wide invariants.
    let references = validate_global(schema, &mut errors);

    if !errors.is_empty() {
        errors.merge(references);
        return Err(BuildError::Validation(errors));
    }

    references
        .result()
        .map_err(BuildError::UnknownAttributeReference)
}

// Validate all nodes via a visitor to retain route-aware error aggregation.
fn validate_nodes(schema: &Schema) -> ErrorTree {
    let mut visitor = ValidateVisitor::new();
    schema.accept(&mut visitor);

    visitor.errors
}

// Run global validation passes that require a full schema view.
// Returns the unknown attribute references found by the key pass.
fn validate_global(schema: &Schema, errors: &mut ErrorTree) -> ErrorTree {
    let mut references = ErrorTree::new();

    naming::validate_unique_names(schema, errors);
    relation::validate_relations(schema, errors);
    keys::validate_entity_keys(schema, errors, &mut references);

    references
}
