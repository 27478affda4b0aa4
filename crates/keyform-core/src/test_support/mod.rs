//! Hand-resolved models shared by core tests.
//!
//! The registry normally produces these; core tests build them directly so
//! transforms can be exercised without the schema crate.

use crate::{
    model::{
        AttributeModel, Discriminator, EntityIndexModel, EntityModel, EntityVariant, IndexKind,
        KeyField, PrimaryKeyModel, TableIndexModel, TableModel,
    },
    template::KeyTemplate,
};
use std::{collections::BTreeMap, sync::Arc};

/// Discriminator attribute stored by the inheritance test table.
pub const DISCRIMINATOR: &str = "__en";

/// Build a key field from a template that is known to compile.
#[must_use]
pub fn key(field: &str, template: &str) -> KeyField {
    KeyField::new(
        field,
        KeyTemplate::compile(template).expect("test template should compile"),
    )
}

fn attrs(names: &[&str]) -> Vec<AttributeModel> {
    names.iter().map(|name| AttributeModel::new(*name)).collect()
}

fn gsi(name: &str) -> TableIndexModel {
    TableIndexModel {
        name: name.to_string(),
        kind: IndexKind::Global,
        partition_key: Some(format!("{name}PK")),
        sort_key: Some(format!("{name}SK")),
    }
}

fn lsi(name: &str) -> TableIndexModel {
    TableIndexModel {
        name: name.to_string(),
        kind: IndexKind::Local,
        partition_key: None,
        sort_key: Some(format!("{name}SK")),
    }
}

fn global_index(name: &str, pk: &str, sk: &str) -> EntityIndexModel {
    EntityIndexModel {
        name: name.to_string(),
        kind: IndexKind::Global,
        partition: Some(key(&format!("{name}PK"), pk)),
        sort: Some(key(&format!("{name}SK"), sk)),
    }
}

/// Table with PK/SK, two global indexes, one local index, no discriminator.
#[must_use]
pub fn app_table() -> Arc<TableModel> {
    Arc::new(TableModel::new(
        "app",
        "PK",
        Some("SK".to_string()),
        vec![gsi("GSI1"), gsi("GSI2"), lsi("LSI1")],
        None,
    ))
}

/// Same shape as `app_table`, storing a `__en` discriminator.
#[must_use]
pub fn tagged_table() -> Arc<TableModel> {
    Arc::new(TableModel::new(
        "tagged",
        "PK",
        Some("SK".to_string()),
        vec![gsi("GSI1")],
        Some(DISCRIMINATOR.to_string()),
    ))
}

/// Partition-key-only table.
#[must_use]
pub fn global_table() -> Arc<TableModel> {
    Arc::new(TableModel::new("global", "PK", None, vec![gsi("GSI1")], None))
}

/// `User`: `USER#{{id}}` keys, sparse GSI1 on status/name.
#[must_use]
pub fn user_model() -> EntityModel {
    EntityModel {
        name: "user".to_string(),
        table: app_table(),
        primary_key: PrimaryKeyModel {
            partition: key("PK", "USER#{{id}}"),
            sort: Some(key("SK", "USER#{{id}}")),
        },
        indexes: vec![global_index(
            "GSI1",
            "USER#STATUS#{{status}}",
            "USER#{{name}}",
        )],
        attributes: attrs(&["id", "name", "status"]),
        discriminator: None,
        variants: BTreeMap::new(),
    }
}

/// `Organisation`: two GSIs sharing `name`, plus an LSI on `createdAt`.
#[must_use]
pub fn organisation_model() -> EntityModel {
    EntityModel {
        name: "organisation".to_string(),
        table: app_table(),
        primary_key: PrimaryKeyModel {
            partition: key("PK", "ORG#{{id}}"),
            sort: Some(key("SK", "ORG#{{id}}")),
        },
        indexes: vec![
            global_index("GSI1", "ORG#{{id}}", "ORG#{{name}}#ACTIVE#{{active}}"),
            global_index(
                "GSI2",
                "ORG#{{id}}",
                "ORG#{{name}}#TEAM_COUNT#{{teamCount}}",
            ),
            EntityIndexModel {
                name: "LSI1".to_string(),
                kind: IndexKind::Local,
                partition: None,
                sort: Some(key("LSI1SK", "CREATED#{{createdAt}}")),
            },
        ],
        attributes: attrs(&["id", "name", "active", "teamCount", "createdAt"]),
        discriminator: None,
        variants: BTreeMap::new(),
    }
}

/// `Counter` on a partition-key-only table.
#[must_use]
pub fn counter_model() -> EntityModel {
    EntityModel {
        name: "counter".to_string(),
        table: global_table(),
        primary_key: PrimaryKeyModel {
            partition: key("PK", "COUNTER#{{id}}"),
            sort: None,
        },
        indexes: vec![global_index("GSI1", "KIND#{{kind}}", "COUNTER#{{id}}")],
        attributes: attrs(&["id", "kind", "value"]),
        discriminator: None,
        variants: BTreeMap::new(),
    }
}

fn tagged_attrs(names: &[&str]) -> Vec<AttributeModel> {
    let mut out = attrs(names);
    out.push(AttributeModel::internal(DISCRIMINATOR));
    out
}

fn variant(entity: &str, names: &[&str]) -> EntityVariant {
    EntityVariant {
        entity: entity.to_string(),
        attributes: tagged_attrs(names),
    }
}

fn person_like(name: &str, names: &[&str]) -> EntityModel {
    EntityModel {
        name: name.to_string(),
        table: tagged_table(),
        primary_key: PrimaryKeyModel {
            partition: key("PK", "PERSON#{{id}}"),
            sort: Some(key("SK", "PERSON#{{id}}")),
        },
        indexes: vec![global_index("GSI1", "PEOPLE", "NAME#{{name}}")],
        attributes: tagged_attrs(names),
        discriminator: Some(Discriminator {
            attribute: DISCRIMINATOR.to_string(),
            value: name.to_string(),
        }),
        variants: BTreeMap::new(),
    }
}

/// `Person` base with an `Employee` descendant, both tagged with `__en`.
#[must_use]
pub fn person_model() -> EntityModel {
    let mut model = person_like("person", &["id", "name"]);
    model.variants = BTreeMap::from([
        ("person".to_string(), variant("person", &["id", "name"])),
        (
            "employee".to_string(),
            variant("employee", &["id", "name", "department"]),
        ),
    ]);

    model
}

/// `Employee extends Person`.
#[must_use]
pub fn employee_model() -> EntityModel {
    let mut model = person_like("employee", &["id", "name", "department"]);
    model.variants = BTreeMap::from([(
        "employee".to_string(),
        variant("employee", &["id", "name", "department"]),
    )]);

    model
}
