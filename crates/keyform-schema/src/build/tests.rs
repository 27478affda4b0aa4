use crate::{build::BuildError, prelude::*};
use keyform_core::model::Discriminator;

const APP: Table = Table {
    name: "app",
    partition_key: "PK",
    sort_key: Some("SK"),
    indexes: &[
        TableIndex::global("GSI1", "GSI1PK", Some("GSI1SK")),
        TableIndex::global("GSI2", "GSI2PK", Some("GSI2SK")),
        TableIndex::local("LSI1", "LSI1SK"),
    ],
    discriminator: None,
};

const PEOPLE: Table = Table {
    name: "people",
    partition_key: "PK",
    sort_key: Some("SK"),
    indexes: &[TableIndex::global("GSI1", "GSI1PK", Some("GSI1SK"))],
    discriminator: Some("__en"),
};

const USER: Entity = Entity {
    name: "user",
    table: "app",
    extends: None,
    primary_key: PrimaryKey::new("USER#{{id}}", "USER#{{id}}"),
    indexes: &[Index::global(
        "GSI1",
        "USER#STATUS#{{status}}",
        "USER#{{name}}",
    )],
    attributes: &[
        Attribute::new("id"),
        Attribute::new("name"),
        Attribute::new("status"),
        Attribute::generated(
            "createdAt",
            AutoGenerate::on_create(GenerateStrategy::IsoDate),
        ),
    ],
};

const ORGANISATION: Entity = Entity {
    name: "organisation",
    table: "app",
    extends: None,
    primary_key: PrimaryKey::new("ORG#{{id}}", "ORG#{{id}}"),
    indexes: &[
        Index::global("GSI1", "ORG#{{id}}", "ORG#{{name}}#ACTIVE#{{active}}"),
        Index::global("GSI2", "ORG#{{id}}", "ORG#{{name}}#TEAM_COUNT#{{teamCount}}"),
        Index::local("LSI1", "CREATED#{{createdAt}}"),
    ],
    attributes: &[
        Attribute::new("id"),
        Attribute::new("name"),
        Attribute::new("active"),
        Attribute::new("teamCount"),
        Attribute::new("createdAt"),
    ],
};

const PERSON: Entity = Entity {
    name: "person",
    table: "people",
    extends: None,
    primary_key: PrimaryKey::new("PERSON#{{id}}", "PERSON#{{id}}"),
    indexes: &[Index::global("GSI1", "PEOPLE", "NAME#{{name}}")],
    attributes: &[Attribute::new("id"), Attribute::new("name")],
};

const EMPLOYEE: Entity = Entity {
    name: "employee",
    table: "people",
    extends: Some("person"),
    primary_key: PrimaryKey::new("PERSON#{{id}}", "PERSON#{{id}}"),
    indexes: &[Index::global("GSI1", "PEOPLE", "NAME#{{name}}")],
    attributes: &[Attribute::new("department"), Attribute::internal("name")],
};

const MANAGER: Entity = Entity {
    name: "manager",
    table: "people",
    extends: Some("employee"),
    primary_key: PrimaryKey::new("PERSON#{{id}}", "PERSON#{{id}}"),
    indexes: &[],
    attributes: &[Attribute::new("reports")],
};

fn schema() -> Schema {
    Schema::new()
        .with_table(APP)
        .with_table(PEOPLE)
        .with_entity(USER)
        .with_entity(ORGANISATION)
        .with_entity(PERSON)
        .with_entity(EMPLOYEE)
        .with_entity(MANAGER)
}

fn build_errors(schema: &Schema) -> ErrorTree {
    match schema.build() {
        Ok(_) => panic!("schema should fail to build"),
        Err(err) => err.into_errors(),
    }
}

// ---- resolution --------------------------------------------------------

#[test]
fn builds_every_entity() {
    let registry = schema().build().expect("schema builds");

    let names: Vec<&str> = registry.entities().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["employee", "manager", "organisation", "person", "user"]
    );
    assert!(registry.get("robot").is_none());
    assert!(registry.try_get("robot").is_err());
}

#[test]
fn compiles_primary_and_index_templates() {
    let registry = schema().build().expect("schema builds");
    let user = registry.try_get("user").expect("user registered");

    assert_eq!(user.primary_key.partition.field, "PK");
    assert_eq!(user.primary_key.partition.template.source(), "USER#{{id}}");

    let gsi1 = user.index("GSI1").expect("GSI1 bound");
    assert_eq!(gsi1.kind, IndexKind::Global);
    let fields: Vec<&str> = gsi1.key_fields().map(|k| k.field.as_str()).collect();
    assert_eq!(fields, vec!["GSI1PK", "GSI1SK"]);
    assert!(user.discriminator.is_none());
    assert!(user.variants.is_empty());
}

#[test]
fn local_index_binds_only_its_sort_field() {
    let registry = schema().build().expect("schema builds");
    let org = registry.try_get("organisation").expect("organisation registered");

    let lsi = org.index("LSI1").expect("LSI1 bound");
    assert_eq!(lsi.kind, IndexKind::Local);
    assert!(lsi.partition.is_none());
    assert_eq!(
        lsi.sort.as_ref().map(|k| k.field.as_str()),
        Some("LSI1SK")
    );
}

#[test]
fn auto_generate_is_carried_into_the_model() {
    let registry = schema().build().expect("schema builds");
    let user = registry.try_get("user").expect("user registered");

    let created = user.attribute("createdAt").expect("createdAt declared");
    assert_eq!(
        created.auto_generate,
        Some(AutoGenerate::on_create(GenerateStrategy::IsoDate))
    );
}

#[test]
fn inherited_attributes_come_first_and_are_replaced_in_place() {
    let registry = schema().build().expect("schema builds");
    let employee = registry.try_get("employee").expect("employee registered");

    let attrs: Vec<(&str, bool)> = employee
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.internal))
        .collect();
    assert_eq!(
        attrs,
        vec![
            ("id", false),
            ("name", true),
            ("department", false),
            ("__en", true),
        ]
    );
}

#[test]
fn discriminator_and_variants_follow_descendants() {
    let registry = schema().build().expect("schema builds");

    let person = registry.try_get("person").expect("person registered");
    assert_eq!(
        person.discriminator,
        Some(Discriminator {
            attribute: "__en".to_string(),
            value: "person".to_string(),
        })
    );
    let tags: Vec<&str> = person.variants.keys().map(String::as_str).collect();
    assert_eq!(tags, vec!["employee", "manager", "person"]);

    let employee = registry.try_get("employee").expect("employee registered");
    let tags: Vec<&str> = employee.variants.keys().map(String::as_str).collect();
    assert_eq!(tags, vec!["employee", "manager"]);

    let manager = &person.variants["manager"];
    let names: Vec<&str> = manager.attributes.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["id", "name", "department", "reports", "__en"]);
}

// ---- validation --------------------------------------------------------

#[test]
fn rejects_unknown_attribute_reference() {
    const BAD: Entity = Entity {
        indexes: &[Index::global("GSI1", "USER#{{status}}", "USER#{{nickname}}")],
        ..USER
    };
    let err = Schema::new()
        .with_table(APP)
        .with_entity(BAD)
        .build()
        .expect_err("nickname is not declared");

    assert!(matches!(err, BuildError::UnknownAttributeReference(_)), "{err}");
    let tree = err.errors();
    assert!(
        tree.contains("entity:user/index:GSI1", "unknown attribute reference 'nickname'"),
        "{tree}"
    );
    assert_eq!(tree.len(), 1);
}

#[test]
fn rejects_partition_template_on_local_index() {
    const BAD: Entity = Entity {
        indexes: &[Index {
            name: "LSI1",
            partition: Some("ORG#{{id}}"),
            sort: Some("CREATED#{{createdAt}}"),
        }],
        ..ORGANISATION
    };
    let tree = build_errors(&Schema::new().with_table(APP).with_entity(BAD));

    assert!(
        tree.contains("entity:organisation/index:LSI1", "must not declare a partition"),
        "{tree}"
    );
}

#[test]
fn rejects_inheritance_cycles() {
    const A: Entity = Entity {
        name: "a",
        extends: Some("b"),
        ..PERSON
    };
    const B: Entity = Entity {
        name: "b",
        extends: Some("a"),
        ..PERSON
    };
    let tree = build_errors(&Schema::new().with_table(PEOPLE).with_entity(A).with_entity(B));

    assert!(tree.contains("entity:a", "inheritance cycle"), "{tree}");
    assert!(tree.contains("entity:b", "inheritance cycle"), "{tree}");
}

#[test]
fn rejects_parent_on_another_table() {
    const STRAY: Entity = Entity {
        name: "stray",
        table: "app",
        extends: Some("person"),
        indexes: &[],
        ..PERSON
    };
    let tree = build_errors(
        &Schema::new()
            .with_table(APP)
            .with_table(PEOPLE)
            .with_entity(PERSON)
            .with_entity(STRAY),
    );

    assert!(tree.contains("entity:stray", "stored in table 'people'"), "{tree}");
}

#[test]
fn rejects_missing_table_and_parent() {
    const ORPHAN: Entity = Entity {
        name: "orphan",
        table: "nowhere",
        extends: Some("ghost"),
        ..PERSON
    };
    let tree = build_errors(&Schema::new().with_entity(ORPHAN));

    assert!(tree.contains("entity:orphan", "table 'nowhere' not found"), "{tree}");
    assert!(tree.contains("entity:orphan", "parent entity 'ghost' not found"), "{tree}");
}

#[test]
fn sort_template_must_match_table_shape() {
    const NO_SORT: Entity = Entity {
        primary_key: PrimaryKey::partition_only("USER#{{id}}"),
        ..USER
    };
    let tree = build_errors(&Schema::new().with_table(APP).with_entity(NO_SORT));

    assert!(
        tree.contains("entity:user/primary_key", "no sort template"),
        "{tree}"
    );
}

#[test]
fn rejects_index_missing_from_table() {
    const BAD: Entity = Entity {
        indexes: &[Index::global("GSI9", "X#{{id}}", "Y#{{id}}")],
        ..USER
    };
    let tree = build_errors(&Schema::new().with_table(APP).with_entity(BAD));

    assert!(
        tree.contains("entity:user/index:GSI9", "not declared on table 'app'"),
        "{tree}"
    );
}

#[test]
fn reports_template_syntax_errors_with_route() {
    const BAD: Entity = Entity {
        primary_key: PrimaryKey::new("USER#{{id", "USER#{{id}}"),
        ..USER
    };
    let tree = build_errors(&Schema::new().with_table(APP).with_entity(BAD));

    assert!(
        tree.contains("entity:user/primary_key", "unterminated placeholder"),
        "{tree}"
    );
}

#[test]
fn rejects_duplicates() {
    const DUP: Entity = Entity {
        attributes: &[Attribute::new("id"), Attribute::new("id")],
        indexes: &[],
        primary_key: PrimaryKey::new("USER#{{id}}", "USER#{{id}}"),
        ..USER
    };
    let tree = build_errors(
        &Schema::new()
            .with_table(APP)
            .with_table(APP)
            .with_entity(DUP)
            .with_entity(DUP),
    );

    assert!(tree.contains("", "duplicate table name 'app'"), "{tree}");
    assert!(tree.contains("", "duplicate entity name 'user'"), "{tree}");
    assert!(tree.contains("entity:user", "duplicate attribute 'id'"), "{tree}");
}

#[test]
fn rejects_attribute_named_like_the_discriminator() {
    const BAD: Entity = Entity {
        attributes: &[Attribute::new("id"), Attribute::new("name"), Attribute::new("__en")],
        ..PERSON
    };
    let tree = build_errors(&Schema::new().with_table(PEOPLE).with_entity(BAD));

    assert!(tree.contains("entity:person", "reserved for the table discriminator"), "{tree}");
}

#[test]
fn rejects_attribute_names_placeholders_cannot_reference() {
    const BAD: Entity = Entity {
        attributes: &[
            Attribute::new("id"),
            Attribute::new("name"),
            Attribute::new("status"),
            Attribute::new("tag#1"),
        ],
        ..USER
    };
    let tree = build_errors(&Schema::new().with_table(APP).with_entity(BAD));

    assert!(
        tree.contains("entity:user/attribute:tag#1", "may only contain ASCII letters"),
        "{tree}"
    );
}

#[test]
fn rejects_malformed_tables() {
    const BAD: Table = Table {
        name: "bad",
        partition_key: "PK",
        sort_key: Some("PK"),
        indexes: &[TableIndex {
            name: "LSI1",
            kind: IndexKind::Local,
            partition_key: Some("LSI1PK"),
            sort_key: None,
        }],
        discriminator: Some("SK"),
    };
    let tree = build_errors(&Schema::new().with_table(BAD));

    assert!(tree.contains("table:bad", "key field 'PK' is declared more than once"), "{tree}");
    assert!(tree.contains("table:bad/index:LSI1", "must not declare a partition key"), "{tree}");
    assert!(tree.contains("table:bad/index:LSI1", "requires a sort key"), "{tree}");
}

#[test]
fn unknown_references_fold_into_general_failures() {
    const BAD: Entity = Entity {
        table: "missing",
        indexes: &[],
        primary_key: PrimaryKey::new("USER#{{uuid}}", "USER#{{id}}"),
        ..USER
    };
    const ALSO_BAD: Entity = Entity {
        name: "other",
        indexes: &[],
        primary_key: PrimaryKey::new("OTHER#{{uuid}}", "OTHER#{{id}}"),
        ..USER
    };

    let err = Schema::new()
        .with_table(APP)
        .with_entity(BAD)
        .with_entity(ALSO_BAD)
        .build()
        .expect_err("two defects");

    assert!(matches!(err, BuildError::Validation(_)), "{err}");
    let tree = err.errors();
    assert!(tree.contains("entity:user", "table 'missing' not found"), "{tree}");
    assert!(
        tree.contains("entity:other/primary_key", "unknown attribute reference 'uuid'"),
        "{tree}"
    );
}
