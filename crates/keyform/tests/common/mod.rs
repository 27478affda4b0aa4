//! Schema and typed entities shared by the integration tests.
#![allow(dead_code)]

use keyform::prelude::*;

pub const APP: Table = Table {
    name: "app",
    partition_key: "PK",
    sort_key: Some("SK"),
    indexes: &[
        TableIndex::global("GSI1", "GSI1PK", Some("GSI1SK")),
        TableIndex::global("GSI2", "GSI2PK", Some("GSI2SK")),
    ],
    discriminator: None,
};

pub const PEOPLE: Table = Table {
    name: "people",
    partition_key: "PK",
    sort_key: Some("SK"),
    indexes: &[TableIndex::global("GSI1", "GSI1PK", Some("GSI1SK"))],
    discriminator: Some("__en"),
};

pub const USER: Entity = Entity {
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
    ],
};

pub const ORGANISATION: Entity = Entity {
    name: "organisation",
    table: "app",
    extends: None,
    primary_key: PrimaryKey::new("ORG#{{id}}", "ORG#{{id}}"),
    indexes: &[
        Index::global("GSI1", "ORG#{{id}}", "ORG#{{name}}#ACTIVE#{{active}}"),
        Index::global("GSI2", "ORG#{{id}}", "ORG#{{name}}#TEAM_COUNT#{{teamCount}}"),
    ],
    attributes: &[
        Attribute::generated("id", AutoGenerate::on_create(GenerateStrategy::Ulid)),
        Attribute::new("name"),
        Attribute::new("active"),
        Attribute::new("teamCount"),
        Attribute::generated("createdAt", AutoGenerate::on_create(GenerateStrategy::IsoDate)),
        Attribute::generated("updatedAt", AutoGenerate::on_update(GenerateStrategy::EpochMillis)),
    ],
};

pub const PERSON: Entity = Entity {
    name: "person",
    table: "people",
    extends: None,
    primary_key: PrimaryKey::new("PERSON#{{id}}", "PERSON#{{id}}"),
    indexes: &[Index::global("GSI1", "PEOPLE", "NAME#{{name}}")],
    attributes: &[Attribute::new("id"), Attribute::new("name")],
};

pub const EMPLOYEE: Entity = Entity {
    name: "employee",
    table: "people",
    extends: Some("person"),
    primary_key: PrimaryKey::new("PERSON#{{id}}", "PERSON#{{id}}"),
    indexes: &[Index::global("GSI1", "PEOPLE", "NAME#{{name}}")],
    attributes: &[Attribute::new("department")],
};

#[must_use]
pub fn registry() -> Registry {
    Schema::new()
        .with_table(APP)
        .with_table(PEOPLE)
        .with_entity(USER)
        .with_entity(ORGANISATION)
        .with_entity(PERSON)
        .with_entity(EMPLOYEE)
        .build()
        .expect("test schema should build")
}

///
/// User
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<String>,
}

impl FieldValues for User {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "status" => Some(self.status.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for User {
    const ENTITY_NAME: &'static str = "user";

    fn from_instance(instance: &Instance) -> Result<Self, TransformError> {
        Ok(Self {
            id: instance.read("id")?,
            name: instance.read("name")?,
            status: instance.read("status")?,
        })
    }
}

///
/// Organisation
///

#[derive(Clone, Debug, PartialEq)]
pub struct Organisation {
    pub id: Option<String>,
    pub name: String,
    pub active: bool,
    pub team_count: i64,
    pub created_at: Option<String>,
}

impl FieldValues for Organisation {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "active" => Some(self.active.to_value()),
            "teamCount" => Some(self.team_count.to_value()),
            "createdAt" => Some(self.created_at.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for Organisation {
    const ENTITY_NAME: &'static str = "organisation";

    fn from_instance(instance: &Instance) -> Result<Self, TransformError> {
        Ok(Self {
            id: instance.read("id")?,
            name: instance.read("name")?,
            active: instance.read("active")?,
            team_count: instance.read("teamCount")?,
            created_at: instance.read("createdAt")?,
        })
    }
}

///
/// Person
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Person {
    pub id: String,
    pub name: String,
}

impl FieldValues for Person {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for Person {
    const ENTITY_NAME: &'static str = "person";

    fn from_instance(instance: &Instance) -> Result<Self, TransformError> {
        Ok(Self {
            id: instance.read("id")?,
            name: instance.read("name")?,
        })
    }
}

///
/// Employee
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
}

impl FieldValues for Employee {
    fn get_value(&self, field: &str) -> Option<Value> {
        match field {
            "id" => Some(self.id.to_value()),
            "name" => Some(self.name.to_value()),
            "department" => Some(self.department.to_value()),
            _ => None,
        }
    }
}

impl EntityKind for Employee {
    const ENTITY_NAME: &'static str = "employee";

    fn from_instance(instance: &Instance) -> Result<Self, TransformError> {
        Ok(Self {
            id: instance.read("id")?,
            name: instance.read("name")?,
            department: instance.read("department")?,
        })
    }
}
