use crate::{node::validate_template, prelude::*};
use std::fmt::{self, Display};

///
/// Index
///
/// An entity's key templates for one secondary index declared on its table.
/// Local indexes take only a sort template; the table partition key is
/// shared with the primary key.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Index {
    pub name: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition: Option<&'static str>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<&'static str>,
}

impl Index {
    #[must_use]
    pub const fn global(name: &'static str, partition: &'static str, sort: &'static str) -> Self {
        Self {
            name,
            partition: Some(partition),
            sort: Some(sort),
        }
    }

    #[must_use]
    pub const fn local(name: &'static str, sort: &'static str) -> Self {
        Self {
            name,
            partition: None,
            sort: Some(sort),
        }
    }

    /// Declared templates, partition first.
    pub fn templates(&self) -> impl Iterator<Item = &'static str> {
        self.partition.into_iter().chain(self.sort)
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let templates: Vec<&str> = self.templates().collect();

        write!(f, "{}({})", self.name, templates.join(", "))
    }
}

impl ValidateNode for Index {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        if self.partition.is_none() && self.sort.is_none() {
            err!(errs, "index '{}' declares no key templates", self.name);
        }
        if let Some(template) = self.partition {
            validate_template(&mut errs, "partition", template);
        }
        if let Some(template) = self.sort {
            validate_template(&mut errs, "sort", template);
        }

        errs.result()
    }
}

impl VisitableNode for Index {
    fn route_key(&self) -> String {
        format!("index:{}", self.name)
    }
}
