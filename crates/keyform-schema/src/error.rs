use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

///
/// ErrorTree
///
/// Validation messages grouped by node route (`entity:User/index:GSI1`).
/// Validation never stops at the first problem; every node reports into one
/// tree and the caller sees the whole set.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record a message against this node.
    pub fn add(&mut self, error: impl ToString) {
        self.messages.push(error.to_string());
    }

    /// Record a message against a direct child route.
    pub fn add_at(&mut self, route: &str, error: impl ToString) {
        self.node_mut([route]).add(error);
    }

    /// Fold another tree into this node.
    pub fn merge(&mut self, other: Self) {
        self.messages.extend(other.messages);
        for (route, child) in other.children {
            self.children.entry(route).or_default().merge(child);
        }
    }

    /// Fold another tree in under a direct child route.
    pub fn merge_at(&mut self, route: &str, other: Self) {
        self.merge_at_path([route], other);
    }

    /// Fold another tree in under a nested route; empty segments are skipped.
    pub fn merge_at_path<'a>(&mut self, path: impl IntoIterator<Item = &'a str>, other: Self) {
        self.node_mut(path).merge(other);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of messages in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Every message paired with its full route, routes in sorted order.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.flatten_into("", &mut out);

        out
    }

    /// Whether any message under `route` contains `needle`.
    #[must_use]
    pub fn contains(&self, route: &str, needle: &str) -> bool {
        self.flatten()
            .iter()
            .any(|(r, message)| r == route && message.contains(needle))
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    fn node_mut<'a>(&mut self, path: impl IntoIterator<Item = &'a str>) -> &mut Self {
        let mut node = self;
        for segment in path.into_iter().filter(|s| !s.is_empty()) {
            node = node.children.entry(segment.to_string()).or_default();
        }

        node
    }

    fn flatten_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for message in &self.messages {
            out.push((prefix.to_string(), message.clone()));
        }
        for (route, child) in &self.children {
            let path = if prefix.is_empty() {
                route.clone()
            } else {
                format!("{prefix}/{route}")
            };
            child.flatten_into(&path, out);
        }
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .flatten()
            .into_iter()
            .map(|(route, message)| {
                if route.is_empty() {
                    message
                } else {
                    format!("{route}: {message}")
                }
            })
            .collect();

        f.write_str(&lines.join("\n"))
    }
}

impl From<String> for ErrorTree {
    fn from(message: String) -> Self {
        let mut tree = Self::new();
        tree.add(message);

        tree
    }
}

impl From<&str> for ErrorTree {
    fn from(message: &str) -> Self {
        Self::from(message.to_string())
    }
}

/// Add a formatted message to an `ErrorTree`.
#[macro_export]
macro_rules! err {
    ($errs:expr, $($arg:tt)*) => {{
        $errs.add(format!($($arg)*));
    }};
}
