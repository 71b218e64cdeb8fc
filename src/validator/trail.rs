// src/validator/trail.rs
// =============================================================================
// The two bits of the bookmark tree the validator needs to know about:
// - BookmarkRef: a link's name and URI
// - Trail: the folder names leading down to it, used to group the report
// =============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRAIL_SEPARATOR: &str = " -- ";

/// Read-only view of a bookmark.
///
/// Ordering is (name, uri), which is also the order links are listed in
/// within a trail in the report.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookmarkRef {
    pub name: String,
    pub uri: String,
}

impl BookmarkRef {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }
}

/// Ancestor folder names, root first. Never changes once built: going one
/// level deeper makes a new Trail with [`Trail::child`].
#[derive(Debug, Clone, Default)]
pub struct Trail {
    names: Vec<String>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(name: impl Into<String>) -> Self {
        Self {
            names: vec![name.into()],
        }
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(name.into());
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(TRAIL_SEPARATOR))
    }
}

// Two trails are the same group when they print the same
impl PartialEq for Trail {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Trail {}

impl<S: Into<String>> FromIterator<S> for Trail {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}
