//! Shared types for container paths and record addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path to a record inside a container, relative to the container root.
///
/// Components are record names separated by `/`. The empty path addresses
/// the container root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordPath(Vec<String>);

impl RecordPath {
    /// The container root.
    pub fn root() -> Self {
        RecordPath(Vec::new())
    }

    /// Parse a slash-separated path. Empty segments are dropped, so
    /// `"a//b/"` and `"a/b"` address the same record.
    pub fn parse(path: &str) -> Self {
        RecordPath(
            path.split('/')
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
        )
    }

    /// Append one record name, yielding the child path.
    pub fn child(&self, name: &str) -> Self {
        let mut components = self.0.clone();
        components.push(name.to_string());
        RecordPath(components)
    }

    /// True for the container root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path components in root-to-leaf order.
    pub fn components(&self) -> &[String] {
        &self.0
    }

    /// Final component, if any.
    pub fn name(&self) -> Option<&str> {
        self.0.last().map(|s| s.as_str())
    }

    /// Parent path. Returns `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(RecordPath(self.0[..self.0.len() - 1].to_vec()))
    }
}

impl fmt::Display for RecordPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "/{}", self.0.join("/"))
        }
    }
}
