//! Field path tracking for hydration diagnostics.

use std::fmt;

/// A dotted path to a field inside a nested payload.
///
/// Paths are built as hydration descends, so a failure deep inside a
/// record identifies exactly where the payload went wrong, e.g.
/// `settings.topic.text` or `list[2].handle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// Create a root path, usually named after the top-level record.
    pub fn root(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the path extended with a child field name.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// Returns the path extended with a sequence index.
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_path_display() {
        let path = FieldPath::root("settings").child("topic").child("text");
        assert_eq!(path.to_string(), "settings.topic.text");
    }

    #[test]
    fn indexed_path_display() {
        let path = FieldPath::root("banlist").child("list").index(2).child("handle");
        assert_eq!(path.to_string(), "banlist.list[2].handle");
    }
}
