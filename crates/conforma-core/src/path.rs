//! Violation paths: where in the input a check failed
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step into a value: an object field name or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// An array index.
    Index(usize),
    /// An object field name.
    Field(String),
}

/// Ordered sequence of segments from the root of the validated value down
/// to the failing node. Empty for a root-level failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViolationPath(Vec<PathSegment>);

impl ViolationPath {
    /// The root path (no segments).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Whether this path points at the root value itself.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The segments, outermost first.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Extend the path with an object field name.
    pub fn child<S: Into<String>>(&self, name: S) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        Self(segments)
    }

    /// Extend the path with an array index.
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// The innermost field name on the path, if any. Index segments are
    /// skipped so that `$.a[0]` still reports the label `a`.
    pub fn field_label(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|segment| match segment {
            PathSegment::Field(name) => Some(name.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

impl From<Vec<PathSegment>> for ViolationPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for ViolationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root() {
        assert_eq!(ViolationPath::root().to_string(), "$");
    }

    #[test]
    fn test_display_nested() {
        let path = ViolationPath::root().child("a").child_index(0).child("b");
        assert_eq!(path.to_string(), "$.a[0].b");
    }

    #[test]
    fn test_field_label_skips_indices() {
        let path = ViolationPath::root().child("a").child_index(3);
        assert_eq!(path.field_label(), Some("a"));
        assert_eq!(ViolationPath::root().field_label(), None);
    }

    #[test]
    fn test_segments_serialize_as_values() {
        let path = ViolationPath::root().child_index(0).child("a");
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!([0, "a"]));
    }
}
