//! Validation issues and their paths.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of a path: an object key or a numeric index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Ordered trail from the validated root to a failing location. Empty is the root.
pub type Path = Vec<PathSegment>;

/// Category tag explaining what kind of rule produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Cause {
    /// The value has the wrong runtime kind.
    Kind,
    /// The value differs from an expected literal.
    Literal,
    /// The value is not an instance of the expected class.
    Instance,
    Size,
    Range,
    Pattern,
    /// A tuple received more elements than it declares.
    Overflow,
    /// No member of a union accepted the value.
    Union,
    /// A negated struct accepted the value.
    Negation,
    Refinement,
    /// Nesting exceeded the configured maximum depth.
    Depth,
}

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub message: String,
    pub path: Path,
    #[serde(rename = "causedBy", default, skip_serializing_if = "Option::is_none")]
    pub caused_by: Option<Cause>,
}

impl Issue {
    pub fn new(message: impl Into<String>, path: Path) -> Self {
        Self {
            message: message.into(),
            path,
            caused_by: None,
        }
    }

    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.caused_by = Some(cause);
        self
    }

    /// Dotted path rooted at `$`, e.g. `$.items.0.name`. `None` at the root.
    pub fn path_string(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        let mut out = String::from("$");
        for segment in &self.path {
            out.push('.');
            out.push_str(&segment.to_string());
        }
        Some(out)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_string() {
            Some(path) => write!(f, "{path} - {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_with_path() {
        let issue = Issue::new(
            "expected string, actual number",
            vec!["items".into(), 0usize.into(), "name".into()],
        );
        assert_eq!(
            issue.to_string(),
            "$.items.0.name - expected string, actual number"
        );
    }

    #[test]
    fn display_at_root_omits_prefix() {
        let issue = Issue::new("expected string, actual number", vec![]);
        assert_eq!(issue.path_string(), None);
        assert_eq!(issue.to_string(), "expected string, actual number");
    }

    #[test]
    fn serializes_issue_shape() {
        let issue = Issue::new("bad", vec!["a".into(), 1usize.into()]).with_cause(Cause::Kind);
        assert_eq!(
            serde_json::to_value(&issue).unwrap(),
            json!({"message": "bad", "path": ["a", 1], "causedBy": "kind"})
        );
        let bare = Issue::new("bad", vec![]);
        assert_eq!(
            serde_json::to_value(&bare).unwrap(),
            json!({"message": "bad", "path": []})
        );
    }

    #[test]
    fn deserializes_issue_shape() {
        let issue: Issue =
            serde_json::from_value(json!({"message": "m", "path": ["0", 2], "causedBy": "overflow"}))
                .unwrap();
        assert_eq!(issue.path, vec![PathSegment::Key("0".into()), PathSegment::Index(2)]);
        assert_eq!(issue.caused_by, Some(Cause::Overflow));
    }
}
