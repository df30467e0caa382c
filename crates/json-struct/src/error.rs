use thiserror::Error;

use crate::issue::Issue;

/// Malformed struct construction. Never produced while checking values.
#[derive(Error, Debug)]
pub enum StructError {
    #[error("{0} requires at least one member")]
    EmptyComposition(&'static str),

    #[error("{0} requires an object struct with field definitions, got {1}")]
    NotAnObject(&'static str, String),

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Raised by [`assert`](crate::assert) when a value fails validation.
///
/// The display message joins one `<path> - <message>` line per issue; the
/// original issues remain available unformatted.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct AssertionError {
    issues: Vec<Issue>,
    message: String,
}

impl AssertionError {
    pub fn new(issues: Vec<Issue>) -> Self {
        let message = issues
            .iter()
            .map(Issue::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Self { issues, message }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Cause;

    #[test]
    fn combined_message() {
        let err = AssertionError::new(vec![
            Issue::new("expected string, actual number", vec!["a".into()]).with_cause(Cause::Kind),
            Issue::new("expected object, actual null", vec![]),
        ]);
        assert_eq!(
            err.to_string(),
            "$.a - expected string, actual number\nexpected object, actual null"
        );
        assert_eq!(err.issues()[0].caused_by, Some(Cause::Kind));
        assert_eq!(err.issues()[1].message, "expected object, actual null");
    }

    #[test]
    fn struct_error_messages() {
        assert_eq!(
            StructError::EmptyComposition("and").to_string(),
            "and requires at least one member"
        );
        assert_eq!(
            StructError::NotAnObject("pick", "string".into()).to_string(),
            "pick requires an object struct with field definitions, got string"
        );
    }
}
