//! Consumers: turn a struct's issue stream into a result, a boolean, or an error.

use serde::{Deserialize, Serialize};

use crate::context::{Context, DEFAULT_MAX_DEPTH};
use crate::error::AssertionError;
use crate::issue::Issue;
use crate::struct_def::Struct;
use crate::value::Value;

/// Options shared by [`validate`], [`is`] and [`assert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateOptions {
    /// Stop at the first issue instead of collecting all of them.
    pub fail_fast: bool,
    /// Maximum nesting depth before a depth issue is reported.
    pub max_depth: usize,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidateOptions {
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<'a> {
    /// The input, unchanged, now known to satisfy the struct.
    Valid(&'a Value),
    /// Every issue found, or only the first in fail-fast mode. Never empty.
    Invalid(Vec<Issue>),
}

impl<'a> Validation<'a> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Valid(_) => &[],
            Self::Invalid(issues) => issues,
        }
    }

    pub fn into_result(self) -> Result<&'a Value, Vec<Issue>> {
        match self {
            Self::Valid(value) => Ok(value),
            Self::Invalid(issues) => Err(issues),
        }
    }
}

/// Checks `value` against `s` and returns either the value or its issues.
pub fn validate<'a>(s: &Struct, value: &'a Value, opts: &ValidateOptions) -> Validation<'a> {
    let ctx = Context::with_max_depth(opts.max_depth);
    let issues: Vec<Issue> = {
        let stream = s.check(value, ctx);
        if opts.fail_fast {
            stream.take(1).collect()
        } else {
            stream.collect()
        }
    };
    tracing::trace!(
        struct_name = s.name(),
        fail_fast = opts.fail_fast,
        issues = issues.len(),
        "validated value"
    );
    if issues.is_empty() {
        Validation::Valid(value)
    } else {
        Validation::Invalid(issues)
    }
}

/// True if `value` satisfies `s`.
pub fn is(s: &Struct, value: &Value, opts: &ValidateOptions) -> bool {
    validate(s, value, opts).is_valid()
}

/// Returns an [`AssertionError`] carrying every issue if `value` does not satisfy `s`.
pub fn assert(s: &Struct, value: &Value, opts: &ValidateOptions) -> Result<(), AssertionError> {
    match validate(s, value, opts) {
        Validation::Valid(_) => Ok(()),
        Validation::Invalid(issues) => {
            tracing::debug!(
                struct_name = s.name(),
                issues = issues.len(),
                "assertion failed"
            );
            Err(AssertionError::new(issues))
        }
    }
}

impl Struct {
    /// [`validate`] with default options.
    pub fn validate<'a>(&self, value: &'a Value) -> Validation<'a> {
        validate(self, value, &ValidateOptions::default())
    }

    /// [`is`] with default options.
    pub fn is(&self, value: &Value) -> bool {
        is(self, value, &ValidateOptions::default())
    }

    /// [`assert`] with default options.
    pub fn assert(&self, value: &Value) -> Result<(), AssertionError> {
        assert(self, value, &ValidateOptions::default())
    }
}
