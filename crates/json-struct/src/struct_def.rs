//! The checkable protocol and the shared struct handle.
//!
//! A [`Struct`] is an immutable, cheaply clonable handle around a [`Check`]
//! implementation. Combinators hold clones of their members, so the same
//! leaf struct can be reused under any number of parents.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::context::Context;
use crate::issue::{Cause, Issue};
use crate::value::Value;

/// Lazy stream of issues produced by a single `check` call.
pub type Issues<'a> = Box<dyn Iterator<Item = Issue> + 'a>;

/// Field definitions of an object struct, in declaration order.
pub type Schema = IndexMap<String, Struct>;

/// The capability every struct implements.
///
/// `check` must not panic on bad input: failures are reported only by
/// yielding issues. `message` is the custom failure message attached to the
/// owning [`Struct`], if any; implementations decide which of their own
/// issues it replaces. Child issues are passed through untouched.
pub trait Check: Send + Sync {
    fn check<'a>(&'a self, value: &'a Value, ctx: Context, message: Option<&'a str>)
        -> Issues<'a>;
}

pub fn no_issues<'a>() -> Issues<'a> {
    Box::new(std::iter::empty())
}

pub fn single<'a>(issue: Issue) -> Issues<'a> {
    Box::new(std::iter::once(issue))
}

/// Default message format: `expected <what>, actual <actual>`.
pub(crate) fn expected(what: impl fmt::Display, actual: impl fmt::Display) -> String {
    format!("expected {what}, actual {actual}")
}

/// Returns the custom message if present, otherwise builds the default one.
pub(crate) fn message_or(message: Option<&str>, default: impl FnOnce() -> String) -> String {
    message.map_or_else(default, str::to_string)
}

/// Replaces the issue's message with the custom one, keeping its path and cause.
pub(crate) fn relabel(mut issue: Issue, message: Option<&str>) -> Issue {
    if let Some(message) = message {
        issue.message = message.to_string();
    }
    issue
}

/// A named, immutable validator.
#[derive(Clone)]
pub struct Struct {
    name: Arc<str>,
    checker: Arc<dyn Check>,
    message: Option<Arc<str>>,
    schema: Option<Arc<Schema>>,
}

impl Struct {
    /// Wraps a checker under a display name.
    pub fn new(name: impl Into<String>, checker: impl Check + 'static) -> Self {
        Self {
            name: Arc::from(name.into()),
            checker: Arc::new(checker),
            message: None,
            schema: None,
        }
    }

    pub(crate) fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Returns a copy of this struct whose own failure message is replaced.
    pub fn with_message(&self, message: impl Into<String>) -> Self {
        Self {
            message: Some(Arc::from(message.into())),
            ..self.clone()
        }
    }

    /// Human-readable name, used when composing combinator messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn custom_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Field definitions, present only for object structs built with fields.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_deref()
    }

    /// Checks `value` at the location described by `ctx`.
    ///
    /// Once the context is deeper than its limit a single depth issue is
    /// yielded instead of descending further.
    pub fn check<'a>(&'a self, value: &'a Value, ctx: Context) -> Issues<'a> {
        self.check_with(value, ctx, None)
    }

    /// Like [`Struct::check`], with `message` taking precedence over this
    /// struct's own custom message.
    pub(crate) fn check_with<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if ctx.depth_exceeded() {
            tracing::debug!(
                struct_name = %self.name,
                max_depth = ctx.max_depth(),
                "depth limit reached"
            );
            let message = format!("maximum depth of {} exceeded", ctx.max_depth());
            return single(ctx.fail(message, Cause::Depth));
        }
        self.checker
            .check(value, ctx, message.or(self.message.as_deref()))
    }
}

impl fmt::Debug for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Struct")
            .field("name", &self.name)
            .field("message", &self.message)
            .field("fields", &self.schema.as_ref().map(|s| s.keys().collect::<Vec<_>>()))
            .finish()
    }
}

impl fmt::Display for Struct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
