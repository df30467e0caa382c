//! Logical composition: AND, OR and NOT.
//!
//! The two n-ary combinators deliberately report failures differently.
//! AND forwards the first issue of the first failing member and stops.
//! OR discards member issues and, when every member fails, yields one
//! synthesized issue naming the whole union.

use crate::context::Context;
use crate::error::StructError;
use crate::issue::{Cause, Issue};
use crate::primitives::literal;
use crate::struct_def::{expected, message_or, relabel, Check, Issues, Struct};
use crate::value::Value;

fn compose_name(members: &[Struct], separator: &str) -> String {
    let names: Vec<&str> = members.iter().map(Struct::name).collect();
    format!("({})", names.join(separator))
}

fn collect_members(
    members: impl IntoIterator<Item = Struct>,
    combinator: &'static str,
) -> Result<Vec<Struct>, StructError> {
    let members: Vec<Struct> = members.into_iter().collect();
    if members.is_empty() {
        return Err(StructError::EmptyComposition(combinator));
    }
    Ok(members)
}

// -------------------------------------------------------------------------
// AND

struct AllOf {
    members: Vec<Struct>,
}

impl AllOf {
    fn first_failure(&self, value: &Value, ctx: &Context) -> Option<Issue> {
        self.members
            .iter()
            .find_map(|member| member.check(value, ctx.clone()).next())
    }
}

impl Check for AllOf {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        Box::new(
            std::iter::once_with(move || {
                self.first_failure(value, &ctx)
                    .map(|issue| relabel(issue, message))
            })
            .flatten(),
        )
    }
}

fn build_all_of(members: Vec<Struct>) -> Struct {
    Struct::new(compose_name(&members, " & "), AllOf { members })
}

/// All members must pass; only the first failing member's first issue is reported.
///
/// A custom message replaces the text of that issue. Its path and cause are kept.
pub fn and(members: impl IntoIterator<Item = Struct>) -> Result<Struct, StructError> {
    collect_members(members, "and").map(build_all_of)
}

/// Infallible form of [`and`]: the first member is required by the signature.
pub fn all_of(first: Struct, rest: impl IntoIterator<Item = Struct>) -> Struct {
    build_all_of(std::iter::once(first).chain(rest).collect())
}

// -------------------------------------------------------------------------
// OR

struct AnyOf {
    members: Vec<Struct>,
}

impl AnyOf {
    fn accepts(&self, value: &Value, ctx: &Context) -> bool {
        self.members
            .iter()
            .any(|member| member.check(value, ctx.clone()).next().is_none())
    }
}

impl Check for AnyOf {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        Box::new(
            std::iter::once_with(move || {
                if self.accepts(value, &ctx) {
                    return None;
                }
                let name = compose_name(&self.members, " | ");
                let message = message_or(message, || expected(name, value));
                Some(ctx.fail(message, Cause::Union))
            })
            .flatten(),
        )
    }
}

fn build_any_of(members: Vec<Struct>) -> Struct {
    Struct::new(compose_name(&members, " | "), AnyOf { members })
}

/// At least one member must pass. Members after the first passing one are not run.
pub fn or(members: impl IntoIterator<Item = Struct>) -> Result<Struct, StructError> {
    collect_members(members, "or").map(build_any_of)
}

/// Infallible form of [`or`]: the first member is required by the signature.
pub fn any_of(first: Struct, rest: impl IntoIterator<Item = Struct>) -> Struct {
    build_any_of(std::iter::once(first).chain(rest).collect())
}

/// One of the given literal values.
pub fn enums<V>(values: impl IntoIterator<Item = V>) -> Result<Struct, StructError>
where
    V: Into<Value>,
{
    collect_members(values.into_iter().map(literal), "enums").map(build_any_of)
}

/// `null` or a value satisfying `inner`.
pub fn nullable(inner: Struct) -> Struct {
    any_of(literal(Value::Null), [inner])
}

/// `undefined` or a value satisfying `inner`.
pub fn optional(inner: Struct) -> Struct {
    any_of(literal(Value::Undefined), [inner])
}

// -------------------------------------------------------------------------
// NOT

struct Negation {
    inner: Struct,
}

impl Check for Negation {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        Box::new(
            std::iter::once_with(move || {
                if self.inner.check(value, ctx.clone()).next().is_some() {
                    return None;
                }
                let message = message_or(message, || {
                    expected(format_args!("value not satisfying {}", self.inner.name()), value)
                });
                Some(ctx.fail(message, Cause::Negation))
            })
            .flatten(),
        )
    }
}

/// Passes only when `inner` fails.
pub fn not(inner: Struct) -> Struct {
    Struct::new(format!("not<{}>", inner.name()), Negation { inner })
}

/// Builds an AND struct from one or more members.
///
/// ```
/// use json_struct::{and, number, refinements::min};
///
/// let positive = and![number(), min(1.0)];
/// assert_eq!(positive.name(), "(number & min(1))");
/// ```
#[macro_export]
macro_rules! and {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::logical::all_of($first, ::std::vec![$($rest),*])
    };
}

/// Builds an OR struct from one or more members.
///
/// ```
/// use json_struct::{or, number, string};
///
/// let id = or![string(), number()];
/// assert_eq!(id.name(), "(string | number)");
/// ```
#[macro_export]
macro_rules! or {
    ($first:expr $(, $rest:expr)* $(,)?) => {
        $crate::logical::any_of($first, ::std::vec![$($rest),*])
    };
}
