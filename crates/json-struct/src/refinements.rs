//! Value-level constraints: sizes, numeric ranges, patterns and custom predicates.
//!
//! Refinements report a kind issue for values they cannot measure, so they
//! are normally placed after a kind check inside an AND.

use regex::Regex;

use crate::context::Context;
use crate::error::StructError;
use crate::issue::Cause;
use crate::struct_def::{expected, message_or, no_issues, single, Check, Issues, Struct};
use crate::value::Value;

// -------------------------------------------------------------------------
// Size

/// Character count of a string, or own-key count of an object-like value.
fn measure(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        _ => value.key_count(),
    }
}

struct SizeCheck {
    min: Option<usize>,
    max: Option<usize>,
}

impl SizeCheck {
    fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => format!("size of {min}"),
            (Some(min), Some(max)) => format!("size between {min} and {max}"),
            (Some(min), None) => format!("size of at least {min}"),
            (None, Some(max)) => format!("size of at most {max}"),
            (None, None) => "sized value".to_string(),
        }
    }
}

impl Check for SizeCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let Some(size) = measure(value) else {
            let message = message_or(message, || expected("sized value", value.kind()));
            return single(ctx.fail(message, Cause::Kind));
        };
        let too_small = self.min.is_some_and(|min| size < min);
        let too_large = self.max.is_some_and(|max| size > max);
        if !too_small && !too_large {
            return no_issues();
        }
        let message = message_or(message, || expected(self.describe(), size));
        single(ctx.fail(message, Cause::Size))
    }
}

pub fn min_size(min: usize) -> Struct {
    Struct::new(
        format!("minSize({min})"),
        SizeCheck {
            min: Some(min),
            max: None,
        },
    )
}

pub fn max_size(max: usize) -> Struct {
    Struct::new(
        format!("maxSize({max})"),
        SizeCheck {
            min: None,
            max: Some(max),
        },
    )
}

/// Inclusive size bounds.
pub fn size(min: usize, max: usize) -> Struct {
    Struct::new(
        format!("size({min}, {max})"),
        SizeCheck {
            min: Some(min),
            max: Some(max),
        },
    )
}

// -------------------------------------------------------------------------
// Numeric range

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::BigInt(n) => Some(*n as f64),
        _ => None,
    }
}

enum Bound {
    Min(f64),
    Max(f64),
}

struct RangeCheck {
    bound: Bound,
}

impl Check for RangeCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let Some(n) = numeric(value) else {
            let message = message_or(message, || expected("number", value.kind()));
            return single(ctx.fail(message, Cause::Kind));
        };
        let (ok, describe) = match self.bound {
            Bound::Min(min) => (n >= min, format!("number >= {}", Value::Number(min))),
            Bound::Max(max) => (n <= max, format!("number <= {}", Value::Number(max))),
        };
        if ok {
            return no_issues();
        }
        let message = message_or(message, || expected(describe, value));
        single(ctx.fail(message, Cause::Range))
    }
}

/// Inclusive lower bound for numbers and big integers.
pub fn min(min: f64) -> Struct {
    Struct::new(
        format!("min({})", Value::Number(min)),
        RangeCheck {
            bound: Bound::Min(min),
        },
    )
}

/// Inclusive upper bound for numbers and big integers.
pub fn max(max: f64) -> Struct {
    Struct::new(
        format!("max({})", Value::Number(max)),
        RangeCheck {
            bound: Bound::Max(max),
        },
    )
}

struct IntegerCheck;

impl Check for IntegerCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let (ok, cause) = match value {
            Value::BigInt(_) => (true, Cause::Range),
            Value::Number(n) => (n.is_finite() && n.fract() == 0.0, Cause::Range),
            _ => (false, Cause::Kind),
        };
        if ok {
            return no_issues();
        }
        let message = message_or(message, || match cause {
            Cause::Kind => expected("integer", value.kind()),
            _ => expected("integer", value),
        });
        single(ctx.fail(message, cause))
    }
}

/// Finite whole numbers and big integers.
pub fn integer() -> Struct {
    Struct::new("integer", IntegerCheck)
}

// -------------------------------------------------------------------------
// Pattern

struct PatternCheck {
    regex: Regex,
}

impl Check for PatternCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let Some(s) = value.as_str() else {
            let message = message_or(message, || expected("string", value.kind()));
            return single(ctx.fail(message, Cause::Kind));
        };
        if self.regex.is_match(s) {
            return no_issues();
        }
        let message = message_or(message, || {
            expected(format_args!("string matching /{}/", self.regex.as_str()), value)
        });
        single(ctx.fail(message, Cause::Pattern))
    }
}

/// Strings matching a regular expression (unanchored unless the pattern anchors itself).
pub fn pattern(expr: &str) -> Result<Struct, StructError> {
    let regex = Regex::new(expr)?;
    Ok(Struct::new(format!("pattern(/{expr}/)"), PatternCheck { regex }))
}

// -------------------------------------------------------------------------
// Custom predicates

struct Predicate<F> {
    name: String,
    test: F,
}

impl<F> Check for Predicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if (self.test)(value) {
            return no_issues();
        }
        let message = message_or(message, || expected(&self.name, value));
        single(ctx.fail(message, Cause::Refinement))
    }
}

/// A named leaf struct backed by an arbitrary predicate.
///
/// ```
/// use json_struct::{refinements::define, Value};
///
/// let even = define("even", |v| v.as_f64().is_some_and(|n| n % 2.0 == 0.0));
/// assert!(json_struct::is(&even, &Value::from(4), &Default::default()));
/// ```
pub fn define<F>(name: impl Into<String>, test: F) -> Struct
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let name = name.into();
    Struct::new(name.clone(), Predicate { name, test })
}
