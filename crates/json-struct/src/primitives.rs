//! Leaf structs: runtime kind, literal and class checks.

use crate::context::Context;
use crate::issue::Cause;
use crate::struct_def::{expected, message_or, no_issues, single, Check, Issues, Struct};
use crate::value::{Class, Value};

// -------------------------------------------------------------------------
// Kind checks

struct KindCheck {
    expected: &'static str,
    test: fn(&Value) -> bool,
}

impl Check for KindCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if (self.test)(value) {
            return no_issues();
        }
        let message = message_or(message, || expected(self.expected, value.kind()));
        single(ctx.fail(message, Cause::Kind))
    }
}

fn kind(expected: &'static str, test: fn(&Value) -> bool) -> Struct {
    Struct::new(expected, KindCheck { expected, test })
}

pub fn string() -> Struct {
    kind("string", |v| matches!(v, Value::String(_)))
}

pub fn number() -> Struct {
    kind("number", |v| matches!(v, Value::Number(_)))
}

pub fn bigint() -> Struct {
    kind("bigint", |v| matches!(v, Value::BigInt(_)))
}

pub fn boolean() -> Struct {
    kind("boolean", |v| matches!(v, Value::Bool(_)))
}

pub fn function() -> Struct {
    kind("function", |v| matches!(v, Value::Function(_)))
}

pub fn symbol() -> Struct {
    kind("symbol", |v| matches!(v, Value::Symbol(_)))
}

pub fn null() -> Struct {
    kind("null", |v| matches!(v, Value::Null))
}

pub fn undefined() -> Struct {
    kind("undefined", Value::is_undefined)
}

/// Accepts every value.
pub fn any() -> Struct {
    kind("any", |_| true)
}

/// Rejects every value.
pub fn never() -> Struct {
    kind("never", |_| false)
}

// -------------------------------------------------------------------------
// Literal

struct LiteralCheck {
    expected: Value,
}

impl Check for LiteralCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if value.same_value(&self.expected) {
            return no_issues();
        }
        let message = message_or(message, || expected(&self.expected, value));
        single(ctx.fail(message, Cause::Literal))
    }
}

/// Matches exactly one value. See [`Value::same_value`] for the comparison.
pub fn literal(value: impl Into<Value>) -> Struct {
    let expected = value.into();
    Struct::new(expected.to_string(), LiteralCheck { expected })
}

// -------------------------------------------------------------------------
// Instance

struct InstanceCheck {
    class: Class,
}

impl Check for InstanceCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if let Value::Instance(instance) = value {
            if instance.class().is_subclass_of(&self.class) {
                return no_issues();
            }
        }
        let message = message_or(message, || {
            expected(format_args!("instance of {}", self.class.name()), value.kind())
        });
        single(ctx.fail(message, Cause::Instance))
    }
}

/// Accepts instances of `class` or any of its subclasses.
pub fn instance_of(class: &Class) -> Struct {
    Struct::new(
        class.name(),
        InstanceCheck {
            class: class.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Function, Symbol};
    use serde_json::json;

    fn issues(s: &Struct, value: &Value) -> Vec<crate::Issue> {
        s.check(value, Context::root()).collect()
    }

    #[test]
    fn kind_mismatch_message() {
        let found = issues(&string(), &Value::from(42));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "expected string, actual number");
        assert!(found[0].path.is_empty());
        assert_eq!(found[0].caused_by, Some(Cause::Kind));
    }

    #[test]
    fn kinds_accept_their_values() {
        let cases = [
            (string(), Value::from("")),
            (number(), Value::from(1.5)),
            (bigint(), Value::BigInt(-3)),
            (boolean(), Value::from(false)),
            (function(), Value::from(Function::new("f", |_| Value::Undefined))),
            (symbol(), Value::from(Symbol::anonymous())),
            (null(), Value::Null),
            (undefined(), Value::Undefined),
            (any(), Value::from(json!({"a": 1}))),
        ];
        for (s, v) in cases {
            assert!(issues(&s, &v).is_empty(), "{} rejected {}", s.name(), v);
        }
    }

    #[test]
    fn never_rejects() {
        let found = issues(&never(), &Value::Null);
        assert_eq!(found[0].message, "expected never, actual null");
    }

    #[test]
    fn custom_message_overrides_default() {
        let s = number().with_message("age must be numeric");
        assert_eq!(issues(&s, &Value::from("x"))[0].message, "age must be numeric");
    }

    #[test]
    fn literal_compares_values() {
        let s = literal("on");
        assert_eq!(s.name(), "\"on\"");
        assert!(issues(&s, &Value::from("on")).is_empty());
        let found = issues(&s, &Value::from("off"));
        assert_eq!(found[0].message, r#"expected "on", actual "off""#);
        assert_eq!(found[0].caused_by, Some(Cause::Literal));

        let deep = literal(Value::from(json!([1, {"a": 2}])));
        assert!(issues(&deep, &Value::from(json!([1, {"a": 2}]))).is_empty());
        assert_eq!(issues(&deep, &Value::from(json!([1, {"a": 3}]))).len(), 1);
    }

    #[test]
    fn literal_symbols_use_identity() {
        let token = Symbol::new("token");
        let s = literal(token.clone());
        assert!(issues(&s, &Value::from(token)).is_empty());
        assert_eq!(issues(&s, &Value::from(Symbol::new("token"))).len(), 1);
    }

    #[test]
    fn instance_of_follows_inheritance() {
        let shape = Class::new("Shape");
        let circle = Class::extends("Circle", &shape);
        let s = instance_of(&shape);
        assert!(issues(&s, &circle.instantiate([("r", Value::from(1))])).is_empty());
        let found = issues(&s, &Value::from(json!({})));
        assert_eq!(found[0].message, "expected instance of Shape, actual object");
        assert_eq!(found[0].caused_by, Some(Cause::Instance));
        let found = issues(&instance_of(&circle), &shape.instantiate::<String, _>([]));
        assert_eq!(found[0].message, "expected instance of Circle, actual Shape");
    }
}
