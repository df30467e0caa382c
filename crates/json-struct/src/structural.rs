//! Container structs that recurse into children and extend paths.

use std::sync::Arc;

use crate::context::Context;
use crate::issue::{Cause, Issue};
use crate::struct_def::{
    expected, message_or, no_issues, relabel, single, Check, Issues, Schema, Struct,
};
use crate::value::Value;

fn not_object<'a>(value: &Value, ctx: &Context, message: Option<&str>) -> Issues<'a> {
    let message = message_or(message, || expected("object", value.kind()));
    single(ctx.fail(message, Cause::Kind))
}

// -------------------------------------------------------------------------
// Object

struct ObjectCheck {
    fields: Option<Arc<Schema>>,
}

impl Check for ObjectCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if !value.is_object_like() {
            return not_object(value, &ctx, message);
        }
        let Some(fields) = &self.fields else {
            return no_issues();
        };
        // Every declared field is visited; missing properties read as undefined.
        Box::new(
            fields
                .iter()
                .flat_map(move |(key, field)| field.check(value.property(key), ctx.key(key))),
        )
    }
}

/// An object whose declared fields must each satisfy their struct.
///
/// Unknown properties on the input are allowed.
pub fn object<K, I>(fields: I) -> Struct
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Struct)>,
{
    let schema: Schema = fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
    from_schema(schema)
}

pub(crate) fn from_schema(schema: Schema) -> Struct {
    let schema = Arc::new(schema);
    Struct::new(
        "object",
        ObjectCheck {
            fields: Some(schema.clone()),
        },
    )
    .with_schema(schema)
}

/// Any non-null composite value, without field checks.
pub fn any_object() -> Struct {
    Struct::new("object", ObjectCheck { fields: None })
}

// -------------------------------------------------------------------------
// Array

struct ArrayCheck;

impl Check for ArrayCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if matches!(value, Value::Array(_)) {
            return no_issues();
        }
        let message = message_or(message, || expected("array", value.kind()));
        single(ctx.fail(message, Cause::Kind))
    }
}

/// Any array. Elements are not inspected; combine with [`list`] or [`tuple`].
pub fn array() -> Struct {
    Struct::new("array", ArrayCheck)
}

// -------------------------------------------------------------------------
// Record

struct RecordCheck {
    key: Struct,
    value: Struct,
}

impl Check for RecordCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        if !value.is_object_like() {
            return not_object(value, &ctx, message);
        }
        Box::new(value.entries().into_iter().flat_map(move |(key, item)| {
            let child = ctx.key(&*key);
            // The key value only lives for this entry, so its issues are gathered up front.
            let key_value = Value::String(key.into_owned());
            let key_issues: Vec<Issue> = self.key.check(&key_value, child.clone()).collect();
            key_issues
                .into_iter()
                .chain(self.value.check(item, child))
        }))
    }
}

/// An object whose every own key satisfies `key` and every value satisfies `value`.
pub fn record(key: Struct, value: Struct) -> Struct {
    Struct::new(
        format!("record<{}, {}>", key.name(), value.name()),
        RecordCheck { key, value },
    )
}

// -------------------------------------------------------------------------
// List

struct ListCheck {
    element: Struct,
}

impl Check for ListCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let Value::Array(items) = value else {
            return no_issues();
        };
        Box::new(
            items
                .iter()
                .enumerate()
                .flat_map(move |(i, item)| self.element.check(item, ctx.element(i)))
                .map(move |issue| relabel(issue, message)),
        )
    }
}

/// Every element of an array satisfies `element`. Non-arrays have no elements.
///
/// A list has no failure of its own, so a custom message replaces the text
/// of each element issue.
pub fn list(element: Struct) -> Struct {
    Struct::new(format!("list<{}>", element.name()), ListCheck { element })
}

// -------------------------------------------------------------------------
// Tuple

struct TupleCheck {
    elements: Vec<Struct>,
}

impl Check for TupleCheck {
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let items = value.as_array().unwrap_or(&[]);
        let len = self.elements.len().max(items.len());
        Box::new((0..len).flat_map(move |i| -> Issues<'a> {
            let item = items.get(i).unwrap_or(&crate::value::UNDEFINED);
            match self.elements.get(i) {
                Some(element) => element.check(item, ctx.element(i)),
                None => {
                    let message =
                        message_or(message, || expected("no further elements", item));
                    single(ctx.element(i).fail(message, Cause::Overflow))
                }
            }
        }))
    }
}

/// A fixed-length array with one struct per position.
///
/// Positions past the declared length yield an overflow issue; a custom
/// message on the tuple replaces only that issue's text.
pub fn tuple(elements: impl IntoIterator<Item = Struct>) -> Struct {
    let elements: Vec<Struct> = elements.into_iter().collect();
    let names: Vec<&str> = elements.iter().map(Struct::name).collect();
    let name = format!("[{}]", names.join(", "));
    Struct::new(name, TupleCheck { elements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::PathSegment;
    use crate::primitives::{number, string};
    use serde_json::json;

    fn issues(s: &Struct, value: serde_json::Value) -> Vec<Issue> {
        let value = Value::from(value);
        let found = s.check(&value, Context::root()).collect();
        found
    }

    fn key(k: &str) -> PathSegment {
        PathSegment::Key(k.to_string())
    }

    #[test]
    fn object_missing_field_is_checked_as_undefined() {
        let s = object([("a", string())]);
        let found = issues(&s, json!({}));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, vec![key("a")]);
        assert_eq!(found[0].message, "expected string, actual undefined");
    }

    #[test]
    fn object_reports_fields_in_declaration_order() {
        let s = object([("b", string()), ("a", string())]);
        let found = issues(&s, json!({"a": 1, "b": 2}));
        let paths: Vec<_> = found.iter().map(|i| i.path.clone()).collect();
        assert_eq!(paths, vec![vec![key("b")], vec![key("a")]]);
    }

    #[test]
    fn object_ignores_unknown_properties() {
        let s = object([("a", string())]);
        assert!(issues(&s, json!({"a": "x", "extra": 1})).is_empty());
    }

    #[test]
    fn object_rejects_non_composites() {
        let s = object([("a", string())]);
        let found = issues(&s, json!(null));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "expected object, actual null");
        assert!(found[0].path.is_empty());
        assert!(issues(&any_object(), json!([])).is_empty());
        assert_eq!(issues(&any_object(), json!("x")).len(), 1);
    }

    #[test]
    fn nested_paths_accumulate() {
        let s = object([("user", object([("tags", list(string()))]))]);
        let found = issues(&s, json!({"user": {"tags": ["a", 1]}}));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, vec![key("user"), key("tags"), key("1")]);
    }

    #[test]
    fn array_reports_concrete_kind() {
        let found = issues(&array(), json!({}));
        assert_eq!(found[0].message, "expected array, actual object");
        assert!(issues(&array(), json!([1, "x"])).is_empty());
    }

    #[test]
    fn record_checks_key_then_value() {
        let s = record(string().with_message("bad key"), number());
        let found = issues(&s, json!({"a": 1, "b": "x", "c": 2}));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, vec![key("b")]);
        assert_eq!(s.name(), "record<string, number>");

        let strict_keys = record(crate::primitives::literal("a"), number());
        let found = issues(&strict_keys, json!({"a": 1, "z": "x"}));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].caused_by, Some(Cause::Literal));
        assert_eq!(found[0].path, vec![key("z")]);
        assert_eq!(found[1].caused_by, Some(Cause::Kind));
    }

    #[test]
    fn list_collects_every_element() {
        let found = issues(&list(number()), json!([1, "a", 2, "b"]));
        let paths: Vec<_> = found.iter().map(|i| i.path.clone()).collect();
        assert_eq!(paths, vec![vec![key("1")], vec![key("3")]]);
        assert!(issues(&list(number()), json!("not an array")).is_empty());
    }

    #[test]
    fn list_custom_message_relabels_element_issues() {
        let s = list(string()).with_message("LIST");
        let found = issues(&s, json!([1, "ok", {}]));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].message, "LIST");
        assert_eq!(found[0].path, vec![key("0")]);
        assert_eq!(found[0].caused_by, Some(Cause::Kind));
        assert_eq!(found[1].message, "LIST");
        assert_eq!(found[1].path, vec![key("2")]);
    }

    #[test]
    fn tuple_overflow_and_mismatches() {
        let s = tuple([string(), number()]);
        assert_eq!(s.name(), "[string, number]");
        let found = issues(&s, json!([0, "", {}]));
        let paths: Vec<_> = found.iter().map(|i| i.path.clone()).collect();
        assert_eq!(paths, vec![vec![key("0")], vec![key("1")], vec![key("2")]]);
        assert_eq!(found[2].caused_by, Some(Cause::Overflow));
        assert_eq!(found[2].message, "expected no further elements, actual {}");
    }

    #[test]
    fn tuple_message_applies_to_overflow_only() {
        let s = tuple([string()]).with_message("too long");
        let found = issues(&s, json!([1, 2]));
        assert_eq!(found[0].message, "expected string, actual number");
        assert_eq!(found[1].message, "too long");
    }

    #[test]
    fn tuple_short_input_checks_undefined_positions() {
        let found = issues(&tuple([string(), number()]), json!(["a"]));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].path, vec![key("1")]);
        assert_eq!(found[0].message, "expected number, actual undefined");
    }
}
