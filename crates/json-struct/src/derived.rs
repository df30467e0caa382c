//! Structs derived from an object struct's field definitions.
//!
//! Each builder reads the retained [`Schema`] of its input, builds a new
//! map, and wraps it in a fresh object struct. The original struct is
//! never run or modified.

use std::collections::HashSet;

use crate::error::StructError;
use crate::logical::optional;
use crate::struct_def::{Schema, Struct};
use crate::structural::from_schema;

fn schema_of<'s>(base: &'s Struct, builder: &'static str) -> Result<&'s Schema, StructError> {
    base.schema()
        .ok_or_else(|| StructError::NotAnObject(builder, base.name().to_string()))
}

/// Keeps the source struct's own custom message on the derived object.
fn rebuild(base: &Struct, schema: Schema) -> Struct {
    let derived = from_schema(schema);
    match base.custom_message() {
        Some(message) => derived.with_message(message),
        None => derived,
    }
}

/// Every field may also be `undefined`.
pub fn partial(base: &Struct) -> Result<Struct, StructError> {
    let schema: Schema = schema_of(base, "partial")?
        .iter()
        .map(|(key, field)| (key.clone(), optional(field.clone())))
        .collect();
    Ok(rebuild(base, schema))
}

/// Only the listed fields. Keys missing from the definition are ignored.
pub fn pick<K>(base: &Struct, keys: impl IntoIterator<Item = K>) -> Result<Struct, StructError>
where
    K: AsRef<str>,
{
    let fields = schema_of(base, "pick")?;
    let keys: HashSet<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
    let schema: Schema = fields
        .iter()
        .filter(|(key, _)| keys.contains(key.as_str()))
        .map(|(key, field)| (key.clone(), field.clone()))
        .collect();
    Ok(rebuild(base, schema))
}

/// All fields except the listed ones.
pub fn omit<K>(base: &Struct, keys: impl IntoIterator<Item = K>) -> Result<Struct, StructError>
where
    K: AsRef<str>,
{
    let fields = schema_of(base, "omit")?;
    let keys: HashSet<String> = keys.into_iter().map(|k| k.as_ref().to_string()).collect();
    let schema: Schema = fields
        .iter()
        .filter(|(key, _)| !keys.contains(key.as_str()))
        .map(|(key, field)| (key.clone(), field.clone()))
        .collect();
    Ok(rebuild(base, schema))
}

/// Adds fields to an object struct. A field that already exists is replaced in place.
pub fn extend<K, I>(base: &Struct, fields: I) -> Result<Struct, StructError>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Struct)>,
{
    let mut schema = schema_of(base, "extend")?.clone();
    for (key, field) in fields {
        schema.insert(key.into(), field);
    }
    Ok(rebuild(base, schema))
}
