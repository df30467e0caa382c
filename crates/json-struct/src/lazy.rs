//! Deferred structs, used to describe recursive shapes.

use std::sync::OnceLock;

use crate::context::Context;
use crate::issue::Cause;
use crate::struct_def::{single, Check, Issues, Struct};
use crate::value::Value;

struct Deferred<F> {
    factory: F,
    resolved: OnceLock<Struct>,
}

impl<F> Check for Deferred<F>
where
    F: Fn() -> Struct + Send + Sync,
{
    fn check<'a>(
        &'a self,
        value: &'a Value,
        ctx: Context,
        message: Option<&'a str>,
    ) -> Issues<'a> {
        let ctx = ctx.defer();
        if ctx.deferral_exceeded() {
            tracing::debug!(
                path = ?ctx.path(),
                max_depth = ctx.max_depth(),
                "lazy struct resolved without descending"
            );
            let message = format!(
                "lazy struct resolved more than {} times without descending",
                ctx.max_depth()
            );
            return single(ctx.fail(message, Cause::Depth));
        }
        self.resolved
            .get_or_init(&self.factory)
            .check_with(value, ctx, message)
    }
}

/// A struct built on first use.
///
/// The factory runs at most once per lazy struct, the first time a value
/// reaches it. A custom message on the lazy struct is handed to the struct
/// the factory returns.
///
/// Right-recursive shapes such as trees stop where the input stops nesting.
/// A shape that reaches itself again without descending into a field or
/// element (for example `and![lazy(s), string()]` returned by `s`) would
/// never stop on its own, so once the same location has gone through more
/// lazy resolutions than the depth limit a `depth` issue is yielded instead.
///
/// ```
/// use json_struct::{lazy, list, object, string, Struct, Value};
///
/// fn tree() -> Struct {
///     object([("name", string()), ("children", list(lazy(tree)))])
/// }
///
/// let value = Value::from(serde_json::json!({
///     "name": "root",
///     "children": [{"name": "leaf", "children": []}]
/// }));
/// assert!(json_struct::is(&tree(), &value, &Default::default()));
/// ```
pub fn lazy<F>(factory: F) -> Struct
where
    F: Fn() -> Struct + Send + Sync + 'static,
{
    Struct::new(
        "lazy",
        Deferred {
            factory,
            resolved: OnceLock::new(),
        },
    )
}
