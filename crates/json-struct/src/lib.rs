//! `json-struct` — composable runtime validation for untyped values.
//!
//! A [`Struct`] describes an expected shape. Structs are built from leaf
//! checks ([`string`], [`number`], [`literal`], ...) and combinators
//! ([`object`], [`list`], [`tuple`], [`and`], [`or`], ...), then handed to a
//! consumer together with an input [`Value`]:
//!
//! - [`validate`] returns the input or the list of [`Issue`]s,
//! - [`is`] returns a boolean,
//! - [`assert`] returns an [`AssertionError`] with a combined message.
//!
//! Every issue carries the path from the root value to the failing location.
//!
//! ```
//! use json_struct::{and, list, number, object, optional, string, Value, ValidateOptions};
//! use json_struct::refinements::min_size;
//!
//! let user = object([
//!     ("name", and![string(), min_size(1)]),
//!     ("tags", and![json_struct::array(), list(string())]),
//!     ("age", optional(number())),
//! ]);
//!
//! let input = Value::from(serde_json::json!({"name": "", "tags": ["a", 2]}));
//! let err = json_struct::assert(&user, &input, &ValidateOptions::default()).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "$.name - expected size of at least 1, actual 0\n$.tags.1 - expected string, actual number"
//! );
//! ```

pub mod consumer;
pub mod context;
pub mod derived;
pub mod error;
pub mod issue;
pub mod lazy;
pub mod logical;
pub mod primitives;
pub mod refinements;
pub mod struct_def;
pub mod structural;
pub mod value;

// Re-export the most commonly used items at crate root
pub use consumer::{assert, is, validate, ValidateOptions, Validation};
pub use context::{Context, DEFAULT_MAX_DEPTH};
pub use derived::{extend, omit, partial, pick};
pub use error::{AssertionError, StructError};
pub use issue::{Cause, Issue, Path, PathSegment};
pub use lazy::lazy;
pub use logical::{all_of, and, any_of, enums, not, nullable, optional, or};
pub use primitives::{
    any, bigint, boolean, function, instance_of, literal, never, null, number, string, symbol,
    undefined,
};
pub use struct_def::{no_issues, single, Check, Issues, Schema, Struct};
pub use structural::{any_object, array, list, object, record, tuple};
pub use value::{Class, Function, Instance, Symbol, Value};
