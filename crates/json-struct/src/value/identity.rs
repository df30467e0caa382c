//! Values with reference identity: symbols, functions, classes and instances.
//!
//! Equality on these types is pointer identity, never structural.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::Value;

// -------------------------------------------------------------------------
// Symbol

struct SymbolInner {
    description: Option<String>,
}

/// A unique, opaque token. Two symbols are equal only if they are the same symbol.
#[derive(Clone)]
pub struct Symbol(Arc<SymbolInner>);

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self(Arc::new(SymbolInner {
            description: Some(description.into()),
        }))
    }

    pub fn anonymous() -> Self {
        Self(Arc::new(SymbolInner { description: None }))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

// -------------------------------------------------------------------------
// Function

type Callable = dyn Fn(&[Value]) -> Value + Send + Sync;

struct FunctionInner {
    name: String,
    call: Box<Callable>,
}

/// A named callable value.
#[derive(Clone)]
pub struct Function(Arc<FunctionInner>);

impl Function {
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(FunctionInner {
            name: name.into(),
            call: Box::new(call),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0.call)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function {}]", self.name())
    }
}

// -------------------------------------------------------------------------
// Class

#[derive(Debug)]
struct ClassInner {
    name: String,
    parent: Option<Class>,
}

/// A constructor-like tag used by `instance_of` checks.
///
/// Classes form a single-inheritance chain through [`Class::extends`].
#[derive(Clone)]
pub struct Class(Arc<ClassInner>);

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(ClassInner {
            name: name.into(),
            parent: None,
        }))
    }

    /// Creates a subclass of `parent`.
    pub fn extends(name: impl Into<String>, parent: &Class) -> Self {
        Self(Arc::new(ClassInner {
            name: name.into(),
            parent: Some(parent.clone()),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn parent(&self) -> Option<&Class> {
        self.0.parent.as_ref()
    }

    /// Returns true if `self` is `ancestor` or inherits from it.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent();
        }
        false
    }

    /// Builds an instance of this class with the given own fields.
    pub fn instantiate<K, I>(&self, fields: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Instance(Instance::new(
            self.clone(),
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "class {}", self.name())
    }
}

// -------------------------------------------------------------------------
// Instance

#[derive(Debug)]
struct InstanceInner {
    class: Class,
    fields: IndexMap<String, Value>,
}

/// An object created from a [`Class`]. Object-like, with its own enumerable fields.
#[derive(Clone, Debug)]
pub struct Instance(Arc<InstanceInner>);

impl Instance {
    pub fn new(class: Class, fields: IndexMap<String, Value>) -> Self {
        Self(Arc::new(InstanceInner { class, fields }))
    }

    pub fn class(&self) -> &Class {
        &self.0.class
    }

    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.0.fields
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
