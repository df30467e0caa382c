//! Per-call checking context.

use crate::issue::{Cause, Issue, Path, PathSegment};

/// Maximum nesting depth checked before a struct stops descending.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Path of the value currently being checked, plus the depth limit.
///
/// Contexts are never mutated in place: entering a field or index returns
/// an extended copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    path: Path,
    max_depth: usize,
    /// Lazy structs resolved since the path last grew.
    deferred: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self::root()
    }
}

impl Context {
    pub fn root() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            path: Vec::new(),
            max_depth,
            deferred: 0,
        }
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub(crate) fn depth_exceeded(&self) -> bool {
        self.path.len() > self.max_depth
    }

    /// Same location, one more lazy resolution deep.
    pub(crate) fn defer(&self) -> Self {
        Self {
            deferred: self.deferred + 1,
            ..self.clone()
        }
    }

    /// True when lazy structs keep resolving without descending into the input.
    pub(crate) fn deferral_exceeded(&self) -> bool {
        self.deferred > self.max_depth
    }

    /// Context for a child reached through `segment`.
    pub fn enter(&self, segment: impl Into<PathSegment>) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(segment.into());
        Self {
            path,
            max_depth: self.max_depth,
            deferred: 0,
        }
    }

    /// Context for an object field or record key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.enter(PathSegment::Key(key.into()))
    }

    /// Context for a list or tuple position. The index is pushed stringified.
    pub fn element(&self, index: usize) -> Self {
        self.enter(PathSegment::Key(index.to_string()))
    }

    /// An issue located at this context's path.
    pub fn issue(&self, message: impl Into<String>) -> Issue {
        Issue::new(message, self.path.clone())
    }

    pub(crate) fn fail(&self, message: impl Into<String>, cause: Cause) -> Issue {
        self.issue(message).with_cause(cause)
    }
}
