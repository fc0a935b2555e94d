//! Whitelist options
//!
//! Options are inherited unchanged through recursion except for `path`,
//! which every descent derives fresh from its parent.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Options for a whitelist call
#[derive(Clone, Default, Deserialize)]
pub struct Options {
    /// Turn disallowed values, rejected validators and undeclared object
    /// fields into `Undefined` instead of failing (default: false)
    #[serde(default)]
    pub omit_disallowed: bool,

    /// Strip `Undefined` entries from objects and arrays (default: false)
    #[serde(default)]
    pub omit_undefined: bool,

    /// Current location in the input, "" at the root
    #[serde(default)]
    pub path: String,

    /// Caller context forwarded to every validator
    #[serde(skip)]
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn omit_disallowed(mut self, omit: bool) -> Self {
        self.omit_disallowed = omit;
        self
    }

    pub fn omit_undefined(mut self, omit: bool) -> Self {
        self.omit_undefined = omit;
        self
    }

    /// Attach caller context, e.g. the current user
    pub fn with_data<T: Any + Send + Sync>(mut self, data: T) -> Self {
        self.data = Some(Arc::new(data));
        self
    }

    /// Returns the caller context if it was set with type `T`
    pub fn data<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|d| d.downcast_ref::<T>())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Options for the object field `key` below the current path
    pub fn field(&self, key: &str) -> Self {
        Self {
            path: join_field(&self.path, key),
            ..self.clone()
        }
    }

    /// Options for the array element `index` below the current path
    pub fn index(&self, index: usize) -> Self {
        Self {
            path: join_index(&self.path, index),
            ..self.clone()
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("omit_disallowed", &self.omit_disallowed)
            .field("omit_undefined", &self.omit_undefined)
            .field("path", &self.path)
            .field("data", &self.data.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Creates a field path from prefix and field name.
pub fn join_field(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

/// Creates an element path from prefix and index.
pub fn join_index(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}
