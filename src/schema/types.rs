//! Whitelist schema definitions
//!
//! Node kinds:
//! - allow: `true` passes the value through, `false` rejects it
//! - validator: caller-supplied function, sync or async
//! - array: exactly one child applied to every element
//! - object: field name to child schema

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use indexmap::IndexMap;

use super::errors::WhitelistResult;
use super::options::Options;
use super::value::Value;

/// Future returned by validators
pub type ValidatorFuture = Pin<Box<dyn Future<Output = WhitelistResult<Value>> + Send + 'static>>;

type ValidatorFn = dyn Fn(Value, Options) -> ValidatorFuture + Send + Sync;

/// Caller-supplied validation/transformation function.
///
/// Receives the value at its position in the input plus the current
/// options (path and caller data included) and returns the value to keep.
#[derive(Clone)]
pub struct Validator(Arc<ValidatorFn>);

impl Validator {
    /// Wrap a synchronous function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Value, &Options) -> WhitelistResult<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(move |value: Value, options: Options| -> ValidatorFuture {
            let outcome = f(value, &options);
            Box::pin(async move { outcome })
        }))
    }

    /// Wrap an asynchronous function
    pub fn new_async<F, Fut>(f: F) -> Self
    where
        F: Fn(Value, Options) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = WhitelistResult<Value>> + Send + 'static,
    {
        Self(Arc::new(move |value: Value, options: Options| -> ValidatorFuture {
            Box::pin(f(value, options))
        }))
    }

    /// Invoke the validator
    pub fn call(&self, value: Value, options: Options) -> ValidatorFuture {
        (self.0)(value, options)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// A node of a whitelist schema
#[derive(Debug, Clone)]
pub enum Schema {
    /// Pass through (`true`) or reject (`false`)
    Allow(bool),
    /// Custom validation
    Validator(Validator),
    /// Element schema; must hold exactly one node
    Array(Vec<Schema>),
    /// Field schemas, in declared order
    Object(IndexMap<String, Schema>),
}

impl Schema {
    pub fn allow() -> Self {
        Schema::Allow(true)
    }

    pub fn deny() -> Self {
        Schema::Allow(false)
    }

    /// Array whose elements all follow `item`
    pub fn array(item: impl Into<Schema>) -> Self {
        Schema::Array(vec![item.into()])
    }

    /// Object with the given field schemas
    pub fn object<K, S, I>(fields: I) -> Self
    where
        K: Into<String>,
        S: Into<Schema>,
        I: IntoIterator<Item = (K, S)>,
    {
        Schema::Object(
            fields
                .into_iter()
                .map(|(k, s)| (k.into(), s.into()))
                .collect(),
        )
    }

    /// Synchronous validator node
    pub fn validator<F>(f: F) -> Self
    where
        F: Fn(Value, &Options) -> WhitelistResult<Value> + Send + Sync + 'static,
    {
        Schema::Validator(Validator::new(f))
    }

    /// Asynchronous validator node
    pub fn async_validator<F, Fut>(f: F) -> Self
    where
        F: Fn(Value, Options) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = WhitelistResult<Value>> + Send + 'static,
    {
        Schema::Validator(Validator::new_async(f))
    }
}

impl From<bool> for Schema {
    fn from(allowed: bool) -> Self {
        Schema::Allow(allowed)
    }
}

impl From<Validator> for Schema {
    fn from(validator: Validator) -> Self {
        Schema::Validator(validator)
    }
}
