//! Recursive whitelist evaluation
//!
//! Evaluation walks the input and the schema in lockstep:
//! - allow leaves pass or reject the value
//! - validator leaves run the caller's function and await its outcome
//! - array nodes evaluate every element concurrently
//! - object nodes reject undeclared keys, then evaluate every declared
//!   field concurrently
//!
//! Siblings always run to completion. When several fail, the error of the
//! first one in schema order (lowest index, first declared key) is returned.
//! Object output follows declared field order, followed by any undeclared
//! keys in input order.

use std::future::Future;
use std::pin::Pin;

use futures_util::future::join_all;
use indexmap::IndexMap;
use tracing::debug;

use super::errors::{WhitelistError, WhitelistResult};
use super::options::Options;
use super::types::{Schema, Validator};
use super::value::{Object, Value};

type Evaluation<'a> = Pin<Box<dyn Future<Output = WhitelistResult<Value>> + Send + 'a>>;

/// Filters `value` through `schema`.
///
/// Returns the filtered value, or the first failure that `omit_disallowed`
/// does not swallow. The input is consumed: allowed subtrees are moved into
/// the result, never cloned.
///
/// # Errors
///
/// - `NotAllowed`, `Rejected`, `DisallowedFields` or a validator's own
///   error when something is disallowed and `omit_disallowed` is false
/// - `NotAnArray` / `NotAnObject` when the input shape does not match
/// - `ArrayArity` when an array schema does not hold exactly one node
pub async fn whitelist(value: Value, schema: &Schema, options: &Options) -> WhitelistResult<Value> {
    evaluate(value, schema, options.clone()).await
}

/// Boxed recursion point; `options.path` is the location of `value`.
fn evaluate(value: Value, schema: &Schema, options: Options) -> Evaluation<'_> {
    Box::pin(async move {
        match schema {
            Schema::Allow(allowed) => allow(value, *allowed, &options),
            Schema::Validator(validator) => validate(value, validator, options).await,
            Schema::Array(items) => evaluate_array(value, items, options).await,
            Schema::Object(fields) => evaluate_object(value, fields, options).await,
        }
    })
}

fn allow(value: Value, allowed: bool, options: &Options) -> WhitelistResult<Value> {
    if allowed {
        return Ok(value);
    }
    if options.omit_disallowed {
        debug!(path = %options.path, "omitting disallowed value");
        return Ok(Value::Undefined);
    }
    Err(WhitelistError::NotAllowed {
        path: options.path.clone(),
    })
}

async fn validate(value: Value, validator: &Validator, options: Options) -> WhitelistResult<Value> {
    let omit = options.omit_disallowed;
    let path = options.path.clone();

    match validator.call(value, options).await {
        Ok(value) => Ok(value),
        Err(err) if omit => {
            debug!(path = %path, error = %err, "omitting value rejected by validator");
            Ok(Value::Undefined)
        }
        Err(err) => Err(err),
    }
}

async fn evaluate_array(value: Value, items: &[Schema], options: Options) -> WhitelistResult<Value> {
    let item = match items {
        [item] => item,
        _ => {
            return Err(WhitelistError::ArrayArity {
                path: options.path,
                len: items.len(),
            })
        }
    };

    let elements = match value {
        Value::Array(elements) => elements,
        _ => return Err(WhitelistError::NotAnArray { path: options.path }),
    };

    let evaluations = elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| evaluate(element, item, options.index(i)));

    let mut result = join_all(evaluations)
        .await
        .into_iter()
        .collect::<WhitelistResult<Vec<Value>>>()?;

    if options.omit_undefined {
        result.retain(|v| !v.is_undefined());
    }

    Ok(Value::Array(result))
}

async fn evaluate_object(
    value: Value,
    fields: &IndexMap<String, Schema>,
    options: Options,
) -> WhitelistResult<Value> {
    let mut src = match value {
        Value::Object(src) => src,
        _ => return Err(WhitelistError::NotAnObject { path: options.path }),
    };

    // Check for undeclared fields before evaluating anything
    let extra: Vec<String> = src
        .keys()
        .filter(|key| !fields.contains_key(*key))
        .cloned()
        .collect();

    if !extra.is_empty() && !options.omit_disallowed {
        return Err(WhitelistError::DisallowedFields {
            path: options.path,
            keys: extra,
            allowed: fields.keys().cloned().collect(),
        });
    }

    let evaluations: Vec<_> = fields
        .iter()
        .map(|(key, child)| {
            let field = src.shift_remove(key).unwrap_or_default();
            let field_options = options.field(key);
            async move { (key, evaluate(field, child, field_options).await) }
        })
        .collect();

    let mut result = Object::new();
    // Disallow errors were already turned into Undefined by the failing leaf
    for (key, outcome) in join_all(evaluations).await {
        result.insert(key.clone(), outcome?);
    }

    // Only reachable with omit_disallowed
    if !extra.is_empty() {
        debug!(path = %options.path, keys = ?extra, "materializing undeclared fields as undefined");
        for key in extra {
            result.insert(key, Value::Undefined);
        }
    }

    if options.omit_undefined {
        result.retain(|_, v| !v.is_undefined());
    }

    Ok(Value::Object(result))
}
