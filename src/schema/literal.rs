//! JSON schema literals
//!
//! Schemas without validators can be written as JSON:
//! - `true` / `false` become allow leaves
//! - arrays become array nodes (arity is checked when evaluated)
//! - objects become object nodes, in declared key order

use indexmap::IndexMap;

use super::errors::{WhitelistError, WhitelistResult};
use super::options::{join_field, join_index};
use super::types::Schema;

impl TryFrom<&serde_json::Value> for Schema {
    type Error = WhitelistError;

    fn try_from(value: &serde_json::Value) -> WhitelistResult<Self> {
        parse_schema(value, "")
    }
}

/// Parses a JSON schema literal; `path` locates `value` for error reporting.
fn parse_schema(value: &serde_json::Value, path: &str) -> WhitelistResult<Schema> {
    match value {
        serde_json::Value::Bool(allowed) => Ok(Schema::Allow(*allowed)),
        serde_json::Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_schema(item, &join_index(path, i)))
            .collect::<WhitelistResult<Vec<_>>>()
            .map(Schema::Array),
        serde_json::Value::Object(fields) => fields
            .iter()
            .map(|(key, child)| Ok((key.clone(), parse_schema(child, &join_field(path, key))?)))
            .collect::<WhitelistResult<IndexMap<String, Schema>>>()
            .map(Schema::Object),
        serde_json::Value::Null | serde_json::Value::Number(_) | serde_json::Value::String(_) => {
            Err(WhitelistError::Unrecognized {
                path: path.to_string(),
            })
        }
    }
}
