//! whitelist - schema-driven field whitelisting for untrusted input
//!
//! Filter a value through a declarative schema before it reaches storage:
//! declared fields pass, undeclared ones are rejected (or omitted), and
//! custom validators may transform or reject individual values.

pub mod schema;

pub use schema::{whitelist, Options, Schema, Value, WhitelistError, WhitelistResult};
