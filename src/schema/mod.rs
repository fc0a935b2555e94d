//! Whitelist schema subsystem
//!
//! A schema describes, per field or element, whether input may pass through
//! and how it is transformed. Evaluation produces a filtered copy of the
//! input or fails at the first disallowed or invalid location.
//!
//! # Design Principles
//!
//! - Closed set of node kinds, dispatched by exhaustive match
//! - Every failure carries the dotted/bracketed path of the offending value
//! - Shape and configuration errors are never swallowed
//! - Siblings are evaluated concurrently; error selection is deterministic
//! - Caller context reaches validators through `Options`, never globals

mod errors;
mod literal;
mod options;
mod types;
mod validator;
mod value;

pub use errors::{ErrorClass, WhitelistError, WhitelistResult};
pub use options::{join_field, join_index, Options};
pub use types::{Schema, Validator, ValidatorFuture};
pub use validator::whitelist;
pub use value::{Object, Value};
