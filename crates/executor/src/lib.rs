//! # Foreman Executor
//!
//! Turns command tokens such as `CreateUserForEmployer` into executable
//! persistence commands over pluggable store adapters.
//!
//! It provides:
//! - [`Factory`] - resolves and memoizes command tokens
//! - [`CommandDefinition`] - the shared single/batch execution template
//! - [`Error`]/[`ErrorKind`] - the closed command-level error taxonomy
//! - [`Configuration`] - adapter selection, optionally from `foreman.toml`
//!
//! ## Quick Start
//!
//! ```text
//! use foreman_executor::{attrs, Configuration, Factory};
//!
//! let factory = Factory::new(Arc::new(Configuration::with_default_adapter(store)));
//!
//! let create = factory.resolve("CreateUser")?.unwrap();
//! let user = create.go_strict((), attrs! { "last_name" => "Turner" })?;
//!
//! let update = factory.resolve("UpdateUser")?.unwrap();
//! let outcome = update.go(vec![1i64, 2, 3], attrs! { "last_name" => "Smith" })?;
//! ```
//!
//! ## Targets and Batches
//!
//! | Target | Params | Mode |
//! |--------|--------|------|
//! | none / id | one set | single |
//! | id list / query | one set | batch, params shared |
//! | id list | list | batch, paired by position |
//! | none / id | list | batch, one unit per set |
//!
//! A batch result holds one item per unit, in order. Units that fail with a
//! recoverable error hold a [`FailureMarker`] instead of a record.

#![warn(missing_docs)]

mod command;
mod config;
mod convert;
mod descriptor;
mod error;
mod factory;
mod handlers;
mod output;
mod types;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::{CommandDefinition, StoreBinding, TargetRule, Variant, VariantKind};
pub use config::{configure, current, reset, Configuration, ForemanConfig, CONFIG_FILE_NAME};
pub use convert::{convert_result, translate, translate_class};
pub use descriptor::{Action, Descriptor, ParseError, PARENT_SEPARATOR};
pub use error::{Error, ErrorKind};
pub use factory::Factory;
pub use handlers::{Create, CreateForParent, Delete, Update};
pub use output::{BatchItem, FailureMarker, FailureType, Outcome, Output, Record};
pub use types::{ExecutionUnit, Invocation, Params, Target, ID_KEY, QUERY_KEY};

// Re-export core types so users don't need to import foreman-core
pub use foreman_core::{
    attrs, Attributes, Entity, EntityName, EntityRef, Identify, StoreAdapter, StoreError,
    StoreResult, Value,
};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
