//! Foreman - persistence commands resolved from their names
//!
//! Foreman turns command tokens such as `CreateUser`, `UpdateSportsCar` or
//! `CreateUserForEmployer` into executable create/update/delete commands
//! over pluggable store adapters, with uniform single-record and batch
//! semantics.
//!
//! # Quick Start
//!
//! ```ignore
//! use foreman::{attrs, Configuration, Factory, MemoryStore, Schema};
//!
//! let store = Arc::new(MemoryStore::new());
//! store.define("user", Schema::new(["first_name", "last_name"]))?;
//!
//! let factory = Factory::new(Arc::new(Configuration::with_default_adapter(store)));
//! let create_user = factory.resolve("CreateUser")?.expect("is a command");
//! let user = create_user.go_strict((), attrs! { "last_name" => "Turner" })?;
//! ```
//!
//! # Architecture
//!
//! All commands go through a [`Factory`], which parses tokens, binds
//! adapters from a [`Configuration`] and memoizes the resulting
//! [`CommandDefinition`]s. Adapters implement [`StoreAdapter`];
//! [`MemoryStore`] is the bundled in-process implementation.

// Re-export the public API from foreman-executor
pub use foreman_executor::*;

// Bundled adapter
pub use foreman_storage::{MemoryStore, Schema, ID_ATTRIBUTE};
