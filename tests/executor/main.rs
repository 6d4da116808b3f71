//! Executor Layer Tests
//!
//! End-to-end tests through the `foreman` facade:
//! - Factory - token resolution and memoization
//! - CommandDefinition - single and batch execution
//! - Error taxonomy - outcomes versus propagated errors
//! - Configuration - `foreman.toml` and the global configuration

mod common;

mod batch;
mod command_dispatch;
mod config;
mod error_handling;
mod serialization;
