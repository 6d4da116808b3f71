//! Common test utilities for executor tests

#![allow(dead_code)]

use std::sync::{Arc, Once};

use foreman::{CommandDefinition, Configuration, Entity, Factory, MemoryStore, Output, Schema};
use tracing_subscriber::EnvFilter;

static INIT_TRACING: Once = Once::new();

/// Route logs to the test writer; set `RUST_LOG=foreman=debug` to see them.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A memory store with the entities used across the suite
pub fn create_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .define("user", Schema::new(["first_name", "last_name", "employer_id"]))
        .unwrap();
    store
        .define(
            "strict_user",
            Schema::new(["first_name", "employer_id"]).require("last_name"),
        )
        .unwrap();
    store.define("employer", Schema::new(["name"])).unwrap();
    store
        .define("sports_car", Schema::new(["make", "model", "year"]))
        .unwrap();
    store
}

/// A factory over a fresh store
pub fn create_factory() -> (Arc<MemoryStore>, Factory) {
    init_tracing();
    let store = create_store();
    let factory = Factory::new(Arc::new(Configuration::with_default_adapter(store.clone())));
    (store, factory)
}

/// Resolve a token that must name a command
pub fn command(factory: &Factory, token: &str) -> Arc<CommandDefinition> {
    factory
        .resolve(token)
        .unwrap()
        .unwrap_or_else(|| panic!("{} should resolve to a command", token))
}

/// Extract the entity from a single create/update output
pub fn extract_entity(output: Output) -> Entity {
    match output {
        Output::Single(record) => record
            .into_entity()
            .unwrap_or_else(|| panic!("Expected an entity record")),
        other => panic!("Expected Output::Single, got {:?}", other),
    }
}
