//! Configuration Tests
//!
//! `foreman.toml` loading and the process-wide configuration.

use std::sync::Arc;

use crate::common::*;
use foreman::{
    attrs, configure, current, reset, Configuration, Factory, ForemanConfig, MemoryStore, Schema,
    CONFIG_FILE_NAME,
};
use tempfile::TempDir;

#[test]
fn config_file_drives_adapter_selection() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        r#"
adapter = "primary"
namespace = "hr"

[entities]
employer = "directory"
"#,
    )
    .unwrap();

    let settings = ForemanConfig::from_file(&path).unwrap();
    let primary = create_store();
    let directory = Arc::new(MemoryStore::named("directory"));
    directory.define("employer", Schema::new(["name"])).unwrap();

    let configuration = Configuration::new(settings)
        .with_adapter("primary", primary.clone())
        .with_adapter("directory", directory.clone());
    let factory = Factory::new(Arc::new(configuration));

    let create = command(&factory, "CreateUserForEmployer");
    assert_eq!(create.subject().entity().to_string(), "hr::user");
    assert_eq!(create.parent().map(|p| p.adapter().name()), Some("directory"));

    let employer = extract_entity(
        command(&factory, "CreateEmployer")
            .go_strict((), attrs! { "name" => "Acme" })
            .unwrap(),
    );
    create
        .go_strict(&employer, attrs! { "last_name" => "Turner" })
        .unwrap();
    assert_eq!(directory.count("employer"), 1);
    assert_eq!(primary.count("employer"), 0);
    assert_eq!(primary.count("user"), 1);
}

#[test]
fn default_config_file_is_written_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ForemanConfig::write_default_if_missing(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, ForemanConfig::default_toml());
    assert_eq!(ForemanConfig::from_file(&path).unwrap(), ForemanConfig::default());
}

// The only test in this binary touching the global configuration.
#[test]
fn global_configuration_feeds_global_factory() {
    reset();
    assert!(Factory::global().is_err());

    let store = create_store();
    configure(Configuration::with_default_adapter(store.clone()));
    assert_eq!(current().unwrap().settings().adapter.as_deref(), Some("memory"));

    let factory = Factory::global().unwrap();
    command(&factory, "CreateUser")
        .go_strict((), attrs! { "last_name" => "Turner" })
        .unwrap();
    assert_eq!(store.count("user"), 1);

    reset();
    assert!(current().is_err());
    // factories keep the configuration they were built with
    assert!(factory.resolve("DeleteUser").unwrap().is_some());
}
