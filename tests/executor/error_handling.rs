//! Error Handling Tests
//!
//! Which errors become failed outcomes and which propagate.

use std::sync::Arc;

use crate::common::*;
use foreman::{
    attrs, Configuration, Error, ErrorKind, Factory, FailureType, ForemanConfig, MemoryStore,
    StoreError, Target, Value,
};

#[test]
fn delete_missing_record_is_a_failed_outcome() {
    let (_store, factory) = create_factory();
    let outcome = command(&factory, "DeleteUser").go(999i64, attrs! {}).unwrap();

    assert!(!outcome.is_success());
    assert!(outcome.result().is_none());
    assert_eq!(outcome.kind(), Some(ErrorKind::RecordNotFound));
    assert_eq!(outcome.failure_type(), Some(FailureType::Validation));
}

#[test]
fn strict_run_raises_the_same_error() {
    let (_store, factory) = create_factory();
    match command(&factory, "DeleteUser").go_strict(999i64, attrs! {}) {
        Err(Error::RecordNotFound { entity, id }) => {
            assert_eq!(entity, "user");
            assert_eq!(id, 999);
        }
        other => panic!("Expected RecordNotFound, got {:?}", other),
    }
}

#[test]
fn invalid_id_is_raised_before_any_write() {
    let (store, factory) = create_factory();
    let err = Target::from_value(&Value::from("not-a-number")).unwrap_err();
    assert!(matches!(err, Error::InvalidId { .. }));

    let err = command(&factory, "CreateUser")
        .go(5i64, attrs! { "last_name" => "Turner" })
        .unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidId));
    assert_eq!(store.count("user"), 0);
}

#[test]
fn record_invalid_is_validation_failure() {
    let (_store, factory) = create_factory();
    let outcome = command(&factory, "CreateStrictUser")
        .go((), attrs! { "first_name" => "Ann" })
        .unwrap();
    assert_eq!(outcome.kind(), Some(ErrorKind::RecordInvalid));
    assert_eq!(outcome.failure_type(), Some(FailureType::Validation));
    assert!(outcome
        .error()
        .unwrap()
        .to_string()
        .contains("last_name can't be blank"));
}

#[test]
fn missing_adapter_is_configuration_error() {
    let factory = Factory::new(Arc::new(Configuration::new(ForemanConfig::default())));
    let err = factory.resolve("CreateUser").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::ConfigurationError));
}

#[test]
fn unregistered_adapter_name_is_configuration_error() {
    let configuration = Configuration::new(ForemanConfig::with_adapter("postgres"))
        .with_adapter("memory", Arc::new(MemoryStore::new()));
    let factory = Factory::new(Arc::new(configuration));
    let err = factory.resolve("UpdateUser").unwrap_err();
    assert!(matches!(err, Error::Configuration { ref reason } if reason.contains("postgres")));
}

#[test]
fn undeclared_entity_propagates_store_error() {
    let (_store, factory) = create_factory();
    let err = command(&factory, "UpdateInvoice")
        .go(1i64, attrs! {})
        .unwrap_err();
    assert_eq!(err.kind(), None);
    assert!(matches!(err, Error::Store(StoreError::UnknownEntity { .. })));
}
