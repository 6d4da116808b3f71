//! Single-target command execution.

use std::sync::Arc;

use super::Fixture;
use crate::{
    attrs, CommandDefinition, Error, ErrorKind, FailureType, Record, StoreError, Target, Variant,
};

#[test]
fn test_create_user() {
    let fx = Fixture::new();
    let output = fx
        .command("CreateUser")
        .go_strict((), attrs! { "last_name" => "Turner" })
        .unwrap();

    let user = output.entity().unwrap();
    assert_eq!(user.id, 1);
    assert_eq!(user.get_str("last_name"), Some("Turner"));
    assert_eq!(fx.store.count("user"), 1);
}

#[test]
fn test_create_for_parent_sets_relation_key() {
    let fx = Fixture::new();
    let employer = fx
        .command("CreateEmployer")
        .go_strict((), attrs! { "name" => "Acme" })
        .unwrap()
        .into_entity()
        .unwrap();

    let user = fx
        .command("CreateUserForEmployer")
        .go_strict(&employer, attrs! { "last_name" => "Turner" })
        .unwrap()
        .into_entity()
        .unwrap();
    assert_eq!(user.get_int("employer_id"), Some(employer.id));
    assert_eq!(user.get_str("last_name"), Some("Turner"));
}

#[test]
fn test_create_for_parent_overrides_caller_relation_key() {
    let fx = Fixture::new();
    let employer = fx
        .command("CreateEmployer")
        .go_strict((), attrs! { "name" => "Acme" })
        .unwrap()
        .into_entity()
        .unwrap();

    let user = fx
        .command("CreateUserForEmployer")
        .go_strict(
            employer.id,
            attrs! { "last_name" => "Turner", "employer_id" => 77i64, "id" => 5i64 },
        )
        .unwrap()
        .into_entity()
        .unwrap();
    assert_eq!(user.get_int("employer_id"), Some(employer.id));
    assert_eq!(user.id, 1);
}

#[test]
fn test_create_for_missing_parent() {
    let fx = Fixture::new();
    let outcome = fx
        .command("CreateUserForEmployer")
        .go(42i64, attrs! { "last_name" => "Turner" })
        .unwrap();

    assert!(!outcome.is_success());
    assert_eq!(outcome.kind(), Some(ErrorKind::RecordNotFound));
    assert_eq!(fx.store.count("user"), 0);
}

#[test]
fn test_update_user() {
    let fx = Fixture::new();
    let user = fx
        .command("CreateUser")
        .go_strict((), attrs! { "last_name" => "Turner", "first_name" => "Ann" })
        .unwrap()
        .into_entity()
        .unwrap();

    let updated = fx
        .command("UpdateUser")
        .go_strict(&user, attrs! { "last_name" => "Smith", "id" => 99i64 })
        .unwrap()
        .into_entity()
        .unwrap();
    assert_eq!(updated.id, user.id);
    assert_eq!(updated.get_str("last_name"), Some("Smith"));
    assert_eq!(updated.get_str("first_name"), Some("Ann"));
}

#[test]
fn test_delete_user() {
    let fx = Fixture::new();
    let user = fx
        .command("CreateUser")
        .go_strict((), attrs! {})
        .unwrap()
        .into_entity()
        .unwrap();

    let output = fx.command("DeleteUser").go_strict(&user, attrs! {}).unwrap();
    assert_eq!(output.deleted(), Some(true));
    assert_eq!(fx.store.count("user"), 0);
}

#[test]
fn test_delete_missing_user() {
    let fx = Fixture::new();
    let delete = fx.command("DeleteUser");

    let outcome = delete.go(999i64, attrs! {}).unwrap();
    assert!(!outcome.is_success());
    assert!(outcome.result().is_none());
    assert_eq!(outcome.kind(), Some(ErrorKind::RecordNotFound));
    assert_eq!(outcome.failure_type(), Some(FailureType::Validation));

    let err = delete.go_strict(999i64, attrs! {}).unwrap_err();
    assert!(matches!(err, Error::RecordNotFound { id: 999, .. }));
}

#[test]
fn test_record_invalid_outcome() {
    let fx = Fixture::new();
    let outcome = fx
        .command("CreateStrictUser")
        .go((), attrs! { "first_name" => "Ann" })
        .unwrap();
    assert_eq!(outcome.kind(), Some(ErrorKind::RecordInvalid));
    assert_eq!(outcome.failure_type(), Some(FailureType::Validation));
    assert_eq!(fx.store.count("strict_user"), 0);
}

#[test]
fn test_unknown_attribute_outcome() {
    let fx = Fixture::new();
    let outcome = fx
        .command("CreateUser")
        .go((), attrs! { "age" => 30 })
        .unwrap();
    assert_eq!(outcome.kind(), Some(ErrorKind::UnknownAttribute));
}

#[test]
fn test_target_rules_raise_invalid_id() {
    let fx = Fixture::new();
    assert!(matches!(
        fx.command("CreateUser").go(3i64, attrs! {}),
        Err(Error::InvalidId { .. })
    ));
    assert!(matches!(
        fx.command("UpdateUser").go((), attrs! {}),
        Err(Error::InvalidId { .. })
    ));
    assert!(matches!(
        fx.command("DeleteUser").go(Target::None, attrs! {}),
        Err(Error::InvalidId { .. })
    ));
}

#[test]
fn test_untranslated_store_error_propagates() {
    let fx = Fixture::new();
    // declared nowhere in the store
    let err = fx
        .command("CreateInvoice")
        .go((), attrs! {})
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::UnknownEntity { .. })));
}

struct Unfinished;

impl Variant for Unfinished {
    fn name(&self) -> &'static str {
        "unfinished"
    }
}

#[test]
fn test_missing_hook_is_method_not_implemented() {
    let fx = Fixture::new();
    let command = fx
        .factory
        .define("UpdateSportsCar", Box::new(Unfinished))
        .unwrap();

    let err = command.go(1i64, attrs! {}).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::MethodNotImplemented));
    assert!(err.to_string().contains("UpdateSportsCar"));
}

struct Archive;

impl Variant for Archive {
    fn name(&self) -> &'static str {
        "archive"
    }

    fn execute_single(
        &self,
        command: &CommandDefinition,
        unit: crate::ExecutionUnit,
    ) -> crate::Result<Record> {
        let id = command.require_id(&unit)?;
        let entity = command
            .subject()
            .update(id, attrs! { "model" => "archived" })?;
        Ok(Record::Entity(entity))
    }
}

#[test]
fn test_custom_variant_takes_precedence() {
    let fx = Fixture::new();
    let custom = fx.factory.define("DeleteSportsCar", Box::new(Archive)).unwrap();
    let resolved = fx.command("DeleteSportsCar");
    assert!(Arc::ptr_eq(&custom, &resolved));

    let car = fx
        .command("CreateSportsCar")
        .go_strict((), attrs! { "make" => "Mazda", "model" => "MX-5" })
        .unwrap()
        .into_entity()
        .unwrap();
    let archived = resolved.go_strict(&car, attrs! {}).unwrap().into_entity().unwrap();
    assert_eq!(archived.get_str("model"), Some("archived"));
    assert_eq!(fx.store.count("sports_car"), 1);
}
