//! Command Dispatch Tests
//!
//! Resolving tokens and running single-target commands.

use std::sync::Arc;

use crate::common::*;
use foreman::{attrs, Action, Descriptor, Record, Target, Value};

#[test]
fn create_user_returns_persisted_entity() {
    let (store, factory) = create_factory();
    let user = extract_entity(
        command(&factory, "CreateUser")
            .go_strict((), attrs! { "last_name" => "Turner" })
            .unwrap(),
    );

    assert_eq!(user.get_str("last_name"), Some("Turner"));
    assert_eq!(store.count("user"), 1);
}

#[test]
fn create_user_for_employer_links_parent() {
    let (_store, factory) = create_factory();
    let employer = extract_entity(
        command(&factory, "CreateEmployer")
            .go_strict((), attrs! { "name" => "Acme" })
            .unwrap(),
    );

    let user = extract_entity(
        command(&factory, "CreateUserForEmployer")
            .go_strict(&employer, attrs! { "last_name" => "Turner" })
            .unwrap(),
    );
    assert_eq!(user.get("employer_id"), Some(&Value::Int(employer.id)));
}

#[test]
fn update_compound_subject() {
    let (_store, factory) = create_factory();
    let car = extract_entity(
        command(&factory, "CreateSportsCar")
            .go_strict((), attrs! { "make" => "Mazda", "year" => 1990 })
            .unwrap(),
    );

    let updated = extract_entity(
        command(&factory, "UpdateSportsCar")
            .go_strict(car.id, attrs! { "year" => 1991 })
            .unwrap(),
    );
    assert_eq!(updated.get_int("year"), Some(1991));
    assert_eq!(updated.get_str("make"), Some("Mazda"));
}

#[test]
fn delete_then_delete_again() {
    let (_store, factory) = create_factory();
    let user = extract_entity(
        command(&factory, "CreateUser")
            .go_strict((), attrs! {})
            .unwrap(),
    );
    let delete = command(&factory, "DeleteUser");

    let first = delete.go(&user, attrs! {}).unwrap();
    assert!(first.is_success());
    assert_eq!(first.result().and_then(|o| o.deleted()), Some(true));

    let second = delete.go(&user, attrs! {}).unwrap();
    assert!(!second.is_success());
}

#[test]
fn loose_id_arguments_normalize() {
    let (_store, factory) = create_factory();
    let user = extract_entity(
        command(&factory, "CreateUser")
            .go_strict((), attrs! { "last_name" => "Turner" })
            .unwrap(),
    );

    let target = Target::from_value(&Value::from(user.id.to_string())).unwrap();
    let output = command(&factory, "UpdateUser")
        .go_strict(target, attrs! { "first_name" => "Ann" })
        .unwrap();
    assert_eq!(output.single().and_then(Record::entity).map(|e| e.id), Some(user.id));
}

#[test]
fn resolution_is_idempotent() {
    let (_store, factory) = create_factory();
    let a = command(&factory, "CreateUserForEmployer");
    let b = command(&factory, "CreateUserForEmployer");
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn non_command_tokens_resolve_to_none() {
    let (_store, factory) = create_factory();
    assert!(factory.resolve("FooBar").unwrap().is_none());
    assert!(factory.resolve("DeleteUserForEmployer").unwrap().is_none());
}

#[test]
fn resolve_parsed_descriptor() {
    let (_store, factory) = create_factory();
    let descriptor: Descriptor = "CreateUserForEmployer".parse().unwrap();
    assert_eq!(descriptor.action(), Action::Create);

    let by_descriptor = factory.resolve_descriptor(&descriptor).unwrap();
    let by_token = command(&factory, "CreateUserForEmployer");
    assert!(Arc::ptr_eq(&by_descriptor, &by_token));
}
