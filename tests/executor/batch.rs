//! Batch Tests
//!
//! Id lists, queries and attribute lists fan out into ordered batches.

use crate::common::*;
use foreman::{attrs, BatchItem, ErrorKind, Output, Record, Target};

fn batch(output: Output) -> Vec<BatchItem> {
    match output {
        Output::Batch(items) => items,
        other => panic!("Expected Output::Batch, got {:?}", other),
    }
}

#[test]
fn query_update_touches_only_matches() {
    let (_store, factory) = create_factory();
    let create = command(&factory, "CreateUser");
    for name in ["Smith", "Jones", "Smith", "Smith"] {
        create.go_strict((), attrs! { "last_name" => name }).unwrap();
    }

    let items = batch(
        command(&factory, "UpdateUser")
            .go_strict(
                Target::query(attrs! { "last_name" => "Smith" }),
                attrs! { "last_name" => "Turner" },
            )
            .unwrap(),
    );
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| {
        item.record()
            .and_then(Record::entity)
            .and_then(|e| e.get_str("last_name"))
            == Some("Turner")
    }));

    let remaining = batch(
        command(&factory, "DeleteUser")
            .go_strict(Target::query(attrs! { "last_name" => "Jones" }), attrs! {})
            .unwrap(),
    );
    assert_eq!(remaining, vec![BatchItem::Ok(Record::Deleted(true))]);
}

#[test]
fn partial_failure_reports_markers_in_place() {
    let (store, factory) = create_factory();
    let create = command(&factory, "CreateUser");
    let a = extract_entity(create.go_strict((), attrs! {}).unwrap());
    let b = extract_entity(create.go_strict((), attrs! {}).unwrap());

    let outcome = command(&factory, "DeleteUser")
        .go(vec![a.id, 999, b.id], attrs! {})
        .unwrap();
    assert!(outcome.is_success());

    let items = batch(outcome.into_result().unwrap());
    assert!(items[0].is_ok());
    assert!(items[2].is_ok());
    let marker = items[1].failure().expect("middle item failed");
    assert_eq!(marker.id, Some(999));
    assert_eq!(marker.kind, ErrorKind::RecordNotFound);
    assert!(!marker.valid());
    assert_eq!(store.count("user"), 0);
}

#[test]
fn batch_results_feed_the_next_command() {
    let (_store, factory) = create_factory();
    let cars = batch(
        command(&factory, "CreateSportsCar")
            .go_strict(
                (),
                vec![attrs! { "make" => "Mazda" }, attrs! { "make" => "Honda" }],
            )
            .unwrap(),
    );

    let updated = batch(
        command(&factory, "UpdateSportsCar")
            .go_strict(Target::many(&cars).unwrap(), attrs! { "model" => "Roadster" })
            .unwrap(),
    );
    let models: Vec<_> = updated
        .iter()
        .map(|item| item.record().and_then(Record::entity).and_then(|e| e.get_str("model")))
        .collect();
    assert_eq!(models, vec![Some("Roadster"), Some("Roadster")]);
}

#[test]
fn positional_params_pair_with_ids() {
    let (_store, factory) = create_factory();
    let create = command(&factory, "CreateUser");
    let ids: Vec<i64> = (0..3)
        .map(|_| extract_entity(create.go_strict((), attrs! {}).unwrap()).id)
        .collect();

    let items = batch(
        command(&factory, "UpdateUser")
            .go_strict(
                ids.clone(),
                vec![
                    attrs! { "first_name" => "a" },
                    attrs! { "first_name" => "b" },
                    attrs! { "first_name" => "c" },
                ],
            )
            .unwrap(),
    );
    let pairs: Vec<_> = items
        .iter()
        .filter_map(|item| item.record().and_then(Record::entity))
        .map(|e| (e.id, e.get_str("first_name").map(str::to_string)))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (ids[0], Some("a".to_string())),
            (ids[1], Some("b".to_string())),
            (ids[2], Some("c".to_string())),
        ]
    );
}
