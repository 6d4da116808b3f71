//! Serialization Tests
//!
//! Invocations, outputs and errors are JSON-serializable for callers that
//! cross a process boundary.

use crate::common::*;
use foreman::{attrs, Error, Invocation, Outcome, Params, Target};
use serde_json::json;

#[test]
fn invocation_from_json() {
    let invocation: Invocation = serde_json::from_value(json!({
        "target": { "ids": [1, 2] },
        "params": { "one": {} }
    }))
    .unwrap();
    assert_eq!(invocation.target, Target::Ids(vec![1, 2]));
    assert_eq!(invocation.params, Params::default());
    assert!(invocation.is_batch());
}

#[test]
fn invocation_defaults() {
    let invocation: Invocation = serde_json::from_value(json!({})).unwrap();
    assert_eq!(invocation, Invocation::default());
    assert!(!invocation.is_batch());
}

#[test]
fn failed_outcome_roundtrip() {
    let (_store, factory) = create_factory();
    let outcome = command(&factory, "DeleteUser").go(404i64, attrs! {}).unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["success"], json!(false));
    assert_eq!(json["result"], json!(null));

    let back: Outcome = serde_json::from_value(json).unwrap();
    assert_eq!(back, outcome);
    assert!(matches!(back.error(), Some(Error::RecordNotFound { id: 404, .. })));
}

#[test]
fn batch_outcome_marks_failures_invalid() {
    let (_store, factory) = create_factory();
    let outcome = command(&factory, "DeleteUser")
        .go(vec![7i64], attrs! {})
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["success"], json!(true));
    let marker = &json["result"]["batch"][0]["failed"];
    assert_eq!(marker["valid"], json!(false));
    assert_eq!(marker["id"], json!(7));
    assert_eq!(marker["kind"], json!("record_not_found"));
}

#[test]
fn batch_outcome_with_valid_marker_is_rejected() {
    let (_store, factory) = create_factory();
    let outcome = command(&factory, "DeleteUser")
        .go(vec![7i64], attrs! {})
        .unwrap();

    let mut json = serde_json::to_value(&outcome).unwrap();
    json["result"]["batch"][0]["failed"]["valid"] = json!(true);
    assert!(serde_json::from_value::<Outcome>(json).is_err());
}

#[test]
fn contradictory_outcome_is_rejected() {
    let (_store, factory) = create_factory();
    let outcome = command(&factory, "DeleteUser").go(404i64, attrs! {}).unwrap();

    let mut json = serde_json::to_value(&outcome).unwrap();
    json["success"] = json!(true);
    assert!(serde_json::from_value::<Outcome>(json).is_err());
}
