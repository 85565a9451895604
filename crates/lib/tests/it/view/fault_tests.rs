//! Fault reporting tests

use jsonbind::{Accessor, Document, Error, Fault, FaultKind, tree::NodeKind};
use serde_json::json;

#[test]
fn test_message_names_every_part() {
    let doc = Document::from_value(json!({"Pages": "many"}));
    let json = Accessor::new("printer");

    let err = json.get::<i32>(&doc.root(), "Pages").unwrap_err();
    assert_eq!(
        err.to_string(),
        "printer[Pages] should be a Int32, error code: UnparsableValue, node kind: String"
    );
    assert_eq!(err.module(), "view");
}

#[test]
fn test_each_kind_is_reachable() {
    let doc = Document::from_value(json!({
        "null": null,
        "blank": " ",
        "text": "abc",
        "list": [],
        "map": {"k": {}},
        "nothing": null,
    }));
    let json = Accessor::new("kinds");
    let root = doc.root();
    let kind = |err: Error| err.fault_kind().unwrap();

    assert_eq!(
        kind(json.get::<String>(&root, "absent").unwrap_err()),
        FaultKind::MissingProperty
    );
    assert_eq!(
        kind(json.get::<String>(&root, "null").unwrap_err()),
        FaultKind::NullNotAllowed
    );
    assert_eq!(
        kind(json.get::<i64>(&root, "list").unwrap_err()),
        FaultKind::WrongNodeType
    );
    assert_eq!(
        kind(json.get::<i64>(&root, "text").unwrap_err()),
        FaultKind::UnparsableValue
    );
    assert_eq!(
        kind(json.get::<i64>(&root, "blank").unwrap_err()),
        FaultKind::EmptyValue
    );

    let mut map = json.map(&root, "map", |node| node).unwrap();
    assert_eq!(
        kind(map.add("k", doc.create_object()).unwrap_err()),
        FaultKind::DuplicateKey
    );

    let nothing = root.get("nothing").unwrap();
    assert_eq!(
        kind(json.has_value(&nothing, "x").unwrap_err()),
        FaultKind::NullDocument
    );
}

#[test]
fn test_structural_and_content_split() {
    let missing = Fault::new(
        FaultKind::MissingProperty,
        "a",
        "p",
        "String",
        NodeKind::Undefined,
    );
    let unparsable = Fault::new(
        FaultKind::UnparsableValue,
        "a",
        "p",
        "Int32",
        NodeKind::String,
    );
    assert!(missing.is_structural());
    assert!(!missing.is_content());
    assert!(unparsable.is_content());
    assert!(unparsable.is_parse_error());

    let err: Error = unparsable.clone().into();
    assert_eq!(err.fault(), Some(&unparsable));
    assert!(!err.is_type_error());
}

#[test]
fn test_faults_do_not_modify_the_document() {
    let doc = Document::from_value(json!({"a": "x", "b": [1], "c": {"d": 2}}));
    let before = doc.to_value();
    let json = Accessor::new("readonly");
    let root = doc.root();

    assert!(json.get::<bool>(&root, "a").is_err());
    assert!(json.list(&root, "c", |node| node).is_err());
    assert!(json.get_object(&root, "b", |node| node).is_err());
    assert!(json.map(&root, "b", |node| node).is_err());
    assert!(json.get_string_array(&root, "c").is_err());
    assert_eq!(doc.to_value(), before);
}
