//! In-place mutation tests for raw nodes

use jsonbind::{
    Document,
    tree::{NodeKind, Scalar, TreeError},
};
use serde_json::json;

#[test]
fn test_mutation_through_any_handle_is_visible() {
    let doc = Document::from_value(json!({"inner": {"a": 1}}));
    let inner = doc.root().get("inner").unwrap();
    inner.set_scalar("b", "two").unwrap();

    let again = doc.root().get("inner").unwrap();
    assert_eq!(again.get("b").unwrap().scalar(), Some(Scalar::from("two")));
    assert_eq!(doc.to_value(), json!({"inner": {"a": 1, "b": "two"}}));
}

#[test]
fn test_set_returns_replaced_child() {
    let doc = Document::from_value(json!({"a": 1}));
    let root = doc.root();
    let previous = root.set("a", &doc.create_scalar(2)).unwrap().unwrap();
    assert_eq!(previous.scalar(), Some(Scalar::Integer(1)));
    assert!(root.set("b", &doc.create_scalar(3)).unwrap().is_none());
}

#[test]
fn test_overwriting_scalar_reuses_slot() {
    let doc = Document::from_value(json!({"n": 0, "o": {}}));
    let root = doc.root();
    let first = root.set_scalar("n", 1).unwrap();
    let before = doc.node_count();

    for i in 2..1000 {
        root.set_scalar("n", i).unwrap();
    }
    assert_eq!(doc.node_count(), before);
    assert_eq!(first.scalar(), Some(Scalar::Integer(999)));
    assert!(first.same_node(&root.get("n").unwrap()));

    // A container child is replaced by a fresh scalar node
    root.set_scalar("o", "flat").unwrap();
    assert_eq!(doc.node_count(), before + 1);
    assert_eq!(doc.to_value(), json!({"n": 999, "o": "flat"}));
}

#[test]
fn test_import_creates_detached_subtree() {
    let doc = Document::new();
    let before = doc.node_count();
    let subtree = doc.import(json!({"x": [1, 2]}));

    assert_eq!(doc.node_count(), before + 4);
    assert_eq!(doc.to_value(), json!({}));

    doc.root().set("sub", &subtree).unwrap();
    assert_eq!(doc.to_value(), json!({"sub": {"x": [1, 2]}}));
}

#[test]
fn test_entries_and_children() {
    let doc = Document::from_value(json!({"a": 1, "b": [true, null]}));
    let entries = doc.root().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "a");
    assert_eq!(entries[1].1.kind(), NodeKind::Array);

    let kinds: Vec<_> = entries[1].1.children().iter().map(|c| c.kind()).collect();
    assert_eq!(kinds, [NodeKind::Boolean, NodeKind::Null]);
}

#[test]
fn test_clear_containers() {
    let doc = Document::from_value(json!({"o": {"a": 1}, "l": [1], "s": "x"}));
    let root = doc.root();
    root.get("o").unwrap().clear().unwrap();
    root.get("l").unwrap().clear().unwrap();
    assert_eq!(doc.to_value(), json!({"o": {}, "l": [], "s": "x"}));

    let err = root.get("s").unwrap().clear().unwrap_err();
    assert!(err.is_kind_error());
}

#[test]
fn test_attach_errors_leave_tree_unchanged() {
    let doc = Document::from_value(json!({"a": {"b": {}}}));
    let a = doc.root().get("a").unwrap();
    let b = a.get("b").unwrap();

    let err = b.set("loop", &a).unwrap_err();
    assert_eq!(err, TreeError::Cycle);
    assert!(err.is_attach_error());

    let other = Document::new();
    let err = a.set("foreign", &other.root()).unwrap_err();
    assert_eq!(err, TreeError::ForeignNode);

    assert_eq!(doc.to_value(), json!({"a": {"b": {}}}));
}

#[test]
fn test_bounds_errors() {
    let doc = Document::from_value(json!({"l": [1]}));
    let list = doc.root().get("l").unwrap();
    let err = list.replace_at(1, &doc.create_scalar(0)).unwrap_err();
    assert!(err.is_bounds_error());
    assert_eq!(err, TreeError::IndexOutOfBounds { index: 1, len: 1 });
    assert!(list.at(1).is_none());
}
