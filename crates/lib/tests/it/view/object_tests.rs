//! Nested object accessor tests

use jsonbind::{Document, FaultKind, HasBackingNode, tree::NodeKind};
use serde_json::json;

use crate::helpers::{Book, Cover, JSON, Margins, sample_book};

#[test]
fn test_existing_object_is_bound_in_place() {
    let (doc, book) = sample_book();
    let cover = book.cover().unwrap();
    assert_eq!(cover.image().unwrap().as_deref(), Some("images/cover.png"));

    cover.set_image("images/new.png").unwrap();
    assert_eq!(doc.to_value()["Cover"]["Image"], "images/new.png");
    let again = book.cover().unwrap();
    assert!(cover.node().same_node(again.node()));
}

#[test]
fn test_absent_object_is_created_on_access() {
    let doc = Document::new();
    let book = Book::new(doc.root());

    let cover = book.cover().unwrap();
    assert_eq!(cover.image().unwrap(), None);
    assert_eq!(doc.to_value(), json!({"Cover": {}}));

    cover.set_image("c.png").unwrap();
    assert_eq!(doc.to_value(), json!({"Cover": {"Image": "c.png"}}));
}

#[test]
fn test_null_object_is_replaced() {
    let doc = Document::from_value(json!({"Cover": null}));
    let book = Book::new(doc.root());
    book.cover().unwrap().set_image("x.png").unwrap();
    assert_eq!(doc.to_value(), json!({"Cover": {"Image": "x.png"}}));
}

#[test]
fn test_scalar_in_place_of_object() {
    let doc = Document::from_value(json!({"Cover": "cover.png"}));
    let book = Book::new(doc.root());

    let err = book.cover().err().unwrap();
    let fault = err.fault().unwrap();
    assert_eq!(fault.kind(), FaultKind::WrongNodeType);
    assert_eq!(fault.property(), "Cover");
    assert_eq!(fault.expected(), "Cover");
    assert_eq!(fault.actual(), NodeKind::String);
    assert!(fault.is_structural());
}

#[test]
fn test_moving_an_object_between_parents() {
    let (doc, book) = sample_book();
    let cover = book.cover().unwrap();

    let shelf = JSON.ensure_object(&doc.root(), "Shelf").unwrap();
    JSON.set_object(&shelf, "Featured", Some(&cover)).unwrap();
    JSON.remove(&doc.root(), "Cover").unwrap();

    let featured = JSON
        .get_object(&shelf, "Featured", Cover::new)
        .unwrap();
    assert!(featured.node().same_node(cover.node()));
    assert_eq!(
        doc.to_value()["Shelf"],
        json!({"Featured": {"Image": "images/cover.png"}})
    );
}

#[test]
fn test_snapshot_settings() {
    let (doc, book) = sample_book();

    assert_eq!(book.margins().unwrap(), Margins { top: 20, bottom: 20 });
    assert_eq!(doc.to_value()["Margins"], json!({"top": 20, "bottom": 20}));

    JSON.serialize(&doc.root(), "Margins", Some(&Margins { top: 5, bottom: 10 }))
        .unwrap();
    assert_eq!(book.margins().unwrap(), Margins { top: 5, bottom: 10 });

    JSON.serialize::<Margins>(&doc.root(), "Margins", None).unwrap();
    assert_eq!(doc.to_value()["Margins"], json!(null));
    assert_eq!(JSON.deserialize::<Margins>(&doc.root(), "Margins").unwrap(), None);
}
