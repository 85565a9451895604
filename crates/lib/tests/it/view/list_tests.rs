//! List view tests

use jsonbind::{Document, FaultKind, HasBackingNode, tree::NodeKind};
use serde_json::json;

use crate::helpers::{Book, Chapter, JSON, exported_titles, sample_book};

fn titles(chapters: &jsonbind::view::ListView<Chapter>) -> Vec<String> {
    chapters.iter().map(|c| c.title().unwrap()).collect()
}

// ===== BINDING =====

#[test]
fn test_chapters_materialize_in_order() {
    let (_doc, book) = sample_book();
    let chapters = book.chapters().unwrap();

    assert_eq!(chapters.len(), 3);
    assert_eq!(titles(&chapters), ["Introduction", "Setup", "Usage"]);
    assert!(!chapters[0].draft().unwrap());
    assert!(chapters[1].draft().unwrap());
    assert_eq!(chapters.first().unwrap().title().unwrap(), "Introduction");
    assert_eq!(chapters.last().unwrap().title().unwrap(), "Usage");
}

#[test]
fn test_views_share_the_backing_array() {
    let (doc, book) = sample_book();
    let mut first = book.chapters().unwrap();
    first.push(Chapter::create(&doc, "Appendix")).unwrap();

    let second = book.chapters().unwrap();
    assert_eq!(second.len(), 4);
    assert!(second[3].node().same_node(first[3].node()));
}

#[test]
fn test_missing_list_is_created() {
    let doc = Document::new();
    let book = Book::new(doc.root());
    let chapters = book.chapters().unwrap();
    assert!(chapters.is_empty());
    assert_eq!(doc.to_value(), json!({"Chapters": []}));
}

#[test]
fn test_bare_object_is_not_promoted() {
    let doc = Document::from_value(json!({"Chapters": {"Title": "Only"}}));
    let book = Book::new(doc.root());

    let err = book.chapters().unwrap_err();
    let fault = err.fault().unwrap();
    assert_eq!(fault.kind(), FaultKind::WrongNodeType);
    assert_eq!(fault.actual(), NodeKind::Object);
    assert_eq!(fault.property(), "Chapters");
}

#[test]
fn test_scalar_item_is_rejected_with_index() {
    let doc = Document::from_value(json!({"Chapters": [{"Title": "A"}, null]}));
    let book = Book::new(doc.root());

    let err = book.chapters().unwrap_err();
    let fault = err.fault().unwrap();
    assert_eq!(fault.property(), "Chapters[1]");
    assert_eq!(fault.actual(), NodeKind::Null);
    assert_eq!(fault.expected(), "Chapter");
}

// ===== MUTATION =====

#[test]
fn test_push_and_remove_restore_count() {
    let (doc, book) = sample_book();
    let mut chapters = book.chapters().unwrap();
    let count = chapters.len();

    let extra = Chapter::create(&doc, "Extra");
    chapters.push(extra.clone()).unwrap();
    assert_eq!(chapters.len(), count + 1);
    assert_eq!(exported_titles(&doc).last().map(String::as_str), Some("Extra"));

    assert!(chapters.remove(&extra).unwrap());
    assert_eq!(chapters.len(), count);
    assert_eq!(exported_titles(&doc), ["Introduction", "Setup", "Usage"]);
}

#[test]
fn test_comment_children_do_not_count() {
    let (doc, book) = sample_book();
    let raw = doc.root().get("Chapters").unwrap();
    raw.insert(1, &doc.create_comment("draft section follows"))
        .unwrap();

    let mut chapters = book.chapters().unwrap();
    assert_eq!(chapters.len(), 3);
    assert_eq!(raw.len(), 4);

    chapters
        .insert(1, Chapter::create(&doc, "Overview"))
        .unwrap();
    assert_eq!(
        exported_titles(&doc),
        ["Introduction", "Overview", "Setup", "Usage"]
    );
    assert_eq!(titles(&chapters), ["Introduction", "Overview", "Setup", "Usage"]);

    let removed = chapters.remove_at(2).unwrap();
    assert_eq!(removed.title().unwrap(), "Setup");
    assert_eq!(exported_titles(&doc), ["Introduction", "Overview", "Usage"]);
    assert_eq!(raw.len(), 4);
}

#[test]
fn test_index_of_and_contains_use_identity() {
    let (doc, book) = sample_book();
    let chapters = book.chapters().unwrap();
    let second = chapters[1].clone();
    assert_eq!(chapters.index_of(&second), Some(1));

    // Same content, different node
    let lookalike = Chapter::new(doc.import(second.node().to_value()));
    assert!(!chapters.contains(&lookalike));
    assert_eq!(chapters.index_of(&lookalike), None);
}

#[test]
fn test_set_and_clear() {
    let (doc, book) = sample_book();
    let mut chapters = book.chapters().unwrap();

    let old = chapters.set(2, Chapter::create(&doc, "Reference")).unwrap();
    assert_eq!(old.title().unwrap(), "Usage");
    assert_eq!(exported_titles(&doc), ["Introduction", "Setup", "Reference"]);

    chapters.clear().unwrap();
    assert!(chapters.is_empty());
    assert_eq!(doc.to_value()["Chapters"], json!([]));
}

#[test]
fn test_edits_through_items_reach_the_document() {
    let (doc, book) = sample_book();
    let chapters = book.chapters().unwrap();
    for chapter in &chapters {
        let title = chapter.title().unwrap();
        chapter.set_title(&title.to_uppercase()).unwrap();
    }
    assert_eq!(exported_titles(&doc), ["INTRODUCTION", "SETUP", "USAGE"]);
}

#[test]
fn test_lists_under_generic_nodes() {
    let doc = Document::from_value(json!({"groups": {"a": {"items": [{}, {}]}}}));
    let group = JSON.ensure_object(&doc.root(), "groups").unwrap();
    let group = JSON.ensure_object(&group, "a").unwrap();

    let items = JSON.list(&group, "items", |node| node).unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|node| node.is_object()));
}
