//! Typed views over document nodes.
//!
//! An [`Accessor`] reads and writes typed properties of object nodes in place.
//! It is a labeled, stateless helper: every call names the subject node and the
//! property, and every failure is reported as a [`Fault`] tagged with the
//! accessor's label.
//!
//! # Accessor families
//!
//! - **Values** ([`value`]): scalars through the [`ValueType`] strategies, in
//!   strict (`get`) and tolerant (`get_opt`, `get_or`) modes, plus string arrays
//!   and serde enumerations.
//! - **Objects** ([`object`]): nested domain objects materialized by a factory,
//!   auto-vivified when absent or null.
//! - **Lists** ([`ListView`]) and **maps** ([`MapView`], [`StringMapView`]):
//!   collections whose typed entries mirror the children of a raw node.
//!
//! # Domain objects
//!
//! A domain type takes part by implementing [`HasBackingNode`]:
//!
//! ```
//! use jsonbind::{Result, tree::{Document, Node}, view::{Accessor, HasBackingNode}};
//!
//! static JSON: Accessor = Accessor::from_static("chapter");
//!
//! struct Chapter {
//!     node: Node,
//! }
//!
//! impl HasBackingNode for Chapter {
//!     fn node(&self) -> &Node {
//!         &self.node
//!     }
//! }
//!
//! impl Chapter {
//!     fn title(&self) -> Result<String> {
//!         JSON.get(&self.node, "Title")
//!     }
//!
//!     fn set_title(&self, title: &str) -> Result<()> {
//!         JSON.set(&self.node, "Title", &title.to_string())?;
//!         Ok(())
//!     }
//! }
//!
//! let doc = Document::parse(r#"{"Chapter": {"Title": "Intro"}}"#)?;
//! let chapter = JSON.get_object(&doc.root(), "Chapter", |node| Chapter { node })?;
//! assert_eq!(chapter.title()?, "Intro");
//! chapter.set_title("Preface")?;
//! assert_eq!(doc.to_value()["Chapter"]["Title"], "Preface");
//! # Ok::<(), jsonbind::Error>(())
//! ```

use std::borrow::Cow;

use crate::tree::{Node, NodeKind, Scalar};

pub mod errors;
pub mod lenient;
pub mod list;
pub mod map;
pub mod object;
pub mod value;

pub use errors::{Fault, FaultKind};
pub use list::ListView;
pub use map::{MapView, StringMapView};
pub use value::{ParseFailure, ValueType};

/// Capability of a domain type stored in the tree: it exposes its backing object node.
pub trait HasBackingNode {
    fn node(&self) -> &Node;
}

impl HasBackingNode for Node {
    fn node(&self) -> &Node {
        self
    }
}

/// Labeled entry point for typed access.
///
/// The label appears in every fault the accessor raises, identifying which
/// part of the application performed the failing access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    label: Cow<'static, str>,
}

/// What a property lookup found on the subject node.
pub(crate) enum Child {
    Missing,
    Null(Node),
    Present(Node),
}

impl Accessor {
    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Creates an accessor usable in a `static`
    pub const fn from_static(label: &'static str) -> Self {
        Self {
            label: Cow::Borrowed(label),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn fault(
        &self,
        kind: FaultKind,
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: NodeKind,
    ) -> Fault {
        Fault::new(kind, self.label.as_ref(), property, expected, actual)
    }

    /// Checks that `node` can hold properties.
    pub(crate) fn subject(&self, node: &Node, property: &str) -> Result<(), Fault> {
        match node.kind() {
            NodeKind::Object => Ok(()),
            NodeKind::Null => Err(self.fault(
                FaultKind::NullDocument,
                property,
                NodeKind::Object.name(),
                NodeKind::Null,
            )),
            other => Err(self.fault(
                FaultKind::WrongNodeType,
                property,
                NodeKind::Object.name(),
                other,
            )),
        }
    }

    /// Looks up `property` on a validated subject.
    pub(crate) fn child(&self, node: &Node, property: &str) -> Result<Child, Fault> {
        self.subject(node, property)?;
        Ok(match node.get(property) {
            None => Child::Missing,
            Some(child) if child.is_null() => Child::Null(child),
            Some(child) => Child::Present(child),
        })
    }

    /// Removes `property` from `node`, returning whether it was present
    pub fn remove(&self, node: &Node, property: &str) -> crate::Result<bool> {
        self.subject(node, property)?;
        Ok(node.remove(property)?.is_some())
    }

    /// Returns true if `property` is present with a non-null value
    pub fn has_value(&self, node: &Node, property: &str) -> crate::Result<bool> {
        Ok(matches!(self.child(node, property)?, Child::Present(_)))
    }

    /// Writes an explicit null at `property`
    pub fn set_null(&self, node: &Node, property: &str) -> crate::Result<()> {
        self.subject(node, property)?;
        node.set_scalar(property, Scalar::Null)?;
        Ok(())
    }
}
