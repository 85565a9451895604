//! Arena-backed JSON document tree.
//!
//! A [`Document`] owns every node in a single arena. [`Node`] is a cheap handle
//! (shared arena pointer plus slot id) that reads and mutates the tree in
//! place; cloning a handle never copies the subtree. Two handles refer to the
//! same node exactly when [`Node::same_node`] holds, which is the identity the
//! collection views rely on.
//!
//! # Single writer
//!
//! The arena is shared through `Rc<RefCell<_>>`, so documents and node handles
//! are neither `Send` nor `Sync`: a document stays on the thread that created
//! it. Borrows are released before every method returns, so handles to the
//! same document can be freely interleaved from one thread.
//!
//! # Usage
//!
//! ```
//! use jsonbind::tree::{Document, NodeKind, Scalar};
//!
//! let doc = Document::parse(r#"{"title": "Guide", "chapters": []}"#)?;
//! let root = doc.root();
//! assert_eq!(root.get("title").unwrap().scalar(), Some(Scalar::from("Guide")));
//!
//! let chapter = doc.create_object();
//! chapter.set_scalar("name", "Intro")?;
//! root.get("chapters").unwrap().push(&chapter)?;
//! assert_eq!(root.get("chapters").unwrap().len(), 1);
//! assert_eq!(chapter.kind(), NodeKind::Object);
//! # Ok::<(), jsonbind::Error>(())
//! ```

use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;

use crate::Result;

mod convert;
pub mod errors;
pub mod value;

pub use errors::TreeError;
pub use value::{NodeKind, Scalar};

/// Opaque identifier of a node slot inside one document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Storage for one node.
#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Object(IndexMap<String, NodeId>),
    Array(Vec<NodeId>),
    Scalar(Scalar),
    Comment(String),
}

impl Slot {
    fn kind(&self) -> NodeKind {
        match self {
            Slot::Object(_) => NodeKind::Object,
            Slot::Array(_) => NodeKind::Array,
            Slot::Scalar(scalar) => scalar.kind(),
            Slot::Comment(_) => NodeKind::Comment,
        }
    }

    fn child_ids(&self) -> Vec<NodeId> {
        match self {
            Slot::Object(map) => map.values().copied().collect(),
            Slot::Array(items) => items.clone(),
            Slot::Scalar(_) | Slot::Comment(_) => Vec::new(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Arena {
    slots: Vec<Slot>,
    root: NodeId,
}

impl Arena {
    fn with_root(root: Slot) -> Self {
        Self {
            slots: vec![root],
            root: NodeId(0),
        }
    }

    pub(crate) fn alloc(&mut self, slot: Slot) -> NodeId {
        self.slots.push(slot);
        NodeId(self.slots.len() - 1)
    }

    pub(crate) fn slot(&self, id: NodeId) -> &Slot {
        &self.slots[id.0]
    }

    fn slot_mut(&mut self, id: NodeId) -> &mut Slot {
        &mut self.slots[id.0]
    }

    /// True when `target` is `from` or lies somewhere below it.
    fn reaches(&self, from: NodeId, target: NodeId) -> bool {
        let mut pending = vec![from];
        while let Some(id) = pending.pop() {
            if id == target {
                return true;
            }
            pending.extend(self.slot(id).child_ids());
        }
        false
    }
}

/// A parsed, mutable JSON document.
///
/// Cloning a `Document` produces another handle to the same arena.
#[derive(Clone)]
pub struct Document {
    arena: Rc<RefCell<Arena>>,
}

impl Document {
    /// Creates a document whose root is an empty object
    pub fn new() -> Self {
        Self::with_root(Slot::Object(IndexMap::new()))
    }

    fn with_root(root: Slot) -> Self {
        Self {
            arena: Rc::new(RefCell::new(Arena::with_root(root))),
        }
    }

    /// Parses JSON text into a new document
    pub fn parse(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Ok(Self::from_value(value))
    }

    /// Builds a document from an already parsed `serde_json::Value`
    pub fn from_value(value: serde_json::Value) -> Self {
        let doc = Self::with_root(Slot::Scalar(Scalar::Null));
        {
            let mut arena = doc.arena.borrow_mut();
            let root = convert::import(&mut arena, value);
            arena.root = root;
        }
        tracing::trace!(nodes = doc.node_count(), "Imported document");
        doc
    }

    /// Returns a handle to the root node
    pub fn root(&self) -> Node {
        let root = self.arena.borrow().root;
        self.node(root)
    }

    fn node(&self, id: NodeId) -> Node {
        Node {
            arena: Rc::clone(&self.arena),
            id,
        }
    }

    fn create(&self, slot: Slot) -> Node {
        let id = self.arena.borrow_mut().alloc(slot);
        self.node(id)
    }

    /// Creates a detached empty object node in this document
    pub fn create_object(&self) -> Node {
        self.create(Slot::Object(IndexMap::new()))
    }

    /// Creates a detached empty array node in this document
    pub fn create_array(&self) -> Node {
        self.create(Slot::Array(Vec::new()))
    }

    /// Creates a detached scalar node in this document
    pub fn create_scalar(&self, value: impl Into<Scalar>) -> Node {
        self.create(Slot::Scalar(value.into()))
    }

    /// Creates a detached comment node in this document
    pub fn create_comment(&self, text: impl Into<String>) -> Node {
        self.create(Slot::Comment(text.into()))
    }

    /// Copies a `serde_json::Value` into this document as a detached subtree
    pub fn import(&self, value: serde_json::Value) -> Node {
        let id = convert::import(&mut self.arena.borrow_mut(), value);
        self.node(id)
    }

    /// Number of slots allocated, including detached nodes.
    ///
    /// Overwriting a scalar reuses its slot; other replaced or removed nodes
    /// keep theirs until the document is dropped.
    pub fn node_count(&self) -> usize {
        self.arena.borrow().slots.len()
    }

    /// Exports the tree to a `serde_json::Value`, dropping comment nodes
    pub fn to_value(&self) -> serde_json::Value {
        self.root().to_value()
    }

    /// Serializes the tree as indented JSON text
    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_value())?)
    }

    /// Returns true if both handles share one arena
    pub fn same_document(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root())
            .field("nodes", &self.node_count())
            .finish()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Handle to one node of a [`Document`].
#[derive(Clone)]
pub struct Node {
    arena: Rc<RefCell<Arena>>,
    id: NodeId,
}

impl Node {
    /// Returns the slot id of this node
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns a handle to the document that owns this node
    pub fn document(&self) -> Document {
        Document {
            arena: Rc::clone(&self.arena),
        }
    }

    /// Returns the type tag of this node
    pub fn kind(&self) -> NodeKind {
        self.arena.borrow().slot(self.id).kind()
    }

    pub fn is_object(&self) -> bool {
        self.kind() == NodeKind::Object
    }

    pub fn is_array(&self) -> bool {
        self.kind() == NodeKind::Array
    }

    pub fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }

    pub fn is_comment(&self) -> bool {
        self.kind() == NodeKind::Comment
    }

    /// Returns true if both handles designate the same node
    pub fn same_node(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena) && self.id == other.id
    }

    /// Returns true if both nodes belong to the same document
    pub fn same_document(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }

    fn sibling(&self, id: NodeId) -> Node {
        Node {
            arena: Rc::clone(&self.arena),
            id,
        }
    }

    /// Number of direct children; zero for leaves
    pub fn len(&self) -> usize {
        match self.arena.borrow().slot(self.id) {
            Slot::Object(map) => map.len(),
            Slot::Array(items) => items.len(),
            Slot::Scalar(_) | Slot::Comment(_) => 0,
        }
    }

    /// Returns true if this node has no children
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the scalar payload of a leaf node
    pub fn scalar(&self) -> Option<Scalar> {
        match self.arena.borrow().slot(self.id) {
            Slot::Scalar(scalar) => Some(scalar.clone()),
            _ => None,
        }
    }

    /// Returns the text of a comment node
    pub fn comment(&self) -> Option<String> {
        match self.arena.borrow().slot(self.id) {
            Slot::Comment(text) => Some(text.clone()),
            _ => None,
        }
    }

    /// Looks up a child of an object node by key
    pub fn get(&self, key: &str) -> Option<Node> {
        let child = match self.arena.borrow().slot(self.id) {
            Slot::Object(map) => map.get(key).copied(),
            _ => None,
        };
        child.map(|id| self.sibling(id))
    }

    /// Returns true if this is an object node holding `key`
    pub fn contains_key(&self, key: &str) -> bool {
        match self.arena.borrow().slot(self.id) {
            Slot::Object(map) => map.contains_key(key),
            _ => false,
        }
    }

    /// Looks up a child of an array node by position
    pub fn at(&self, index: usize) -> Option<Node> {
        let child = match self.arena.borrow().slot(self.id) {
            Slot::Array(items) => items.get(index).copied(),
            _ => None,
        };
        child.map(|id| self.sibling(id))
    }

    /// Keys of an object node in insertion order
    pub fn keys(&self) -> Vec<String> {
        match self.arena.borrow().slot(self.id) {
            Slot::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Key/child pairs of an object node in insertion order
    pub fn entries(&self) -> Vec<(String, Node)> {
        let ids: Vec<(String, NodeId)> = match self.arena.borrow().slot(self.id) {
            Slot::Object(map) => map.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            _ => Vec::new(),
        };
        ids.into_iter()
            .map(|(key, id)| (key, self.sibling(id)))
            .collect()
    }

    /// Children of a container node in order
    pub fn children(&self) -> Vec<Node> {
        let ids = self.arena.borrow().slot(self.id).child_ids();
        ids.into_iter().map(|id| self.sibling(id)).collect()
    }

    fn check_attach(&self, arena: &Arena, child: &Node) -> std::result::Result<(), TreeError> {
        if !self.same_document(child) {
            return Err(TreeError::ForeignNode);
        }
        if arena.reaches(child.id, self.id) {
            return Err(TreeError::Cycle);
        }
        Ok(())
    }

    /// Sets `key` on an object node to `child`, returning the replaced child
    pub fn set(&self, key: &str, child: &Node) -> std::result::Result<Option<Node>, TreeError> {
        let previous = {
            let mut arena = self.arena.borrow_mut();
            self.check_attach(&arena, child)?;
            match arena.slot_mut(self.id) {
                Slot::Object(map) => map.insert(key.to_string(), child.id),
                other => {
                    return Err(TreeError::NotAnObject {
                        operation: "set",
                        actual: other.kind(),
                    });
                }
            }
        };
        Ok(previous.map(|id| self.sibling(id)))
    }

    /// Sets `key` on an object node to a scalar, returning the scalar node.
    ///
    /// An existing scalar child is overwritten in place, so its handles see the
    /// new value and no slot is allocated. Any other child is replaced by a new
    /// scalar node.
    pub fn set_scalar(
        &self,
        key: &str,
        value: impl Into<Scalar>,
    ) -> std::result::Result<Node, TreeError> {
        let value = value.into();
        {
            let mut arena = self.arena.borrow_mut();
            let current = match arena.slot(self.id) {
                Slot::Object(map) => map.get(key).copied(),
                other => {
                    return Err(TreeError::NotAnObject {
                        operation: "set_scalar",
                        actual: other.kind(),
                    });
                }
            };
            if let Some(id) = current {
                if let Slot::Scalar(scalar) = arena.slot_mut(id) {
                    *scalar = value;
                    return Ok(self.sibling(id));
                }
            }
        }
        let child = self.document().create_scalar(value);
        self.set(key, &child)?;
        Ok(child)
    }

    /// Removes `key` from an object node, keeping the order of the remaining keys
    pub fn remove(&self, key: &str) -> std::result::Result<Option<Node>, TreeError> {
        let removed = match self.arena.borrow_mut().slot_mut(self.id) {
            Slot::Object(map) => map.shift_remove(key),
            other => {
                return Err(TreeError::NotAnObject {
                    operation: "remove",
                    actual: other.kind(),
                });
            }
        };
        Ok(removed.map(|id| self.sibling(id)))
    }

    /// Appends `child` to an array node
    pub fn push(&self, child: &Node) -> std::result::Result<(), TreeError> {
        let len = self.len();
        self.insert(len, child)
    }

    /// Inserts `child` into an array node at `index`
    pub fn insert(&self, index: usize, child: &Node) -> std::result::Result<(), TreeError> {
        let mut arena = self.arena.borrow_mut();
        self.check_attach(&arena, child)?;
        match arena.slot_mut(self.id) {
            Slot::Array(items) => {
                if index > items.len() {
                    return Err(TreeError::IndexOutOfBounds {
                        index,
                        len: items.len(),
                    });
                }
                items.insert(index, child.id);
                Ok(())
            }
            other => Err(TreeError::NotAnArray {
                operation: "insert",
                actual: other.kind(),
            }),
        }
    }

    /// Replaces the child of an array node at `index`, returning the old child
    pub fn replace_at(&self, index: usize, child: &Node) -> std::result::Result<Node, TreeError> {
        let previous = {
            let mut arena = self.arena.borrow_mut();
            self.check_attach(&arena, child)?;
            match arena.slot_mut(self.id) {
                Slot::Array(items) => match items.get_mut(index) {
                    Some(slot) => std::mem::replace(slot, child.id),
                    None => {
                        return Err(TreeError::IndexOutOfBounds {
                            index,
                            len: items.len(),
                        });
                    }
                },
                other => {
                    return Err(TreeError::NotAnArray {
                        operation: "replace_at",
                        actual: other.kind(),
                    });
                }
            }
        };
        Ok(self.sibling(previous))
    }

    /// Removes the child of an array node at `index`
    pub fn remove_at(&self, index: usize) -> std::result::Result<Node, TreeError> {
        let removed = match self.arena.borrow_mut().slot_mut(self.id) {
            Slot::Array(items) => {
                if index >= items.len() {
                    return Err(TreeError::IndexOutOfBounds {
                        index,
                        len: items.len(),
                    });
                }
                items.remove(index)
            }
            other => {
                return Err(TreeError::NotAnArray {
                    operation: "remove_at",
                    actual: other.kind(),
                });
            }
        };
        Ok(self.sibling(removed))
    }

    /// Removes every child of an object or array node
    pub fn clear(&self) -> std::result::Result<(), TreeError> {
        match self.arena.borrow_mut().slot_mut(self.id) {
            Slot::Object(map) => map.clear(),
            Slot::Array(items) => items.clear(),
            other => {
                return Err(TreeError::NotAContainer {
                    operation: "clear",
                    actual: other.kind(),
                });
            }
        }
        Ok(())
    }

    /// Exports this subtree to a `serde_json::Value`, dropping comment nodes
    pub fn to_value(&self) -> serde_json::Value {
        convert::export(&self.arena.borrow(), self.id)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .finish()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
