//! List view over an array node.
//!
//! A [`ListView`] keeps two representations in step: the raw array node in the
//! document and the sequence of materialized domain objects. Comment children
//! of the array are part of the raw node but never materialized, so positions
//! in the view are translated to raw positions by skipping them.

use std::ops::Index;

use super::{Accessor, Child, FaultKind, HasBackingNode, value::short_type_name};
use crate::{
    Result,
    tree::{Node, NodeKind, TreeError},
};

/// Typed sequence mirrored against an array node.
///
/// Identity of entries is the identity of their backing nodes: `remove`,
/// `contains` and `index_of` compare with [`Node::same_node`].
pub struct ListView<T> {
    json: Accessor,
    property: String,
    array: Node,
    items: Vec<T>,
}

impl Accessor {
    /// Binds a [`ListView`] to the array at `property`.
    ///
    /// An absent or null property is replaced by a new empty array. Every
    /// non-comment child must be an object and is passed to `factory` in
    /// document order.
    pub fn list<T, F>(&self, node: &Node, property: &str, mut factory: F) -> Result<ListView<T>>
    where
        T: HasBackingNode,
        F: FnMut(Node) -> T,
    {
        let expected = short_type_name::<T>();
        let array = match self.child(node, property)? {
            Child::Missing | Child::Null(_) => {
                let array = node.document().create_array();
                node.set(property, &array)?;
                tracing::debug!(label = %self.label(), property, "Created missing list");
                array
            }
            Child::Present(child) if child.is_array() => child,
            Child::Present(child) => {
                return Err(self
                    .fault(FaultKind::WrongNodeType, property, "Array", child.kind())
                    .into());
            }
        };

        let children = array.children();
        let mut items = Vec::with_capacity(children.len());
        for (index, child) in children.into_iter().enumerate() {
            match child.kind() {
                NodeKind::Comment => {}
                NodeKind::Object => items.push(factory(child)),
                other => {
                    return Err(self
                        .fault(
                            FaultKind::WrongNodeType,
                            format!("{property}[{index}]"),
                            expected,
                            other,
                        )
                        .into());
                }
            }
        }
        tracing::debug!(label = %self.label(), property, count = items.len(), "Bound list view");

        Ok(ListView {
            json: self.clone(),
            property: property.to_string(),
            array,
            items,
        })
    }
}

impl<T: HasBackingNode> ListView<T> {
    /// Number of materialized entries; comments are not counted
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Maps a view position to the position among the raw children.
    ///
    /// `index == len()` maps to the end of the raw array.
    fn raw_index(&self, index: usize) -> usize {
        let children = self.array.children();
        let mut seen = 0;
        for (raw, child) in children.iter().enumerate() {
            if child.is_comment() {
                continue;
            }
            if seen == index {
                return raw;
            }
            seen += 1;
        }
        children.len()
    }

    fn check_item(&self, item: &T, index: usize) -> Result<()> {
        let backing = item.node();
        if backing.is_object() {
            return Ok(());
        }
        Err(self
            .json
            .fault(
                FaultKind::WrongNodeType,
                format!("{}[{index}]", self.property),
                short_type_name::<T>(),
                backing.kind(),
            )
            .into())
    }

    fn check_bounds(&self, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(TreeError::IndexOutOfBounds { index, len }.into())
        }
    }

    /// Appends `item`, attaching its backing node at the end of the array
    pub fn push(&mut self, item: T) -> Result<()> {
        self.check_item(&item, self.items.len())?;
        self.array.push(item.node())?;
        self.items.push(item);
        Ok(())
    }

    /// Inserts `item` before the entry currently at `index`
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        if index > self.items.len() {
            return Err(TreeError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            }
            .into());
        }
        self.check_item(&item, index)?;
        let raw = self.raw_index(index);
        self.array.insert(raw, item.node())?;
        self.items.insert(index, item);
        Ok(())
    }

    /// Replaces the entry at `index`, returning the previous one
    pub fn set(&mut self, index: usize, item: T) -> Result<T> {
        self.check_bounds(index, self.items.len())?;
        self.check_item(&item, index)?;
        let raw = self.raw_index(index);
        self.array.replace_at(raw, item.node())?;
        Ok(std::mem::replace(&mut self.items[index], item))
    }

    /// Removes and returns the entry at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        self.check_bounds(index, self.items.len())?;
        let raw = self.raw_index(index);
        self.array.remove_at(raw)?;
        Ok(self.items.remove(index))
    }

    /// Removes every entry backed by the same node as `item`.
    ///
    /// Returns true if at least one entry was removed.
    pub fn remove(&mut self, item: &impl HasBackingNode) -> Result<bool> {
        let target = item.node();
        let before = self.items.len();
        let children = self.array.children();
        for (raw, child) in children.iter().enumerate().rev() {
            if child.same_node(target) {
                self.array.remove_at(raw)?;
            }
        }
        self.items.retain(|entry| !entry.node().same_node(target));
        let removed = before - self.items.len();
        if removed > 1 {
            tracing::trace!(property = %self.property, removed, "Removed repeated list entry");
        }
        Ok(removed > 0)
    }

    /// Returns true if an entry is backed by the same node as `item`
    pub fn contains(&self, item: &impl HasBackingNode) -> bool {
        self.index_of(item).is_some()
    }

    /// Position of the first entry backed by the same node as `item`
    pub fn index_of(&self, item: &impl HasBackingNode) -> Option<usize> {
        let target = item.node();
        self.items
            .iter()
            .position(|entry| entry.node().same_node(target))
    }

    /// Removes every entry and every child of the array, comments included
    pub fn clear(&mut self) -> Result<()> {
        self.array.clear()?;
        self.items.clear();
        Ok(())
    }
}

impl<T> Index<usize> for ListView<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a ListView<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> std::fmt::Debug for ListView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListView")
            .field("label", &self.json.label())
            .field("property", &self.property)
            .field("len", &self.items.len())
            .finish()
    }
}
