//! Map views over object nodes.
//!
//! Binding auto-vivifies like lists and nested objects: an absent or null
//! property is replaced by an empty object node before the view is returned.
//!
//! [`MapView`] materializes object-valued entries through a factory and caches
//! them by node identity, so the factory runs once per distinct backing node.
//! [`StringMapView`] holds plain strings and goes through the value accessor on
//! every call.

use indexmap::IndexMap;

use super::{Accessor, FaultKind, HasBackingNode, value::short_type_name};
use crate::{
    Result,
    tree::{Node, NodeKind},
};

type Factory<T> = Box<dyn FnMut(Node) -> T>;

/// The object node a map lives in.
#[derive(Debug)]
struct Binding {
    json: Accessor,
    property: String,
    backing: Node,
}

impl Binding {
    fn bind(json: &Accessor, node: &Node, property: &str) -> Result<Self> {
        Ok(Self {
            json: json.clone(),
            property: property.to_string(),
            backing: json.ensure_object(node, property)?,
        })
    }

    /// Raw entry for `key`, ignoring comment children
    fn raw(&self, key: &str) -> Option<Node> {
        self.backing.get(key).filter(|child| !child.is_comment())
    }

    fn entry_path(&self, key: &str) -> String {
        format!("{}[{key}]", self.property)
    }
}

/// Typed string-keyed map mirrored against an object node.
pub struct MapView<T> {
    binding: Binding,
    factory: Factory<T>,
    cache: IndexMap<String, T>,
}

impl Accessor {
    /// Binds a [`MapView`] to the object at `property`.
    ///
    /// Every existing non-comment entry must be an object and is materialized
    /// through `factory`. An absent or null property is replaced by an empty
    /// object node.
    pub fn map<T, F>(&self, node: &Node, property: &str, factory: F) -> Result<MapView<T>>
    where
        T: HasBackingNode,
        F: FnMut(Node) -> T + 'static,
    {
        let binding = Binding::bind(self, node, property)?;
        let mut view = MapView {
            binding,
            factory: Box::new(factory),
            cache: IndexMap::new(),
        };
        view.load()?;
        Ok(view)
    }

    /// Binds a [`StringMapView`] to the object at `property`.
    pub fn string_map(&self, node: &Node, property: &str) -> Result<StringMapView> {
        Ok(StringMapView {
            binding: Binding::bind(self, node, property)?,
        })
    }
}

impl<T: HasBackingNode> MapView<T> {
    fn load(&mut self) -> Result<()> {
        for (key, child) in self.binding.backing.entries() {
            if child.is_comment() {
                continue;
            }
            let child = self.check_entry(&key, child)?;
            let value = (self.factory)(child);
            self.cache.insert(key, value);
        }
        tracing::debug!(
            label = %self.binding.json.label(),
            property = %self.binding.property,
            count = self.cache.len(),
            "Bound map view"
        );
        Ok(())
    }

    fn check_entry(&self, key: &str, child: Node) -> Result<Node> {
        if child.is_object() {
            return Ok(child);
        }
        Err(self
            .binding
            .json
            .fault(
                FaultKind::WrongNodeType,
                self.binding.entry_path(key),
                short_type_name::<T>(),
                child.kind(),
            )
            .into())
    }

    /// Number of materialized entries
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns true if the object node holds a non-comment entry for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.binding.raw(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cache.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.cache.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.cache.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Looks up `key`, materializing the entry if its backing node changed.
    ///
    /// Returns `Ok(None)` when the key is absent. Repeated lookups of an
    /// unchanged entry return the same cached value.
    pub fn try_get(&mut self, key: &str) -> Result<Option<&T>> {
        let Some(child) = self.binding.raw(key) else {
            self.cache.shift_remove(key);
            return Ok(None);
        };
        let cached = self
            .cache
            .get(key)
            .is_some_and(|value| value.node().same_node(&child));
        if !cached {
            let child = self.check_entry(key, child)?;
            let value = (self.factory)(child);
            self.cache.insert(key.to_string(), value);
        }
        Ok(self.cache.get(key))
    }

    /// Like [`MapView::try_get`], but an absent key fails with `MissingProperty`.
    pub fn get(&mut self, key: &str) -> Result<&T> {
        let json = self.binding.json.clone();
        let path = self.binding.entry_path(key);
        self.try_get(key)?.ok_or_else(|| {
            json.fault(
                FaultKind::MissingProperty,
                path,
                short_type_name::<T>(),
                NodeKind::Undefined,
            )
            .into()
        })
    }

    fn check_value(&self, key: &str, value: &T) -> Result<()> {
        let backing = value.node();
        if backing.is_object() {
            return Ok(());
        }
        Err(self
            .binding
            .json
            .fault(
                FaultKind::WrongNodeType,
                self.binding.entry_path(key),
                short_type_name::<T>(),
                backing.kind(),
            )
            .into())
    }

    /// Adds a new entry; fails with `DuplicateKey` if `key` exists in the
    /// object node or in the view.
    pub fn add(&mut self, key: &str, value: T) -> Result<()> {
        let existing = self
            .binding
            .backing
            .get(key)
            .map(|child| child.kind())
            .or_else(|| self.cache.contains_key(key).then_some(NodeKind::Object));
        if let Some(actual) = existing {
            return Err(self
                .binding
                .json
                .fault(
                    FaultKind::DuplicateKey,
                    self.binding.entry_path(key),
                    short_type_name::<T>(),
                    actual,
                )
                .into());
        }
        self.insert(key, value)?;
        Ok(())
    }

    /// Sets `key` to `value` in both representations, returning the replaced value.
    ///
    /// A value that cannot be attached (another document, or a node containing
    /// the map) fails before either representation changes.
    pub fn insert(&mut self, key: &str, value: T) -> Result<Option<T>> {
        self.check_value(key, &value)?;
        self.binding.backing.set(key, value.node())?;
        Ok(self.cache.insert(key.to_string(), value))
    }

    /// Removes `key` from both representations
    pub fn remove(&mut self, key: &str) -> Result<Option<T>> {
        self.binding.backing.remove(key)?;
        Ok(self.cache.shift_remove(key))
    }

    /// Removes every entry, comments included
    pub fn clear(&mut self) -> Result<()> {
        self.binding.backing.clear()?;
        self.cache.clear();
        Ok(())
    }
}

impl<'a, T> IntoIterator for &'a MapView<T> {
    type Item = (&'a String, &'a T);
    type IntoIter = indexmap::map::Iter<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.cache.iter()
    }
}

impl<T> std::fmt::Debug for MapView<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("label", &self.binding.json.label())
            .field("property", &self.binding.property)
            .field("len", &self.cache.len())
            .finish()
    }
}

/// String-to-string map mirrored against an object node.
///
/// Values may be null in the document; they read back as `None`.
#[derive(Debug)]
pub struct StringMapView {
    binding: Binding,
}

impl StringMapView {
    /// Reads the string at `key`; absent and null give `None`
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.binding.json.get_string(&self.binding.backing, key)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.binding
            .json
            .set(&self.binding.backing, key, &value.to_string())?;
        Ok(())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.binding.raw(key).is_some()
    }

    /// Removes `key`, returning whether it was present
    pub fn remove(&mut self, key: &str) -> Result<bool> {
        self.binding.json.remove(&self.binding.backing, key)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.binding.backing.clear()?;
        Ok(())
    }

    /// Number of non-comment entries
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of the non-comment entries in document order
    pub fn keys(&self) -> Vec<String> {
        self.binding
            .backing
            .entries()
            .into_iter()
            .filter(|(_, child)| !child.is_comment())
            .map(|(key, _)| key)
            .collect()
    }

    /// Reads every entry in document order
    pub fn entries(&self) -> Result<Vec<(String, Option<String>)>> {
        self.keys()
            .into_iter()
            .map(|key| {
                let value = self.get(&key)?;
                Ok((key, value))
            })
            .collect()
    }
}
