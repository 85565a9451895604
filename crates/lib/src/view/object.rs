//! Nested object access.
//!
//! Nested objects are never a hard failure when missing: an absent or null
//! property is replaced by a fresh empty object node before the factory runs.
//! Only a property of some other kind is rejected.
//!
//! The `serialize`/`deserialize` pair covers plain serde types that are copied
//! in and out of a subtree instead of being backed by it.

use serde::{Serialize, de::DeserializeOwned};

use super::{Accessor, Child, FaultKind, HasBackingNode, value::short_type_name};
use crate::{
    Result,
    tree::{Node, NodeKind},
};

impl Accessor {
    /// Returns the object node at `property`, creating it when absent or null.
    pub fn ensure_object(&self, node: &Node, property: &str) -> Result<Node> {
        self.object_node(node, property, NodeKind::Object.name())
    }

    fn object_node(&self, node: &Node, property: &str, expected: &str) -> Result<Node> {
        match self.child(node, property)? {
            Child::Missing | Child::Null(_) => {
                let child = node.document().create_object();
                node.set(property, &child)?;
                tracing::debug!(label = %self.label(), property, "Created missing object");
                Ok(child)
            }
            Child::Present(child) if child.is_object() => Ok(child),
            Child::Present(child) => Err(self
                .fault(FaultKind::WrongNodeType, property, expected, child.kind())
                .into()),
        }
    }

    /// Materializes the nested object at `property` through `factory`.
    ///
    /// An existing object node is passed to the factory as is; an absent or
    /// null property is first replaced by an empty object.
    pub fn get_object<T, F>(&self, node: &Node, property: &str, factory: F) -> Result<T>
    where
        F: FnOnce(Node) -> T,
    {
        let child = self.object_node(node, property, short_type_name::<T>())?;
        Ok(factory(child))
    }

    /// Attaches the backing node of `value` at `property`, or a null when `None`.
    pub fn set_object<T: HasBackingNode>(
        &self,
        node: &Node,
        property: &str,
        value: Option<&T>,
    ) -> Result<()> {
        self.subject(node, property)?;
        match value {
            Some(value) => {
                let backing = value.node();
                if !backing.is_object() {
                    return Err(self
                        .fault(
                            FaultKind::WrongNodeType,
                            property,
                            short_type_name::<T>(),
                            backing.kind(),
                        )
                        .into());
                }
                node.set(property, backing)?;
            }
            None => {
                node.set_scalar(property, crate::tree::Scalar::Null)?;
            }
        }
        Ok(())
    }

    /// Copies `value` into a new subtree at `property`, or writes a null when `None`.
    pub fn serialize<T: Serialize>(
        &self,
        node: &Node,
        property: &str,
        value: Option<&T>,
    ) -> Result<Node> {
        self.subject(node, property)?;
        let json = match value {
            Some(value) => serde_json::to_value(value)?,
            None => serde_json::Value::Null,
        };
        let child = node.document().import(json);
        node.set(property, &child)?;
        Ok(child)
    }

    /// Copies the object or array at `property` out into a `T`.
    ///
    /// Absent and null properties give `None`. A subtree that does not match
    /// the shape of `T` fails with `UnparsableValue`.
    pub fn deserialize<T: DeserializeOwned>(&self, node: &Node, property: &str) -> Result<Option<T>> {
        let expected = short_type_name::<T>();
        let child = match self.child(node, property)? {
            Child::Missing | Child::Null(_) => return Ok(None),
            Child::Present(child) => child,
        };
        let kind = child.kind();
        if !kind.is_container() {
            return Err(self
                .fault(FaultKind::WrongNodeType, property, expected, kind)
                .into());
        }
        match serde_json::from_value(child.to_value()) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::debug!(label = %self.label(), property, error = %err, "Deserialize failed");
                Err(self
                    .fault(FaultKind::UnparsableValue, property, expected, kind)
                    .into())
            }
        }
    }

    /// Like [`Accessor::deserialize`], but stores and returns `default()` when
    /// the property is absent or null.
    pub fn deserialize_or_insert_with<T, F>(&self, node: &Node, property: &str, default: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        if let Some(value) = self.deserialize(node, property)? {
            return Ok(value);
        }
        let value = default();
        self.serialize(node, property, Some(&value))?;
        Ok(value)
    }
}
