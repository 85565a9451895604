//! Scalar payloads and node kind tags.
//!
//! A [`Scalar`] is the content of a leaf node. [`NodeKind`] is the type tag
//! reported by every node and carried by faults to describe what was actually
//! found in the document.

use std::fmt;

use uuid::Uuid;

/// Type tag of a document node.
///
/// `Undefined` never describes a real node; it is reported when a property is
/// absent or when there is no subject node at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Integer,
    Float,
    Boolean,
    Null,
    Guid,
    Comment,
    Undefined,
}

impl NodeKind {
    /// Returns the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Object => "Object",
            NodeKind::Array => "Array",
            NodeKind::String => "String",
            NodeKind::Integer => "Integer",
            NodeKind::Float => "Float",
            NodeKind::Boolean => "Boolean",
            NodeKind::Null => "Null",
            NodeKind::Guid => "Guid",
            NodeKind::Comment => "Comment",
            NodeKind::Undefined => "Undefined",
        }
    }

    /// Returns the kind a `serde_json::Value` takes once imported
    pub fn of_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => NodeKind::Null,
            serde_json::Value::Bool(_) => NodeKind::Boolean,
            serde_json::Value::Number(n) if n.is_i64() => NodeKind::Integer,
            serde_json::Value::Number(_) => NodeKind::Float,
            serde_json::Value::String(_) => NodeKind::String,
            serde_json::Value::Array(_) => NodeKind::Array,
            serde_json::Value::Object(_) => NodeKind::Object,
        }
    }

    /// Returns true for object and array nodes
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }

    /// Returns true for every leaf kind that carries a [`Scalar`]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            NodeKind::String
                | NodeKind::Integer
                | NodeKind::Float
                | NodeKind::Boolean
                | NodeKind::Null
                | NodeKind::Guid
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content of a leaf node.
///
/// `Guid` is a native token distinct from its string form; it is written out
/// as a hyphenated string when the document is exported to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Guid(Uuid),
}

impl Scalar {
    /// Returns the node kind this scalar is stored as
    pub fn kind(&self) -> NodeKind {
        match self {
            Scalar::Null => NodeKind::Null,
            Scalar::Bool(_) => NodeKind::Boolean,
            Scalar::Integer(_) => NodeKind::Integer,
            Scalar::Float(_) => NodeKind::Float,
            Scalar::String(_) => NodeKind::String,
            Scalar::Guid(_) => NodeKind::Guid,
        }
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Attempts to view as a string token
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a boolean token
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer token
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Integer(n) => write!(f, "{n}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::String(s) => write!(f, "{s}"),
            Scalar::Guid(g) => write!(f, "{}", g.hyphenated()),
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<Uuid> for Scalar {
    fn from(value: Uuid) -> Self {
        Scalar::Guid(value)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}
