//! Error types for raw document tree operations.
//!
//! These errors describe misuse of the node API itself (attaching a child to a
//! scalar, indexing past the end of an array, mixing documents). Failures of
//! typed access go through [`crate::view::Fault`] instead.

use thiserror::Error;

use super::NodeKind;

/// Structured error types for tree operations.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A keyed operation was attempted on a node that is not an object
    #[error("Tree operation '{operation}' requires an object node, found {actual}")]
    NotAnObject {
        operation: &'static str,
        actual: NodeKind,
    },

    /// A positional operation was attempted on a node that is not an array
    #[error("Tree operation '{operation}' requires an array node, found {actual}")]
    NotAnArray {
        operation: &'static str,
        actual: NodeKind,
    },

    /// A container operation was attempted on a scalar or comment node
    #[error("Tree operation '{operation}' requires a container node, found {actual}")]
    NotAContainer {
        operation: &'static str,
        actual: NodeKind,
    },

    /// Array index outside of the current bounds
    #[error("Array index {index} out of bounds (length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The child node belongs to a different document
    #[error("Cannot attach a node owned by another document")]
    ForeignNode,

    /// Attaching the child would make a node its own descendant
    #[error("Cannot attach a node inside its own subtree")]
    Cycle,
}

impl TreeError {
    /// Check if this error is caused by the kind of the target node
    pub fn is_kind_error(&self) -> bool {
        matches!(
            self,
            TreeError::NotAnObject { .. }
                | TreeError::NotAnArray { .. }
                | TreeError::NotAContainer { .. }
        )
    }

    /// Check if this error is an out-of-bounds access
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, TreeError::IndexOutOfBounds { .. })
    }

    /// Check if this error was raised while attaching a child
    pub fn is_attach_error(&self) -> bool {
        matches!(self, TreeError::ForeignNode | TreeError::Cycle)
    }

    /// Get the operation name if this is a kind error
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            TreeError::NotAnObject { operation, .. }
            | TreeError::NotAnArray { operation, .. }
            | TreeError::NotAContainer { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

// Conversion from TreeError to the main Error type
impl From<TreeError> for crate::Error {
    fn from(err: TreeError) -> Self {
        crate::Error::Tree(err)
    }
}
