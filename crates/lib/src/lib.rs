//!
//! jsonbind: typed, in-place views over mutable JSON documents.
//! Domain objects keep a handle to their node in a parsed document and read and write
//! their properties directly in it, so the document stays the single source of truth.
//!
//! ## Core Concepts
//!
//! * **Documents (`tree::Document`)**: An arena holding a parsed JSON tree. Nodes are addressed through cheap `tree::Node` handles that mutate the tree in place.
//! * **Accessors (`view::Accessor`)**: Labeled helpers that read and write typed properties of object nodes:
//!     * **Values**: scalars through pluggable `view::ValueType` strategies, in strict and tolerant modes.
//!     * **Objects**: nested domain objects materialized by a factory and created on demand.
//! * **Views (`view::ListView`, `view::MapView`)**: Collections of domain objects kept in step with an array or object node.
//! * **Faults (`view::Fault`)**: The closed taxonomy of typed-access failures, each tagged with the accessor label, property path, expected type and node kind found.
//! * **Configuration files (`config::ConfigFile`)**: Documents loaded from disk that resolve relative paths against their own directory.

pub mod config;
pub mod tree;
pub mod view;

pub use config::ConfigFile;
pub use tree::{Document, Node};
pub use view::{Accessor, Fault, FaultKind, HasBackingNode};

/// Result type used throughout the jsonbind library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the jsonbind library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured tree errors from the tree module
    #[error(transparent)]
    Tree(tree::TreeError),

    /// Typed access faults from the view module
    #[error(transparent)]
    Fault(view::Fault),

    /// Structured configuration errors from the config module
    #[error(transparent)]
    Config(config::ConfigError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Tree(_) => "tree",
            Error::Fault(_) => "view",
            Error::Config(_) => "config",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Get the fault if this error was raised by a typed access.
    pub fn fault(&self) -> Option<&view::Fault> {
        match self {
            Error::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// Get the fault kind if this error was raised by a typed access.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        self.fault().map(Fault::kind)
    }

    /// Check if this error is a typed access fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, Error::Fault(_))
    }

    /// Check if this error indicates a property or file was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Fault(fault) => fault.is_missing(),
            Error::Config(config_err) => config_err.is_not_found(),
            Error::Io(io_err) => io_err.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Fault(fault) => fault.is_type_error(),
            Error::Tree(tree_err) => tree_err.is_kind_error(),
            _ => false,
        }
    }

    /// Check if this error concerns a value that could not be read.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Fault(fault) => fault.is_parse_error(),
            Error::Config(config_err) => config_err.is_format_error(),
            Error::Serialize(_) => true,
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Fault(fault) => fault.is_duplicate(),
            _ => false,
        }
    }

    /// Check if this error is tree-related.
    pub fn is_tree_error(&self) -> bool {
        matches!(self, Error::Tree(_))
    }

    /// Check if this error is configuration-related.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Config(config_err) => config_err.is_io_error(),
            _ => false,
        }
    }
}
