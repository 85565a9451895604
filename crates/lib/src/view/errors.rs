//! Fault taxonomy for typed access.
//!
//! Every failed typed read or write produces exactly one [`Fault`], returned
//! immediately to the caller. A fault carries enough context to diagnose the
//! problem without a debugger: the label of the accessor that raised it, the
//! property path, the expected type, the kind of node actually found, and the
//! [`FaultKind`].

use std::fmt;

use thiserror::Error;

use crate::tree::NodeKind;

/// Closed set of typed-access failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The property is absent
    MissingProperty,
    /// The property is present but null where a value is required
    NullNotAllowed,
    /// The node kind cannot represent the expected type
    WrongNodeType,
    /// The scalar does not parse as the expected type
    UnparsableValue,
    /// The property is a blank string where a value is required
    EmptyValue,
    /// The key already exists in the collection
    DuplicateKey,
    /// The subject node is null instead of an object
    NullDocument,
}

impl FaultKind {
    /// Returns the kind name as a string
    pub fn name(&self) -> &'static str {
        match self {
            FaultKind::MissingProperty => "MissingProperty",
            FaultKind::NullNotAllowed => "NullNotAllowed",
            FaultKind::WrongNodeType => "WrongNodeType",
            FaultKind::UnparsableValue => "UnparsableValue",
            FaultKind::EmptyValue => "EmptyValue",
            FaultKind::DuplicateKey => "DuplicateKey",
            FaultKind::NullDocument => "NullDocument",
        }
    }

    /// Structural faults concern the shape of the document
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            FaultKind::MissingProperty
                | FaultKind::WrongNodeType
                | FaultKind::DuplicateKey
                | FaultKind::NullDocument
        )
    }

    /// Content faults concern the value held by a well-shaped node
    pub fn is_content(&self) -> bool {
        !self.is_structural()
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One failed typed access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{label}[{property}] should be a {expected}, error code: {kind}, node kind: {actual}")]
pub struct Fault {
    label: String,
    property: String,
    expected: String,
    actual: NodeKind,
    kind: FaultKind,
}

impl Fault {
    pub fn new(
        kind: FaultKind,
        label: impl Into<String>,
        property: impl Into<String>,
        expected: impl Into<String>,
        actual: NodeKind,
    ) -> Self {
        let fault = Self {
            label: label.into(),
            property: property.into(),
            expected: expected.into(),
            actual,
            kind,
        };
        tracing::debug!(
            label = %fault.label,
            property = %fault.property,
            expected = %fault.expected,
            actual = %fault.actual,
            kind = %fault.kind,
            "Typed access fault"
        );
        fault
    }

    /// Label of the accessor that raised this fault
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Property path, including `[index]` suffixes for array elements
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Name of the type the accessor expected
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// Kind of the node actually found
    pub fn actual(&self) -> NodeKind {
        self.actual
    }

    pub fn kind(&self) -> FaultKind {
        self.kind
    }

    pub fn is_structural(&self) -> bool {
        self.kind.is_structural()
    }

    pub fn is_content(&self) -> bool {
        self.kind.is_content()
    }

    pub fn is_missing(&self) -> bool {
        self.kind == FaultKind::MissingProperty
    }

    pub fn is_type_error(&self) -> bool {
        self.kind == FaultKind::WrongNodeType
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind,
            FaultKind::UnparsableValue | FaultKind::EmptyValue | FaultKind::NullNotAllowed
        )
    }

    pub fn is_duplicate(&self) -> bool {
        self.kind == FaultKind::DuplicateKey
    }
}

// Conversion from Fault to the main Error type
impl From<Fault> for crate::Error {
    fn from(err: Fault) -> Self {
        crate::Error::Fault(err)
    }
}
