//! Command implementations and the dotted-path helpers they share.

use chrono::{DateTime, FixedOffset};
use jsonbind::{
    Accessor, Fault, FaultKind, Node,
    tree::{NodeKind, Scalar},
    view::{ParseFailure, ValueType},
};
use uuid::Uuid;

use crate::cli::ValueKind;

pub mod get;
pub mod keys;
pub mod set;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Accessor used for every command; its label appears in fault messages.
pub static JSON: Accessor = Accessor::from_static("jsonbind");

fn invalid_path(path: &str) -> Fault {
    Fault::new(
        FaultKind::MissingProperty,
        JSON.label(),
        path,
        "property path",
        NodeKind::Undefined,
    )
}

/// Splits `a.b.c` into its segments, rejecting empty ones.
pub fn split_path(path: &str) -> Result<Vec<&str>, Fault> {
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(invalid_path(path));
    }
    Ok(segments)
}

/// Splits a dotted path into the parent segments and the final property.
pub fn split_property(path: &str) -> Result<(Vec<&str>, &str), Fault> {
    let mut segments = split_path(path)?;
    match segments.pop() {
        Some(leaf) => Ok((segments, leaf)),
        None => Err(invalid_path(path)),
    }
}

/// Follows `segments` from `root`, requiring every step to be an existing object.
pub fn navigate(root: &Node, segments: &[&str]) -> jsonbind::Result<Node> {
    let mut node = root.clone();
    for (depth, segment) in segments.iter().enumerate() {
        let walked = segments[..=depth].join(".");
        let child = node.get(segment).ok_or_else(|| {
            Fault::new(
                FaultKind::MissingProperty,
                JSON.label(),
                walked.as_str(),
                NodeKind::Object.name(),
                NodeKind::Undefined,
            )
        })?;
        if !child.is_object() {
            return Err(Fault::new(
                FaultKind::WrongNodeType,
                JSON.label(),
                walked,
                NodeKind::Object.name(),
                child.kind(),
            )
            .into());
        }
        node = child;
    }
    Ok(node)
}

/// Follows `segments` from `root`, creating missing or null objects on the way.
pub fn navigate_or_create(root: &Node, segments: &[&str]) -> jsonbind::Result<Node> {
    let mut node = root.clone();
    for segment in segments {
        node = JSON.ensure_object(&node, segment)?;
    }
    Ok(node)
}

/// Reads `property` as `kind`, giving `None` only in tolerant mode.
pub fn read_value(
    node: &Node,
    property: &str,
    kind: ValueKind,
    tolerant: bool,
) -> jsonbind::Result<Option<serde_json::Value>> {
    fn read<T: ValueType>(
        node: &Node,
        property: &str,
        tolerant: bool,
    ) -> jsonbind::Result<Option<T>> {
        if tolerant {
            JSON.get_opt(node, property)
        } else {
            JSON.get(node, property).map(Some)
        }
    }

    let value = match kind {
        ValueKind::String => read::<String>(node, property, tolerant)?.map(serde_json::Value::from),
        ValueKind::Int => read::<i64>(node, property, tolerant)?.map(serde_json::Value::from),
        ValueKind::Bool => read::<bool>(node, property, tolerant)?.map(serde_json::Value::from),
        ValueKind::Guid => read::<Uuid>(node, property, tolerant)?
            .map(|id| serde_json::Value::from(id.hyphenated().to_string())),
        ValueKind::Datetime => read::<DateTime<FixedOffset>>(node, property, tolerant)?
            .map(|when| serde_json::Value::from(when.to_rfc3339())),
    };
    Ok(value)
}

/// Parses command line text with the same rules used to read stored strings.
fn parse_input<T: ValueType>(property: &str, text: &str) -> Result<T, Fault> {
    T::parse(&Scalar::from(text)).map_err(|failure| {
        let kind = match failure {
            ParseFailure::Empty => FaultKind::EmptyValue,
            ParseFailure::Invalid => FaultKind::UnparsableValue,
            ParseFailure::WrongKind => FaultKind::WrongNodeType,
        };
        Fault::new(kind, JSON.label(), property, T::TYPE_NAME, NodeKind::String)
    })
}

/// Parses a command line default as `kind`, giving the JSON `read_value` would
/// have produced for the same value in the document.
pub fn parse_default(
    property: &str,
    kind: ValueKind,
    text: &str,
) -> Result<serde_json::Value, Fault> {
    let value = match kind {
        ValueKind::String => serde_json::Value::from(text),
        ValueKind::Int => serde_json::Value::from(parse_input::<i64>(property, text)?),
        ValueKind::Bool => serde_json::Value::from(parse_input::<bool>(property, text)?),
        ValueKind::Guid => {
            serde_json::Value::from(parse_input::<Uuid>(property, text)?.hyphenated().to_string())
        }
        ValueKind::Datetime => serde_json::Value::from(
            parse_input::<DateTime<FixedOffset>>(property, text)?.to_rfc3339(),
        ),
    };
    Ok(value)
}

/// Parses `text` as `kind` and writes it at `property`, returning the stored scalar.
pub fn write_value(
    node: &Node,
    property: &str,
    kind: ValueKind,
    text: &str,
) -> jsonbind::Result<Scalar> {
    match kind {
        ValueKind::String => JSON.set(node, property, &text.to_string()),
        ValueKind::Int => JSON.set(node, property, &parse_input::<i64>(property, text)?),
        ValueKind::Bool => JSON.set(node, property, &parse_input::<bool>(property, text)?),
        ValueKind::Guid => JSON.set(node, property, &parse_input::<Uuid>(property, text)?),
        ValueKind::Datetime => JSON.set(
            node,
            property,
            &parse_input::<DateTime<FixedOffset>>(property, text)?,
        ),
    }
}
