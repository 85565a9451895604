//! Typed scalar access.
//!
//! Each supported type implements [`ValueType`], a parse/format strategy pair.
//! The accessor methods share one lookup path, so every type gets the same
//! strict and tolerant semantics:
//!
//! | found                  | strict `get`      | tolerant `get_opt` / `get_or` |
//! |------------------------|-------------------|-------------------------------|
//! | absent                 | `MissingProperty` | default                       |
//! | null                   | `NullNotAllowed`  | default                       |
//! | blank string token     | `EmptyValue`      | default                       |
//! | container / comment    | `WrongNodeType`   | `WrongNodeType`               |
//! | scalar of another kind | `WrongNodeType`   | `WrongNodeType`               |
//! | unparsable token       | `UnparsableValue` | `UnparsableValue`             |
//!
//! Defaults only stand in for missing values, never for corrupt ones.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use super::{Accessor, Child, FaultKind, lenient};
use crate::{
    Result,
    tree::{Node, NodeKind, Scalar},
};

/// Why a scalar could not be read as a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// A blank string token; treated like an absent value in tolerant mode
    Empty,
    /// A token of an acceptable kind whose content does not parse
    Invalid,
    /// A token whose kind cannot represent the type
    WrongKind,
}

/// Parse/format strategy for a scalar type.
///
/// Implement this for an application type to read and write it through
/// [`Accessor::get`] and [`Accessor::set`].
pub trait ValueType: Sized {
    /// Type name reported in faults
    const TYPE_NAME: &'static str;

    /// Reads the type from a non-null scalar
    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure>;

    /// Formats the value as the scalar stored in the document
    fn format(&self) -> Scalar;
}

/// Applies `parse` to a string token, mapping blank tokens to [`ParseFailure::Empty`].
fn parse_token<T>(
    scalar: &Scalar,
    parse: impl FnOnce(&str) -> Option<T>,
) -> std::result::Result<T, ParseFailure> {
    match scalar {
        Scalar::String(s) if lenient::is_blank(s) => Err(ParseFailure::Empty),
        Scalar::String(s) => parse(s.trim()).ok_or(ParseFailure::Invalid),
        _ => Err(ParseFailure::WrongKind),
    }
}

/// Whole-number floats, which is how integers beyond the `i64` range are stored.
/// Reading one as an integer is an overflow, not a kind mismatch.
fn is_integral(x: f64) -> bool {
    x.is_finite() && x.fract() == 0.0
}

impl ValueType for String {
    const TYPE_NAME: &'static str = "String";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        match scalar {
            Scalar::String(s) => Ok(s.clone()),
            _ => Err(ParseFailure::WrongKind),
        }
    }

    fn format(&self) -> Scalar {
        Scalar::String(self.clone())
    }
}

impl ValueType for i32 {
    const TYPE_NAME: &'static str = "Int32";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        match scalar {
            Scalar::Integer(n) => i32::try_from(*n).map_err(|_| ParseFailure::Invalid),
            Scalar::Float(x) if is_integral(*x) => Err(ParseFailure::Invalid),
            other => parse_token(other, |s| s.parse().ok()),
        }
    }

    fn format(&self) -> Scalar {
        Scalar::Integer(i64::from(*self))
    }
}

impl ValueType for i64 {
    const TYPE_NAME: &'static str = "Int64";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        match scalar {
            Scalar::Integer(n) => Ok(*n),
            Scalar::Float(x) if is_integral(*x) => Err(ParseFailure::Invalid),
            other => parse_token(other, |s| s.parse().ok()),
        }
    }

    fn format(&self) -> Scalar {
        Scalar::Integer(*self)
    }
}

impl ValueType for bool {
    const TYPE_NAME: &'static str = "Boolean";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        match scalar {
            Scalar::Bool(b) => Ok(*b),
            other => parse_token(other, lenient::parse_bool),
        }
    }

    fn format(&self) -> Scalar {
        Scalar::Bool(*self)
    }
}

impl ValueType for Uuid {
    const TYPE_NAME: &'static str = "Guid";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        match scalar {
            Scalar::Guid(g) => Ok(*g),
            other => parse_token(other, |s| Uuid::parse_str(s).ok()),
        }
    }

    fn format(&self) -> Scalar {
        Scalar::Guid(*self)
    }
}

/// Extended-year layout (`+10000-...`, `-0001-...`) that RFC 3339 parsing rejects
const EXTENDED_DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// Parses a round-trip date-time. Strings without an offset are read as UTC.
fn parse_date_time(s: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let zulu = s.strip_suffix(['Z', 'z']).map(|rest| format!("{rest}+00:00"));
    if let Ok(dt) = DateTime::parse_from_str(zulu.as_deref().unwrap_or(s), EXTENDED_DATE_TIME) {
        return Some(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}

impl ValueType for DateTime<FixedOffset> {
    const TYPE_NAME: &'static str = "DateTime";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        parse_token(scalar, parse_date_time)
    }

    fn format(&self) -> Scalar {
        Scalar::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl ValueType for DateTime<Utc> {
    const TYPE_NAME: &'static str = "DateTime";

    fn parse(scalar: &Scalar) -> std::result::Result<Self, ParseFailure> {
        parse_token(scalar, |s| parse_date_time(s).map(|dt| dt.with_timezone(&Utc)))
    }

    fn format(&self) -> Scalar {
        Scalar::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Result of a scalar lookup before the strict/tolerant policy is applied.
enum Lookup<T> {
    Found(T),
    Missing,
    Null,
    Empty,
}

/// Last path segment of a type name, for fault messages.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

impl Accessor {
    fn lookup<T>(
        &self,
        node: &Node,
        property: &str,
        expected: &str,
        parse: impl FnOnce(&Scalar) -> std::result::Result<T, ParseFailure>,
    ) -> Result<Lookup<T>> {
        let child = match self.child(node, property)? {
            Child::Missing => return Ok(Lookup::Missing),
            Child::Null(_) => return Ok(Lookup::Null),
            Child::Present(child) => child,
        };
        let Some(scalar) = child.scalar() else {
            return Err(self
                .fault(FaultKind::WrongNodeType, property, expected, child.kind())
                .into());
        };
        match parse(&scalar) {
            Ok(value) => Ok(Lookup::Found(value)),
            Err(ParseFailure::Empty) => Ok(Lookup::Empty),
            Err(ParseFailure::Invalid) => Err(self
                .fault(FaultKind::UnparsableValue, property, expected, scalar.kind())
                .into()),
            Err(ParseFailure::WrongKind) => Err(self
                .fault(FaultKind::WrongNodeType, property, expected, scalar.kind())
                .into()),
        }
    }

    fn require<T>(&self, lookup: Lookup<T>, property: &str, expected: &str) -> Result<T> {
        let (kind, actual) = match lookup {
            Lookup::Found(value) => return Ok(value),
            Lookup::Missing => (FaultKind::MissingProperty, NodeKind::Undefined),
            Lookup::Null => (FaultKind::NullNotAllowed, NodeKind::Null),
            Lookup::Empty => (FaultKind::EmptyValue, NodeKind::String),
        };
        Err(self.fault(kind, property, expected, actual).into())
    }

    fn write(&self, node: &Node, property: &str, scalar: Scalar) -> Result<Scalar> {
        self.subject(node, property)?;
        node.set_scalar(property, scalar.clone())?;
        tracing::trace!(label = %self.label(), property, value = %scalar, "Set scalar");
        Ok(scalar)
    }

    /// Reads a required value.
    ///
    /// Fails when the property is absent, null, blank, of the wrong kind, or
    /// unparsable.
    pub fn get<T: ValueType>(&self, node: &Node, property: &str) -> Result<T> {
        let lookup = self.lookup(node, property, T::TYPE_NAME, T::parse)?;
        self.require(lookup, property, T::TYPE_NAME)
    }

    /// Reads an optional value: absent, null and blank give `None`.
    pub fn get_opt<T: ValueType>(&self, node: &Node, property: &str) -> Result<Option<T>> {
        match self.lookup(node, property, T::TYPE_NAME, T::parse)? {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Missing | Lookup::Null | Lookup::Empty => Ok(None),
        }
    }

    /// Reads a value, substituting `default` when it is absent, null or blank.
    pub fn get_or<T: ValueType>(&self, node: &Node, property: &str, default: T) -> Result<T> {
        Ok(self.get_opt(node, property)?.unwrap_or(default))
    }

    /// Writes `value` in place, returning the scalar that was stored
    pub fn set<T: ValueType>(&self, node: &Node, property: &str, value: &T) -> Result<Scalar> {
        self.write(node, property, value.format())
    }

    /// Writes `value`, or a null when `None`
    pub fn set_opt<T: ValueType>(
        &self,
        node: &Node,
        property: &str,
        value: Option<&T>,
    ) -> Result<Scalar> {
        let scalar = value.map_or(Scalar::Null, ValueType::format);
        self.write(node, property, scalar)
    }

    /// Reads an optional string; absent and null give `None`.
    pub fn get_string(&self, node: &Node, property: &str) -> Result<Option<String>> {
        self.get_opt(node, property)
    }

    /// Reads a required enumeration member by its serde name.
    pub fn get_enum<T: DeserializeOwned>(&self, node: &Node, property: &str) -> Result<T> {
        let expected = short_type_name::<T>();
        let lookup = self.lookup(node, property, expected, parse_enum::<T>)?;
        self.require(lookup, property, expected)
    }

    /// Reads an enumeration member, substituting `default` when absent, null or empty.
    pub fn get_enum_or<T: DeserializeOwned>(
        &self,
        node: &Node,
        property: &str,
        default: T,
    ) -> Result<T> {
        let expected = short_type_name::<T>();
        match self.lookup(node, property, expected, parse_enum::<T>)? {
            Lookup::Found(value) => Ok(value),
            Lookup::Missing | Lookup::Null | Lookup::Empty => Ok(default),
        }
    }

    /// Writes an enumeration member as its serde name.
    ///
    /// Only unit variants have a string form; other variants fail with `WrongNodeType`.
    pub fn set_enum<T: Serialize>(&self, node: &Node, property: &str, value: &T) -> Result<Scalar> {
        match serde_json::to_value(value)? {
            serde_json::Value::String(name) => self.write(node, property, Scalar::String(name)),
            other => {
                let actual = NodeKind::of_json(&other);
                Err(self
                    .fault(
                        FaultKind::WrongNodeType,
                        property,
                        short_type_name::<T>(),
                        actual,
                    )
                    .into())
            }
        }
    }

    /// Reads an array of nullable strings.
    ///
    /// Absent and null properties give `None`. A bare string is promoted to a
    /// one-element array. Any other element kind fails with `WrongNodeType`
    /// on the property `name[index]`.
    pub fn get_string_array(
        &self,
        node: &Node,
        property: &str,
    ) -> Result<Option<Vec<Option<String>>>> {
        const EXPECTED: &str = "Array of String";
        let child = match self.child(node, property)? {
            Child::Missing | Child::Null(_) => return Ok(None),
            Child::Present(child) => child,
        };
        match child.kind() {
            NodeKind::Array => {}
            NodeKind::String => {
                return Ok(Some(vec![child.scalar().and_then(|s| match s {
                    Scalar::String(s) => Some(s),
                    _ => None,
                })]));
            }
            other => {
                return Err(self
                    .fault(FaultKind::WrongNodeType, property, EXPECTED, other)
                    .into());
            }
        }

        let items = child.children();
        let mut values = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if item.is_comment() {
                continue;
            }
            match item.scalar() {
                Some(Scalar::Null) => values.push(None),
                Some(Scalar::String(s)) => values.push(Some(s)),
                _ => {
                    return Err(self
                        .fault(
                            FaultKind::WrongNodeType,
                            format!("{property}[{index}]"),
                            String::TYPE_NAME,
                            item.kind(),
                        )
                        .into());
                }
            }
        }
        Ok(Some(values))
    }

    /// Replaces the property with a new string array, or a null when `None`.
    pub fn set_string_array<S: AsRef<str>>(
        &self,
        node: &Node,
        property: &str,
        values: Option<&[S]>,
    ) -> Result<Option<Node>> {
        self.subject(node, property)?;
        let Some(values) = values else {
            node.set_scalar(property, Scalar::Null)?;
            return Ok(None);
        };
        let doc = node.document();
        let array = doc.create_array();
        for value in values {
            array.push(&doc.create_scalar(value.as_ref()))?;
        }
        node.set(property, &array)?;
        Ok(Some(array))
    }
}

fn parse_enum<T: DeserializeOwned>(scalar: &Scalar) -> std::result::Result<T, ParseFailure> {
    match scalar {
        Scalar::String(s) if s.is_empty() => Err(ParseFailure::Empty),
        Scalar::String(s) => serde_json::from_value(serde_json::Value::String(s.clone()))
            .map_err(|_| ParseFailure::Invalid),
        _ => Err(ParseFailure::WrongKind),
    }
}
