//! The dynamic value carried between pipeline stages.

use std::collections::BTreeMap;

use regex::Regex;

use super::Pipeable;
use crate::error::Mismatch;
use crate::tree::{Attrs, EncodeErrors, Filter, Formatter, Node, TextKind};

/// Anything a pipeable function accepts or returns.
///
/// `Value::None` is the "no match" result of the single-result searches; it
/// is an ordinary value, not an error, and flows into the next stage like
/// any other.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// No value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A string.
    Text(String),
    /// Encoded output.
    Bytes(Vec<u8>),
    /// A regular expression, used as a filter.
    Pattern(Regex),
    /// One node of a parsed document.
    Node(Node),
    /// Several nodes, in document order unless stated otherwise.
    Nodes(Vec<Node>),
    /// A heterogeneous list.
    List(Vec<Value>),
    /// String-keyed entries, such as an attribute-filter mapping.
    Map(BTreeMap<String, Value>),
    /// A prepared filter.
    Filter(Filter),
    /// A pipeable function still waiting for arguments.
    Partial(Box<Pipeable>),
}

impl Value {
    /// A short name of the variant, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Pattern(_) => "pattern",
            Self::Node(_) => "node",
            Self::Nodes(_) => "nodes",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Filter(_) => "filter",
            Self::Partial(_) => "partial",
        }
    }

    /// Whether this is [`Value::None`].
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// The boolean, if this is one.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// The integer, if this is one.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// The string, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// The encoded bytes, if any.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// The node, if this is a single node.
    pub const fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The nodes, if this is a node list.
    pub fn as_nodes(&self) -> Option<&[Node]> {
        match self {
            Self::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// The items, if this is a heterogeneous list.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// The waiting pipeable, if this is a partial application.
    pub fn into_partial(self) -> Option<Pipeable> {
        match self {
            Self::Partial(pipeable) => Some(*pipeable),
            _ => None,
        }
    }

    /// Decodes the value into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] when the variant cannot represent `T`.
    pub fn decode<T: FromValue>(self) -> Result<T, Mismatch> {
        T::from_value(self)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Bytes(left), Self::Bytes(right)) => left == right,
            (Self::Pattern(left), Self::Pattern(right)) => left.as_str() == right.as_str(),
            (Self::Node(left), Self::Node(right)) => left == right,
            (Self::Nodes(left), Self::Nodes(right)) => left == right,
            (Self::List(left), Self::List(right)) => left == right,
            (Self::Map(left), Self::Map(right)) => left == right,
            (Self::Filter(left), Self::Filter(right)) => left == right,
            (Self::Partial(left), Self::Partial(right)) => left == right,
            _ => false,
        }
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Conversion out of a [`Value`], used to decode pipeable arguments.
pub trait FromValue: Sized {
    /// Describes the accepted values in error messages.
    const EXPECTED: &'static str;

    /// Decodes a value.
    ///
    /// # Errors
    ///
    /// Returns a [`Mismatch`] naming [`FromValue::EXPECTED`] and the kind of
    /// the rejected value.
    fn from_value(value: Value) -> Result<Self, Mismatch>;
}

fn mismatch<T: FromValue>(value: &Value) -> Mismatch {
    Mismatch {
        expected: T::EXPECTED,
        found: value.kind(),
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        Ok(value)
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "a bool";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Bool(flag) => Ok(flag),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "an integer";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Int(number) => Ok(number),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for usize {
    const EXPECTED: &'static str = "a non-negative integer";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Int(number) => Self::try_from(number).map_err(|_| Mismatch {
                expected: Self::EXPECTED,
                found: "negative int",
            }),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Text(text) => Ok(text),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Vec<u8> {
    const EXPECTED: &'static str = "bytes";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Bytes(bytes) => Ok(bytes),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Node {
    const EXPECTED: &'static str = "a node";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Node(node) => Ok(node),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Vec<Node> {
    const EXPECTED: &'static str = "a list of nodes";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Nodes(nodes) => Ok(nodes),
            Value::List(values) => values
                .into_iter()
                .map(|item| match item {
                    Value::Node(node) => Ok(node),
                    other => Err(mismatch::<Self>(&other)),
                })
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::None => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for Filter {
    const EXPECTED: &'static str = "a filter (text, bool, pattern or list of text)";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::None => Ok(Self::Any),
            Value::Bool(present) => Ok(Self::from(present)),
            Value::Text(text) => Ok(Self::Exact(text)),
            Value::Pattern(pattern) => Ok(Self::Pattern(pattern)),
            Value::Filter(filter) => Ok(filter),
            Value::List(values) => values
                .into_iter()
                .map(String::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::OneOf)
                .map_err(|_| Mismatch {
                    expected: Self::EXPECTED,
                    found: "list with non-text items",
                }),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Attrs {
    const EXPECTED: &'static str = "an attribute-filter mapping or a class filter";

    /// A mapping filters on each attribute it names. Anything else that
    /// converts into a [`Filter`] filters on the `class` attribute.
    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::None => Ok(Self::new()),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(name, filter)| Filter::from_value(filter).map(|filter| (name, filter)))
                .collect(),
            other => Filter::from_value(other)
                .map(Self::class)
                .map_err(|rejected| Mismatch {
                    expected: Self::EXPECTED,
                    found: rejected.found,
                }),
        }
    }
}

impl FromValue for TextKind {
    const EXPECTED: &'static str = "a text kind label";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Text(label) => Self::from_label(&label).ok_or(Mismatch {
                expected: Self::EXPECTED,
                found: "unknown label",
            }),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Vec<TextKind> {
    const EXPECTED: &'static str = "a list of text kind labels";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::List(values) => values.into_iter().map(TextKind::from_value).collect(),
            single @ Value::Text(_) => TextKind::from_value(single).map(|kind| vec![kind]),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Formatter {
    const EXPECTED: &'static str = "a formatter name or none";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::None => Ok(Self::Verbatim),
            Value::Text(label) => Self::from_label(&label).ok_or(Mismatch {
                expected: Self::EXPECTED,
                found: "unknown formatter",
            }),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for EncodeErrors {
    const EXPECTED: &'static str = "an encoding error strategy";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Text(label) => Self::from_label(&label).ok_or(Mismatch {
                expected: Self::EXPECTED,
                found: "unknown strategy",
            }),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for BTreeMap<String, String> {
    const EXPECTED: &'static str = "a mapping of text to text";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::None => Ok(Self::new()),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, entry)| String::from_value(entry).map(|text| (key, text)))
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Pipeable {
    const EXPECTED: &'static str = "a partially applied function";

    fn from_value(value: Value) -> Result<Self, Mismatch> {
        match value {
            Value::Partial(pipeable) => Ok(*pipeable),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<usize> for Value {
    fn from(number: usize) -> Self {
        Self::Int(i64::try_from(number).unwrap_or(i64::MAX))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Regex> for Value {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Vec<Node>> for Value {
    fn from(nodes: Vec<Node>) -> Self {
        Self::Nodes(nodes)
    }
}

impl From<Vec<String>> for Value {
    fn from(texts: Vec<String>) -> Self {
        Self::List(texts.into_iter().map(Self::Text).collect())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl From<Filter> for Value {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

impl From<Attrs> for Value {
    fn from(attrs: Attrs) -> Self {
        Self::Map(
            attrs
                .iter()
                .map(|(name, filter)| (name.to_owned(), Self::Filter(filter.clone())))
                .collect(),
        )
    }
}

impl From<Pipeable> for Value {
    fn from(pipeable: Pipeable) -> Self {
        Self::Partial(Box::new(pipeable))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}
