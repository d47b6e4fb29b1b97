//! Match criteria for tree searches.
//!
//! A [`Filter`] tests one string (a tag name, an attribute value or a node's
//! string). [`Attrs`] maps attribute names to filters, and
//! [`SearchCriteria`] combines a name filter, attribute filters, a string
//! filter, a recursion flag and a result limit.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use regex::Regex;

use super::{Node, NodeKind};

/// Attributes whose value is a whitespace-separated list of tokens.
///
/// A filter matches such an attribute when it matches the whole value or
/// any single token.
pub const MULTI_VALUED_ATTRIBUTES: &[&str] = &[
    "class",
    "rel",
    "rev",
    "accept-charset",
    "headers",
    "accesskey",
    "dropzone",
];

/// A test applied to an optional string.
#[derive(Clone, Default)]
pub enum Filter {
    /// No constraint.
    #[default]
    Any,
    /// The string must exist.
    Present,
    /// The string must not exist.
    Absent,
    /// The string must equal this value.
    Exact(String),
    /// The string must equal one of these values.
    OneOf(Vec<String>),
    /// The pattern must match somewhere in the string.
    Pattern(Regex),
    /// The predicate must accept the string.
    Predicate(Rc<dyn Fn(&str) -> bool>),
}

impl Filter {
    /// Builds a filter from a closure.
    pub fn predicate(predicate: impl Fn(&str) -> bool + 'static) -> Self {
        Self::Predicate(Rc::new(predicate))
    }

    /// Whether this filter places no constraint at all.
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Tests a candidate string.
    pub fn matches(&self, candidate: Option<&str>) -> bool {
        match (self, candidate) {
            (Self::Any, _) => true,
            (Self::Present, candidate) => candidate.is_some(),
            (Self::Absent, candidate) => candidate.is_none(),
            (_, None) => false,
            (Self::Exact(expected), Some(candidate)) => expected == candidate,
            (Self::OneOf(expected), Some(candidate)) => {
                expected.iter().any(|value| value == candidate)
            }
            (Self::Pattern(pattern), Some(candidate)) => pattern.is_match(candidate),
            (Self::Predicate(predicate), Some(candidate)) => predicate(candidate),
        }
    }

    /// Tests an attribute value, splitting multi-valued attributes into
    /// tokens.
    pub fn matches_attribute(&self, attribute: &str, value: Option<&str>) -> bool {
        if self.matches(value) {
            return true;
        }

        match (self, value) {
            (Self::Any | Self::Present | Self::Absent, _) | (_, None) => false,
            (_, Some(value)) => {
                MULTI_VALUED_ATTRIBUTES.contains(&attribute)
                    && value
                        .split_ascii_whitespace()
                        .any(|token| self.matches(Some(token)))
            }
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => formatter.write_str("Any"),
            Self::Present => formatter.write_str("Present"),
            Self::Absent => formatter.write_str("Absent"),
            Self::Exact(value) => formatter.debug_tuple("Exact").field(value).finish(),
            Self::OneOf(values) => formatter.debug_tuple("OneOf").field(values).finish(),
            Self::Pattern(pattern) => formatter
                .debug_tuple("Pattern")
                .field(&pattern.as_str())
                .finish(),
            Self::Predicate(_) => formatter.write_str("Predicate(..)"),
        }
    }
}

impl PartialEq for Filter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Any, Self::Any)
            | (Self::Present, Self::Present)
            | (Self::Absent, Self::Absent) => true,
            (Self::Exact(left), Self::Exact(right)) => left == right,
            (Self::OneOf(left), Self::OneOf(right)) => left == right,
            (Self::Pattern(left), Self::Pattern(right)) => left.as_str() == right.as_str(),
            (Self::Predicate(left), Self::Predicate(right)) => Rc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Self::Exact(value.to_owned())
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Self::Exact(value)
    }
}

impl From<bool> for Filter {
    fn from(present: bool) -> Self {
        if present { Self::Present } else { Self::Absent }
    }
}

impl From<Regex> for Filter {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<Vec<String>> for Filter {
    fn from(values: Vec<String>) -> Self {
        Self::OneOf(values)
    }
}

impl From<&[&str]> for Filter {
    fn from(values: &[&str]) -> Self {
        Self::OneOf(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

/// Attribute filters keyed by attribute name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attrs(BTreeMap<String, Filter>);

impl Attrs {
    /// No attribute constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single filter on the `class` attribute.
    pub fn class(filter: impl Into<Filter>) -> Self {
        Self::new().with("class", filter)
    }

    /// Adds or replaces the filter for an attribute.
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, filter: impl Into<Filter>) -> Self {
        self.insert(attribute, filter);
        self
    }

    /// Adds or replaces the filter for an attribute.
    pub fn insert(&mut self, attribute: impl Into<String>, filter: impl Into<Filter>) {
        self.0.insert(attribute.into(), filter.into());
    }

    /// Whether there are no constraints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the filters in attribute-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.0.iter().map(|(name, filter)| (name.as_str(), filter))
    }

    /// Whether every filter accepts the node's attributes.
    pub fn matches(&self, node: &Node) -> bool {
        self.0
            .iter()
            .all(|(name, filter)| filter.matches_attribute(name, node.attr(name)))
    }
}

impl<K: Into<String>, F: Into<Filter>> FromIterator<(K, F)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, F)>>(pairs: I) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(name, filter)| (name.into(), filter.into()))
                .collect(),
        )
    }
}

/// Everything a criteria-based search looks at.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchCriteria {
    /// Filter on the tag name.
    pub name: Filter,
    /// Filters on attribute values.
    pub attrs: Attrs,
    /// Filter on the node's string.
    pub string: Filter,
    /// Search all descendants rather than direct children only.
    pub recursive: bool,
    /// Stop after this many results. `None` and `Some(0)` mean no limit.
    pub limit: Option<usize>,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            name: Filter::Any,
            attrs: Attrs::new(),
            string: Filter::Any,
            recursive: true,
            limit: None,
        }
    }
}

impl SearchCriteria {
    /// Criteria that match every tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tag-name filter.
    #[must_use]
    pub fn name(mut self, name: impl Into<Filter>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an attribute filter.
    #[must_use]
    pub fn attr(mut self, attribute: impl Into<String>, filter: impl Into<Filter>) -> Self {
        self.attrs.insert(attribute, filter);
        self
    }

    /// Sets the string filter.
    #[must_use]
    pub fn string(mut self, string: impl Into<Filter>) -> Self {
        self.string = string.into();
        self
    }

    /// Restricts a downward search to direct children when `false`.
    #[must_use]
    pub const fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Caps the number of results.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The effective cap, treating zero as "no limit".
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|limit| *limit > 0)
    }

    /// Whether a node satisfies every filter.
    ///
    /// Tags (and the document root) are tested on name, attributes and
    /// string. Text nodes are only candidates when the criteria constrain the
    /// string and nothing else.
    pub fn matches(&self, node: &Node) -> bool {
        match node.kind() {
            NodeKind::Element | NodeKind::Document | NodeKind::Fragment => {
                self.name.matches(node.name())
                    && self.attrs.matches(node)
                    && (self.string.is_any() || self.string.matches(node.string().as_deref()))
            }
            NodeKind::Text => {
                self.name.is_any()
                    && self.attrs.is_empty()
                    && !self.string.is_any()
                    && self.string.matches(node.text())
            }
            NodeKind::Comment | NodeKind::Doctype | NodeKind::ProcessingInstruction => false,
        }
    }
}
