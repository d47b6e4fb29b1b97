//! The document tree the pipeable functions delegate to.
//!
//! Parsing and CSS matching come from [`scraper`] (html5ever and
//! `selectors`); node identity comes from [`ego_tree`]. This module exposes
//! them as a [`Node`] handle with the search, navigation, text, selection and
//! rendering methods that the [`soup`](crate::soup) wrappers re-expose.
//!
//! A [`Node`] owns a reference-counted pointer to its document, so handles
//! can be passed between pipeline stages without borrowing from the caller.
//!
//! # Examples
//!
//! ```rust
//! use composable_soup::tree::{Node, SearchCriteria, TextOptions};
//!
//! let document = Node::parse_document(r#"<div class="a"><p>Hello</p></div>"#);
//! let paragraph = document.find(&SearchCriteria::new().name("p")).unwrap();
//!
//! assert_eq!(paragraph.get_text(&TextOptions::default()), "Hello");
//! ```

mod encode;
mod filter;
mod navigate;
mod render;
mod search;
mod select;
mod text;

use std::fmt;
use std::rc::Rc;

use ego_tree::{NodeId, NodeRef};
use scraper::Html;
use scraper::node::Element;
use tracing::debug;

pub use encode::{EncodeErrors, decode_markup, encode_text};
pub use filter::{Attrs, Filter, SearchCriteria};
pub use render::{Formatter, RenderOptions};
pub use text::{TextKind, TextOptions};

/// Name reported for the document root, mirroring the wrapped library.
pub const DOCUMENT_NAME: &str = "[document]";

/// What a [`Node`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The root of a parsed document.
    Document,
    /// The root of a parsed fragment.
    Fragment,
    /// A `<!DOCTYPE>` declaration.
    Doctype,
    /// A comment.
    Comment,
    /// A run of character data.
    Text,
    /// A tag.
    Element,
    /// A processing instruction.
    ProcessingInstruction,
}

/// A handle to one node of a parsed document.
///
/// Cloning a `Node` is cheap: it copies a node id and bumps a reference
/// count on the shared document. Two handles are equal when they point at
/// the same node of the same parsed document.
#[derive(Clone)]
pub struct Node {
    document: Rc<Html>,
    id: NodeId,
}

impl Node {
    /// Parses a complete HTML document and returns its root.
    pub fn parse_document(markup: &str) -> Self {
        Self::from_html(Html::parse_document(markup))
    }

    /// Parses an HTML fragment and returns its root.
    pub fn parse_fragment(markup: &str) -> Self {
        Self::from_html(Html::parse_fragment(markup))
    }

    /// Takes ownership of an already parsed tree and returns its root.
    ///
    /// A fragment's synthetic `<html>` element is removed here, so search,
    /// navigation, selection and rendering see only the parsed markup.
    pub fn from_html(mut html: Html) -> Self {
        unwrap_fragment(&mut html);
        if !html.errors.is_empty() {
            debug!(
                errors = html.errors.len(),
                "markup parsed with recoverable errors"
            );
        }

        let id = html.tree.root().id();
        Self {
            document: Rc::new(html),
            id,
        }
    }

    /// The id of this node inside its document.
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// The underlying parsed document.
    pub fn html(&self) -> &Html {
        &self.document
    }

    /// The root of the document this node belongs to.
    pub fn root(&self) -> Self {
        self.at(self.document.tree.root().id())
    }

    /// What kind of node this is.
    pub fn kind(&self) -> NodeKind {
        match self.node_ref().value() {
            scraper::Node::Document => NodeKind::Document,
            scraper::Node::Fragment => NodeKind::Fragment,
            scraper::Node::Doctype(_) => NodeKind::Doctype,
            scraper::Node::Comment(_) => NodeKind::Comment,
            scraper::Node::Text(_) => NodeKind::Text,
            scraper::Node::Element(_) => NodeKind::Element,
            scraper::Node::ProcessingInstruction(_) => NodeKind::ProcessingInstruction,
        }
    }

    /// Whether this node is a tag.
    pub fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }

    /// The tag name, or [`DOCUMENT_NAME`] for a document or fragment root.
    pub fn name(&self) -> Option<&str> {
        match self.node_ref().value() {
            scraper::Node::Element(element) => Some(element.name()),
            scraper::Node::Document | scraper::Node::Fragment => Some(DOCUMENT_NAME),
            _ => None,
        }
    }

    /// The character data of a text, comment, doctype or processing
    /// instruction node.
    pub fn text(&self) -> Option<&str> {
        match self.node_ref().value() {
            scraper::Node::Text(text) => Some(&**text),
            scraper::Node::Comment(comment) => Some(&**comment),
            scraper::Node::Doctype(doctype) => Some(doctype.name()),
            scraper::Node::ProcessingInstruction(instruction) => Some(&*instruction.data),
            _ => None,
        }
    }

    /// The value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element().and_then(|element| element.attr(name))
    }

    /// Whether the node is a tag carrying the attribute.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// All attributes in document order.
    pub fn attrs(&self) -> Vec<(&str, &str)> {
        self.element()
            .map(|element| element.attrs().collect())
            .unwrap_or_default()
    }

    /// The only string below this node.
    ///
    /// A text-like node yields its own data. A tag with exactly one child
    /// yields that child's string; any other tag yields `None`.
    pub fn string(&self) -> Option<String> {
        if let Some(text) = self.text() {
            return Some(text.to_owned());
        }

        let node = self.node_ref();
        let mut children = node.children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }
        self.at(only.id()).string()
    }

    pub(crate) fn element(&self) -> Option<&Element> {
        self.node_ref().value().as_element()
    }

    pub(crate) fn node_ref(&self) -> NodeRef<'_, scraper::Node> {
        self.document
            .tree
            .get(self.id)
            .unwrap_or_else(|| unreachable!("node ids are only minted from their own document"))
    }

    pub(crate) fn at(&self, id: NodeId) -> Self {
        Self {
            document: Rc::clone(&self.document),
            id,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.document, &other.document) && self.id == other.id
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Element => write!(
                formatter,
                "Node(<{}> {:?})",
                self.name().unwrap_or_default(),
                self.id
            ),
            NodeKind::Document | NodeKind::Fragment => {
                write!(formatter, "Node({DOCUMENT_NAME} {:?})", self.id)
            }
            kind => write!(
                formatter,
                "Node({kind:?} {:?} {:?})",
                self.text().unwrap_or_default(),
                self.id
            ),
        }
    }
}

/// html5ever hangs a parsed fragment under an `<html>` element of its own.
/// Its children move up to the fragment root and the element is detached.
fn unwrap_fragment(html: &mut Html) {
    let root = html.tree.root();
    if !root.value().is_fragment() {
        return;
    }
    let Some(wrapper) = root
        .first_child()
        .filter(|child| {
            child
                .value()
                .as_element()
                .is_some_and(|element| element.name() == "html")
        })
        .map(|child| child.id())
    else {
        return;
    };

    html.tree.root_mut().reparent_from_id_append(wrapper);
    if let Some(mut wrapper) = html.tree.get_mut(wrapper) {
        wrapper.detach();
    }
}
