//! Document-order navigation.
//!
//! "Elements" follow the wrapped library's naming: the next element of a
//! node is whatever the parser produced right after it (its first child,
//! else its next sibling, else the next sibling of the nearest ancestor that
//! has one). Text nodes take part in every walk.

use std::iter;

use super::Node;

impl Node {
    /// The direct parent. The document root has none.
    pub fn parent(&self) -> Option<Self> {
        self.node_ref().parent().map(|parent| self.at(parent.id()))
    }

    /// Direct children in document order.
    pub fn children(&self) -> impl Iterator<Item = Self> + '_ {
        self.node_ref().children().map(move |child| self.at(child.id()))
    }

    /// Every node below this one, in document order.
    pub fn descendants(&self) -> impl Iterator<Item = Self> + '_ {
        self.node_ref()
            .descendants()
            .skip(1)
            .map(move |descendant| self.at(descendant.id()))
    }

    /// The sibling right after this node.
    pub fn next_sibling(&self) -> Option<Self> {
        self.node_ref()
            .next_sibling()
            .map(|sibling| self.at(sibling.id()))
    }

    /// The sibling right before this node.
    pub fn previous_sibling(&self) -> Option<Self> {
        self.node_ref()
            .prev_sibling()
            .map(|sibling| self.at(sibling.id()))
    }

    /// Following siblings, nearest first.
    pub fn next_siblings(&self) -> impl Iterator<Item = Self> + '_ {
        self.node_ref()
            .next_siblings()
            .map(move |sibling| self.at(sibling.id()))
    }

    /// Preceding siblings, nearest first.
    pub fn previous_siblings(&self) -> impl Iterator<Item = Self> + '_ {
        self.node_ref()
            .prev_siblings()
            .map(move |sibling| self.at(sibling.id()))
    }

    /// Ancestors, nearest first, ending with the document root.
    pub fn parents(&self) -> impl Iterator<Item = Self> + '_ {
        self.node_ref()
            .ancestors()
            .map(move |ancestor| self.at(ancestor.id()))
    }

    /// The node parsed immediately after this one.
    pub fn next_element(&self) -> Option<Self> {
        let node = self.node_ref();
        if let Some(child) = node.first_child() {
            return Some(self.at(child.id()));
        }

        let mut current = node;
        loop {
            if let Some(sibling) = current.next_sibling() {
                return Some(self.at(sibling.id()));
            }
            current = current.parent()?;
        }
    }

    /// The node parsed immediately before this one.
    ///
    /// The document root is never a previous element.
    pub fn previous_element(&self) -> Option<Self> {
        let node = self.node_ref();
        match node.prev_sibling() {
            Some(mut deepest) => {
                while let Some(last) = deepest.last_child() {
                    deepest = last;
                }
                Some(self.at(deepest.id()))
            }
            None => node
                .parent()
                .filter(|parent| parent.parent().is_some())
                .map(|parent| self.at(parent.id())),
        }
    }

    /// Every node parsed after this one.
    pub fn next_elements(&self) -> impl Iterator<Item = Self> + use<> {
        iter::successors(self.next_element(), Self::next_element)
    }

    /// Every node parsed before this one, nearest first.
    pub fn previous_elements(&self) -> impl Iterator<Item = Self> + use<> {
        iter::successors(self.previous_element(), Self::previous_element)
    }
}
