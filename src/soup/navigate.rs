//! Traversals.
//!
//! The tree walks lazily; these wrappers collect each walk into a node list
//! so the result can be passed to the next stage.

use composable_soup_derive::pipeable;

use crate::tree::Node;

/// Direct children in document order, text nodes included.
#[pipeable]
pub fn children(node: Node) -> Vec<Node> {
    node.children().collect()
}

/// Every node below `node`, in document order.
#[pipeable]
pub fn descendants(node: Node) -> Vec<Node> {
    node.descendants().collect()
}

/// Every node parsed after `node`.
#[pipeable]
pub fn next_elements(node: Node) -> Vec<Node> {
    node.next_elements().collect()
}

/// Every node parsed before `node`, nearest first.
#[pipeable]
pub fn previous_elements(node: Node) -> Vec<Node> {
    node.previous_elements().collect()
}

/// Following siblings, nearest first.
#[pipeable]
pub fn next_siblings(node: Node) -> Vec<Node> {
    node.next_siblings().collect()
}

/// Preceding siblings, nearest first.
#[pipeable]
pub fn previous_siblings(node: Node) -> Vec<Node> {
    node.previous_siblings().collect()
}

/// Ancestors, nearest first, ending with the document root.
#[pipeable]
pub fn parents(node: Node) -> Vec<Node> {
    node.parents().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{Value, pipe};
    use crate::tree::SearchCriteria;
    use rstest::rstest;

    #[rstest]
    fn traversals_collect_node_lists() {
        let document = Node::parse_fragment("<p>a<b>b</b>c</p>");
        let paragraph = document
            .find(&SearchCriteria::new().name("p"))
            .expect("p exists");

        let children = pipe(paragraph.clone(), &children()).expect("children runs");
        let descendants = pipe(paragraph, &descendants()).expect("descendants runs");

        assert_eq!(children.as_nodes().map(<[Node]>::len), Some(3));
        assert_eq!(descendants.as_nodes().map(<[Node]>::len), Some(4));
    }

    #[rstest]
    fn traversals_reject_non_nodes() {
        assert!(matches!(
            pipe("text", &parents()),
            Err(crate::error::SoupError::ArgumentType { function: "parents", .. })
        ));
        assert_eq!(
            pipe(Node::parse_document(""), &previous_elements()),
            Ok(Value::Nodes(Vec::new()))
        );
    }
}
