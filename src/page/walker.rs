//! Lazy pre-order traversal of a content block.

use super::{ContentBlock, DocumentNode};
use crate::dom::NodeId;

/// Pre-order iterator over the text and element nodes of one block.
///
/// Follows the arena's child, sibling and parent links, so each step is
/// O(depth) at worst and nothing is buffered. Comments and doctypes are
/// stepped over but never yielded.
#[derive(Debug, Clone)]
pub struct NodeWalk<'a> {
    block: ContentBlock<'a>,
    next: NodeId,
}

impl<'a> NodeWalk<'a> {
    pub(super) fn new(block: ContentBlock<'a>) -> Self {
        Self {
            block,
            next: block.root,
        }
    }

    /// Node following `id` in pre-order, without leaving the block.
    fn successor(&self, id: NodeId) -> NodeId {
        let dom = &self.block.page.dom;
        let Some(node) = dom.get(id) else {
            return NodeId::NONE;
        };
        if node.first_child.is_some() {
            return node.first_child;
        }

        let mut current = id;
        while current != self.block.root {
            let Some(node) = dom.get(current) else {
                break;
            };
            if node.next_sibling.is_some() {
                return node.next_sibling;
            }
            current = node.parent;
        }
        NodeId::NONE
    }
}

impl<'a> Iterator for NodeWalk<'a> {
    type Item = DocumentNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next.is_some() {
            let id = self.next;
            self.next = self.successor(id);
            if let Some(node) = self.block.node(id) {
                return Some(node);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for NodeWalk<'_> {}
