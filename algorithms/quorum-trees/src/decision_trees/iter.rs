use std::iter::Iterator;

use super::TreeNode;
use quorum::{Float, Label};

/// Depth-first (pre-order) iterator of nodes in a decision tree
pub struct NodeIter<'a, F, L> {
    nodes: &'a [TreeNode<F, L>],
    stack: Vec<usize>,
}

impl<'a, F, L> NodeIter<'a, F, L> {
    /// Iterate `nodes` starting from the root at position zero
    pub fn new(nodes: &'a [TreeNode<F, L>]) -> Self {
        let stack = if nodes.is_empty() { vec![] } else { vec![0] };

        NodeIter { nodes, stack }
    }
}

impl<'a, F: Float, L: Label> Iterator for NodeIter<'a, F, L> {
    type Item = &'a TreeNode<F, L>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.stack.pop()?)?;

        // push the false branch first so that the true branch is visited next
        node.children()
            .into_iter()
            .rev()
            .for_each(|child| self.stack.push(child));

        Some(node)
    }
}
