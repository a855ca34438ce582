//! Tree shape summary, the counterpart of refinement statistics.

use super::node::SpaceTreeNode;

/// Node counts gathered by [`SpaceTree::stats`](super::SpaceTree::stats).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
  pub node_count: usize,
  pub leaf_count: usize,
  pub internal_count: usize,
  /// Deepest node depth reached (root = 0).
  pub max_depth: usize,
  /// Leaf count per depth; index = depth.
  pub leaves_per_depth: Vec<usize>,
  /// Nodes with no sampled values.
  pub unevaluated: usize,
}

impl TreeStats {
  pub(crate) fn record<const N: usize>(&mut self, node: &SpaceTreeNode<N>) {
    self.node_count += 1;
    self.max_depth = self.max_depth.max(node.depth);
    if !node.is_evaluated() {
      self.unevaluated += 1;
    }
    if node.is_leaf() {
      self.leaf_count += 1;
      if self.leaves_per_depth.len() <= node.depth {
        self.leaves_per_depth.resize(node.depth + 1, 0);
      }
      self.leaves_per_depth[node.depth] += 1;
    } else {
      self.internal_count += 1;
    }
  }
}
