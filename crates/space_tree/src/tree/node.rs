//! SpaceTreeNode - one cell of the tree and its sampled values.

use std::ops::Range;

use crate::cell::Cell;

/// Index of a node inside its tree's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
  /// The root is always the first arena slot.
  pub const ROOT: Self = Self(0);

  /// Arena index.
  #[inline]
  pub fn index(&self) -> usize {
    self.0
  }
}

/// A node is a leaf when its child range is empty, otherwise it owns exactly
/// `arity^N` consecutive arena slots.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceTreeNode<const N: usize> {
  pub(crate) cell: Cell<N>,
  pub(crate) depth: usize,
  pub(crate) values: Option<Vec<f64>>,
  pub(crate) children: Range<usize>,
}

impl<const N: usize> SpaceTreeNode<N> {
  pub(crate) fn new(cell: Cell<N>, depth: usize) -> Self {
    Self {
      cell,
      depth,
      values: None,
      children: 0..0,
    }
  }

  #[inline]
  pub fn cell(&self) -> &Cell<N> {
    &self.cell
  }

  /// Distance from the tree root (root = 0).
  #[inline]
  pub fn depth(&self) -> usize {
    self.depth
  }

  /// Sampled values in sampler order, `None` before `evaluate`.
  #[inline]
  pub fn values(&self) -> Option<&[f64]> {
    self.values.as_deref()
  }

  #[inline]
  pub fn is_evaluated(&self) -> bool {
    self.values.is_some()
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.is_empty()
  }

  #[inline]
  pub fn child_count(&self) -> usize {
    self.children.len()
  }

  /// Child ids in mixed-radix slot order.
  pub fn children(&self) -> impl ExactSizeIterator<Item = NodeId> + DoubleEndedIterator {
    self.children.clone().map(NodeId)
  }

  #[inline]
  pub fn center(&self) -> [f64; N] {
    self.cell.center()
  }

  #[inline]
  pub fn edge_length(&self) -> f64 {
    self.cell.edge_length()
  }

  /// Fraction of sampled values inside the target.
  pub fn fill_ratio(&self) -> Option<f64> {
    self.values().map(crate::fill::fill_ratio)
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
