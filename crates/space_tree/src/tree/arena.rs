//! SpaceTree - arena of nodes with recursive evaluate/divide.
//!
//! Nodes live in one `Vec` and refer to their children by an index range.
//! Children of a node are allocated together, so a node's subtree built by
//! `divide` always occupies the tail of the arena at the time it is built.
//!
//! # Lifecycle
//!
//! ```text
//! new(root cell) ──► evaluate(root) ──► divide(root, max_depth)
//!                                         │
//!            depth >= max_depth or ◄──────┤
//!            policy says stop: leaf       │
//!                                         ▼
//!                            split into arity^N children
//!                            evaluate + divide each child
//! ```

use std::sync::Arc;

use super::context::TreeContext;
use super::node::{NodeId, SpaceTreeNode};
use super::stats::TreeStats;
use crate::cell::Cell;
use crate::csg::Target;
use crate::error::{PreconditionError, Result};
use crate::radix::base_n;

/// Adaptive mixed-radix tree over an N-dimensional cell.
#[derive(Debug)]
pub struct SpaceTree<const N: usize> {
  pub(crate) ctx: Arc<TreeContext<N>>,
  pub(crate) nodes: Vec<SpaceTreeNode<N>>,
}

impl<const N: usize> SpaceTree<N> {
  /// Create a tree holding a single unevaluated root at depth 0.
  pub fn new(root: Cell<N>, ctx: Arc<TreeContext<N>>) -> Result<Self> {
    Self::with_root_depth(root, 0, ctx)
  }

  /// Detached subtree whose root sits at `depth` of some larger tree.
  pub(crate) fn with_root_depth(root: Cell<N>, depth: usize, ctx: Arc<TreeContext<N>>) -> Result<Self> {
    root.validate()?;
    Ok(Self {
      ctx,
      nodes: vec![SpaceTreeNode::new(root, depth)],
    })
  }

  #[inline]
  pub fn context(&self) -> &Arc<TreeContext<N>> {
    &self.ctx
  }

  #[inline]
  pub fn root(&self) -> &SpaceTreeNode<N> {
    &self.nodes[0]
  }

  /// Look up a node, failing for ids from another tree.
  pub fn node(&self, id: NodeId) -> Result<&SpaceTreeNode<N>> {
    self
      .nodes
      .get(id.0)
      .ok_or_else(|| PreconditionError::UnknownNode(id.0).into())
  }

  /// Total nodes, internal and leaf.
  #[inline]
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  /// Sample `target` inside the node's cell and store the values.
  ///
  /// Idempotent: re-evaluating replaces the values with identical ones.
  pub fn evaluate<T: Target<N> + ?Sized>(&mut self, id: NodeId, target: &T) -> Result<()> {
    self.node(id)?;
    self.sample(id, target).map(|_| ())
  }

  /// Subdivide an evaluated leaf until `max_depth` or until the split policy
  /// stops.
  ///
  /// Fails with `NotEvaluated` if the node has no values and with
  /// `AlreadyDivided` if it has children. If any descendant fails, every
  /// child created by this call is discarded and the node is a leaf again.
  pub fn divide<T: Target<N> + ?Sized>(&mut self, id: NodeId, target: &T, max_depth: usize) -> Result<()> {
    let points = self.points_for_divide(id)?;
    self.divide_sampled(id, &points, target, max_depth)
  }

  /// Evaluate the root, then divide it.
  #[tracing::instrument(skip_all, fields(dimension = N, max_depth = max_depth))]
  pub fn build<T: Target<N> + ?Sized>(&mut self, target: &T, max_depth: usize) -> Result<()> {
    let points = self.sample(NodeId::ROOT, target)?;
    self.divide_sampled(NodeId::ROOT, &points, target, max_depth)?;
    tracing::debug!(nodes = self.nodes.len(), "tree built");
    Ok(())
  }

  /// Depth-first pre-order walk over every node, children in slot order.
  pub fn visit<'a>(&'a self, f: impl FnMut(NodeId, &'a SpaceTreeNode<N>)) {
    self.visit_subtree(NodeId::ROOT, f);
  }

  /// Depth-first walk over the leaves only.
  pub fn visit_leaves<'a>(&'a self, mut f: impl FnMut(NodeId, &'a SpaceTreeNode<N>)) {
    self.visit(|id, node| {
      if node.is_leaf() {
        f(id, node);
      }
    });
  }

  /// Depth-first pre-order walk of the subtree rooted at `start`.
  pub fn visit_subtree<'a>(&'a self, start: NodeId, mut f: impl FnMut(NodeId, &'a SpaceTreeNode<N>)) {
    let mut stack = vec![start.0];
    while let Some(index) = stack.pop() {
      let Some(node) = self.nodes.get(index) else {
        continue;
      };
      f(NodeId(index), node);
      stack.extend(node.children.clone().rev());
    }
  }

  /// Leaf ids in depth-first order.
  pub fn leaves(&self) -> Vec<NodeId> {
    let mut leaves = Vec::new();
    self.visit_leaves(|id, _| leaves.push(id));
    leaves
  }

  /// Node counts and depth distribution.
  pub fn stats(&self) -> TreeStats {
    let mut stats = TreeStats::default();
    self.visit(|_, node| stats.record(node));
    stats
  }

  /// Sample points of a node that `divide` may split.
  pub(crate) fn points_for_divide(&self, id: NodeId) -> Result<Vec<[f64; N]>> {
    let node = self.node(id)?;
    if !node.is_leaf() {
      return Err(PreconditionError::AlreadyDivided(id.0).into());
    }
    if !node.is_evaluated() {
      return Err(PreconditionError::NotEvaluated(id.0).into());
    }
    self.ctx.sampler().sample_points(&node.cell)
  }

  /// Whether a sampled node should receive children.
  pub(crate) fn wants_split(&self, id: NodeId, points: &[[f64; N]], max_depth: usize) -> Result<bool> {
    let node = self.node(id)?;
    let values = node
      .values
      .as_deref()
      .ok_or(PreconditionError::NotEvaluated(id.0))?;
    if values.len() != points.len() {
      return Err(
        PreconditionError::ValueCountMismatch {
          node: id.0,
          expected: points.len(),
          found: values.len(),
        }
        .into(),
      );
    }
    if node.depth >= max_depth {
      return Ok(false);
    }
    Ok(self.ctx.policy().should_split(points, values))
  }

  fn divide_sampled<T: Target<N> + ?Sized>(
    &mut self,
    id: NodeId,
    points: &[[f64; N]],
    target: &T,
    max_depth: usize,
  ) -> Result<()> {
    if !self.wants_split(id, points, max_depth)? {
      return Ok(());
    }

    let children = self.split(id)?;
    for child in children.map(NodeId) {
      let result = self
        .sample(child, target)
        .and_then(|child_points| self.divide_sampled(child, &child_points, target, max_depth));
      if let Err(err) = result {
        self.collapse(id);
        return Err(err);
      }
    }
    Ok(())
  }

  /// Evaluate a node and hand back the points that produced its values.
  fn sample<T: Target<N> + ?Sized>(&mut self, id: NodeId, target: &T) -> Result<Vec<[f64; N]>> {
    let points = self.ctx.sampler().sample_points(&self.nodes[id.0].cell)?;
    let values = points.iter().map(|p| target.at(p)).collect();
    self.nodes[id.0].values = Some(values);
    Ok(points)
  }

  /// Allocate all `arity^N` unevaluated children of a leaf.
  ///
  /// Every child cell is computed before the arena is touched, so a failure
  /// leaves the tree unchanged.
  pub(crate) fn split(&mut self, id: NodeId) -> Result<std::ops::Range<usize>> {
    let (cell, depth) = {
      let node = self.node(id)?;
      if !node.is_leaf() {
        return Err(PreconditionError::AlreadyDivided(id.0).into());
      }
      (node.cell, node.depth)
    };

    let arity = self.ctx.arity();
    let count = self.ctx.child_count();
    let mut children = Vec::with_capacity(count);
    for slot in 0..count {
      let digits = base_n(slot, arity, N)?;
      children.push(SpaceTreeNode::new(cell.child(&digits, arity)?, depth + 1));
    }

    let start = self.nodes.len();
    self.nodes.extend(children);
    let range = start..start + count;
    self.nodes[id.0].children = range.clone();
    tracing::trace!(node = id.0, depth, children = count, "split");
    Ok(range)
  }

  /// Drop everything allocated below `id`, turning it back into a leaf.
  ///
  /// Only valid while `id`'s descendants form the arena tail, which holds
  /// for a node whose children were allocated by the current divide call.
  pub(crate) fn collapse(&mut self, id: NodeId) {
    let start = self.nodes[id.0].children.start;
    if !self.nodes[id.0].children.is_empty() {
      self.nodes.truncate(start);
      self.nodes[id.0].children = 0..0;
    }
  }

  /// Move a detached subtree into the leaf slot whose cell it was built for.
  pub(crate) fn graft(&mut self, slot: NodeId, sub: SpaceTree<N>) -> Result<()> {
    let reject = |reason| PreconditionError::GraftMismatch { slot: slot.0, reason };

    let (cell, depth) = {
      let node = self.node(slot)?;
      if !node.is_leaf() {
        return Err(PreconditionError::AlreadyDivided(slot.0).into());
      }
      (node.cell, node.depth)
    };
    let expected = self.ctx.child_count();
    if sub.ctx.child_count() != expected {
      return Err(
        PreconditionError::ChildCountMismatch {
          expected,
          found: sub.ctx.child_count(),
        }
        .into(),
      );
    }

    let mut nodes = sub.nodes.into_iter();
    let root = nodes.next().ok_or_else(|| reject("empty subtree"))?;
    if root.cell != cell {
      return Err(reject("cell differs").into());
    }
    if root.depth != depth {
      return Err(reject("depth differs").into());
    }

    // Subtree index i >= 1 lands at base + i - 1.
    let base = self.nodes.len();
    let rebase = |children: std::ops::Range<usize>| -> Result<std::ops::Range<usize>> {
      match children.len() {
        0 => Ok(0..0),
        found if found == expected => Ok(children.start + base - 1..children.end + base - 1),
        found => Err(PreconditionError::ChildCountMismatch { expected, found }.into()),
      }
    };

    let root_children = rebase(root.children)?;
    let mut grafted = Vec::with_capacity(nodes.len());
    for mut node in nodes {
      node.children = rebase(node.children)?;
      grafted.push(node);
    }

    self.nodes.extend(grafted);
    let target = &mut self.nodes[slot.0];
    target.values = root.values;
    target.children = root_children;
    Ok(())
  }
}

#[cfg(test)]
#[path = "arena_test.rs"]
mod arena_test;
