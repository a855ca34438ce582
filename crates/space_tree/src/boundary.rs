//! Sign classification and boundary-leaf collection.
//!
//! A boundary leaf is a leaf whose samples do not all share one sign, i.e. a
//! leaf straddling the zero level set of the target. Sign is the
//! `value > 0.0` test throughout, so exact zeros count as inside.

use glam::Vec3;
use rayon::prelude::*;

use crate::tree::{NodeId, SpaceTree};

/// True when every value has the sign of the first. Empty input is uniform.
#[inline]
pub fn uniform_signs(values: &[f64]) -> bool {
  match values.split_first() {
    Some((first, rest)) => {
      let positive = *first > 0.0;
      rest.iter().all(|v| (*v > 0.0) == positive)
    }
    None => true,
  }
}

#[inline]
fn is_boundary<const N: usize>(node: &crate::tree::SpaceTreeNode<N>) -> bool {
  node.is_leaf() && node.values().is_some_and(|values| !uniform_signs(values))
}

/// Boundary leaves in depth-first order. Unevaluated leaves are skipped.
pub fn boundary_nodes<const N: usize>(tree: &SpaceTree<N>) -> Vec<NodeId> {
  let mut found = Vec::new();
  tree.visit(|id, node| {
    if is_boundary(node) {
      found.push(id);
    }
  });
  found
}

/// [`boundary_nodes`] with one rayon task per root child.
///
/// Each task fills a private buffer; buffers are concatenated in slot order,
/// so the result equals the sequential one.
pub fn boundary_nodes_par<const N: usize>(tree: &SpaceTree<N>) -> Vec<NodeId> {
  let root = tree.root();
  if root.is_leaf() {
    return boundary_nodes(tree);
  }

  let subtrees: Vec<NodeId> = root.children().collect();
  subtrees
    .par_iter()
    .map(|&start| {
      let mut found = Vec::new();
      tree.visit_subtree(start, |id, node| {
        if is_boundary(node) {
          found.push(id);
        }
      });
      found
    })
    .collect::<Vec<_>>()
    .concat()
}

/// Centers of the boundary leaves.
pub fn boundary_centers<const N: usize>(tree: &SpaceTree<N>) -> Vec<[f64; N]> {
  let mut centers = Vec::new();
  tree.visit(|_, node| {
    if is_boundary(node) {
      centers.push(node.center());
    }
  });
  centers
}

/// Boundary centers flattened to `[x0, y0, .., x1, y1, ..]` single precision.
pub fn boundary_points_flat<const N: usize>(tree: &SpaceTree<N>) -> Vec<f32> {
  boundary_centers(tree)
    .into_iter()
    .flat_map(|center| center.map(|c| c as f32))
    .collect()
}

/// Boundary centers of a 3D tree for renderers.
pub fn boundary_points_vec3(tree: &SpaceTree<3>) -> Vec<Vec3> {
  boundary_centers(tree)
    .into_iter()
    .map(|[x, y, z]| Vec3::new(x as f32, y as f32, z as f32))
    .collect()
}

#[cfg(test)]
#[path = "boundary_test.rs"]
mod boundary_test;
