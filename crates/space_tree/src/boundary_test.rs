use std::sync::Arc;

use super::*;
use crate::cell::Cell;
use crate::policy::MidPointSplitPolicy;
use crate::sampler::CartesianGridSampler;
use crate::tree::TreeContext;

fn circle_tree(max_depth: usize) -> SpaceTree<2> {
  let ctx = TreeContext::with(2, CartesianGridSampler::new(3).unwrap(), MidPointSplitPolicy).unwrap();
  let root = Cell::from_bounds([-2.0, -2.0], [2.0, 2.0]).unwrap();
  let mut tree = SpaceTree::new(root, ctx).unwrap();
  tree
    .build(&|p: &[f64; 2]| p[0] * p[0] + p[1] * p[1] - 1.0, max_depth)
    .unwrap();
  tree
}

#[test]
fn test_uniform_signs() {
  assert!(uniform_signs(&[1.0, 2.0, 0.5]));
  assert!(uniform_signs(&[-1.0, -2.0]));
  assert!(!uniform_signs(&[-1.0, 2.0]));
  assert!(!uniform_signs(&[3.0, 1.0, -0.1]));
}

#[test]
fn test_uniform_signs_edge_cases() {
  assert!(uniform_signs(&[]));
  assert!(uniform_signs(&[42.0]));
  // Zero groups with negatives.
  assert!(uniform_signs(&[0.0, -1.0, 0.0]));
  assert!(!uniform_signs(&[0.0, 1.0]));
  // NaN fails `> 0` and therefore reads as inside.
  assert!(uniform_signs(&[f64::NAN, -1.0]));
}

#[test]
fn test_boundary_nodes_are_mixed_leaves() {
  let tree = circle_tree(4);
  let boundary = boundary_nodes(&tree);
  assert!(!boundary.is_empty());
  for id in &boundary {
    let node = tree.node(*id).unwrap();
    assert!(node.is_leaf());
    assert!(!uniform_signs(node.values().unwrap()));
    assert_eq!(node.depth(), 4);
  }

  // Every mixed leaf is reported.
  let mixed = tree
    .leaves()
    .into_iter()
    .filter(|id| !uniform_signs(tree.node(*id).unwrap().values().unwrap()))
    .count();
  assert_eq!(mixed, boundary.len());
}

#[test]
fn test_unevaluated_root_has_no_boundary() {
  let ctx = TreeContext::with(2, CartesianGridSampler::new(3).unwrap(), MidPointSplitPolicy).unwrap();
  let root = Cell::from_bounds([-2.0, -2.0], [2.0, 2.0]).unwrap();
  let tree = SpaceTree::new(root, ctx).unwrap();
  assert!(boundary_nodes(&tree).is_empty());
  assert!(boundary_nodes_par(&tree).is_empty());
}

#[test]
fn test_parallel_collection_matches_sequential() {
  for depth in [0, 1, 3, 5] {
    let tree = circle_tree(depth);
    assert_eq!(boundary_nodes_par(&tree), boundary_nodes(&tree));
  }
}

#[test]
fn test_boundary_points_follow_centers() {
  let tree = circle_tree(3);
  let centers = boundary_centers(&tree);
  let flat = boundary_points_flat(&tree);
  assert_eq!(centers.len(), boundary_nodes(&tree).len());
  assert_eq!(flat.len(), centers.len() * 2);
  for (i, [x, y]) in centers.iter().enumerate() {
    assert_eq!(flat[2 * i], *x as f32);
    assert_eq!(flat[2 * i + 1], *y as f32);
    // Boundary cells at depth 3 have edge 0.5 and touch the unit circle.
    let r = (x * x + y * y).sqrt();
    assert!((r - 1.0).abs() < 0.5);
  }
}

#[test]
fn test_boundary_points_vec3() {
  let ctx = TreeContext::with(2, CartesianGridSampler::new(3).unwrap(), MidPointSplitPolicy).unwrap();
  let root = Cell::from_bounds([-2.0; 3], [2.0; 3]).unwrap();
  let mut tree = SpaceTree::new(root, Arc::clone(&ctx)).unwrap();
  tree.build(&|p: &[f64; 3]| p[2] - 0.3, 2).unwrap();

  let points = boundary_points_vec3(&tree);
  assert_eq!(points.len(), boundary_nodes(&tree).len());
  assert!(!points.is_empty());
  // Plane z = 0.3 falls inside the depth-2 slab z in [0, 1].
  assert!(points.iter().all(|p| p.z == 0.5));
}
