use super::*;

fn unit_cell() -> Cell<2> {
  Cell::new([0.0, 0.0], [1.0, 1.0]).unwrap()
}

#[test]
fn test_new_node_is_unevaluated_leaf() {
  let node = SpaceTreeNode::new(unit_cell(), 3);
  assert!(node.is_leaf());
  assert!(!node.is_evaluated());
  assert_eq!(node.values(), None);
  assert_eq!(node.fill_ratio(), None);
  assert_eq!(node.depth(), 3);
  assert_eq!(node.child_count(), 0);
}

#[test]
fn test_children_follow_range() {
  let mut node = SpaceTreeNode::new(unit_cell(), 0);
  node.children = 5..9;
  assert!(!node.is_leaf());
  let ids: Vec<usize> = node.children().map(|id| id.index()).collect();
  assert_eq!(ids, vec![5, 6, 7, 8]);
}

#[test]
fn test_fill_ratio_counts_non_positive() {
  let mut node = SpaceTreeNode::new(unit_cell(), 0);
  node.values = Some(vec![-1.0, 0.0, 0.5, 2.0]);
  assert_eq!(node.fill_ratio(), Some(0.5));
}

#[test]
fn test_geometry_accessors() {
  let node = SpaceTreeNode::new(unit_cell(), 0);
  assert_eq!(node.center(), [0.5, 0.5]);
  assert_eq!(node.edge_length(), 1.0);
  assert_eq!(NodeId::ROOT.index(), 0);
}
