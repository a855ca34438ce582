use super::*;

// Relations between the constants are checked at compile time.
const _: () = assert!(MIN_MIDPOINT_ORDER < MIN_INCLUSIVE_ORDER);
const _: () = assert!(MIN_TREE_ORDER >= MIN_INCLUSIVE_ORDER);
// Arity 1 would never shrink a cell.
const _: () = assert!(DEFAULT_ARITY >= 2);
const _: () = assert!(DEFAULT_SAMPLER_ORDER >= MIN_TREE_ORDER);
const _: () = assert!(DEFAULT_MAX_DEPTH > 0);
// Digit vectors for 1D..3D trees never spill to the heap.
const _: () = assert!(INLINE_DIGITS >= 3);

/// The inclusive sampler needs two points per axis to define a spacing.
#[test]
fn test_min_inclusive_order_is_2() {
  assert_eq!(MIN_INCLUSIVE_ORDER, 2);
  assert_eq!(MIN_MIDPOINT_ORDER, 1);
}

/// A tree node needs two samples per axis to see a sign change.
#[test]
fn test_min_tree_order_is_2() {
  assert_eq!(MIN_TREE_ORDER, 2);
}

#[test]
fn test_auto_threads_is_zero() {
  assert_eq!(AUTO_THREADS, 0);
}
