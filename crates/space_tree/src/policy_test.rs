use approx::assert_relative_eq;

use super::*;
use crate::error::SpaceTreeError;

const LINE: &[[f64; 1]] = &[[0.0], [0.5], [1.0]];

#[test]
fn test_midpoint_splits_on_mixed_signs() {
  let policy = MidPointSplitPolicy;
  assert!(policy.should_split(LINE, &[-1.0, 0.5, 2.0]));
  assert!(!policy.should_split(LINE, &[1.0, 0.5, 2.0]));
  assert!(!policy.should_split(LINE, &[-1.0, -0.5, -2.0]));
}

/// Exact zero falls on the non-positive side.
#[test]
fn test_midpoint_zero_convention() {
  let policy = MidPointSplitPolicy;
  assert!(!policy.should_split(LINE, &[0.0, -1.0, -2.0]));
  assert!(policy.should_split(LINE, &[0.0, 1.0, 2.0]));
  assert!(policy.should_split(LINE, &[1.0, 0.0, 2.0]));
}

#[test]
fn test_weighted_variance_of_constant_is_zero() {
  assert_relative_eq!(WeightedSplitPolicy::weighted_variance(LINE, &[3.0, 3.0, 3.0]), 0.0);
}

/// Center sample weighs 1, the two ends 1/2 each.
#[test]
fn test_weighted_variance_weights_center() {
  let variance = WeightedSplitPolicy::weighted_variance(LINE, &[-1.0, 0.0, 1.0]);
  // mean 0, sum w = 2, sum w v^2 = 0.5 + 0.5
  assert_relative_eq!(variance, 0.5, epsilon = 1e-12);
}

#[test]
fn test_weighted_stops_on_small_variance() {
  let coarse = WeightedSplitPolicy::new(0.1).unwrap();
  assert!(coarse.should_split(LINE, &[-1.0, 0.0, 1.0]));
  assert!(!coarse.should_split(LINE, &[-0.1, 0.0, 0.1]));
  // Uniform signs never split regardless of spread.
  assert!(!coarse.should_split(LINE, &[1.0, 50.0, 100.0]));
}

#[test]
fn test_weighted_threshold_validation() {
  assert!(WeightedSplitPolicy::new(0.0).is_ok());
  for bad in [-1.0, f64::NAN, f64::INFINITY] {
    assert!(matches!(
      WeightedSplitPolicy::new(bad),
      Err(SpaceTreeError::NumericDegeneracy(DegeneracyError::InvalidThreshold(_)))
    ));
  }
}

/// Policies are interchangeable behind the trait object.
#[test]
fn test_policies_as_trait_objects() {
  let policies: Vec<Box<dyn SplitPolicy<1>>> = vec![
    Box::new(MidPointSplitPolicy),
    Box::new(WeightedSplitPolicy::new(10.0).unwrap()),
  ];
  let decisions: Vec<bool> = policies
    .iter()
    .map(|p| p.should_split(LINE, &[-1.0, 0.0, 1.0]))
    .collect();
  assert_eq!(decisions, vec![true, false]);
}
