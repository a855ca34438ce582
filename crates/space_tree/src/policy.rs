//! Split policies: decide from a node's samples whether it needs children.
//!
//! Policies see only the sample points and values of one node, so they can
//! be swapped without touching the tree.

use crate::boundary::uniform_signs;
use crate::error::{DegeneracyError, Result};

/// Strategy deciding whether a sampled cell must be subdivided.
pub trait SplitPolicy<const N: usize>: Send + Sync {
  /// `points[i]` produced `values[i]`.
  fn should_split(&self, points: &[[f64; N]], values: &[f64]) -> bool;
}

/// Subdivide unless every value has the sign of the first.
///
/// Sign is the `value > 0.0` test, so exact zeros group with negatives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MidPointSplitPolicy;

impl<const N: usize> SplitPolicy<N> for MidPointSplitPolicy {
  #[inline]
  fn should_split(&self, _points: &[[f64; N]], values: &[f64]) -> bool {
    !uniform_signs(values)
  }
}

/// Subdivide sign-mixed cells whose weighted value variance exceeds a
/// threshold.
///
/// Samples are weighted by `1 / (1 + d / r)`, where `d` is the distance of a
/// sample to the sample centroid and `r` the largest such distance, so
/// central samples count up to twice as much as corner samples. Variance of
/// a smooth field shrinks with the cell, which stops refinement early where
/// the surface is flat relative to the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSplitPolicy {
  min_variance: f64,
}

impl WeightedSplitPolicy {
  pub fn new(min_variance: f64) -> Result<Self> {
    if !min_variance.is_finite() || min_variance < 0.0 {
      return Err(DegeneracyError::InvalidThreshold(min_variance).into());
    }
    Ok(Self { min_variance })
  }

  pub fn min_variance(&self) -> f64 {
    self.min_variance
  }

  /// Centroid-distance weighted variance of `values`.
  pub fn weighted_variance<const N: usize>(points: &[[f64; N]], values: &[f64]) -> f64 {
    if values.is_empty() || points.len() != values.len() {
      return 0.0;
    }

    let inv_count = 1.0 / points.len() as f64;
    let mut centroid = [0.0; N];
    for point in points {
      for axis in 0..N {
        centroid[axis] += point[axis] * inv_count;
      }
    }

    let distances: Vec<f64> = points
      .iter()
      .map(|p| {
        (0..N)
          .map(|axis| (p[axis] - centroid[axis]).powi(2))
          .sum::<f64>()
          .sqrt()
      })
      .collect();
    let radius = distances.iter().copied().fold(0.0, f64::max);

    let weights: Vec<f64> = distances
      .iter()
      .map(|&d| if radius > 0.0 { 1.0 / (1.0 + d / radius) } else { 1.0 })
      .collect();
    let total: f64 = weights.iter().sum();

    let mean = weights.iter().zip(values).map(|(w, v)| w * v).sum::<f64>() / total;
    weights
      .iter()
      .zip(values)
      .map(|(w, v)| w * (v - mean).powi(2))
      .sum::<f64>()
      / total
  }
}

impl<const N: usize> SplitPolicy<N> for WeightedSplitPolicy {
  fn should_split(&self, points: &[[f64; N]], values: &[f64]) -> bool {
    if uniform_signs(values) {
      return false;
    }
    Self::weighted_variance(points, values) > self.min_variance
  }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
