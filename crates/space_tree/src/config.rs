//! SpaceTreeConfig - tree construction parameters in one plain struct.

use std::sync::Arc;

use crate::constants::{
  AUTO_THREADS, DEFAULT_ARITY, DEFAULT_MAX_DEPTH, DEFAULT_SAMPLER_ORDER, MIN_TREE_ORDER,
};
use crate::error::{ConfigurationError, DegeneracyError, Result};
use crate::policy::{MidPointSplitPolicy, SplitPolicy, WeightedSplitPolicy};
use crate::sampler::{CartesianGridSampler, MidpointGridSampler, Sampler};
use crate::threading::WorkerPool;
use crate::tree::TreeContext;

/// Sample point layout inside a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SamplingKind {
  /// Endpoint-inclusive grid, see [`CartesianGridSampler`].
  #[default]
  Cartesian,
  /// Cell-centered grid, see [`MidpointGridSampler`].
  Midpoint,
}

/// Subdivision criterion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SplitKind {
  /// Split whenever sample signs differ.
  #[default]
  MidPoint,
  /// Split sign-mixed cells whose weighted variance exceeds `min_variance`.
  Weighted { min_variance: f64 },
}

/// Configuration for tree construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SpaceTreeConfig {
  /// Intervals per axis when a node splits (M).
  pub arity: usize,

  /// Nodes at this depth are never split. Root is depth 0.
  pub max_depth: usize,

  /// Sample points per axis.
  pub sampler_order: usize,

  pub sampling: SamplingKind,

  pub split: SplitKind,

  /// Worker threads for parallel division, 0 = rayon default.
  pub threads: usize,
}

impl SpaceTreeConfig {
  /// Check every parameter without building anything.
  pub fn validate(&self) -> Result<()> {
    if self.arity < 2 {
      return Err(ConfigurationError::InvalidArity(self.arity).into());
    }
    // Constructors carry the per-kind validation.
    self.sampler::<1>()?;
    if self.sampler_order < MIN_TREE_ORDER {
      return Err(
        DegeneracyError::SamplerOrder {
          order: self.sampler_order,
          minimum: MIN_TREE_ORDER,
        }
        .into(),
      );
    }
    self.policy::<1>()?;
    Ok(())
  }

  /// Sampler selected by `sampling` and `sampler_order`.
  pub fn sampler<const N: usize>(&self) -> Result<Arc<dyn Sampler<N>>> {
    let sampler: Arc<dyn Sampler<N>> = match self.sampling {
      SamplingKind::Cartesian => Arc::new(CartesianGridSampler::new(self.sampler_order)?),
      SamplingKind::Midpoint => Arc::new(MidpointGridSampler::new(self.sampler_order)?),
    };
    Ok(sampler)
  }

  /// Split policy selected by `split`.
  pub fn policy<const N: usize>(&self) -> Result<Arc<dyn SplitPolicy<N>>> {
    let policy: Arc<dyn SplitPolicy<N>> = match self.split {
      SplitKind::MidPoint => Arc::new(MidPointSplitPolicy),
      SplitKind::Weighted { min_variance } => Arc::new(WeightedSplitPolicy::new(min_variance)?),
    };
    Ok(policy)
  }

  /// Shared context for an N-dimensional tree.
  ///
  /// Also checks that `arity^N` and `order^N` fit in `usize`.
  pub fn context<const N: usize>(&self) -> Result<Arc<TreeContext<N>>> {
    self.validate()?;
    TreeContext::new(self.arity, self.sampler()?, self.policy()?)
  }

  /// Worker pool sized by `threads`.
  pub fn worker_pool<T: Send + 'static>(&self) -> Result<WorkerPool<T>> {
    WorkerPool::new(self.threads)
  }
}

impl Default for SpaceTreeConfig {
  fn default() -> Self {
    Self {
      arity: DEFAULT_ARITY,
      max_depth: DEFAULT_MAX_DEPTH,
      sampler_order: DEFAULT_SAMPLER_ORDER,
      sampling: SamplingKind::Cartesian,
      split: SplitKind::MidPoint,
      threads: AUTO_THREADS,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::SpaceTreeError;

  #[test]
  fn test_default_is_valid() {
    let config = SpaceTreeConfig::default();
    config.validate().unwrap();
    let ctx = config.context::<3>().unwrap();
    assert_eq!(ctx.arity(), 2);
    assert_eq!(ctx.child_count(), 8);
    assert_eq!(ctx.sample_count(), 125);
  }

  #[test]
  fn test_invalid_arity() {
    let config = SpaceTreeConfig {
      arity: 1,
      ..Default::default()
    };
    assert!(matches!(
      config.validate(),
      Err(SpaceTreeError::Configuration(ConfigurationError::InvalidArity(1)))
    ));
  }

  #[test]
  fn test_sampler_order_depends_on_kind() {
    let mut config = SpaceTreeConfig {
      sampler_order: 1,
      ..Default::default()
    };
    assert!(matches!(
      config.validate(),
      Err(SpaceTreeError::NumericDegeneracy(DegeneracyError::SamplerOrder { order: 1, .. }))
    ));
    // A single cell-centered sample is a valid sampler but never splits a tree.
    config.sampling = SamplingKind::Midpoint;
    config.sampler::<2>().unwrap();
    assert!(matches!(
      config.context::<2>(),
      Err(SpaceTreeError::NumericDegeneracy(DegeneracyError::SamplerOrder {
        order: 1,
        minimum: 2
      }))
    ));

    config.sampler_order = 2;
    assert_eq!(config.context::<2>().unwrap().sample_count(), 4);
  }

  #[test]
  fn test_weighted_threshold_checked() {
    let config = SpaceTreeConfig {
      split: SplitKind::Weighted { min_variance: -1.0 },
      ..Default::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn test_overflowing_context() {
    let config = SpaceTreeConfig {
      arity: 1 << 20,
      ..Default::default()
    };
    assert!(config.context::<8>().is_err());
    assert!(config.context::<2>().is_ok());
  }
}
