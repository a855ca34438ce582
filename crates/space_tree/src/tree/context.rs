//! Shared, immutable configuration referenced by every node of a tree.

use std::sync::Arc;

use crate::constants::MIN_TREE_ORDER;
use crate::error::{ConfigurationError, DegeneracyError, Result};
use crate::policy::SplitPolicy;
use crate::radix::checked_pow;
use crate::sampler::Sampler;

/// Arity, sampler, and split policy of one tree.
///
/// Held behind an `Arc` by the tree and by every detached subtree built on a
/// worker thread, so nodes never own or copy a sampler or policy.
pub struct TreeContext<const N: usize> {
  arity: usize,
  child_count: usize,
  sample_count: usize,
  sampler: Arc<dyn Sampler<N>>,
  policy: Arc<dyn SplitPolicy<N>>,
}

impl<const N: usize> TreeContext<N> {
  /// Validate arity and sample count up front so `divide` never meets an
  /// overflowing `M^N` or `order^N`. Samplers below [`MIN_TREE_ORDER`] are
  /// rejected.
  pub fn new(
    arity: usize,
    sampler: Arc<dyn Sampler<N>>,
    policy: Arc<dyn SplitPolicy<N>>,
  ) -> Result<Arc<Self>> {
    if arity < 2 {
      return Err(ConfigurationError::InvalidArity(arity).into());
    }
    if N == 0 {
      return Err(ConfigurationError::InvalidDigitCount.into());
    }
    let child_count = checked_pow(arity, N)?;
    let sample_count = sampler.point_count()?;
    if sampler.order() < MIN_TREE_ORDER {
      return Err(
        DegeneracyError::SamplerOrder {
          order: sampler.order(),
          minimum: MIN_TREE_ORDER,
        }
        .into(),
      );
    }

    Ok(Arc::new(Self {
      arity,
      child_count,
      sample_count,
      sampler,
      policy,
    }))
  }

  /// Convenience constructor taking concrete strategies.
  pub fn with<S, P>(arity: usize, sampler: S, policy: P) -> Result<Arc<Self>>
  where
    S: Sampler<N> + 'static,
    P: SplitPolicy<N> + 'static,
  {
    Self::new(arity, Arc::new(sampler), Arc::new(policy))
  }

  /// Intervals per axis when a node splits (M).
  #[inline]
  pub fn arity(&self) -> usize {
    self.arity
  }

  /// Children of every internal node (M^N).
  #[inline]
  pub fn child_count(&self) -> usize {
    self.child_count
  }

  /// Sampled values per evaluated node (order^N).
  #[inline]
  pub fn sample_count(&self) -> usize {
    self.sample_count
  }

  #[inline]
  pub fn sampler(&self) -> &dyn Sampler<N> {
    self.sampler.as_ref()
  }

  #[inline]
  pub fn policy(&self) -> &dyn SplitPolicy<N> {
    self.policy.as_ref()
  }
}

impl<const N: usize> std::fmt::Debug for TreeContext<N> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TreeContext")
      .field("dimension", &N)
      .field("arity", &self.arity)
      .field("child_count", &self.child_count)
      .field("sample_count", &self.sample_count)
      .finish_non_exhaustive()
  }
}
