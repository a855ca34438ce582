//! Deterministic sample-point generators.
//!
//! A sampler turns a cell into `order^N` points on a tensor-product grid.
//! Points are emitted row-major: axis 0 varies slowest, axis N-1 fastest,
//! matching [`crate::radix::base_n`] with `base = order`. Downstream code
//! indexes sampled values positionally, so this order is part of the
//! contract.
//!
//! # Endpoint policy
//!
//! - [`CartesianGridSampler`]: inclusive. Points sit on the cell faces and
//!   corners; spacing = extent / (order - 1). Requires order >= 2.
//! - [`MidpointGridSampler`]: exclusive. Points sit at the centers of
//!   `order` equal sub-intervals; order 1 is the cell center.

use crate::cell::Cell;
use crate::constants::{MIN_INCLUSIVE_ORDER, MIN_MIDPOINT_ORDER};
use crate::error::{DegeneracyError, Result};
use crate::radix::checked_pow;

/// Strategy producing the evaluation points of a cell.
///
/// Implementations are immutable and shared by every node of a tree.
pub trait Sampler<const N: usize>: Send + Sync {
  /// Points per axis.
  fn order(&self) -> usize;

  /// Total points per cell (`order^N`).
  fn point_count(&self) -> Result<usize> {
    checked_pow(self.order(), N)
  }

  /// Sample points of `cell` in row-major order.
  fn sample_points(&self, cell: &Cell<N>) -> Result<Vec<[f64; N]>>;
}

/// Endpoint-inclusive regular grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CartesianGridSampler {
  order: usize,
}

impl CartesianGridSampler {
  /// Fails for order < 2: a single inclusive point has no spacing, and
  /// sign-uniformity over one value is vacuous.
  pub fn new(order: usize) -> Result<Self> {
    if order < MIN_INCLUSIVE_ORDER {
      return Err(
        DegeneracyError::SamplerOrder {
          order,
          minimum: MIN_INCLUSIVE_ORDER,
        }
        .into(),
      );
    }
    Ok(Self { order })
  }

  pub fn order(&self) -> usize {
    self.order
  }
}

impl<const N: usize> Sampler<N> for CartesianGridSampler {
  fn order(&self) -> usize {
    self.order
  }

  fn sample_points(&self, cell: &Cell<N>) -> Result<Vec<[f64; N]>> {
    let last = (self.order - 1) as f64;
    grid_points(cell, self.order, |min, max, i| {
      if i + 1 == self.order {
        max
      } else {
        min + (max - min) * (i as f64 / last)
      }
    })
  }
}

/// Cell-centered regular grid (midpoint quadrature nodes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MidpointGridSampler {
  order: usize,
}

impl MidpointGridSampler {
  pub fn new(order: usize) -> Result<Self> {
    if order < MIN_MIDPOINT_ORDER {
      return Err(
        DegeneracyError::SamplerOrder {
          order,
          minimum: MIN_MIDPOINT_ORDER,
        }
        .into(),
      );
    }
    Ok(Self { order })
  }

  pub fn order(&self) -> usize {
    self.order
  }
}

impl<const N: usize> Sampler<N> for MidpointGridSampler {
  fn order(&self) -> usize {
    self.order
  }

  fn sample_points(&self, cell: &Cell<N>) -> Result<Vec<[f64; N]>> {
    let n = self.order as f64;
    grid_points(cell, self.order, |min, max, i| {
      min + (max - min) * ((i as f64 + 0.5) / n)
    })
  }
}

/// Tensor-product grid with per-axis coordinates from `coord(min, max, i)`.
fn grid_points<const N: usize>(
  cell: &Cell<N>,
  order: usize,
  coord: impl Fn(f64, f64, usize) -> f64,
) -> Result<Vec<[f64; N]>> {
  let count = checked_pow(order, N)?;

  let axes: Vec<Vec<f64>> = (0..N)
    .map(|axis| {
      (0..order)
        .map(|i| coord(cell.min[axis], cell.max[axis], i))
        .collect()
    })
    .collect();

  let mut points = Vec::with_capacity(count);
  let mut digits = [0usize; N];
  for _ in 0..count {
    let mut point = [0.0; N];
    for axis in 0..N {
      point[axis] = axes[axis][digits[axis]];
    }
    points.push(point);

    // Odometer increment, last axis fastest.
    for axis in (0..N).rev() {
      digits[axis] += 1;
      if digits[axis] < order {
        break;
      }
      digits[axis] = 0;
    }
  }
  Ok(points)
}

#[cfg(test)]
#[path = "sampler_test.rs"]
mod sampler_test;
