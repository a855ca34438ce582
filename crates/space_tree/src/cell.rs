//! Axis-aligned N-dimensional cell owned by one tree node.

use crate::error::{ConfigurationError, DegeneracyError, Result};

/// Axis-aligned hyper-box with inclusive bounds.
///
/// Stored as min/max corners so that sibling cells produced by [`Cell::child`]
/// share bit-identical faces: the partition boundary between digit `d` and
/// `d + 1` is computed by one expression and reused by both children.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell<const N: usize> {
  /// Minimum corner (the cell origin).
  pub min: [f64; N],
  /// Maximum corner.
  pub max: [f64; N],
}

impl<const N: usize> Cell<N> {
  /// Create a cell from its origin and per-axis extents.
  pub fn new(origin: [f64; N], extent: [f64; N]) -> Result<Self> {
    let mut max = origin;
    for axis in 0..N {
      max[axis] += extent[axis];
    }
    Self::from_bounds(origin, max)
  }

  /// Create a cell from min and max corners.
  pub fn from_bounds(min: [f64; N], max: [f64; N]) -> Result<Self> {
    let cell = Self { min, max };
    cell.validate()?;
    Ok(cell)
  }

  /// Create a cube from its center and edge length.
  pub fn from_center_edge(center: [f64; N], edge: f64) -> Result<Self> {
    let half = edge * 0.5;
    let mut min = center;
    let mut max = center;
    for axis in 0..N {
      min[axis] -= half;
      max[axis] += half;
    }
    Self::from_bounds(min, max)
  }

  /// Reject non-finite corners and zero-length axes.
  pub fn validate(&self) -> Result<()> {
    for axis in 0..N {
      if !self.min[axis].is_finite() || !self.max[axis].is_finite() {
        return Err(DegeneracyError::NonFiniteGeometry { axis }.into());
      }
      let extent = self.max[axis] - self.min[axis];
      if extent <= 0.0 {
        return Err(DegeneracyError::ZeroExtent { axis, extent }.into());
      }
    }
    Ok(())
  }

  /// Minimum corner.
  #[inline]
  pub fn origin(&self) -> [f64; N] {
    self.min
  }

  /// Per-axis size (max - min).
  #[inline]
  pub fn extent(&self) -> [f64; N] {
    let mut extent = [0.0; N];
    for axis in 0..N {
      extent[axis] = self.max[axis] - self.min[axis];
    }
    extent
  }

  /// Center point.
  #[inline]
  pub fn center(&self) -> [f64; N] {
    let mut center = [0.0; N];
    for axis in 0..N {
      center[axis] = (self.min[axis] + self.max[axis]) * 0.5;
    }
    center
  }

  /// Largest extent. Equals the edge length for cube cells.
  #[inline]
  pub fn edge_length(&self) -> f64 {
    self.extent().into_iter().fold(0.0, f64::max)
  }

  /// Product of extents.
  #[inline]
  pub fn volume(&self) -> f64 {
    self.extent().into_iter().product()
  }

  /// Inclusive point containment.
  #[inline]
  pub fn contains_point(&self, point: &[f64; N]) -> bool {
    (0..N).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
  }

  /// Cell of the child addressed by `digits` when splitting into `arity`
  /// equal intervals per axis.
  ///
  /// `digits[k]` selects the interval along axis `k`.
  pub fn child(&self, digits: &[usize], arity: usize) -> Result<Self> {
    if arity < 2 {
      return Err(ConfigurationError::InvalidArity(arity).into());
    }
    if digits.len() != N {
      return Err(ConfigurationError::InvalidDigitCount.into());
    }

    let mut min = self.min;
    let mut max = self.max;
    for (axis, &digit) in digits.iter().enumerate() {
      if digit >= arity {
        return Err(
          ConfigurationError::DigitOutOfRange {
            digit,
            position: axis,
            base: arity,
          }
          .into(),
        );
      }
      min[axis] = self.partition(axis, digit, arity);
      max[axis] = self.partition(axis, digit + 1, arity);
    }

    // Deep trees can shrink an axis below float resolution.
    Self::from_bounds(min, max)
  }

  /// Coordinate of the `k`-th of `arity + 1` partition planes on `axis`.
  #[inline]
  fn partition(&self, axis: usize, k: usize, arity: usize) -> f64 {
    if k == 0 {
      self.min[axis]
    } else if k == arity {
      self.max[axis]
    } else {
      let t = k as f64 / arity as f64;
      self.min[axis] + (self.max[axis] - self.min[axis]) * t
    }
  }
}

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;
