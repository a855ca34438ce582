//! Volume fractions from sampled values.
//!
//! A cell's fill ratio is the share of its samples that lie inside the
//! target (`!(value > 0.0)`), a sample-count estimate of the occupied volume
//! fraction. [`element_fill_ratios`] applies it to every element of a regular
//! grid, e.g. to seed a density field for a finite element mesh.

use rayon::prelude::*;

use crate::cell::Cell;
use crate::csg::Target;
use crate::error::{ConfigurationError, DegeneracyError, Result};
use crate::sampler::Sampler;

/// Fraction of values inside the target, in [0, 1]. Empty input is 0.
pub fn fill_ratio(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  let inside = values.iter().filter(|v| !(**v > 0.0)).count();
  inside as f64 / values.len() as f64
}

/// Fill ratio of each element of `domain` split into `divisions[k]` equal
/// intervals along axis `k`.
///
/// Elements are returned row-major (axis 0 slowest), the same order the
/// samplers use for points. Elements are sampled in parallel on the global
/// rayon pool.
pub fn element_fill_ratios<const N: usize, T, S>(
  target: &T,
  domain: &Cell<N>,
  divisions: [usize; N],
  sampler: &S,
) -> Result<Vec<f64>>
where
  T: Target<N> + ?Sized,
  S: Sampler<N> + ?Sized,
{
  domain.validate()?;
  let mut total: usize = 1;
  for &count in &divisions {
    if count == 0 {
      return Err(
        DegeneracyError::NonPositiveSize {
          what: "element divisions",
          value: 0.0,
        }
        .into(),
      );
    }
    total = total
      .checked_mul(count)
      .ok_or(ConfigurationError::ChildCountOverflow { base: count, exponent: N })?;
  }

  let ratios = (0..total)
    .into_par_iter()
    .map(|index| -> Result<f64> {
      let element = element_cell(domain, &divisions, index)?;
      let points = sampler.sample_points(&element)?;
      let values: Vec<f64> = points.iter().map(|p| target.at(p)).collect();
      Ok(fill_ratio(&values))
    })
    .collect::<Result<Vec<f64>>>()?;

  tracing::debug!(elements = total, "element fill ratios computed");
  Ok(ratios)
}

/// Cell of the row-major element `index`.
fn element_cell<const N: usize>(domain: &Cell<N>, divisions: &[usize; N], index: usize) -> Result<Cell<N>> {
  let mut min = domain.min;
  let mut max = domain.max;
  let mut rest = index;
  for axis in (0..N).rev() {
    let count = divisions[axis];
    let digit = rest % count;
    rest /= count;

    let lo = domain.min[axis];
    let hi = domain.max[axis];
    let plane = |k: usize| {
      if k == count {
        hi
      } else {
        lo + (hi - lo) * (k as f64 / count as f64)
      }
    };
    min[axis] = plane(digit);
    max[axis] = plane(digit + 1);
  }
  Cell::from_bounds(min, max)
}

#[cfg(test)]
#[path = "fill_test.rs"]
mod fill_test;
