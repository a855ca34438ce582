//! Closed-form field functions for the CSG leaf primitives.
//!
//! All fields are negative inside, positive outside, and zero on the surface.

/// Euclidean distance to a sphere surface: `|p - center| - radius`.
#[inline]
pub fn sphere<const N: usize>(point: &[f64; N], center: &[f64; N], radius: f64) -> f64 {
  let mut dist_sq = 0.0;
  for axis in 0..N {
    let d = point[axis] - center[axis];
    dist_sq += d * d;
  }
  dist_sq.sqrt() - radius
}

/// Exact signed distance to an axis-aligned box.
///
/// Outside: length of the positive part of the per-axis excess.
/// Inside: largest (least negative) per-axis excess.
#[inline]
pub fn aabb<const N: usize>(point: &[f64; N], center: &[f64; N], half_extents: &[f64; N]) -> f64 {
  let mut outside_sq = 0.0;
  let mut inside = f64::NEG_INFINITY;
  for axis in 0..N {
    let d = (point[axis] - center[axis]).abs() - half_extents[axis];
    outside_sq += d.max(0.0).powi(2);
    inside = inside.max(d);
  }
  outside_sq.sqrt() + inside.min(0.0)
}

/// Ellipsoid field scaled to distance units.
///
/// `(|(p - c) / r| - 1) * min(r)`: exact on the surface and sign-correct
/// everywhere, but not a true distance away from it.
#[inline]
pub fn ellipsoid<const N: usize>(point: &[f64; N], center: &[f64; N], radii: &[f64; N]) -> f64 {
  let mut norm_sq = 0.0;
  let mut min_radius = f64::INFINITY;
  for axis in 0..N {
    let d = (point[axis] - center[axis]) / radii[axis];
    norm_sq += d * d;
    min_radius = min_radius.min(radii[axis]);
  }
  (norm_sq.sqrt() - 1.0) * min_radius
}
