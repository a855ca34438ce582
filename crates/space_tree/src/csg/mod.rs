//! Implicit CSG targets.
//!
//! A target maps a point to a scalar field value: negative (or zero) inside,
//! positive outside. Tree nodes only ever call [`Target::at`], so any
//! `Fn(&[f64; N]) -> f64` closure works as well as a [`CsgObject`].
//!
//! # Composition
//!
//! | Operator | Boolean | Scalar |
//! | --- | --- | --- |
//! | Union | `a \|\| b` | `min(a, b)` |
//! | Intersection | `a && b` | `max(a, b)` |
//! | Difference | `a && !b` | `max(a, -b)` |
//!
//! The surface of a difference's right operand belongs to that operand, so
//! `-b` is nudged above zero there and the scalar agrees with `contains`.

pub mod primitives;

use std::sync::Arc;

use crate::error::{DegeneracyError, Result};

/// Implicit function sampled by tree nodes.
///
/// Implementations must be pure: nodes of one tree evaluate the same target
/// concurrently from several worker threads.
pub trait Target<const N: usize>: Sync {
  /// Field value at `point`. Inside is `!(value > 0.0)`.
  fn at(&self, point: &[f64; N]) -> f64;
}

impl<const N: usize, F> Target<N> for F
where
  F: Fn(&[f64; N]) -> f64 + Sync,
{
  #[inline]
  fn at(&self, point: &[f64; N]) -> f64 {
    self(point)
  }
}

/// Tagged-variant CSG expression. Immutable once built.
///
/// Operands are shared, so a sub-expression can appear in several
/// composites without being cloned.
#[derive(Clone, Debug, PartialEq)]
pub enum CsgObject<const N: usize> {
  /// Contains nothing.
  Empty,
  /// Contains everything.
  Infinite,
  /// Axis-aligned box.
  Box {
    center: [f64; N],
    half_extents: [f64; N],
  },
  /// Round ball.
  Sphere { center: [f64; N], radius: f64 },
  /// Box with equal edges.
  Cube { center: [f64; N], edge: f64 },
  /// Axis-aligned ellipsoid.
  Ellipsoid { center: [f64; N], radii: [f64; N] },
  Union(Arc<CsgObject<N>>, Arc<CsgObject<N>>),
  Intersection(Arc<CsgObject<N>>, Arc<CsgObject<N>>),
  Difference(Arc<CsgObject<N>>, Arc<CsgObject<N>>),
}

fn positive(what: &'static str, value: f64) -> Result<()> {
  if value > 0.0 && value.is_finite() {
    Ok(())
  } else {
    Err(DegeneracyError::NonPositiveSize { what, value }.into())
  }
}

impl<const N: usize> CsgObject<N> {
  pub fn empty() -> Self {
    Self::Empty
  }

  pub fn infinite() -> Self {
    Self::Infinite
  }

  /// Box spanning `origin .. origin + extents`.
  pub fn cuboid(origin: [f64; N], extents: [f64; N]) -> Result<Self> {
    let mut center = origin;
    let mut half_extents = extents;
    for axis in 0..N {
      positive("box extent", extents[axis])?;
      half_extents[axis] = extents[axis] * 0.5;
      center[axis] += half_extents[axis];
    }
    Ok(Self::Box {
      center,
      half_extents,
    })
  }

  pub fn sphere(center: [f64; N], radius: f64) -> Result<Self> {
    positive("sphere radius", radius)?;
    Ok(Self::Sphere { center, radius })
  }

  pub fn cube(center: [f64; N], edge: f64) -> Result<Self> {
    positive("cube edge", edge)?;
    Ok(Self::Cube { center, edge })
  }

  pub fn ellipsoid(center: [f64; N], radii: [f64; N]) -> Result<Self> {
    for radius in radii {
      positive("ellipsoid radius", radius)?;
    }
    Ok(Self::Ellipsoid { center, radii })
  }

  pub fn union(self, other: Self) -> Self {
    Self::Union(Arc::new(self), Arc::new(other))
  }

  pub fn intersection(self, other: Self) -> Self {
    Self::Intersection(Arc::new(self), Arc::new(other))
  }

  /// Points in `self` that are not in `other`.
  pub fn difference(self, other: Self) -> Self {
    Self::Difference(Arc::new(self), Arc::new(other))
  }

  /// Scalar field value. Negative inside, positive outside.
  pub fn at(&self, point: &[f64; N]) -> f64 {
    match self {
      Self::Empty => f64::INFINITY,
      Self::Infinite => f64::NEG_INFINITY,
      Self::Box {
        center,
        half_extents,
      } => primitives::aabb(point, center, half_extents),
      Self::Sphere { center, radius } => primitives::sphere(point, center, *radius),
      Self::Cube { center, edge } => primitives::aabb(point, center, &[edge * 0.5; N]),
      Self::Ellipsoid { center, radii } => primitives::ellipsoid(point, center, radii),
      Self::Union(a, b) => a.at(point).min(b.at(point)),
      Self::Intersection(a, b) => a.at(point).max(b.at(point)),
      Self::Difference(a, b) => a.at(point).max(complement(b.at(point))),
    }
  }

  /// Exact boolean membership. Surfaces count as inside.
  pub fn contains(&self, point: &[f64; N]) -> bool {
    match self {
      Self::Empty => false,
      Self::Infinite => true,
      Self::Union(a, b) => a.contains(point) || b.contains(point),
      Self::Intersection(a, b) => a.contains(point) && b.contains(point),
      Self::Difference(a, b) => a.contains(point) && !b.contains(point),
      primitive => !(primitive.at(point) > 0.0),
    }
  }
}

/// Negated field with zero mapped to the smallest positive value.
#[inline]
fn complement(value: f64) -> f64 {
  if value == 0.0 {
    f64::MIN_POSITIVE
  } else {
    -value
  }
}

impl<const N: usize> Target<N> for CsgObject<N> {
  #[inline]
  fn at(&self, point: &[f64; N]) -> f64 {
    CsgObject::at(self, point)
  }
}
