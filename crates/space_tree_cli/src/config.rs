//! Run configuration parsing for space classification.

use anyhow::{Context, Result};
use serde::Deserialize;
use space_tree::{Cell, CsgObject, SamplingKind, SpaceTreeConfig, SplitKind, Target};
use std::path::Path;

/// Root of a run file.
#[derive(Debug, Deserialize)]
pub struct Config {
	/// Tree construction parameters (library defaults when omitted).
	#[serde(default)]
	pub tree: TreeConfig,
	/// Root cell of the tree.
	pub domain: DomainConfig,
	/// Shape to classify.
	pub target: TargetConfig,
	/// Element grid for the `fill` command.
	pub fill: Option<FillConfig>,
}

/// Mirror of `SpaceTreeConfig` with TOML-friendly field types.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
	pub arity: usize,
	pub max_depth: usize,
	pub sampler_order: usize,
	pub sampling: Sampling,
	pub split: Split,
	/// Only read when `split = "weighted"`.
	pub min_variance: f64,
	/// 0 = one worker per core, 1 = build on the calling thread.
	pub threads: usize,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
	Cartesian,
	Midpoint,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Split {
	Midpoint,
	Weighted,
}

/// Root cell given by center and edge, or by origin and extents.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DomainConfig {
	Centered { center: [f64; 3], edge: f64 },
	Bounds { origin: [f64; 3], extents: [f64; 3] },
}

/// Preset target shapes.
#[derive(Debug, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TargetConfig {
	Sphere { center: [f64; 3], radius: f64 },
	Ellipsoid { center: [f64; 3], radii: [f64; 3] },
	Box { origin: [f64; 3], extents: [f64; 3] },
	Cube { center: [f64; 3], edge: f64 },
	/// `|p|^2 - 1`.
	UnitQuadric,
}

/// Element grid for fill ratios.
#[derive(Debug, Deserialize)]
pub struct FillConfig {
	/// Elements along x, y, z.
	pub divisions: [usize; 3],
	/// Sample points per axis inside each element.
	#[serde(default = "default_fill_order")]
	pub sampler_order: usize,
	#[serde(default = "default_fill_sampling")]
	pub sampling: Sampling,
}

fn default_fill_order() -> usize {
	10
}

fn default_fill_sampling() -> Sampling {
	Sampling::Cartesian
}

impl Default for TreeConfig {
	fn default() -> Self {
		let defaults = SpaceTreeConfig::default();
		Self {
			arity: defaults.arity,
			max_depth: defaults.max_depth,
			sampler_order: defaults.sampler_order,
			sampling: Sampling::Cartesian,
			split: Split::Midpoint,
			min_variance: 0.0,
			threads: defaults.threads,
		}
	}
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::parse(&content)
	}

	/// Parse and validate TOML text.
	pub fn parse(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).with_context(|| "Failed to parse config TOML")?;

		config
			.tree
			.to_library()
			.validate()
			.with_context(|| "Invalid [tree] section")?;
		config.domain.cell().with_context(|| "Invalid [domain] section")?;
		config.target.build().with_context(|| "Invalid [target] section")?;

		if let Some(fill) = &config.fill {
			if fill.divisions.iter().any(|&d| d == 0) {
				anyhow::bail!("fill divisions must be positive, got {:?}", fill.divisions);
			}
			if fill.sampler_order == 0 {
				anyhow::bail!("fill sampler_order must be positive");
			}
		}

		Ok(config)
	}
}

impl TreeConfig {
	pub fn to_library(&self) -> SpaceTreeConfig {
		SpaceTreeConfig {
			arity: self.arity,
			max_depth: self.max_depth,
			sampler_order: self.sampler_order,
			sampling: self.sampling.into(),
			split: match self.split {
				Split::Midpoint => SplitKind::MidPoint,
				Split::Weighted => SplitKind::Weighted {
					min_variance: self.min_variance,
				},
			},
			threads: self.threads,
		}
	}
}

impl From<Sampling> for SamplingKind {
	fn from(sampling: Sampling) -> Self {
		match sampling {
			Sampling::Cartesian => SamplingKind::Cartesian,
			Sampling::Midpoint => SamplingKind::Midpoint,
		}
	}
}

impl DomainConfig {
	pub fn cell(&self) -> space_tree::Result<Cell<3>> {
		match *self {
			DomainConfig::Centered { center, edge } => Cell::from_center_edge(center, edge),
			DomainConfig::Bounds { origin, extents } => Cell::new(origin, extents),
		}
	}
}

impl TargetConfig {
	pub fn build(&self) -> space_tree::Result<Shape> {
		let csg = match *self {
			TargetConfig::Sphere { center, radius } => CsgObject::sphere(center, radius)?,
			TargetConfig::Ellipsoid { center, radii } => CsgObject::ellipsoid(center, radii)?,
			TargetConfig::Box { origin, extents } => CsgObject::cuboid(origin, extents)?,
			TargetConfig::Cube { center, edge } => CsgObject::cube(center, edge)?,
			TargetConfig::UnitQuadric => return Ok(Shape::UnitQuadric),
		};
		Ok(Shape::Csg(csg))
	}
}

/// Resolved target.
#[derive(Debug, Clone)]
pub enum Shape {
	Csg(CsgObject<3>),
	UnitQuadric,
}

impl Target<3> for Shape {
	fn at(&self, p: &[f64; 3]) -> f64 {
		match self {
			Shape::Csg(csg) => csg.at(p),
			Shape::UnitQuadric => p[0] * p[0] + p[1] * p[1] + p[2] * p[2] - 1.0,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SPHERE_RUN: &str = r#"
[tree]
max_depth = 3
sampler_order = 5

[domain]
center = [0.0, 0.0, 0.0]
edge = 4.0

[target]
shape = "unit_quadric"
"#;

	#[test]
	fn test_parse_sphere_run() {
		let config = Config::parse(SPHERE_RUN).unwrap();
		let tree = config.tree.to_library();
		assert_eq!(tree.max_depth, 3);
		assert_eq!(tree.sampler_order, 5);
		assert_eq!(tree.arity, 2);
		assert_eq!(config.domain.cell().unwrap().min, [-2.0; 3]);
		assert!(config.target.build().unwrap().at(&[0.0; 3]) < 0.0);
		assert!(config.fill.is_none());
	}

	#[test]
	fn test_parse_fill_run() {
		let config = Config::parse(
			r#"
[tree]
split = "weighted"
min_variance = 0.25

[domain]
origin = [0.0, 0.0, 0.0]
extents = [60.0, 24.0, 12.0]

[target]
shape = "ellipsoid"
center = [30.0, 12.0, 6.0]
radii = [20.0, 8.0, 4.0]

[fill]
divisions = [60, 24, 12]
"#,
		)
		.unwrap();
		assert_eq!(
			config.tree.to_library().split,
			SplitKind::Weighted { min_variance: 0.25 }
		);
		let fill = config.fill.unwrap();
		assert_eq!(fill.divisions, [60, 24, 12]);
		assert_eq!(fill.sampler_order, 10);
		assert_eq!(fill.sampling, Sampling::Cartesian);
	}

	#[test]
	fn test_rejects_invalid_values() {
		let bad_order = SPHERE_RUN.replace("sampler_order = 5", "sampler_order = 1");
		assert!(Config::parse(&bad_order).is_err());

		let bad_edge = SPHERE_RUN.replace("edge = 4.0", "edge = 0.0");
		assert!(Config::parse(&bad_edge).is_err());

		let bad_radius = SPHERE_RUN.replace(
			"shape = \"unit_quadric\"",
			"shape = \"sphere\"\ncenter = [0.0, 0.0, 0.0]\nradius = -1.0",
		);
		assert!(Config::parse(&bad_radius).is_err());

		let bad_fill = format!("{}\n[fill]\ndivisions = [4, 0, 4]\n", SPHERE_RUN);
		assert!(Config::parse(&bad_fill).is_err());
	}
}
