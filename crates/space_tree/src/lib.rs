//! space_tree - Adaptive N-dimensional mixed-radix space subdivision
//!
//! This crate classifies space against an implicit target by recursively
//! splitting a cell into `M^N` children wherever the target's zero level set
//! passes through it. The dimension `N` is a const generic, the arity `M`
//! a runtime parameter.
//!
//! # Features
//!
//! - **CSG targets**: boxes, spheres, cubes, ellipsoids and their boolean
//!   combinations, or any `Fn(&[f64; N]) -> f64` closure
//! - **Pluggable sampling**: endpoint-inclusive or cell-centered grids
//! - **Pluggable split policies**: sign change, or sign change weighted by
//!   field variance
//! - **Arena storage**: nodes in one `Vec`, children as index ranges
//! - **Parallel division** on a bounded worker pool with a join barrier
//! - **Export**: CSV dump of every node, VTK point cloud of leaves
//!
//! # Example
//!
//! ```ignore
//! use space_tree::{boundary_nodes, Cell, SpaceTree, SpaceTreeConfig};
//!
//! let config = SpaceTreeConfig { max_depth: 3, ..Default::default() };
//! let root = Cell::from_bounds([-2.0; 3], [2.0; 3])?;
//! let mut tree = SpaceTree::new(root, config.context::<3>()?)?;
//!
//! // Unit sphere as a quadric.
//! tree.build(&|p: &[f64; 3]| p[0] * p[0] + p[1] * p[1] + p[2] * p[2] - 1.0, config.max_depth)?;
//!
//! println!("{} nodes, {} on the surface", tree.node_count(), boundary_nodes(&tree).len());
//! ```

pub mod constants;
pub mod error;

pub use error::{ConfigurationError, DegeneracyError, PreconditionError, Result, SpaceTreeError};

// Mixed-radix index encoding
pub mod radix;
pub use radix::{base10, base_n, checked_pow, digit_count_for, Digits};

// Axis-aligned cells and child placement
pub mod cell;
pub use cell::Cell;

// Implicit geometry
pub mod csg;
pub use csg::{CsgObject, Target};

// Sampling and split strategies
pub mod policy;
pub mod sampler;
pub use policy::{MidPointSplitPolicy, SplitPolicy, WeightedSplitPolicy};
pub use sampler::{CartesianGridSampler, MidpointGridSampler, Sampler};

pub mod config;
pub use config::{SamplingKind, SpaceTreeConfig, SplitKind};

// Bounded worker pool
pub mod threading;
pub use threading::{JobCompletion, JobId, WorkerPool};

// The tree itself
pub mod tree;
pub use tree::{build_parallel, divide_parallel, NodeId, SpaceTree, SpaceTreeNode, TreeContext, TreeStats};

// Queries and output
pub mod boundary;
pub mod export;
pub mod fill;
pub use boundary::{
  boundary_centers, boundary_nodes, boundary_nodes_par, boundary_points_flat, boundary_points_vec3,
  uniform_signs,
};
pub use export::{save_space_tree, save_vtk, write_space_tree, write_vtk};
pub use fill::{element_fill_ratios, fill_ratio};
