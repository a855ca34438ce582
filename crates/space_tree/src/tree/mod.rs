//! Adaptive mixed-radix space tree.
//!
//! - [`TreeContext`]: arity, sampler and split policy shared by all nodes
//! - [`SpaceTree`]: node arena with `evaluate`, `divide` and `visit`
//! - [`divide_parallel`]: the same division fanned out over a [`WorkerPool`]
//!
//! [`WorkerPool`]: crate::threading::WorkerPool

mod arena;
mod context;
mod node;
mod parallel;
mod stats;

pub use arena::SpaceTree;
pub use context::TreeContext;
pub use node::{NodeId, SpaceTreeNode};
pub use parallel::{build_parallel, divide_parallel};
pub use stats::TreeStats;
