//! Default tuning constants for tree construction.
//!
//! ```text
//! children per internal node = ARITY^N
//! samples per node           = ORDER^N
//! child edge                 = parent edge / ARITY
//! ```

/// Default subdivision arity (binary split per axis).
pub const DEFAULT_ARITY: usize = 2;

/// Default points per axis for the Cartesian grid sampler.
pub const DEFAULT_SAMPLER_ORDER: usize = 5;

/// Default maximum subdivision depth (root is depth 0).
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Worker thread count meaning "let rayon decide".
pub const AUTO_THREADS: usize = 0;

/// Smallest order accepted by the endpoint-inclusive grid sampler.
/// spacing = extent / (order - 1)
pub const MIN_INCLUSIVE_ORDER: usize = 2;

/// Smallest order accepted by the cell-centered grid sampler.
pub const MIN_MIDPOINT_ORDER: usize = 1;

/// Smallest sampler order a tree accepts. A single sample per node can
/// never show a sign change, so nothing would ever split.
pub const MIN_TREE_ORDER: usize = 2;

/// Inline capacity of mixed-radix digit vectors (one digit per axis).
pub const INLINE_DIGITS: usize = 4;

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
