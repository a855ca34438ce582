//! Error types for tree construction, sampling, and export.
//!
//! Failures are never retried or silently defaulted: classification is
//! deterministic, so an error aborts the subtree being built and travels up
//! to the top-level `divide` call.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SpaceTreeError>;

/// Top-level error returned by every fallible operation.
#[derive(Error, Debug)]
pub enum SpaceTreeError {
  /// Invalid static configuration. Unrecoverable.
  #[error("configuration error: {0}")]
  Configuration(#[from] ConfigurationError),

  /// An operation was called on a node in the wrong state.
  #[error("precondition violated: {0}")]
  Precondition(#[from] PreconditionError),

  /// Geometry or sampling parameters that cannot produce meaningful samples.
  #[error("numeric degeneracy: {0}")]
  NumericDegeneracy(#[from] DegeneracyError),

  /// A job submitted to the worker pool returned an error or panicked.
  #[error("worker job {job} failed: {message}")]
  JobFailed {
    /// Id of the failed job.
    job: u64,
    /// Rendered error or panic payload.
    message: String,
  },

  /// Writer failure during export.
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// Invalid mixed-radix parameters, arity, or pool setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
  #[error("radix base must be at least 2, got {0}")]
  InvalidBase(usize),

  #[error("digit count must be at least 1")]
  InvalidDigitCount,

  #[error("{value} does not fit in {digits} digits of base {base}")]
  BaseOverflow {
    value: usize,
    base: usize,
    digits: usize,
  },

  #[error("digit {digit} at position {position} is out of range for base {base}")]
  DigitOutOfRange {
    digit: usize,
    position: usize,
    base: usize,
  },

  #[error("subdivision arity must be at least 2, got {0}")]
  InvalidArity(usize),

  #[error("{base}^{exponent} overflows usize")]
  ChildCountOverflow { base: usize, exponent: usize },

  #[error("failed to build worker pool: {0}")]
  ThreadPool(String),
}

/// Node-state violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreconditionError {
  #[error("node {0} has no sampled values; call evaluate before divide")]
  NotEvaluated(usize),

  #[error("node {0} already has children")]
  AlreadyDivided(usize),

  #[error("node {0} does not exist in this tree")]
  UnknownNode(usize),

  #[error("expected {expected} children, found {found}")]
  ChildCountMismatch { expected: usize, found: usize },

  #[error("subtree does not match slot {slot}: {reason}")]
  GraftMismatch { slot: usize, reason: &'static str },

  #[error("worker pool still has {0} jobs in flight")]
  PoolBusy(usize),

  #[error("node {node} holds {found} values, sampler produces {expected}")]
  ValueCountMismatch {
    node: usize,
    expected: usize,
    found: usize,
  },
}

/// Degenerate geometry or sampling.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegeneracyError {
  #[error("cell axis {axis} has zero or negative extent {extent}")]
  ZeroExtent { axis: usize, extent: f64 },

  #[error("cell geometry is not finite on axis {axis}")]
  NonFiniteGeometry { axis: usize },

  #[error("sampler order {order} is degenerate (minimum {minimum})")]
  SamplerOrder { order: usize, minimum: usize },

  #[error("{what} must be positive, got {value}")]
  NonPositiveSize { what: &'static str, value: f64 },

  #[error("split threshold must be finite and non-negative, got {0}")]
  InvalidThreshold(f64),
}
