//! Error types for the engine core.
//!
//! - [`BlockError`] — Errors raised during individual block execution, each
//!   variant carrying the structured metadata the caller branches on.

pub mod block_error;

pub use block_error::{BlockError, FailureContext};

/// Convenience alias for block-level results.
pub type BlockResult<T> = Result<T, BlockError>;
