//! Standard library components for braid.
//!
//! This crate provides the built-in components on top of `braid-core`:
//!
//! ## Flow Control (`flow::*`)
//! - [`flow::LoopComponent`] - bounded iteration over a wrapped pipeline,
//!   with shared-state injection, an optional exit predicate, and an
//!   optional input-carry function
//!
//! ## Memory (`memory::*`)
//! - [`memory::ChatBuffer`] - unbounded in-memory chat history
//! - [`memory::VectorMemory`] - embedding-similarity retrieval over
//!   user-anchored turn batches
//! - [`memory::ComposableMemory`] - merges retrieval results from several
//!   sources into one ordered message sequence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod flow;
pub mod memory;

pub use flow::{CarryFn, ExitPredicate, LoopComponent};
pub use memory::{ChatBuffer, ComposableMemory, VectorMemory};

/// Prelude for commonly used types.
pub mod prelude {
    pub use crate::flow::{CarryFn, DEFAULT_MAX_ITERATIONS, ExitPredicate, LoopComponent};
    pub use crate::memory::{ChatBuffer, ComposableMemory, DEFAULT_TOP_K, VectorMemory};
}
