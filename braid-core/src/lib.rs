//! Braid Core Library
//!
//! Foundational types and traits for braid, a small library for composable
//! query pipelines with shared-state loop control and conversational memory.
//!
//! # Key Components
//!
//! - **Traits**: [`traits::Component`] (the unit of computation),
//!   [`traits::StatefulComponent`] (shared-state capability), and the
//!   memory seams [`traits::MemorySource`] / [`traits::Embedder`]
//! - **Pipeline**: a minimal sequential [`pipeline::Pipeline`] that chains
//!   components and nests as a component itself
//! - **State**: [`state::SharedState`], the per-invocation mutable mapping
//!   injected into stateful components by the loop construct
//! - **Value**: dynamic values and keyword-argument maps exchanged between
//!   components

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;
pub mod error;
pub mod pipeline;
pub mod prelude;
pub mod state;
pub mod traits;
pub mod value;

// Re-export key types at crate root for convenience
pub use chat::{ChatMessage, Role};
pub use error::{BraidError, Result};
pub use pipeline::Pipeline;
pub use state::SharedState;
pub use traits::{Component, ComponentFuture, Embedder, KeySet, MemorySource, StatefulComponent};
pub use value::{Value, ValueMap};
