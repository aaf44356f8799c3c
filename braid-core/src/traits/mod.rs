//! Core traits for braid components.
//!
//! This module defines the fundamental abstractions:
//! - `Component`: the basic unit of computation in a query pipeline
//! - `StatefulComponent`: opt-in capability for shared iteration state
//! - `MemorySource` / `Embedder`: seams for conversational memory backends

mod component;
mod memory;
mod stateful;

pub use component::{Component, ComponentFuture, KeySet};
pub use memory::{Embedder, MemorySource};
pub use stateful::{StatefulComponent, discover_stateful};
