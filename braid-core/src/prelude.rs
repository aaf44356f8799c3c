//! Prelude for convenient imports.
//!
//! # Example
//!
//! ```ignore
//! use braid_core::prelude::*;
//! ```

pub use crate::chat::{ChatMessage, Role};
pub use crate::error::{BraidError, Result};
pub use crate::pipeline::Pipeline;
pub use crate::state::SharedState;
pub use crate::traits::{
    Component, ComponentFuture, Embedder, KeySet, MemorySource, StatefulComponent,
    discover_stateful,
};
pub use crate::value::{Value, ValueMap};
