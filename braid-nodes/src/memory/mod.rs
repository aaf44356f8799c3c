//! Conversational memory sources.
//!
//! - [`ChatBuffer`] - unbounded insertion-order history
//! - [`VectorMemory`] - embedding-similarity retrieval over turn batches
//! - [`ComposableMemory`] - merges several sources behind one synthesized
//!   system message

mod buffer;
mod composable;
mod vector;

pub use buffer::ChatBuffer;
pub use composable::ComposableMemory;
pub use vector::{DEFAULT_TOP_K, VectorMemory};
