//! Flow control components.
//!
//! - [`LoopComponent`] - bounded iteration over a wrapped pipeline with
//!   shared-state injection, exit predicate, and input carrying

mod loop_node;

pub use loop_node::{CarryFn, DEFAULT_MAX_ITERATIONS, ExitPredicate, LoopComponent};
