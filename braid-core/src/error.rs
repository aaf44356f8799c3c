//! Error types for braid.
//!
//! This module provides strongly-typed errors with actionable context.
//! Errors carry the identifiers needed to locate the failing component
//! or memory source; execution failures surface to the caller unchanged,
//! with no wrapping or local recovery.

use thiserror::Error;

/// The main error type for braid operations.
#[derive(Error, Debug)]
pub enum BraidError {
    // =========================================================================
    // Pipeline / component errors (E001-E099)
    // =========================================================================
    /// A pipeline was constructed with no components.
    #[error("E001: Pipeline '{name}' has no components")]
    EmptyPipeline {
        /// The pipeline name.
        name: String,
    },

    /// A component did not receive a required input key.
    #[error("E002: Component '{component}' missing required input key '{key}'")]
    MissingInput {
        /// The component that was invoked.
        component: String,
        /// The input key that was absent.
        key: String,
    },

    /// A component failed while executing.
    ///
    /// Also used by caller-supplied exit predicates and carry functions
    /// to signal failure; the loop propagates it unchanged.
    #[error("E003: Component '{component}' failed: {cause}")]
    ComponentExecution {
        /// The component that failed.
        component: String,
        /// Reason for the failure.
        cause: String,
    },

    // =========================================================================
    // Memory errors (E100-E199)
    // =========================================================================
    /// An embedder produced or received a vector of the wrong dimension.
    #[error("E101: Embedding dimension mismatch: expected {expected}, got {actual}")]
    EmbeddingDimension {
        /// The dimension the store was configured with.
        expected: usize,
        /// The dimension actually produced.
        actual: usize,
    },

    /// The embedder failed to embed a text.
    #[error("E102: Embedding failed for text '{text}': {cause}")]
    Embedding {
        /// The text that could not be embedded.
        text: String,
        /// Reason for the failure.
        cause: String,
    },

    /// A memory source failed during put or get.
    #[error("E103: Memory source failed: {cause}")]
    MemorySource {
        /// Reason for the failure.
        cause: String,
    },
}

/// Result type for braid operations.
pub type Result<T> = std::result::Result<T, BraidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = BraidError::MissingInput {
            component: "summarize".to_string(),
            key: "query".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("E002"));
        assert!(msg.contains("summarize"));
        assert!(msg.contains("query"));
    }

    #[test]
    fn dimension_mismatch_message() {
        let err = BraidError::EmbeddingDimension {
            expected: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "E101: Embedding dimension mismatch: expected 5, got 3"
        );
    }
}
