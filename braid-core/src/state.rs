//! Shared iteration state for stateful components.

use crate::value::{Value, ValueMap};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a mutable key-value state shared across components.
///
/// One `SharedState` is created per loop invocation and injected into every
/// discovered stateful component before the first iteration runs. All clones
/// refer to the same underlying map, so a write made during iteration `i` is
/// visible to every holder during iteration `i + 1`. The state does not
/// survive the invocation; the next invocation injects a fresh one.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<ValueMap>>,
}

impl SharedState {
    /// Create a new, empty shared state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key if any.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.lock().insert(key.into(), value)
    }

    /// Get a cloned value by key.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.lock().get(key).cloned()
    }

    /// Remove a value by key.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.inner.lock().remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the state holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Whether two handles refer to the same underlying state.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Run a closure with exclusive access to the underlying map.
    pub fn with<R>(&self, f: impl FnOnce(&mut ValueMap) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl std::fmt::Debug for SharedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedState")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_map() {
        let a = SharedState::new();
        let b = a.clone();

        a.insert("count", Value::int(1));
        assert_eq!(b.get("count"), Some(Value::int(1)));
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn fresh_states_are_distinct() {
        let a = SharedState::new();
        let b = SharedState::new();
        assert!(!a.ptr_eq(&b));

        a.insert("k", Value::bool(true));
        assert!(b.get("k").is_none());
    }

    #[test]
    fn with_gives_exclusive_access() {
        let state = SharedState::new();
        state.with(|map| {
            map.insert("a".to_string(), Value::int(1));
            map.insert("b".to_string(), Value::int(2));
        });
        assert_eq!(state.len(), 2);
    }
}
