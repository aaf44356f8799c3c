//! Component trait and related types.

use super::stateful::StatefulComponent;
use crate::error::Result;
use crate::value::ValueMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// An ordered set of declared input or output key names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: Vec<String>,
}

impl KeySet {
    /// Create an empty key set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key set from names, preserving order and dropping duplicates.
    pub fn of<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out = Self::new();
        for key in keys {
            let key = key.into();
            if !out.keys.contains(&key) {
                out.keys.push(key);
            }
        }
        out
    }

    /// Check whether a key is declared.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Iterate over the declared keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no keys are declared.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A boxed future for async component execution.
pub type ComponentFuture<'a> = Pin<Box<dyn Future<Output = Result<ValueMap>> + Send + 'a>>;

/// The core trait for all braid components.
///
/// A component is a unit of computation in a query pipeline. It receives a
/// keyword-argument map, performs some computation, and returns an output
/// map. Components may contain nested sub-components (a pipeline is itself
/// a component), and may opt into the stateful capability by overriding
/// [`Component::as_stateful`].
///
/// # Example
///
/// ```ignore
/// use braid_core::prelude::*;
///
/// struct Doubler;
///
/// impl Component for Doubler {
///     fn input_keys(&self) -> KeySet {
///         KeySet::of(["n"])
///     }
///
///     fn output_keys(&self) -> KeySet {
///         KeySet::of(["n"])
///     }
///
///     fn run(&self, inputs: ValueMap) -> Result<ValueMap> {
///         let n = inputs.get("n").and_then(|v| v.as_f64()).unwrap_or(0.0);
///         Ok(ValueMap::from([("n".to_string(), Value::float(n * 2.0))]))
///     }
///
///     fn run_async<'a>(&'a self, inputs: ValueMap) -> ComponentFuture<'a> {
///         Box::pin(async move { self.run(inputs) })
///     }
/// }
/// ```
pub trait Component: Send + Sync {
    /// Declared input keys.
    fn input_keys(&self) -> KeySet;

    /// Declared output keys.
    fn output_keys(&self) -> KeySet;

    /// Run the component synchronously.
    fn run(&self, inputs: ValueMap) -> Result<ValueMap>;

    /// Run the component asynchronously.
    fn run_async<'a>(&'a self, inputs: ValueMap) -> ComponentFuture<'a>;

    /// Direct sub-components, in declaration order.
    ///
    /// Leaf components return an empty vector. Container components (such as
    /// pipelines) expose their members here so capability discovery can walk
    /// the graph at any depth.
    fn sub_components(&self) -> Vec<Arc<dyn Component>> {
        Vec::new()
    }

    /// The stateful capability, if this component opts into it.
    ///
    /// Components that accept shared iteration state override this to return
    /// `Some(self)`; everything else keeps the default.
    fn as_stateful(&self) -> Option<&dyn StatefulComponent> {
        None
    }
}
