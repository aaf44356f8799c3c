//! Sequential pipeline of components.

use crate::error::{BraidError, Result};
use crate::traits::{Component, ComponentFuture, KeySet};
use crate::value::ValueMap;
use std::sync::Arc;

/// An ordered chain of components, itself a [`Component`].
///
/// Each member's output map becomes the next member's input map. The
/// pipeline's declared input keys are the first member's, its output keys
/// the last member's, and `sub_components` exposes the members so capability
/// discovery can reach nested pipelines at any depth.
pub struct Pipeline {
    name: String,
    components: Vec<Arc<dyn Component>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("len", &self.components.len())
            .finish()
    }
}

impl Pipeline {
    /// Create a pipeline from an ordered chain of components.
    ///
    /// Fails fast with [`BraidError::EmptyPipeline`] if the chain is empty.
    pub fn new(components: Vec<Arc<dyn Component>>) -> Result<Self> {
        Self::named("pipeline", components)
    }

    /// Create a named pipeline.
    pub fn named(name: impl Into<String>, components: Vec<Arc<dyn Component>>) -> Result<Self> {
        let name = name.into();
        if components.is_empty() {
            return Err(BraidError::EmptyPipeline { name });
        }
        Ok(Self { name, components })
    }

    /// The pipeline name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of members in the chain.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the chain is empty. Always false for a constructed pipeline.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Component for Pipeline {
    fn input_keys(&self) -> KeySet {
        self.components
            .first()
            .map(|c| c.input_keys())
            .unwrap_or_default()
    }

    fn output_keys(&self) -> KeySet {
        self.components
            .last()
            .map(|c| c.output_keys())
            .unwrap_or_default()
    }

    fn run(&self, inputs: ValueMap) -> Result<ValueMap> {
        let mut current = inputs;
        for (index, component) in self.components.iter().enumerate() {
            tracing::debug!(
                pipeline = %self.name,
                stage = index,
                keys = current.len(),
                "Running pipeline stage"
            );
            current = component.run(current)?;
        }
        Ok(current)
    }

    fn run_async<'a>(&'a self, inputs: ValueMap) -> ComponentFuture<'a> {
        Box::pin(async move {
            let mut current = inputs;
            for (index, component) in self.components.iter().enumerate() {
                tracing::debug!(
                    pipeline = %self.name,
                    stage = index,
                    keys = current.len(),
                    "Running pipeline stage (async)"
                );
                current = component.run_async(current).await?;
            }
            Ok(current)
        })
    }

    fn sub_components(&self) -> Vec<Arc<dyn Component>> {
        self.components.clone()
    }
}
