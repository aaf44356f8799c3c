//! Stateful-component capability and discovery.

use super::component::Component;
use crate::state::SharedState;
use std::sync::Arc;

/// Capability trait for components that accept shared iteration state.
///
/// A loop injects one [`SharedState`] into every stateful component of its
/// wrapped pipeline before the first iteration runs (write-once per
/// invocation). The component stores the handle and applies its own
/// read/write discipline against it during execution.
///
/// Implementors must also override [`Component::as_stateful`] to return
/// `Some(self)`, which is how discovery identifies them.
pub trait StatefulComponent: Component {
    /// Accept the shared state handle for the current invocation.
    fn inject_state(&self, state: SharedState);
}

/// Collect every stateful component reachable in `root`'s sub-component
/// graph, at any depth.
///
/// The walk is an explicit-stack preorder traversal: a component's direct
/// sub-components are visited in declaration order, each followed by its own
/// descendants. `root` itself is not a candidate. If the graph shares
/// sub-component references (a DAG rather than a tree), the same instance is
/// reported once per reachable path; duplicates are deliberately not removed.
pub fn discover_stateful(root: &dyn Component) -> Vec<Arc<dyn Component>> {
    let mut found = Vec::new();

    let mut stack = root.sub_components();
    stack.reverse();

    while let Some(component) = stack.pop() {
        if component.as_stateful().is_some() {
            found.push(Arc::clone(&component));
        }
        let mut children = component.sub_components();
        children.reverse();
        stack.append(&mut children);
    }

    found
}
