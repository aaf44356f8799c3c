//! Loop component (bounded iteration over a wrapped pipeline).

use braid_core::prelude::*;
use std::sync::Arc;

/// Default bound on exploratory iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 5;

/// Decides from an iteration's output whether the exploration loop stops early.
pub type ExitPredicate = Arc<dyn Fn(&ValueMap) -> Result<bool> + Send + Sync>;

/// Derives the next iteration's input from (current input, current output).
pub type CarryFn = Arc<dyn Fn(&ValueMap, &ValueMap) -> Result<ValueMap> + Send + Sync>;

/// Loop component - repeated execution of a wrapped pipeline.
///
/// Wraps any [`Component`] (typically a [`Pipeline`]) and drives up to
/// `max_iterations` exploratory runs of it, then one final confirmatory run.
/// Before the first iteration, every stateful component reachable in the
/// wrapped pipeline's sub-component graph receives one freshly created
/// [`SharedState`], so state written during iteration `i` is visible during
/// iteration `i + 1`. The loop implements [`Component`] itself, so it
/// composes as a node inside a larger pipeline.
///
/// Between iterations, an optional exit predicate inspects the iteration's
/// output and may stop the exploration early; an optional carry function
/// derives the next input from the current input and output. Absent a carry
/// function, every exploratory iteration reuses the original input unchanged.
///
/// Two behaviors are deliberate contract, not accidents:
///
/// - **Exploratory outputs are discarded.** The returned output comes from a
///   final confirmatory run using the *original* invocation arguments, not
///   from the last exploratory iteration. Exploratory runs matter only
///   through the shared state they mutated and the exit predicate they
///   satisfied.
/// - **The async path does not iterate.** [`Component::run_async`] delegates
///   a single run to the wrapped pipeline with the original arguments and
///   performs no state injection, exit evaluation, or input carrying.
///
/// # Example
///
/// ```ignore
/// use braid_nodes::flow::LoopComponent;
///
/// let looped = LoopComponent::new(pipeline)
///     .with_exit_predicate(|out| {
///         Ok(out.get("done").and_then(|v| v.as_bool()).unwrap_or(false))
///     })
///     .with_max_iterations(3);
/// ```
pub struct LoopComponent {
    /// The wrapped pipeline, reused across invocations and iterations.
    pipeline: Arc<dyn Component>,
    /// Optional early-exit decision; absent means "never exit early".
    exit_predicate: Option<ExitPredicate>,
    /// Optional input derivation; absent means "reuse the original input".
    carry_fn: Option<CarryFn>,
    /// Bound on exploratory iterations. Zero skips straight to the
    /// confirmatory run.
    max_iterations: u32,
}

impl LoopComponent {
    /// Create a loop over a pipeline with the default iteration bound.
    pub fn new(pipeline: Arc<dyn Component>) -> Self {
        Self {
            pipeline,
            exit_predicate: None,
            carry_fn: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the exit predicate.
    pub fn with_exit_predicate(
        mut self,
        predicate: impl Fn(&ValueMap) -> Result<bool> + Send + Sync + 'static,
    ) -> Self {
        self.exit_predicate = Some(Arc::new(predicate));
        self
    }

    /// Set the input-carry function.
    pub fn with_carry_fn(
        mut self,
        carry: impl Fn(&ValueMap, &ValueMap) -> Result<ValueMap> + Send + Sync + 'static,
    ) -> Self {
        self.carry_fn = Some(Arc::new(carry));
        self
    }

    /// Set the bound on exploratory iterations.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Stateful components currently reachable in the wrapped pipeline.
    ///
    /// Re-discovered on every invocation rather than cached; the pipeline's
    /// composition may change between invocations of a long-lived loop.
    pub fn stateful_components(&self) -> Vec<Arc<dyn Component>> {
        discover_stateful(self.pipeline.as_ref())
    }

    /// Inject one fresh shared state into every discovered stateful
    /// component and return the handle.
    fn inject_fresh_state(&self) -> SharedState {
        let state = SharedState::new();
        let stateful = self.stateful_components();
        tracing::debug!(count = stateful.len(), "Injecting shared state");
        for component in &stateful {
            if let Some(s) = component.as_stateful() {
                s.inject_state(state.clone());
            }
        }
        state
    }
}

impl Component for LoopComponent {
    fn input_keys(&self) -> KeySet {
        self.pipeline.input_keys()
    }

    fn output_keys(&self) -> KeySet {
        self.pipeline.output_keys()
    }

    fn run(&self, inputs: ValueMap) -> Result<ValueMap> {
        let _state = self.inject_fresh_state();

        let mut current_input = inputs.clone();
        for iteration in 0..self.max_iterations {
            let output = self.pipeline.run(current_input.clone())?;

            if let Some(predicate) = &self.exit_predicate {
                let should_exit = predicate(&output)?;
                tracing::debug!(iteration, should_exit, "Loop exit decision");
                if should_exit {
                    break;
                }
            }

            if let Some(carry) = &self.carry_fn {
                current_input = carry(&current_input, &output)?;
            }
        }

        // Confirmatory run with the original invocation arguments; its
        // output is the loop's result.
        self.pipeline.run(inputs)
    }

    fn run_async<'a>(&'a self, inputs: ValueMap) -> ComponentFuture<'a> {
        // Single delegated run; no iterate/exit/carry machinery here.
        self.pipeline.run_async(inputs)
    }

    fn sub_components(&self) -> Vec<Arc<dyn Component>> {
        vec![Arc::clone(&self.pipeline)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braid_core::BraidError;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Echoes its input and counts how many times it ran.
    struct Echo {
        runs: AtomicUsize,
        seen_inputs: Mutex<Vec<ValueMap>>,
    }

    impl Echo {
        fn new() -> Self {
            Self {
                runs: AtomicUsize::new(0),
                seen_inputs: Mutex::new(Vec::new()),
            }
        }
    }

    impl Component for Echo {
        fn input_keys(&self) -> KeySet {
            KeySet::of(["query"])
        }

        fn output_keys(&self) -> KeySet {
            KeySet::of(["query", "runs", "report"])
        }

        fn run(&self, inputs: ValueMap) -> Result<ValueMap> {
            let runs = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
            self.seen_inputs.lock().push(inputs.clone());
            let mut out = inputs;
            out.insert("runs".to_string(), Value::int(runs as i64));
            out.insert(
                "report".to_string(),
                Value(serde_json::json!({ "runs": runs })),
            );
            Ok(out)
        }

        fn run_async<'a>(&'a self, inputs: ValueMap) -> ComponentFuture<'a> {
            Box::pin(async move { self.run(inputs) })
        }
    }

    fn query_input(text: &str) -> ValueMap {
        ValueMap::from([("query".to_string(), Value::string(text))])
    }

    #[test]
    fn exhausts_iterations_then_confirms() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo.clone()).with_max_iterations(3);

        let out = looped.run(query_input("hello")).unwrap();
        // 3 exploratory runs + 1 confirmatory.
        assert_eq!(echo.runs.load(Ordering::SeqCst), 4);
        assert_eq!(out.get("runs"), Some(&Value::int(4)));
        assert_eq!(out.get("query"), Some(&Value::string("hello")));
    }

    #[test]
    fn exit_predicate_short_circuits() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo.clone())
            .with_max_iterations(5)
            .with_exit_predicate(|out| {
                Ok(out
                    .get("report")
                    .is_some_and(|v| v.field_greater_than("runs", 1.0)))
            });

        looped.run(query_input("q")).unwrap();
        // Exit signaled on the second exploratory run: 2 + 1 confirmatory.
        assert_eq!(echo.runs.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn default_carry_reuses_original_input() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo.clone()).with_max_iterations(3);

        let original = query_input("stable");
        looped.run(original.clone()).unwrap();

        let seen = echo.seen_inputs.lock();
        assert_eq!(seen.len(), 4);
        for inputs in seen.iter() {
            assert_eq!(inputs, &original);
        }
    }

    #[test]
    fn carry_fn_evolves_exploratory_input_only() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo.clone())
            .with_max_iterations(2)
            .with_carry_fn(|input, output| {
                let mut next = input.clone();
                next.insert("runs_so_far".to_string(), output["runs"].clone());
                Ok(next)
            });

        let out = looped.run(query_input("q")).unwrap();

        let seen = echo.seen_inputs.lock();
        // Iteration 0 sees the original input, iteration 1 the carried one.
        assert!(!seen[0].contains_key("runs_so_far"));
        assert!(seen[1].contains_key("runs_so_far"));
        // The confirmatory run uses the original, uncarried arguments.
        assert!(!seen[2].contains_key("runs_so_far"));
        assert!(!out.contains_key("runs_so_far"));
    }

    #[test]
    fn zero_max_iterations_still_confirms() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo.clone()).with_max_iterations(0);

        let out = looped.run(query_input("q")).unwrap();
        assert_eq!(echo.runs.load(Ordering::SeqCst), 1);
        assert_eq!(out.get("runs"), Some(&Value::int(1)));
    }

    #[test]
    fn predicate_error_propagates() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo).with_exit_predicate(|_| {
            Err(BraidError::ComponentExecution {
                component: "predicate".to_string(),
                cause: "boom".to_string(),
            })
        });

        let err = looped.run(query_input("q")).unwrap_err();
        assert!(matches!(err, BraidError::ComponentExecution { .. }));
    }

    #[test]
    fn key_delegation() {
        let looped = LoopComponent::new(Arc::new(Echo::new()));
        assert!(looped.input_keys().contains("query"));
        assert!(looped.output_keys().contains("runs"));
    }

    #[tokio::test]
    async fn async_path_runs_once_without_iterating() {
        let echo = Arc::new(Echo::new());
        let looped = LoopComponent::new(echo.clone()).with_max_iterations(5);

        let out = looped.run_async(query_input("q")).await.unwrap();
        assert_eq!(echo.runs.load(Ordering::SeqCst), 1);
        assert_eq!(out.get("runs"), Some(&Value::int(1)));
    }
}
