// vitrine/src/core/step.rs

use super::ContextData;
use std::sync::Arc;

/// Predicate evaluated before a step runs; `true` skips the step.
pub type SkipCondition<TData> = Arc<dyn Fn(ContextData<TData>) -> bool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  /// An optional step may have no handlers at all.
  pub optional: bool,
  /// Failures in a best-effort step are logged and swallowed; the pipeline
  /// continues and nothing is compensated.
  pub best_effort: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("optional", &self.optional)
      .field("best_effort", &self.best_effort)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
