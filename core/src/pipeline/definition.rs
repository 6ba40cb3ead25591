// vitrine/src/pipeline/definition.rs

//! The `Pipeline<TData, Err>` struct and its structural configuration.

use crate::core::context::{Compensator, Handler};
use crate::core::step::{SkipCondition, StepDef};
use std::collections::HashMap;

/// An ordered set of named steps run against `ContextData<TData>`.
///
/// `Err` is what handlers return and what `run` returns. It must be
/// constructible from `FlowError` so configuration problems (a required step
/// without handlers) surface through the same channel.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<crate::error::FlowError> + Send + Sync + 'static,
{
  pub(crate) steps: Vec<StepDef<TData>>,

  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,

  pub(crate) compensations: HashMap<String, Vec<Compensator<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<crate::error::FlowError> + Send + Sync + 'static,
{
  /// Creates a pipeline from `(name, optional, skip_if)` triples, in run order.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_cond_opt)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        best_effort: false,
        skip_if: skip_cond_opt.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
      compensations: HashMap::new(),
    }
  }

  /// Panics on an unknown step name. A typo here is a setup bug, not a runtime error.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Vitrine setup error: Step '{}' not found in pipeline definition.", step_name);
    }
  }

  fn step_mut(&mut self, step_name: &str) -> &mut StepDef<TData> {
    match self.steps.iter_mut().find(|s| s.name == step_name) {
      Some(step) => step,
      None => panic!("Vitrine setup error: Step '{}' not found in pipeline definition.", step_name),
    }
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    self.step_mut(step_name).optional = optional;
  }

  pub fn set_best_effort(&mut self, step_name: &str, best_effort: bool) {
    self.step_mut(step_name).best_effort = best_effort;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    self.step_mut(step_name).skip_if = skip_if;
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn has_compensation(&self, step_name: &str) -> bool {
    self.compensations.get(step_name).is_some_and(|v| !v.is_empty())
  }
}
