// vitrine/src/pipeline/execution.rs

//! `Pipeline::run()`: step execution, best-effort handling and compensation.

use crate::core::context::Handler;
use crate::core::context_data::ContextData;
use crate::core::control::{PipelineControl, PipelineResult};
use crate::core::step::StepDef;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use std::collections::HashMap;
use tracing::{event, instrument, span, Instrument, Level};

enum StepOutcome<Err> {
  Continue,
  Stop,
  Failed(Err),
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Runs every step in order against `ctx_data`.
  ///
  /// On the first failing (non-best-effort) step, the compensators of all
  /// previously completed steps run in reverse order, then that step's error
  /// is returned unchanged.
  #[instrument(
        name = "Pipeline::run",
        skip_all,
        fields(
            pipeline_context_data_type = %std::any::type_name::<TData>(),
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    event!(Level::DEBUG, "Pipeline execution starting.");
    let mut completed: Vec<&str> = Vec::new();

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_span = span!(
        Level::INFO,
        "pipeline_step_execution",
        step_name = step_def.name.as_str(),
        step_index = step_idx,
        best_effort = step_def.best_effort
      );

      let outcome = self.run_step(step_def, &ctx_data).instrument(step_span).await;

      match outcome {
        None => continue,
        Some(StepOutcome::Continue) => completed.push(step_def.name.as_str()),
        Some(StepOutcome::Stop) => {
          event!(Level::INFO, step_name = %step_def.name, "Pipeline stopped by a handler.");
          return Ok(PipelineResult::Stopped);
        }
        Some(StepOutcome::Failed(e)) if step_def.best_effort => {
          event!(Level::WARN, step_name = %step_def.name, error = %e, "Best-effort step failed; continuing.");
          completed.push(step_def.name.as_str());
        }
        Some(StepOutcome::Failed(e)) => {
          event!(Level::ERROR, step_name = %step_def.name, error = %e, "Step failed; compensating completed steps.");
          self.compensate(&completed, &ctx_data).await;
          return Err(e);
        }
      }
    }

    event!(Level::DEBUG, "Pipeline execution completed successfully.");
    Ok(PipelineResult::Completed)
  }

  /// `None` means the step was skipped.
  async fn run_step(&self, step_def: &StepDef<TData>, ctx_data: &ContextData<TData>) -> Option<StepOutcome<Err>> {
    let step_name = step_def.name.as_str();

    if let Some(skip_cond_fn) = &step_def.skip_if {
      if skip_cond_fn(ctx_data.clone()) {
        event!(Level::INFO, "Step skipped due to 'skip_if' condition.");
        return None;
      }
    }

    let has_handlers = [&self.before, &self.on, &self.after]
      .iter()
      .any(|phase| phase.get(step_name).is_some_and(|v| !v.is_empty()));

    if !has_handlers {
      if step_def.optional {
        event!(Level::DEBUG, "Optional step has no handlers, skipping.");
        return None;
      }
      event!(Level::ERROR, "Non-optional step has no handlers.");
      return Some(StepOutcome::Failed(Err::from(FlowError::HandlerMissing {
        step_name: step_def.name.clone(),
      })));
    }

    for (phase_name, phase) in [("before", &self.before), ("on", &self.on), ("after", &self.after)] {
      match Self::run_phase(phase_name, phase, step_name, ctx_data).await {
        StepOutcome::Continue => {}
        other => return Some(other),
      }
    }

    event!(Level::DEBUG, "Step processing finished successfully.");
    Some(StepOutcome::Continue)
  }

  async fn run_phase(
    phase_name: &'static str,
    phase: &HashMap<String, Vec<Handler<TData, Err>>>,
    step_name: &str,
    ctx_data: &ContextData<TData>,
  ) -> StepOutcome<Err> {
    let Some(handlers) = phase.get(step_name) else {
      return StepOutcome::Continue;
    };

    for (handler_idx, handler_fn) in handlers.iter().enumerate() {
      let handler_span = span!(Level::DEBUG, "step_handler", phase = phase_name, handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => return StepOutcome::Stop,
        Err(e) => {
          event!(Level::DEBUG, phase = phase_name, error = %e, "Handler failed.");
          return StepOutcome::Failed(e);
        }
      }
    }
    StepOutcome::Continue
  }

  async fn compensate(&self, completed: &[&str], ctx_data: &ContextData<TData>) {
    for step_name in completed.iter().rev() {
      let Some(compensators) = self.compensations.get(*step_name) else {
        continue;
      };
      for compensator in compensators {
        match compensator(ctx_data.clone()).await {
          Ok(()) => event!(Level::INFO, %step_name, "Step compensated."),
          Err(e) => {
            event!(Level::ERROR, %step_name, error = %e, "Compensation failed; continuing with remaining compensations.")
          }
        }
      }
    }
  }
}
