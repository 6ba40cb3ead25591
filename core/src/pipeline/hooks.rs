// vitrine/src/pipeline/hooks.rs

//! Registration of `before`, `on`, `after` and compensating handlers.

use tracing::{event, Level};

use crate::core::context::{Compensator, Handler};
use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;
use std::future::Future;

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn wrap_handler<F, UserProvidedErr>(
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) -> Handler<TData, Err>
  where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    Box::new(move |ctx_data| {
      let user_fut = handler_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    })
  }

  /// Registers a handler that runs before the step's `on` handlers.
  ///
  /// The handler's error type only has to convert into the pipeline's `Err`.
  pub fn before_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = Self::wrap_handler(handler_fn);
    self.before.entry(step_name.to_string()).or_default().push(handler);
  }

  /// Registers the main handler of a step.
  pub fn on_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = Self::wrap_handler(handler_fn);
    self.on.entry(step_name.to_string()).or_default().push(handler);
  }

  pub fn after_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler = Self::wrap_handler(handler_fn);
    self.after.entry(step_name.to_string()).or_default().push(handler);
  }

  /// Registers an undo action for `step_name`.
  ///
  /// It runs only if every handler of the step succeeded and some later,
  /// non-best-effort step then fails.
  pub fn compensate_root<F, UserProvidedErr>(
    &mut self,
    step_name: &str,
    compensator_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<(), UserProvidedErr>> + Send + 'static,
    UserProvidedErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let compensator: Compensator<TData, Err> = Box::new(move |ctx_data| {
      let user_fut = compensator_fn(ctx_data);
      Box::pin(async move { user_fut.await.map_err(Into::into) })
    });
    self
      .compensations
      .entry(step_name.to_string())
      .or_default()
      .push(compensator);
    event!(Level::DEBUG, %step_name, "Compensation registered.");
  }
}
