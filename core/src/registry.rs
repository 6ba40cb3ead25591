// vitrine/src/registry.rs

//! `Registry<E>`: one pipeline per context data type, dispatched by `TypeId`.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineResult;
use crate::error::FlowError;
use crate::pipeline::definition::Pipeline;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[async_trait]
trait ErasedPipelineRunner<ApplicationError>: Send + Sync
where
  ApplicationError: std::error::Error + Send + Sync + 'static,
{
  /// `ctx_obj` must hold a `ContextData<TData>` for the wrapped pipeline.
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, ApplicationError>;
}

struct PipelineRunner<TData, PipelineHandlerError, ApplicationError>
where
  TData: 'static + Send + Sync,
  PipelineHandlerError: std::error::Error + From<FlowError> + Send + Sync + 'static,
  ApplicationError: std::error::Error + From<PipelineHandlerError> + From<FlowError> + Send + Sync + 'static,
{
  pipeline: Arc<Pipeline<TData, PipelineHandlerError>>,
  _phantom_app_err: PhantomData<fn() -> ApplicationError>,
}

#[async_trait]
impl<TData, PipelineHandlerError, ApplicationError> ErasedPipelineRunner<ApplicationError>
  for PipelineRunner<TData, PipelineHandlerError, ApplicationError>
where
  TData: 'static + Send + Sync,
  PipelineHandlerError: std::error::Error + From<FlowError> + Send + Sync + 'static,
  ApplicationError: std::error::Error + From<PipelineHandlerError> + From<FlowError> + Send + Sync + 'static,
{
  async fn run_erased(&self, ctx_obj: Box<dyn Any + Send>) -> Result<PipelineResult, ApplicationError> {
    let typed_ctx_data = match ctx_obj.downcast::<ContextData<TData>>() {
      Ok(boxed_ctx_data) => *boxed_ctx_data,
      Err(_) => {
        let expected_type_name = std::any::type_name::<ContextData<TData>>();
        event!(Level::ERROR, "Context object type mismatch. Expected {}.", expected_type_name);
        return Err(ApplicationError::from(FlowError::TypeMismatch {
          step_name: "registry_dispatch".to_string(),
          expected_type: expected_type_name.to_string(),
        }));
      }
    };

    self.pipeline.run(typed_ctx_data).await.map_err(ApplicationError::from)
  }
}

/// Registry of pipelines keyed by their context data type.
///
/// `ApplicationError` is what `run` returns; it absorbs both the pipelines'
/// handler errors and the registry's own `FlowError`s.
pub struct Registry<ApplicationError = FlowError>
where
  ApplicationError: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  runners: RwLock<HashMap<TypeId, Arc<dyn ErasedPipelineRunner<ApplicationError>>>>,
}

impl<ApplicationError> Registry<ApplicationError>
where
  ApplicationError: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new() -> Self {
    Self {
      runners: RwLock::new(HashMap::new()),
    }
  }

  /// Registers `pipeline` for its `TData`, replacing any earlier registration.
  pub fn register_pipeline<TData, PipelineHandlerError>(&self, pipeline: Pipeline<TData, PipelineHandlerError>)
  where
    TData: 'static + Send + Sync,
    PipelineHandlerError: std::error::Error + From<FlowError> + Send + Sync + 'static,
    ApplicationError: From<PipelineHandlerError>,
  {
    event!(Level::DEBUG, tdata_type = %std::any::type_name::<TData>(), steps = ?pipeline.step_names(), "Registering pipeline.");
    let runner = PipelineRunner::<TData, PipelineHandlerError, ApplicationError> {
      pipeline: Arc::new(pipeline),
      _phantom_app_err: PhantomData,
    };
    self.runners.write().insert(TypeId::of::<TData>(), Arc::new(runner));
  }

  pub fn is_registered<TData: 'static>(&self) -> bool {
    self.runners.read().contains_key(&TypeId::of::<TData>())
  }

  /// Runs the pipeline registered for `TData`.
  #[instrument(name = "Registry::run", skip_all, fields(tdata_type = %std::any::type_name::<TData>()))]
  pub async fn run<TData>(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, ApplicationError>
  where
    TData: 'static + Send + Sync,
  {
    let runner = self.runners.read().get(&TypeId::of::<TData>()).cloned();
    let Some(runner) = runner else {
      let type_name = std::any::type_name::<TData>();
      event!(Level::ERROR, "No pipeline registered for TData type {}.", type_name);
      return Err(ApplicationError::from(FlowError::ConfigurationError {
        step_name: "Registry::run".to_string(),
        message: format!("No pipeline registered for TData type {}", type_name),
      }));
    };

    runner.run_erased(Box::new(ctx_data)).await
  }
}

impl<ApplicationError> Default for Registry<ApplicationError>
where
  ApplicationError: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}
