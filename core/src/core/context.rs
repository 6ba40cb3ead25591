// vitrine/src/core/context.rs

//! Boxed handler types stored by a pipeline.

use crate::core::context_data::ContextData;
use crate::core::control::PipelineControl;
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// A forward step handler.
///
/// Receives a clone of the shared `ContextData<TData>`. Lock guards must be
/// dropped before any `.await` inside the handler.
pub type Handler<TData, Err> =
  Box<dyn Fn(ContextData<TData>) -> BoxFuture<Result<PipelineControl, Err>> + Send + Sync>;

/// Undo action for a step whose forward handlers all succeeded.
///
/// Compensators run in reverse step order after a later step fails. Their own
/// errors are logged and never replace the error that triggered them.
pub type Compensator<TData, Err> = Box<dyn Fn(ContextData<TData>) -> BoxFuture<Result<(), Err>> + Send + Sync>;
