// vitrine/src/core/control.rs

//! Signals for controlling pipeline flow and the outcome of a pipeline run.

/// Returned by a handler to continue with the next handler/step or to halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineControl {
  Continue,
  /// Halt the pipeline without error. Completed steps are NOT compensated:
  /// a stop is a graceful end, not a failure.
  Stop,
}

/// Outcome of a pipeline run that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineResult {
  Completed,
  Stopped,
}
