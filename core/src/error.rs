// vitrine/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
  #[error("Handler missing for non-optional step: {step_name}")]
  HandlerMissing { step_name: String },

  #[error("Type mismatch during context dispatch (expected {expected_type}, step: '{step_name}')")]
  TypeMismatch {
    step_name: String,
    expected_type: String,
  },

  #[error("Error in user-provided handler or external operation. Source: {source}")]
  HandlerError {
    #[source]
    source: AnyhowError,
  },

  #[error("Configuration error for step '{step_name}': {message}")]
  ConfigurationError { step_name: String, message: String },
}

// Handlers that work with anyhow can `?` straight into a FlowError.
impl From<AnyhowError> for FlowError {
  fn from(err: AnyhowError) -> Self {
    FlowError::HandlerError { source: err }
  }
}

pub type FlowResult<T, E = FlowError> = std::result::Result<T, E>;
