// seller_panel/src/errors.rs

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use vitrine::FlowError;

#[derive(Debug, Error)]
pub enum AppError {
  /// Missing or non-seller identity. Rendered as a silent redirect to `/`.
  #[error("Unauthorized")]
  Unauthorized,

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Upload Error: {0}")]
  Upload(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Migration Error: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  /// Store failures that do not come from sqlx (the in-memory backend).
  #[error("Store Error: {0}")]
  Store(String),

  #[error("I/O Error: {0}")]
  Io(#[from] std::io::Error),

  #[error("Malformed form submission: {0}")]
  Multipart(String),

  #[error("Workflow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

impl From<actix_multipart::MultipartError> for AppError {
  fn from(err: actix_multipart::MultipartError) -> Self {
    AppError::Multipart(err.to_string())
  }
}

impl AppError {
  /// Errors whose text is written for the seller and can be shown verbatim.
  pub fn is_user_facing(&self) -> bool {
    matches!(
      self,
      AppError::Validation(_) | AppError::Upload(_) | AppError::NotFound(_) | AppError::Multipart(_)
    )
  }

  /// The underlying error text, without the variant label.
  fn detail(&self) -> String {
    match self {
      AppError::Sqlx(e) => e.to_string(),
      AppError::Io(e) => e.to_string(),
      AppError::Store(m) | AppError::Internal(m) | AppError::Config(m) => m.clone(),
      other => other.to_string(),
    }
  }

  /// The text shown to the seller.
  ///
  /// User-facing errors are shown as-is. Everything else is prefixed with
  /// `context` and carries the underlying error text only when `expose_details`
  /// is set; the full error is always logged.
  pub fn seller_message(&self, context: &str, expose_details: bool) -> String {
    match self {
      AppError::Validation(m) | AppError::Upload(m) | AppError::NotFound(m) => m.clone(),
      AppError::Multipart(m) => format!("{}: {}", context, m),
      other if expose_details => format!("{}: {}", context, other.detail()),
      _ => format!("{}: an unexpected error occurred", context),
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Unauthorized => StatusCode::SEE_OTHER,
      AppError::Validation(_) | AppError::Upload(_) | AppError::Multipart(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    if let AppError::Unauthorized = self {
      return HttpResponse::SeeOther().insert_header((header::LOCATION, "/")).finish();
    }

    tracing::error!(application_error = %self, "Responding with error page");
    let message = match self {
      AppError::Validation(m) | AppError::Upload(m) | AppError::NotFound(m) => m.clone(),
      _ => "Something went wrong while processing your request.".to_string(),
    };
    HttpResponse::build(self.status_code())
      .content_type("text/html; charset=utf-8")
      .body(crate::web::views::layout::error_page(self.status_code(), &message).into_string())
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
