// seller_panel/src/web/handlers/media_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{debug, instrument};

use crate::errors::AppError;
use crate::services::image_storage::STORED_PATH_PREFIX;
use crate::state::AppState;

#[instrument(name = "handler::serve_upload", skip(app_state, path))]
pub async fn serve_upload_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let stored_path = format!("{}/{}", STORED_PATH_PREFIX, path.into_inner());

  let Some(bytes) = app_state.images.read(&stored_path).await? else {
    debug!(%stored_path, "Upload not found.");
    return Err(AppError::NotFound("Image not found".to_string()));
  };

  let content_type = infer::get(&bytes)
    .map(|kind| kind.mime_type())
    .unwrap_or("application/octet-stream");
  Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}
