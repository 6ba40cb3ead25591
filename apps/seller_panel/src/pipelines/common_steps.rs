// seller_panel/src/pipelines/common_steps.rs

//! Steps shared by the add and edit pipelines.

use tracing::{info, instrument, warn};
use vitrine::{ContextData, PipelineControl};

use crate::errors::{AppError, Result as AppResult};
use crate::pipelines::contexts::ProductFormCtx;

#[instrument(name = "common_step::validate_product_form", skip(ctx_data), err)]
pub async fn validate_product_form<T: ProductFormCtx>(ctx_data: ContextData<T>) -> AppResult<PipelineControl> {
  let validated = {
    let guard = ctx_data.read();
    guard.form().validate(guard.image_required())?
  }; // guard dropped

  ctx_data.write().set_validated(validated);
  Ok(PipelineControl::Continue)
}

/// Writes the uploaded image to the image store and records its stored path.
#[instrument(name = "common_step::stage_image", skip(ctx_data), err)]
pub async fn stage_image<T: ProductFormCtx>(ctx_data: ContextData<T>) -> AppResult<PipelineControl> {
  let (upload, images) = {
    let mut guard = ctx_data.write();
    (guard.take_upload(), guard.app_state().images.clone())
  }; // guard dropped

  let Some(upload) = upload else {
    return Err(AppError::Validation(crate::web::forms::IMAGE_REQUIRED.to_string()));
  };

  let stored = images.stage(upload).await?;
  ctx_data.write().set_staged_image(Some(stored.path));
  Ok(PipelineControl::Continue)
}

/// Compensation for `stage_image`: the database change did not commit, so the
/// staged file must not outlive the request.
#[instrument(name = "common_step::remove_staged_image", skip(ctx_data), err)]
pub async fn remove_staged_image<T: ProductFormCtx>(ctx_data: ContextData<T>) -> AppResult<()> {
  let (staged, images) = {
    let guard = ctx_data.read();
    (guard.staged_image().map(str::to_string), guard.app_state().images.clone())
  };

  let Some(stored_path) = staged else {
    return Ok(());
  };
  if let Err(e) = images.remove(&stored_path).await {
    warn!(%stored_path, error = %e, "Failed to remove staged image.");
    return Err(e);
  }
  ctx_data.write().set_staged_image(None);
  info!(%stored_path, "Staged image removed.");
  Ok(())
}

/// Skip predicate: no new file was uploaded.
pub fn no_upload<T: ProductFormCtx>(ctx_data: ContextData<T>) -> bool {
  ctx_data.read().form().image.is_none()
}
