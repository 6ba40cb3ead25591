// seller_panel/src/pipelines/edit_product_pipeline.rs

use std::sync::Arc;
use tracing::{info, warn};
use vitrine::{ContextData, Pipeline, PipelineControl, Registry, SkipCondition};

use crate::errors::AppError;
use crate::models::ProductChanges;
use crate::pipelines::common_steps;
use crate::pipelines::contexts::EditProductCtxData;
use crate::web::flash::PRODUCT_NOT_FOUND;

pub fn build_edit_product_pipeline() -> Pipeline<EditProductCtxData, AppError> {
  let no_upload: SkipCondition<EditProductCtxData> = Arc::new(common_steps::no_upload::<EditProductCtxData>);
  let nothing_replaced: SkipCondition<EditProductCtxData> = Arc::new(|ctx_data: ContextData<EditProductCtxData>| {
    let guard = ctx_data.read();
    guard.staged_image.is_none() || guard.previous_image.is_empty()
  });

  let mut edit_p = Pipeline::<EditProductCtxData, AppError>::new(&[
    ("validate_product_form", false, None),
    ("stage_replacement_image", false, Some(no_upload)),
    ("update_product", false, None),
    ("discard_previous_image", false, Some(nothing_replaced)),
  ]);
  // The update has committed by now; a leftover file must not fail the edit.
  edit_p.set_best_effort("discard_previous_image", true);

  edit_p.on_root("validate_product_form", common_steps::validate_product_form::<EditProductCtxData>);

  edit_p.on_root("stage_replacement_image", common_steps::stage_image::<EditProductCtxData>);
  edit_p.compensate_root(
    "stage_replacement_image",
    common_steps::remove_staged_image::<EditProductCtxData>,
  );

  edit_p.on_root("update_product", |ctx_data: ContextData<EditProductCtxData>| {
    Box::pin(async move {
      let (seller_id, product_id, changes, store) = {
        let guard = ctx_data.read();
        let validated = guard
          .validated
          .clone()
          .ok_or_else(|| AppError::Internal("update_product ran before validation".to_string()))?;
        (
          guard.seller_id,
          guard.product_id,
          ProductChanges {
            name: validated.name,
            description: validated.description,
            price: validated.price,
            category_id: validated.category_id,
            status: validated.status,
            image: guard.staged_image.clone(),
          },
          guard.app_state.store.clone(),
        )
      }; // guard dropped

      if !store.update_seller_product(seller_id, product_id, &changes).await? {
        warn!(product_id, seller_id, "Product vanished or changed owner before the update.");
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()));
      }
      info!(product_id, seller_id, status = %changes.status, image_replaced = changes.image.is_some(), "Product updated.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  edit_p.on_root("discard_previous_image", |ctx_data: ContextData<EditProductCtxData>| {
    Box::pin(async move {
      let (previous_image, images) = {
        let guard = ctx_data.read();
        (guard.previous_image.clone(), guard.app_state.images.clone())
      };

      images.remove(&previous_image).await?;
      ctx_data.write().previous_image_discarded = true;
      info!(%previous_image, "Replaced image removed.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  edit_p
}

pub fn register_edit_product_pipeline(registry: &Arc<Registry<AppError>>) {
  registry.register_pipeline(build_edit_product_pipeline());
  tracing::info!("Edit-product pipeline registered.");
}
