// seller_panel/src/pipelines/delete_product_pipeline.rs

use std::sync::Arc;
use tracing::{info, warn};
use vitrine::{ContextData, Pipeline, PipelineControl, Registry, SkipCondition};

use crate::errors::AppError;
use crate::pipelines::contexts::DeleteProductCtxData;
use crate::web::flash::PRODUCT_NOT_FOUND;

pub fn build_delete_product_pipeline() -> Pipeline<DeleteProductCtxData, AppError> {
  let no_image: SkipCondition<DeleteProductCtxData> =
    Arc::new(|ctx_data: ContextData<DeleteProductCtxData>| ctx_data.read().image.is_empty());

  let mut delete_p = Pipeline::<DeleteProductCtxData, AppError>::new(&[
    ("delete_product_row", false, None),
    ("remove_product_image", false, Some(no_image)),
  ]);
  delete_p.set_best_effort("remove_product_image", true);

  delete_p.on_root("delete_product_row", |ctx_data: ContextData<DeleteProductCtxData>| {
    Box::pin(async move {
      let (seller_id, product_id, store) = {
        let guard = ctx_data.read();
        (guard.seller_id, guard.product_id, guard.app_state.store.clone())
      };

      if !store.delete_seller_product(seller_id, product_id).await? {
        warn!(product_id, seller_id, "Nothing deleted; product missing or owned by another seller.");
        return Err(AppError::NotFound(PRODUCT_NOT_FOUND.to_string()));
      }
      ctx_data.write().row_deleted = true;
      info!(product_id, seller_id, "Product row deleted.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  delete_p.on_root("remove_product_image", |ctx_data: ContextData<DeleteProductCtxData>| {
    Box::pin(async move {
      let (image, images) = {
        let guard = ctx_data.read();
        (guard.image.clone(), guard.app_state.images.clone())
      };

      images.remove(&image).await?;
      ctx_data.write().image_removed = true;
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  delete_p
}

pub fn register_delete_product_pipeline(registry: &Arc<Registry<AppError>>) {
  registry.register_pipeline(build_delete_product_pipeline());
  tracing::info!("Delete-product pipeline registered.");
}
