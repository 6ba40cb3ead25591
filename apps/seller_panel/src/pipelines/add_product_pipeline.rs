// seller_panel/src/pipelines/add_product_pipeline.rs

use std::sync::Arc;
use tracing::{event, info, Level};
use vitrine::{ContextData, Pipeline, PipelineControl, Registry};

use crate::errors::AppError;
use crate::models::NewProduct;
use crate::pipelines::common_steps;
use crate::pipelines::contexts::AddProductCtxData;

pub fn build_add_product_pipeline() -> Pipeline<AddProductCtxData, AppError> {
  let mut add_p = Pipeline::<AddProductCtxData, AppError>::new(&[
    ("validate_product_form", false, None),
    ("stage_image", false, None),
    ("insert_product", false, None),
  ]);

  add_p.on_root("validate_product_form", common_steps::validate_product_form::<AddProductCtxData>);

  add_p.on_root("stage_image", common_steps::stage_image::<AddProductCtxData>);
  add_p.compensate_root("stage_image", common_steps::remove_staged_image::<AddProductCtxData>);

  add_p.on_root("insert_product", |ctx_data: ContextData<AddProductCtxData>| {
    Box::pin(async move {
      let (new_product, store) = {
        let guard = ctx_data.read();
        let validated = guard
          .validated
          .clone()
          .ok_or_else(|| AppError::Internal("insert_product ran before validation".to_string()))?;
        let image = guard
          .staged_image
          .clone()
          .ok_or_else(|| AppError::Internal("insert_product ran without a staged image".to_string()))?;
        (
          NewProduct {
            seller_id: guard.seller_id,
            name: validated.name,
            description: validated.description,
            price: validated.price,
            image,
            category_id: validated.category_id,
          },
          guard.app_state.store.clone(),
        )
      }; // guard dropped

      event!(Level::DEBUG, seller_id = new_product.seller_id, "Inserting product.");
      let product_id = store.insert_product(&new_product).await?;

      ctx_data.write().created_product_id = Some(product_id);
      info!(product_id, seller_id = new_product.seller_id, "Product added.");
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  add_p
}

pub fn register_add_product_pipeline(registry: &Arc<Registry<AppError>>) {
  registry.register_pipeline(build_add_product_pipeline());
  tracing::info!("Add-product pipeline registered.");
}
