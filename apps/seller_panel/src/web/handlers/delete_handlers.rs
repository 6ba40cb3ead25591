// seller_panel/src/web/handlers/delete_handlers.rs

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::{info, instrument};
use vitrine::{ContextData, PipelineResult};

use crate::errors::AppError;
use crate::pipelines::contexts::DeleteProductCtxData;
use crate::state::AppState;
use crate::web::flash::{Flash, PRODUCT_DELETED};
use crate::web::forms::{DeleteConfirmForm, ProductIdQuery};
use crate::web::handlers::{dashboard_redirect, find_owned_product, log_failure};
use crate::web::session::SellerContext;
use crate::web::views::delete_confirm;
use crate::web::views::layout::html_response;

#[instrument(name = "handler::confirm_delete", skip(app_state, query), fields(seller_id = %seller.seller_id))]
pub async fn confirm_delete_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
  query: web::Query<ProductIdQuery>,
) -> Result<HttpResponse, AppError> {
  match find_owned_product(&app_state, seller.seller_id, &query).await {
    Ok(product) => Ok(html_response(StatusCode::OK, delete_confirm::render(&product))),
    Err(AppError::NotFound(message)) => Ok(dashboard_redirect(Flash::not_found(message))),
    Err(e) => Err(e),
  }
}

/// Deletes only when the body carries `confirm_delete=1`; any other POST
/// shows the confirmation page again.
#[instrument(name = "handler::delete_product", skip(app_state, query, form), fields(seller_id = %seller.seller_id))]
pub async fn delete_product_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
  query: web::Query<ProductIdQuery>,
  form: Option<web::Form<DeleteConfirmForm>>,
) -> Result<HttpResponse, AppError> {
  let product = match find_owned_product(&app_state, seller.seller_id, &query).await {
    Ok(product) => product,
    Err(AppError::NotFound(message)) => return Ok(dashboard_redirect(Flash::not_found(message))),
    Err(e) => return Err(e),
  };

  if !form.is_some_and(|f| f.is_confirmed()) {
    return Ok(html_response(StatusCode::OK, delete_confirm::render(&product)));
  }

  let ctx_data = ContextData::new(DeleteProductCtxData::new(
    app_state.get_ref().clone(),
    seller.seller_id,
    product.id,
    product.image.clone(),
  ));
  let flash = match app_state.flows.run(ctx_data.clone()).await {
    Ok(PipelineResult::Completed) => {
      let image_removed = ctx_data.read().image_removed;
      info!(product_id = product.id, image_removed, "Product deleted.");
      Flash::success(PRODUCT_DELETED)
    }
    Ok(PipelineResult::Stopped) => Flash::store_error("Error deleting product: the deletion was halted"),
    Err(AppError::NotFound(message)) => Flash::not_found(message),
    Err(e) => {
      log_failure("delete_product", &e);
      Flash::for_error(&e, "Error deleting product", app_state.config.expose_error_details)
    }
  };
  Ok(dashboard_redirect(flash))
}
