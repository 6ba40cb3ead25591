// seller_panel/src/web/handlers/mod.rs

pub mod dashboard_handlers;
pub mod delete_handlers;
pub mod media_handlers;
pub mod product_handlers;

use actix_web::HttpResponse;

use crate::errors::AppError;
use crate::models::Product;
use crate::state::AppState;
use crate::web::flash::{redirect_with_flash, Flash, PRODUCT_ID_MISSING, PRODUCT_NOT_FOUND};
use crate::web::forms::ProductIdQuery;
use crate::web::views::layout::DASHBOARD_PATH;

/// Loads the product named by `?id=N`, scoped to `seller_id`.
///
/// Fails with `AppError::NotFound` for a missing id or a product the seller
/// does not own; handlers turn that into a dashboard redirect.
pub(crate) async fn find_owned_product(
  app_state: &AppState,
  seller_id: i64,
  query: &ProductIdQuery,
) -> Result<Product, AppError> {
  let product_id = query
    .product_id()
    .ok_or_else(|| AppError::NotFound(PRODUCT_ID_MISSING.to_string()))?;
  app_state
    .store
    .find_seller_product(seller_id, product_id)
    .await?
    .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))
}

pub(crate) fn dashboard_redirect(flash: Flash) -> HttpResponse {
  redirect_with_flash(DASHBOARD_PATH, flash)
}

/// Seller-caused failures are routine; everything else is an operational error.
pub(crate) fn log_failure(action: &str, err: &AppError) {
  if err.is_user_facing() {
    tracing::info!(action, error = %err, "Submission rejected.");
  } else {
    tracing::error!(action, error = %err, "Operation failed.");
  }
}
