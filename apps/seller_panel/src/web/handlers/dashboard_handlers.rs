// seller_panel/src/web/handlers/dashboard_handlers.rs

use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::stats_service;
use crate::state::AppState;
use crate::web::flash::{flash_removal_cookie, Flash};
use crate::web::session::SellerContext;
use crate::web::views::dashboard;

#[instrument(name = "handler::dashboard", skip(app_state, req), fields(seller_id = %seller.seller_id))]
pub async fn dashboard_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
  req: HttpRequest,
) -> Result<HttpResponse, AppError> {
  let flash = Flash::from_request(&req);

  let products = app_state.store.list_seller_products(seller.seller_id).await?;
  let stats = stats_service::seller_stats(app_state.store.as_ref(), seller.seller_id, &products).await;
  info!(products = products.len(), "Dashboard loaded.");

  let mut response = HttpResponse::Ok();
  response.content_type("text/html; charset=utf-8");
  if flash.is_some() {
    response.cookie(flash_removal_cookie());
  }
  Ok(response.body(dashboard::render(&stats, &products, flash.as_ref()).into_string()))
}
