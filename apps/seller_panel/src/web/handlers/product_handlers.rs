// seller_panel/src/web/handlers/product_handlers.rs

use actix_multipart::Multipart;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};
use vitrine::{ContextData, PipelineResult};

use crate::errors::AppError;
use crate::pipelines::contexts::{AddProductCtxData, EditProductCtxData};
use crate::state::AppState;
use crate::web::flash::{Flash, PRODUCT_NOT_FOUND};
use crate::web::forms::{read_product_form, ProductIdQuery};
use crate::web::handlers::{dashboard_redirect, find_owned_product, log_failure};
use crate::web::session::SellerContext;
use crate::web::views::layout::html_response;
use crate::web::views::product_form;

const PRODUCT_ADDED: &str = "Product added successfully";
const PRODUCT_UPDATED: &str = "Product updated successfully";

#[instrument(name = "handler::new_product_form", skip(app_state), fields(seller_id = %seller.seller_id))]
pub async fn new_product_form_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let categories = app_state.store.list_categories().await?;
  Ok(html_response(StatusCode::OK, product_form::render_add(&categories, None)))
}

#[instrument(name = "handler::create_product", skip(app_state, payload), fields(seller_id = %seller.seller_id))]
pub async fn create_product_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let outcome = add_product(&seller, &app_state, payload).await;

  let flash = match outcome {
    Ok(product_id) => {
      info!(product_id, "Product added.");
      Flash::success(PRODUCT_ADDED)
    }
    Err(e) => {
      log_failure("add_product", &e);
      Flash::for_error(&e, "Error adding product", app_state.config.expose_error_details)
    }
  };

  let categories = app_state.store.list_categories().await?;
  Ok(html_response(
    StatusCode::OK,
    product_form::render_add(&categories, Some(&flash)),
  ))
}

async fn add_product(seller: &SellerContext, app_state: &web::Data<AppState>, payload: Multipart) -> Result<i64, AppError> {
  let form = read_product_form(payload, app_state.config.max_upload_bytes).await?;
  let ctx_data = ContextData::new(AddProductCtxData::new(app_state.get_ref().clone(), seller.seller_id, form));

  match app_state.flows.run(ctx_data.clone()).await? {
    PipelineResult::Completed => ctx_data.read().created_product_id.ok_or_else(|| {
      AppError::Internal("Add-product pipeline completed without a product id".to_string())
    }),
    PipelineResult::Stopped => {
      warn!("Add-product pipeline was stopped by a handler.");
      Err(AppError::Internal("Adding the product was halted".to_string()))
    }
  }
}

#[instrument(name = "handler::edit_product_form", skip(app_state, query), fields(seller_id = %seller.seller_id))]
pub async fn edit_product_form_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
  query: web::Query<ProductIdQuery>,
) -> Result<HttpResponse, AppError> {
  let product = match find_owned_product(&app_state, seller.seller_id, &query).await {
    Ok(product) => product,
    Err(AppError::NotFound(message)) => return Ok(dashboard_redirect(Flash::not_found(message))),
    Err(e) => return Err(e),
  };

  let categories = app_state.store.list_categories().await?;
  Ok(html_response(
    StatusCode::OK,
    product_form::render_edit(&product, &categories, None),
  ))
}

#[instrument(name = "handler::update_product", skip(app_state, query, payload), fields(seller_id = %seller.seller_id))]
pub async fn update_product_handler(
  seller: SellerContext,
  app_state: web::Data<AppState>,
  query: web::Query<ProductIdQuery>,
  payload: Multipart,
) -> Result<HttpResponse, AppError> {
  let stored = match find_owned_product(&app_state, seller.seller_id, &query).await {
    Ok(product) => product,
    Err(AppError::NotFound(message)) => return Ok(dashboard_redirect(Flash::not_found(message))),
    Err(e) => return Err(e),
  };

  let outcome = async {
    let form = read_product_form(payload, app_state.config.max_upload_bytes).await?;
    let ctx_data = ContextData::new(EditProductCtxData::new(
      app_state.get_ref().clone(),
      seller.seller_id,
      stored.id,
      stored.image.clone(),
      form,
    ));
    match app_state.flows.run(ctx_data).await? {
      PipelineResult::Completed => Ok(()),
      PipelineResult::Stopped => Err(AppError::Internal("Updating the product was halted".to_string())),
    }
  }
  .await;

  let (product, flash) = match outcome {
    Ok(()) => {
      info!(product_id = stored.id, "Product updated.");
      match app_state.store.find_seller_product(seller.seller_id, stored.id).await? {
        Some(updated) => (updated, Flash::success(PRODUCT_UPDATED)),
        None => return Ok(dashboard_redirect(Flash::not_found(PRODUCT_NOT_FOUND))),
      }
    }
    Err(AppError::NotFound(message)) => return Ok(dashboard_redirect(Flash::not_found(message))),
    Err(e) => {
      log_failure("update_product", &e);
      let flash = Flash::for_error(&e, "Error updating product", app_state.config.expose_error_details);
      (stored, flash)
    }
  };

  let categories = app_state.store.list_categories().await?;
  Ok(html_response(
    StatusCode::OK,
    product_form::render_edit(&product, &categories, Some(&flash)),
  ))
}
