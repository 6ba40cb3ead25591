// seller_panel/src/web/flash.rs

//! One-shot status messages carried across a redirect.
//!
//! The flash travels in the `seller_flash` cookie as percent-encoded JSON. The
//! page that receives it renders it once and clears the cookie.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

pub const FLASH_COOKIE: &str = "seller_flash";

pub const PRODUCT_ID_MISSING: &str = "Product ID not specified";
pub const PRODUCT_NOT_FOUND: &str = "Product not found or does not belong to you";
pub const PRODUCT_DELETED: &str = "Product deleted";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashOutcome {
  Success,
  ValidationError,
  NotFound,
  StoreError,
}

impl FlashOutcome {
  pub fn for_error(err: &AppError) -> Self {
    match err {
      AppError::Validation(_) | AppError::Upload(_) | AppError::Multipart(_) => FlashOutcome::ValidationError,
      AppError::NotFound(_) => FlashOutcome::NotFound,
      _ => FlashOutcome::StoreError,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
  pub outcome: FlashOutcome,
  pub message: String,
}

impl Flash {
  pub fn new(outcome: FlashOutcome, message: impl Into<String>) -> Self {
    Self {
      outcome,
      message: message.into(),
    }
  }

  pub fn success(message: impl Into<String>) -> Self {
    Self::new(FlashOutcome::Success, message)
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    Self::new(FlashOutcome::NotFound, message)
  }

  pub fn store_error(message: impl Into<String>) -> Self {
    Self::new(FlashOutcome::StoreError, message)
  }

  /// The banner for a failed operation; `context` prefixes store errors.
  pub fn for_error(err: &AppError, context: &str, expose_details: bool) -> Self {
    Self::new(FlashOutcome::for_error(err), err.seller_message(context, expose_details))
  }

  pub fn is_success(&self) -> bool {
    self.outcome == FlashOutcome::Success
  }

  fn to_cookie(&self) -> Option<Cookie<'static>> {
    let value = serde_json::to_string(self).ok()?;
    Some(
      Cookie::build(FLASH_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::minutes(5))
        .finish(),
    )
  }

  /// Reads the flash carried by `req`, if any. A malformed cookie is ignored.
  pub fn from_request(req: &HttpRequest) -> Option<Flash> {
    let cookie = req.cookie(FLASH_COOKIE)?;
    match serde_json::from_str(cookie.value()) {
      Ok(flash) => Some(flash),
      Err(e) => {
        debug!(error = %e, "Discarding malformed flash cookie.");
        None
      }
    }
  }
}

/// Cookie that clears a previously set flash.
pub fn flash_removal_cookie() -> Cookie<'static> {
  let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
  cookie.make_removal();
  cookie
}

/// `303 See Other` to `location`, carrying `flash`.
pub fn redirect_with_flash(location: &str, flash: Flash) -> HttpResponse {
  let mut response = HttpResponse::SeeOther();
  response.insert_header((header::LOCATION, location));
  // Request cookies are percent-decoded, so the value is sent encoded.
  if let Some(cookie) = flash.to_cookie() {
    response.insert_header((header::SET_COOKIE, cookie.encoded().to_string()));
  }
  response.finish()
}
