// seller_panel/src/web/session.rs

//! Seller identity for the current request.
//!
//! Login and session issuance live upstream; the auth layer in front of this
//! service forwards the identity as `X-User-ID` and `X-User-Role` headers.

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::warn;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "X-User-ID";
pub const USER_ROLE_HEADER: &str = "X-User-Role";
pub const SELLER_ROLE: &str = "seller";

/// An authenticated seller. Extraction fails with `AppError::Unauthorized`,
/// which redirects to `/` before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellerContext {
  pub seller_id: i64,
}

impl SellerContext {
  fn from_headers(req: &HttpRequest) -> Option<Self> {
    let header_value = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok()).map(str::trim);

    let seller_id = header_value(USER_ID_HEADER)?.parse::<i64>().ok().filter(|id| *id > 0)?;
    if header_value(USER_ROLE_HEADER)? != SELLER_ROLE {
      return None;
    }
    Some(Self { seller_id })
  }
}

impl FromRequest for SellerContext {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    match Self::from_headers(req) {
      Some(seller) => ready(Ok(seller)),
      None => {
        warn!(path = %req.path(), "Request without a seller identity; redirecting home.");
        ready(Err(AppError::Unauthorized))
      }
    }
  }
}
