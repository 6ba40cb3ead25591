// seller_panel/src/web/forms.rs

//! Product form submissions: multipart parsing and field validation.

use actix_multipart::Multipart;
use futures_util::StreamExt;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

use crate::errors::{AppError, Result};
use crate::models::ProductStatus;
use crate::services::image_storage::ImageUpload;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const IMAGE_REQUIRED: &str = "Please upload a product image";
pub const INVALID_STATUS: &str = "Invalid product status";
pub const PRICE_TOO_HIGH: &str = "Price cannot exceed 99999999.99";

const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Largest value `products.price NUMERIC(10,2)` can hold.
pub fn max_price() -> Decimal {
  Decimal::new(9_999_999_999, 2)
}

/// Raw values of a submitted product form, as typed by the seller.
#[derive(Debug, Clone, Default)]
pub struct ProductFormInput {
  pub name: String,
  pub description: String,
  pub price: String,
  pub category_id: String,
  /// Only the edit form carries a status.
  pub status: Option<String>,
  /// `None` when no file was chosen.
  pub image: Option<ImageUpload>,
}

/// Product fields after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedProduct {
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub category_id: i64,
  pub status: ProductStatus,
}

impl ProductFormInput {
  /// Checks the text fields, then the image when `image_required`.
  ///
  /// Any missing or malformed text field yields the same generic message.
  pub fn validate(&self, image_required: bool) -> Result<ValidatedProduct> {
    let name = self.name.trim();
    let description = self.description.trim();
    let price = Decimal::from_str(self.price.trim())
      .ok()
      .map(|p| p.round_dp(2))
      .filter(|p| *p > Decimal::ZERO);
    let category_id = self.category_id.trim().parse::<i64>().ok().filter(|id| *id > 0);

    let (Some(price), Some(category_id)) = (price, category_id) else {
      return Err(AppError::Validation(ALL_FIELDS_REQUIRED.to_string()));
    };
    if name.is_empty() || description.is_empty() {
      return Err(AppError::Validation(ALL_FIELDS_REQUIRED.to_string()));
    }
    if price > max_price() {
      return Err(AppError::Validation(PRICE_TOO_HIGH.to_string()));
    }

    let status = match self.status.as_deref().map(str::trim) {
      None | Some("") => ProductStatus::default(),
      Some(raw) => ProductStatus::from_str(raw).map_err(|_| AppError::Validation(INVALID_STATUS.to_string()))?,
    };

    if image_required && self.image.is_none() {
      return Err(AppError::Validation(IMAGE_REQUIRED.to_string()));
    }

    Ok(ValidatedProduct {
      name: name.to_string(),
      description: description.to_string(),
      price,
      category_id,
      status,
    })
  }
}

/// Reads a `multipart/form-data` product form.
///
/// Image bytes past one over `max_image_bytes` are drained and dropped; the
/// image store then rejects the upload as too large.
pub async fn read_product_form(mut payload: Multipart, max_image_bytes: usize) -> Result<ProductFormInput> {
  let mut form = ProductFormInput::default();

  while let Some(item) = payload.next().await {
    let mut field = item?;
    let field_name = field.name().unwrap_or_default().to_string();

    if field_name == "image" {
      let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .map(str::to_string);
      let mut bytes = Vec::new();
      while let Some(chunk) = field.next().await {
        let chunk = chunk?;
        let room = max_image_bytes.saturating_add(1).saturating_sub(bytes.len());
        bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
      }
      // An empty file input still submits a part with no content.
      if !bytes.is_empty() {
        form.image = Some(ImageUpload { file_name, bytes });
      }
      continue;
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
      let chunk = chunk?;
      if bytes.len() + chunk.len() > MAX_TEXT_FIELD_BYTES {
        return Err(AppError::Multipart(format!("field '{}' is too large", field_name)));
      }
      bytes.extend_from_slice(&chunk);
    }
    let value =
      String::from_utf8(bytes).map_err(|_| AppError::Multipart(format!("field '{}' is not valid UTF-8", field_name)))?;

    match field_name.as_str() {
      "name" => form.name = value,
      "description" => form.description = value,
      "price" => form.price = value,
      "category_id" => form.category_id = value,
      "status" => form.status = Some(value),
      other => debug!(field = other, "Ignoring unknown form field."),
    }
  }

  Ok(form)
}

/// `?id=N` on the edit and delete pages.
#[derive(Debug, Deserialize)]
pub struct ProductIdQuery {
  pub id: Option<String>,
}

impl ProductIdQuery {
  pub fn product_id(&self) -> Option<i64> {
    self.id.as_deref()?.trim().parse::<i64>().ok().filter(|id| *id > 0)
  }
}

/// Urlencoded body of the delete confirmation form.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteConfirmForm {
  pub confirm_delete: Option<String>,
}

impl DeleteConfirmForm {
  pub fn is_confirmed(&self) -> bool {
    self.confirm_delete.as_deref() == Some("1")
  }
}
