// seller_panel/src/models/product.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_status_enum", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
  #[default]
  Active,
  Inactive,
  Sold,
}

impl ProductStatus {
  pub const ALL: [ProductStatus; 3] = [ProductStatus::Active, ProductStatus::Inactive, ProductStatus::Sold];

  pub fn as_str(&self) -> &'static str {
    match self {
      ProductStatus::Active => "active",
      ProductStatus::Inactive => "inactive",
      ProductStatus::Sold => "sold",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      ProductStatus::Active => "Active",
      ProductStatus::Inactive => "Inactive",
      ProductStatus::Sold => "Sold",
    }
  }
}

impl fmt::Display for ProductStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ProductStatus {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "active" => Ok(ProductStatus::Active),
      "inactive" => Ok(ProductStatus::Inactive),
      "sold" => Ok(ProductStatus::Sold),
      _ => Err(()),
    }
  }
}

/// A product as read back from the store, joined with its category name.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub price: Decimal,
  /// Stored relative path, e.g. `uploads/products/<uuid>.png`. May be empty.
  pub image: String,
  pub category_id: i64,
  pub category_name: String,
  pub seller_id: i64,
  pub status: ProductStatus,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub seller_id: i64,
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub image: String,
  pub category_id: i64,
}

/// Field updates applied by an edit. `image: None` keeps the stored image.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
  pub name: String,
  pub description: String,
  pub price: Decimal,
  pub category_id: i64,
  pub status: ProductStatus,
  pub image: Option<String>,
}
