// seller_panel/src/models/category.rs

use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
  pub id: i64,
  pub name: String,
}

/// Inserted by `SEED_DB=true` when the categories table is empty.
pub const DEFAULT_CATEGORY_NAMES: &[&str] = &["Electronics", "Fashion", "Furniture", "Home & Garden", "Sports"];
