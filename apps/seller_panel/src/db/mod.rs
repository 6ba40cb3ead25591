// seller_panel/src/db/mod.rs

//! Product store: every read and write a seller page performs.
//!
//! Every product query is scoped by `seller_id`. A product owned by another
//! seller is indistinguishable from one that does not exist.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Category, NewProduct, Product, ProductChanges, SalesSummary};

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
  /// All categories, ordered by name.
  async fn list_categories(&self) -> Result<Vec<Category>>;

  /// The seller's products, newest first, with category names.
  async fn list_seller_products(&self, seller_id: i64) -> Result<Vec<Product>>;

  async fn find_seller_product(&self, seller_id: i64, product_id: i64) -> Result<Option<Product>>;

  /// Inserts a product with the default status and returns its id.
  async fn insert_product(&self, new_product: &NewProduct) -> Result<i64>;

  /// Returns `false` when no product with this id belongs to the seller.
  async fn update_seller_product(&self, seller_id: i64, product_id: i64, changes: &ProductChanges) -> Result<bool>;

  /// Returns `false` when no product with this id belongs to the seller.
  async fn delete_seller_product(&self, seller_id: i64, product_id: i64) -> Result<bool>;

  /// Distinct paid or completed orders and their revenue for the seller's products.
  async fn seller_sales(&self, seller_id: i64) -> Result<SalesSummary>;

  /// Inserts the default categories if there are none. Returns how many were added.
  async fn seed_default_categories(&self) -> Result<usize>;
}
