// seller_panel/src/db/memory.rs

//! Process-local `ProductStore`. Backs `STORE_BACKEND=memory` and the tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::db::ProductStore;
use crate::errors::{AppError, Result};
use crate::models::category::DEFAULT_CATEGORY_NAMES;
use crate::models::{Category, NewProduct, Product, ProductChanges, ProductStatus, SalesSummary};

#[derive(Debug, Clone)]
struct ProductRow {
  id: i64,
  name: String,
  description: String,
  price: Decimal,
  image: String,
  category_id: i64,
  seller_id: i64,
  status: ProductStatus,
  created_at: DateTime<Utc>,
}

/// Order lines for the sales aggregate. Only tests record them.
#[derive(Debug, Clone)]
#[cfg_attr(not(test), allow(dead_code))]
struct SaleRow {
  order_id: i64,
  order_status: String,
  product_id: i64,
  price: Decimal,
  quantity: i32,
}

#[derive(Debug, Default)]
struct Faults {
  fail_writes: bool,
  fail_sales: bool,
}

#[derive(Debug, Default)]
struct Inner {
  categories: Vec<Category>,
  products: Vec<ProductRow>,
  sales: Vec<SaleRow>,
  next_product_id: i64,
  faults: Faults,
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
  inner: Mutex<Inner>,
}

impl MemoryProductStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_categories(categories: Vec<Category>) -> Self {
    let store = Self::new();
    store.inner.lock().categories = categories;
    store
  }

  fn hydrate(inner: &Inner, row: &ProductRow) -> Product {
    let category_name = inner
      .categories
      .iter()
      .find(|c| c.id == row.category_id)
      .map(|c| c.name.clone())
      .unwrap_or_default();
    Product {
      id: row.id,
      name: row.name.clone(),
      description: row.description.clone(),
      price: row.price,
      image: row.image.clone(),
      category_id: row.category_id,
      category_name,
      seller_id: row.seller_id,
      status: row.status,
      created_at: row.created_at,
    }
  }

  fn check_writable(inner: &Inner) -> Result<()> {
    if inner.faults.fail_writes {
      return Err(AppError::Store("simulated write failure".to_string()));
    }
    Ok(())
  }

  fn check_category(inner: &Inner, category_id: i64) -> Result<()> {
    if inner.categories.iter().any(|c| c.id == category_id) {
      Ok(())
    } else {
      Err(AppError::Store(format!("category {} does not exist", category_id)))
    }
  }
}

#[cfg(test)]
impl MemoryProductStore {
  pub fn set_fail_writes(&self, fail: bool) {
    self.inner.lock().faults.fail_writes = fail;
  }

  pub fn set_fail_sales(&self, fail: bool) {
    self.inner.lock().faults.fail_sales = fail;
  }

  pub fn record_sale(&self, order_id: i64, order_status: &str, product_id: i64, price: Decimal, quantity: i32) {
    self.inner.lock().sales.push(SaleRow {
      order_id,
      order_status: order_status.to_string(),
      product_id,
      price,
      quantity,
    });
  }

  pub fn product_count(&self) -> usize {
    self.inner.lock().products.len()
  }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
  async fn list_categories(&self) -> Result<Vec<Category>> {
    let mut categories = self.inner.lock().categories.clone();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(categories)
  }

  async fn list_seller_products(&self, seller_id: i64) -> Result<Vec<Product>> {
    let inner = self.inner.lock();
    let mut rows: Vec<&ProductRow> = inner.products.iter().filter(|p| p.seller_id == seller_id).collect();
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(rows.into_iter().map(|row| Self::hydrate(&inner, row)).collect())
  }

  async fn find_seller_product(&self, seller_id: i64, product_id: i64) -> Result<Option<Product>> {
    let inner = self.inner.lock();
    Ok(
      inner
        .products
        .iter()
        .find(|p| p.id == product_id && p.seller_id == seller_id)
        .map(|row| Self::hydrate(&inner, row)),
    )
  }

  #[instrument(name = "memory_store::insert_product", skip(self, new_product), err)]
  async fn insert_product(&self, new_product: &NewProduct) -> Result<i64> {
    let mut inner = self.inner.lock();
    Self::check_writable(&inner)?;
    Self::check_category(&inner, new_product.category_id)?;

    inner.next_product_id += 1;
    let id = inner.next_product_id;
    inner.products.push(ProductRow {
      id,
      name: new_product.name.clone(),
      description: new_product.description.clone(),
      price: new_product.price,
      image: new_product.image.clone(),
      category_id: new_product.category_id,
      seller_id: new_product.seller_id,
      status: ProductStatus::default(),
      created_at: Utc::now(),
    });
    debug!(product_id = id, "Product inserted.");
    Ok(id)
  }

  #[instrument(name = "memory_store::update_seller_product", skip(self, changes), err)]
  async fn update_seller_product(&self, seller_id: i64, product_id: i64, changes: &ProductChanges) -> Result<bool> {
    let mut inner = self.inner.lock();
    Self::check_writable(&inner)?;
    Self::check_category(&inner, changes.category_id)?;

    let Some(row) = inner
      .products
      .iter_mut()
      .find(|p| p.id == product_id && p.seller_id == seller_id)
    else {
      return Ok(false);
    };
    row.name = changes.name.clone();
    row.description = changes.description.clone();
    row.price = changes.price;
    row.category_id = changes.category_id;
    row.status = changes.status;
    if let Some(image) = &changes.image {
      row.image = image.clone();
    }
    Ok(true)
  }

  #[instrument(name = "memory_store::delete_seller_product", skip(self), err)]
  async fn delete_seller_product(&self, seller_id: i64, product_id: i64) -> Result<bool> {
    let mut inner = self.inner.lock();
    Self::check_writable(&inner)?;

    let before = inner.products.len();
    inner.products.retain(|p| !(p.id == product_id && p.seller_id == seller_id));
    Ok(inner.products.len() < before)
  }

  async fn seller_sales(&self, seller_id: i64) -> Result<SalesSummary> {
    let inner = self.inner.lock();
    if inner.faults.fail_sales {
      return Err(AppError::Store("relation \"orders\" does not exist".to_string()));
    }

    let owned: HashSet<i64> = inner
      .products
      .iter()
      .filter(|p| p.seller_id == seller_id)
      .map(|p| p.id)
      .collect();
    let mut orders = HashSet::new();
    let mut total_revenue = Decimal::ZERO;
    for sale in inner
      .sales
      .iter()
      .filter(|s| owned.contains(&s.product_id) && matches!(s.order_status.as_str(), "paid" | "completed"))
    {
      orders.insert(sale.order_id);
      total_revenue += sale.price * Decimal::from(sale.quantity);
    }

    Ok(SalesSummary {
      total_sales: orders.len() as i64,
      total_revenue,
    })
  }

  async fn seed_default_categories(&self) -> Result<usize> {
    let mut inner = self.inner.lock();
    if !inner.categories.is_empty() {
      return Ok(0);
    }
    inner.categories = DEFAULT_CATEGORY_NAMES
      .iter()
      .zip(1..)
      .map(|(name, id)| Category {
        id,
        name: (*name).to_string(),
      })
      .collect();
    Ok(inner.categories.len())
  }
}
