// seller_panel/src/db/postgres.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{error, info, instrument, warn};

use crate::db::ProductStore;
use crate::errors::{AppError, Result};
use crate::models::category::DEFAULT_CATEGORY_NAMES;
use crate::models::{Category, NewProduct, Product, ProductChanges, SalesSummary};

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.image, p.category_id, \
   c.name AS category_name, p.seller_id, p.status, p.created_at";

#[derive(Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Rolls back explicitly and hands the original error back.
async fn rollback_with(tx: sqlx::Transaction<'_, sqlx::Postgres>, err: sqlx::Error) -> AppError {
  if let Err(rollback_err) = tx.rollback().await {
    warn!(error = %rollback_err, "Transaction rollback failed.");
  }
  AppError::Sqlx(err)
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "store::list_categories", skip(self), err)]
  async fn list_categories(&self) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name ASC")
      .fetch_all(&self.pool)
      .await?;
    Ok(categories)
  }

  #[instrument(name = "store::list_seller_products", skip(self), err)]
  async fn list_seller_products(&self, seller_id: i64) -> Result<Vec<Product>> {
    let sql = format!(
      "SELECT {} FROM products p JOIN categories c ON p.category_id = c.id \
       WHERE p.seller_id = $1 ORDER BY p.created_at DESC, p.id DESC",
      PRODUCT_COLUMNS
    );
    let products = sqlx::query_as::<_, Product>(&sql)
      .bind(seller_id)
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to fetch products for seller {}: {}", seller_id, e);
        AppError::Sqlx(e)
      })?;
    Ok(products)
  }

  #[instrument(name = "store::find_seller_product", skip(self), err)]
  async fn find_seller_product(&self, seller_id: i64, product_id: i64) -> Result<Option<Product>> {
    let sql = format!(
      "SELECT {} FROM products p JOIN categories c ON p.category_id = c.id \
       WHERE p.id = $1 AND p.seller_id = $2",
      PRODUCT_COLUMNS
    );
    let product = sqlx::query_as::<_, Product>(&sql)
      .bind(product_id)
      .bind(seller_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  #[instrument(name = "store::insert_product", skip(self, new_product), fields(seller_id = new_product.seller_id), err)]
  async fn insert_product(&self, new_product: &NewProduct) -> Result<i64> {
    let mut tx = self.pool.begin().await?;
    let inserted = sqlx::query_scalar::<_, i64>(
      "INSERT INTO products (name, description, price, image, seller_id, category_id) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(&new_product.name)
    .bind(&new_product.description)
    .bind(new_product.price)
    .bind(&new_product.image)
    .bind(new_product.seller_id)
    .bind(new_product.category_id)
    .fetch_one(&mut *tx)
    .await;

    match inserted {
      Ok(id) => {
        tx.commit().await?;
        info!(product_id = id, "Product inserted.");
        Ok(id)
      }
      Err(e) => Err(rollback_with(tx, e).await),
    }
  }

  #[instrument(name = "store::update_seller_product", skip(self, changes), err)]
  async fn update_seller_product(&self, seller_id: i64, product_id: i64, changes: &ProductChanges) -> Result<bool> {
    let mut tx = self.pool.begin().await?;
    // COALESCE keeps the stored image when no replacement was staged.
    let updated = sqlx::query(
      "UPDATE products SET name = $1, description = $2, price = $3, category_id = $4, status = $5, \
       image = COALESCE($6, image) WHERE id = $7 AND seller_id = $8",
    )
    .bind(&changes.name)
    .bind(&changes.description)
    .bind(changes.price)
    .bind(changes.category_id)
    .bind(changes.status)
    .bind(changes.image.as_deref())
    .bind(product_id)
    .bind(seller_id)
    .execute(&mut *tx)
    .await;

    match updated {
      Ok(done) if done.rows_affected() == 1 => {
        tx.commit().await?;
        Ok(true)
      }
      Ok(_) => {
        tx.rollback().await?;
        Ok(false)
      }
      Err(e) => Err(rollback_with(tx, e).await),
    }
  }

  #[instrument(name = "store::delete_seller_product", skip(self), err)]
  async fn delete_seller_product(&self, seller_id: i64, product_id: i64) -> Result<bool> {
    let mut tx = self.pool.begin().await?;
    let deleted = sqlx::query("DELETE FROM products WHERE id = $1 AND seller_id = $2")
      .bind(product_id)
      .bind(seller_id)
      .execute(&mut *tx)
      .await;

    match deleted {
      Ok(done) if done.rows_affected() == 1 => {
        tx.commit().await?;
        Ok(true)
      }
      Ok(_) => {
        tx.rollback().await?;
        Ok(false)
      }
      Err(e) => Err(rollback_with(tx, e).await),
    }
  }

  #[instrument(name = "store::seller_sales", skip(self), err)]
  async fn seller_sales(&self, seller_id: i64) -> Result<SalesSummary> {
    let (total_sales, total_revenue) = sqlx::query_as::<_, (i64, Option<Decimal>)>(
      "SELECT COUNT(DISTINCT o.id), SUM(oi.price * oi.quantity) \
       FROM orders o \
       JOIN order_items oi ON o.id = oi.order_id \
       JOIN products p ON oi.product_id = p.id \
       WHERE p.seller_id = $1 AND o.status IN ('paid', 'completed')",
    )
    .bind(seller_id)
    .fetch_one(&self.pool)
    .await?;

    Ok(SalesSummary {
      total_sales,
      total_revenue: total_revenue.unwrap_or_default(),
    })
  }

  #[instrument(name = "store::seed_default_categories", skip(self), err)]
  async fn seed_default_categories(&self) -> Result<usize> {
    let mut tx = self.pool.begin().await?;
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
      .fetch_one(&mut *tx)
      .await?;
    if existing > 0 {
      tx.rollback().await?;
      return Ok(0);
    }

    for name in DEFAULT_CATEGORY_NAMES {
      if let Err(e) = sqlx::query("INSERT INTO categories (name) VALUES ($1)")
        .bind(*name)
        .execute(&mut *tx)
        .await
      {
        return Err(rollback_with(tx, e).await);
      }
    }
    tx.commit().await?;
    Ok(DEFAULT_CATEGORY_NAMES.len())
  }
}
