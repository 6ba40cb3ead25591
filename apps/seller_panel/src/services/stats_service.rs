// seller_panel/src/services/stats_service.rs

use tracing::{instrument, warn};

use crate::db::ProductStore;
use crate::models::{Product, ProductStatus, SalesSummary, SellerStats};

/// Dashboard statistics for a seller whose products are already loaded.
///
/// A failing sales aggregate (e.g. the orders tables are missing) yields zero
/// sales and revenue; the dashboard still renders.
#[instrument(name = "stats::seller_stats", skip(store, products), fields(products = products.len()))]
pub async fn seller_stats(store: &dyn ProductStore, seller_id: i64, products: &[Product]) -> SellerStats {
  let sales = match store.seller_sales(seller_id).await {
    Ok(summary) => summary,
    Err(e) => {
      warn!(error = %e, seller_id, "Sales aggregate unavailable; reporting zero sales.");
      SalesSummary::default()
    }
  };

  SellerStats {
    total_products: products.len(),
    active_products: products.iter().filter(|p| p.status == ProductStatus::Active).count(),
    total_sales: sales.total_sales,
    total_revenue: sales.total_revenue,
  }
}
