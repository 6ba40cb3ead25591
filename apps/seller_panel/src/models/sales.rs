// seller_panel/src/models/sales.rs

use rust_decimal::Decimal;
use serde::Serialize;

/// Aggregate over paid or completed orders containing a seller's products.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
  /// Distinct orders.
  pub total_sales: i64,
  /// Sum of `price * quantity` over the matching order items.
  pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SellerStats {
  pub total_products: usize,
  pub active_products: usize,
  pub total_sales: i64,
  pub total_revenue: Decimal,
}
