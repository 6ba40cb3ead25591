// seller_panel/src/models/mod.rs

//! Data structures read from and written to the product store.

pub mod category;
pub mod product;
pub mod sales;

pub use category::Category;
pub use product::{NewProduct, Product, ProductChanges, ProductStatus};
pub use sales::{SalesSummary, SellerStats};
