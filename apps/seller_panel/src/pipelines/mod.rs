// seller_panel/src/pipelines/mod.rs

//! Defines and registers the product pipelines.

use crate::errors::AppError;
use std::sync::Arc;
use vitrine::Registry;

pub mod common_steps;
pub mod contexts;

pub mod add_product_pipeline;
pub mod delete_product_pipeline;
pub mod edit_product_pipeline;

/// Registers every product pipeline. Called once at startup.
pub fn register_all_pipelines(registry: &Arc<Registry<AppError>>) {
  tracing::info!("Registering product pipelines...");

  add_product_pipeline::register_add_product_pipeline(registry);
  edit_product_pipeline::register_edit_product_pipeline(registry);
  delete_product_pipeline::register_delete_product_pipeline(registry);

  tracing::info!("All product pipelines registered.");
}
