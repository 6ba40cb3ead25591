// seller_panel/src/state.rs
use crate::config::AppConfig;
use crate::db::ProductStore;
use crate::errors::AppError;
use crate::services::image_storage::ImageStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn ProductStore>,
  pub images: Arc<dyn ImageStore>,
  pub flows: Arc<vitrine::Registry<AppError>>,
  pub config: Arc<AppConfig>,
}
