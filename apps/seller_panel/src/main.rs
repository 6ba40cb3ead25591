// seller_panel/src/main.rs

mod config;
mod db;
mod errors;
mod models;
mod pipelines;
mod services;
mod state;
mod web;

#[cfg(test)]
mod tests;

use crate::config::{AppConfig, LogFormat, StoreBackend};
use crate::db::{MemoryProductStore, PgProductStore, ProductStore};
use crate::errors::AppError;
use crate::services::image_storage::FsImageStore;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let builder = tracing_subscriber::fmt()
    .with_env_filter(env_filter) // RUST_LOG override
    .with_span_events(FmtSpan::CLOSE); // Log when spans close, showing duration

  match format {
    LogFormat::Json => builder.json().init(),
    LogFormat::Pretty => builder.init(),
  }
}

async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductStore>> {
  let store: Arc<dyn ProductStore> = match config.store_backend {
    StoreBackend::Postgres => {
      let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the postgres store backend")?;
      let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to the database")?;
      tracing::info!("Successfully connected to the database.");

      if config.run_migrations {
        sqlx::migrate!("./migrations")
          .run(&pool)
          .await
          .map_err(AppError::from)
          .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied.");
      }
      Arc::new(PgProductStore::new(pool))
    }
    StoreBackend::Memory => {
      tracing::warn!("Using the in-memory product store; data is lost on restart.");
      Arc::new(MemoryProductStore::new())
    }
  };

  if config.seed_db {
    let seeded = store
      .seed_default_categories()
      .await
      .context("Failed to seed default categories")?;
    tracing::info!(seeded, "Category seeding finished.");
  }
  Ok(store)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let app_config = Arc::new(AppConfig::from_env().context("Failed to load application configuration")?);
  init_tracing(app_config.log_format);
  tracing::info!("Starting seller panel server...");

  let store = build_store(&app_config).await?;
  let images = Arc::new(FsImageStore::new(
    app_config.upload_dir.clone(),
    app_config.max_upload_bytes,
  ));

  // Registry<AppError> so `flows.run` returns the app's own error type.
  let flows = Arc::new(vitrine::Registry::<AppError>::new());
  pipelines::register_all_pipelines(&flows);

  let app_state = AppState {
    store,
    images,
    flows,
    config: app_config.clone(),
  };

  let server_address = app_config.bind_address();
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("HTTP server terminated with an error")
}
