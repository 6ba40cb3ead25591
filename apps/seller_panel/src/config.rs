// seller_panel/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  /// Process-local store; data is lost on restart. For demos and tests.
  Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  pub store_backend: StoreBackend,
  pub database_url: Option<String>,
  pub db_max_connections: u32,
  pub run_migrations: bool,
  pub seed_db: bool,

  /// Root directory for stored images. Stored paths are `uploads/<relative>`.
  pub upload_dir: PathBuf,
  pub max_upload_bytes: usize,

  /// Whether store error text is shown to sellers in failure banners.
  pub expose_error_details: bool,

  pub log_format: LogFormat,
}

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| env::var(var_name).ok().filter(|v| !v.trim().is_empty());
    let parse_bool = |var_name: &str, default: bool| -> Result<bool> {
      match get_env(var_name) {
        None => Ok(default),
        Some(v) => v
          .trim()
          .parse::<bool>()
          .map_err(|e| AppError::Config(format!("Invalid {} value: {}", var_name, e))),
      }
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let store_backend = match get_env("STORE_BACKEND").as_deref().map(str::to_ascii_lowercase).as_deref() {
      None | Some("postgres") => StoreBackend::Postgres,
      Some("memory") => StoreBackend::Memory,
      Some(other) => {
        return Err(AppError::Config(format!(
          "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
          other
        )))
      }
    };

    let database_url = get_env("DATABASE_URL");
    if store_backend == StoreBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required by the postgres store backend)".to_string(),
      ));
    }

    let db_max_connections = get_env("DB_MAX_CONNECTIONS")
      .unwrap_or_else(|| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;

    let upload_dir = PathBuf::from(get_env("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string()));
    let max_upload_bytes = match get_env("MAX_UPLOAD_BYTES") {
      None => DEFAULT_MAX_UPLOAD_BYTES,
      Some(v) => v
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?,
    };

    let log_format = match get_env("LOG_FORMAT").as_deref() {
      Some("json") => LogFormat::Json,
      _ => LogFormat::Pretty,
    };

    let config = Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      db_max_connections,
      run_migrations: parse_bool("RUN_MIGRATIONS", false)?,
      seed_db: parse_bool("SEED_DB", false)?,
      upload_dir,
      max_upload_bytes,
      expose_error_details: parse_bool("EXPOSE_ERROR_DETAILS", true)?,
      log_format,
    };

    // Keep the connection string out of logs.
    tracing::debug!(
      store_backend = ?config.store_backend,
      upload_dir = %config.upload_dir.display(),
      max_upload_bytes = config.max_upload_bytes,
      "Application configuration loaded."
    );
    Ok(config)
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
