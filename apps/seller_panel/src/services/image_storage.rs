// seller_panel/src/services/image_storage.rs

//! Stored product images.
//!
//! Stored paths are what the products table keeps in `image`, e.g.
//! `uploads/products/3f2c...e1.png`. They are served back under `/uploads/`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};

/// Prefix of every stored path; maps onto the upload root directory.
pub const STORED_PATH_PREFIX: &str = "uploads";
const PRODUCT_IMAGE_DIR: &str = "products";

/// Sniffed formats accepted for product images.
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "webp", "gif"];

/// An image part taken from a product form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
  pub file_name: Option<String>,
  pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
  pub path: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
  /// Validates and writes `upload`, returning its stored path.
  async fn stage(&self, upload: ImageUpload) -> Result<StoredImage>;

  /// Removes a stored image. Removing an image that is already gone succeeds.
  async fn remove(&self, stored_path: &str) -> Result<()>;

  /// Returns the image bytes, or `None` if the path is unknown or outside the store.
  async fn read(&self, stored_path: &str) -> Result<Option<Vec<u8>>>;
}

/// Writes images to the local filesystem under `root`.
#[derive(Debug, Clone)]
pub struct FsImageStore {
  root: PathBuf,
  max_bytes: usize,
}

impl FsImageStore {
  pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
    Self {
      root: root.into(),
      max_bytes,
    }
  }

  /// Maps a stored path onto the filesystem, rejecting anything that could
  /// leave the upload root.
  fn resolve(&self, stored_path: &str) -> Option<PathBuf> {
    let relative = Path::new(stored_path).strip_prefix(STORED_PATH_PREFIX).ok()?;
    if relative.as_os_str().is_empty() {
      return None;
    }
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
      return None;
    }
    Some(self.root.join(relative))
  }

  fn validate(&self, upload: &ImageUpload) -> Result<&'static str> {
    if upload.bytes.is_empty() {
      return Err(AppError::Upload("Please upload a product image".to_string()));
    }
    if upload.bytes.len() > self.max_bytes {
      return Err(AppError::Upload(format!(
        "File is too large. Maximum size is {}",
        size_label(self.max_bytes)
      )));
    }

    let extension = infer::get(&upload.bytes)
      .filter(|kind| kind.mime_type().starts_with("image/"))
      .map(|kind| kind.extension())
      .filter(|ext| SUPPORTED_FORMATS.contains(ext));
    match extension {
      Some(ext) => Ok(ext),
      None => {
        warn!(file_name = ?upload.file_name, "Rejected upload with unsupported content type.");
        Err(AppError::Upload(
          "Only JPG, PNG, WEBP and GIF images are allowed".to_string(),
        ))
      }
    }
  }
}

#[async_trait]
impl ImageStore for FsImageStore {
  #[instrument(name = "images::stage", skip(self, upload), fields(size = upload.bytes.len()), err)]
  async fn stage(&self, upload: ImageUpload) -> Result<StoredImage> {
    let extension = self.validate(&upload)?;

    let dir = self.root.join(PRODUCT_IMAGE_DIR);
    tokio::fs::create_dir_all(&dir).await?;

    let file_name = format!("{}.{}", Uuid::new_v4(), extension);
    tokio::fs::write(dir.join(&file_name), &upload.bytes).await?;

    let path = format!("{}/{}/{}", STORED_PATH_PREFIX, PRODUCT_IMAGE_DIR, file_name);
    info!(stored_path = %path, "Image staged.");
    Ok(StoredImage { path })
  }

  #[instrument(name = "images::remove", skip(self), err)]
  async fn remove(&self, stored_path: &str) -> Result<()> {
    let Some(file) = self.resolve(stored_path) else {
      return Err(AppError::Upload(format!("Refusing to remove '{}'", stored_path)));
    };
    match tokio::fs::remove_file(&file).await {
      Ok(()) => {
        debug!("Image removed.");
        Ok(())
      }
      Err(e) if e.kind() == ErrorKind::NotFound => {
        debug!("Image already absent.");
        Ok(())
      }
      Err(e) => Err(AppError::Io(e)),
    }
  }

  async fn read(&self, stored_path: &str) -> Result<Option<Vec<u8>>> {
    let Some(file) = self.resolve(stored_path) else {
      return Ok(None);
    };
    match tokio::fs::read(&file).await {
      Ok(bytes) => Ok(Some(bytes)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(AppError::Io(e)),
    }
  }
}

/// Human size for limit messages: whole MB when exact, KB rounded up otherwise.
fn size_label(bytes: usize) -> String {
  const KB: usize = 1024;
  const MB: usize = 1024 * KB;
  if bytes >= MB && bytes % MB == 0 {
    format!("{} MB", bytes / MB)
  } else {
    format!("{} KB", bytes.div_ceil(KB))
  }
}
