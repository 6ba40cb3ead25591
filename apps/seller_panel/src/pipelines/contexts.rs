// seller_panel/src/pipelines/contexts.rs

//! Underlying data for the product pipelines.
//! Handlers receive these wrapped in `vitrine::ContextData`.

use crate::services::image_storage::ImageUpload;
use crate::state::AppState;
use crate::web::forms::{ProductFormInput, ValidatedProduct};

#[derive(Clone)]
pub struct AddProductCtxData {
  pub app_state: AppState,
  pub seller_id: i64,
  pub form: ProductFormInput,
  pub validated: Option<ValidatedProduct>,
  /// Stored path of the image written by `stage_image`.
  pub staged_image: Option<String>,
  pub created_product_id: Option<i64>,
}

impl AddProductCtxData {
  pub fn new(app_state: AppState, seller_id: i64, form: ProductFormInput) -> Self {
    Self {
      app_state,
      seller_id,
      form,
      validated: None,
      staged_image: None,
      created_product_id: None,
    }
  }
}

#[derive(Clone)]
pub struct EditProductCtxData {
  pub app_state: AppState,
  pub seller_id: i64,
  pub product_id: i64,
  /// Image path stored before this edit.
  pub previous_image: String,
  pub form: ProductFormInput,
  pub validated: Option<ValidatedProduct>,
  /// Replacement image, set only when a new file was uploaded.
  pub staged_image: Option<String>,
  pub previous_image_discarded: bool,
}

impl EditProductCtxData {
  pub fn new(app_state: AppState, seller_id: i64, product_id: i64, previous_image: String, form: ProductFormInput) -> Self {
    Self {
      app_state,
      seller_id,
      product_id,
      previous_image,
      form,
      validated: None,
      staged_image: None,
      previous_image_discarded: false,
    }
  }
}

#[derive(Clone)]
pub struct DeleteProductCtxData {
  pub app_state: AppState,
  pub seller_id: i64,
  pub product_id: i64,
  /// Stored path of the product's image; may be empty.
  pub image: String,
  pub row_deleted: bool,
  pub image_removed: bool,
}

impl DeleteProductCtxData {
  pub fn new(app_state: AppState, seller_id: i64, product_id: i64, image: String) -> Self {
    Self {
      app_state,
      seller_id,
      product_id,
      image,
      row_deleted: false,
      image_removed: false,
    }
  }
}

/// Access shared by the add and edit contexts, used by `common_steps`.
pub trait ProductFormCtx: Send + Sync + 'static {
  fn app_state(&self) -> &AppState;
  fn form(&self) -> &ProductFormInput;
  fn image_required(&self) -> bool;
  fn set_validated(&mut self, validated: ValidatedProduct);
  fn take_upload(&mut self) -> Option<ImageUpload>;
  fn staged_image(&self) -> Option<&str>;
  fn set_staged_image(&mut self, stored_path: Option<String>);
}

impl ProductFormCtx for AddProductCtxData {
  fn app_state(&self) -> &AppState {
    &self.app_state
  }
  fn form(&self) -> &ProductFormInput {
    &self.form
  }
  fn image_required(&self) -> bool {
    true
  }
  fn set_validated(&mut self, validated: ValidatedProduct) {
    self.validated = Some(validated);
  }
  fn take_upload(&mut self) -> Option<ImageUpload> {
    self.form.image.take()
  }
  fn staged_image(&self) -> Option<&str> {
    self.staged_image.as_deref()
  }
  fn set_staged_image(&mut self, stored_path: Option<String>) {
    self.staged_image = stored_path;
  }
}

impl ProductFormCtx for EditProductCtxData {
  fn app_state(&self) -> &AppState {
    &self.app_state
  }
  fn form(&self) -> &ProductFormInput {
    &self.form
  }
  fn image_required(&self) -> bool {
    false
  }
  fn set_validated(&mut self, validated: ValidatedProduct) {
    self.validated = Some(validated);
  }
  fn take_upload(&mut self) -> Option<ImageUpload> {
    self.form.image.take()
  }
  fn staged_image(&self) -> Option<&str> {
    self.staged_image.as_deref()
  }
  fn set_staged_image(&mut self, stored_path: Option<String>) {
    self.staged_image = stored_path;
  }
}
