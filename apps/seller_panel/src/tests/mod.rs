// seller_panel/src/tests/mod.rs

//! Page-level tests: the real routes and pipelines over the in-memory store
//! and a temporary upload directory.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::config::{AppConfig, LogFormat, StoreBackend, DEFAULT_MAX_UPLOAD_BYTES};
use crate::db::{MemoryProductStore, ProductStore};
use crate::errors::AppError;
use crate::models::{Category, NewProduct, Product, ProductStatus};
use crate::pipelines::contexts::{DeleteProductCtxData, EditProductCtxData};
use crate::services::image_storage::test_images::{GIF, PNG};
use crate::services::image_storage::{FsImageStore, ImageUpload};
use crate::state::AppState;
use crate::web::configure_app_routes;
use crate::web::forms::{ProductFormInput, PRICE_TOO_HIGH};
use vitrine::ContextData;

const SELLER: i64 = 7;
const OTHER_SELLER: i64 = 8;
const BOUNDARY: &str = "vitrine-test-boundary";

/// Builds the service under test from a `TestApp`.
macro_rules! init_app {
  ($app:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($app.state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

struct TestApp {
  state: AppState,
  store: Arc<MemoryProductStore>,
  upload_dir: TempDir,
}

impl TestApp {
  fn new() -> Self {
    Self::with_max_upload(DEFAULT_MAX_UPLOAD_BYTES)
  }

  fn with_max_upload(max_upload_bytes: usize) -> Self {
    let upload_dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryProductStore::with_categories(vec![
      Category { id: 1, name: "Furniture".to_string() },
      Category { id: 2, name: "Electronics".to_string() },
    ]));
    let config = AppConfig {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      store_backend: StoreBackend::Memory,
      database_url: None,
      db_max_connections: 1,
      run_migrations: false,
      seed_db: false,
      upload_dir: upload_dir.path().to_path_buf(),
      max_upload_bytes,
      expose_error_details: true,
      log_format: LogFormat::Pretty,
    };

    let flows = Arc::new(vitrine::Registry::<AppError>::new());
    crate::pipelines::register_all_pipelines(&flows);

    let state = AppState {
      store: store.clone(),
      images: Arc::new(FsImageStore::new(upload_dir.path(), config.max_upload_bytes)),
      flows,
      config: Arc::new(config),
    };
    Self { state, store, upload_dir }
  }

  /// Inserts a product with a real stored image, bypassing the pages.
  async fn seed_product(&self, seller_id: i64, name: &str) -> Product {
    let stored = self
      .state
      .images
      .stage(ImageUpload {
        file_name: Some("seed.png".to_string()),
        bytes: PNG.to_vec(),
      })
      .await
      .unwrap();
    let id = self
      .store
      .insert_product(&NewProduct {
        seller_id,
        name: name.to_string(),
        description: "Solid oak".to_string(),
        price: Decimal::from(100),
        image: stored.path,
        category_id: 1,
      })
      .await
      .unwrap();
    self.product(seller_id, id).await.unwrap()
  }

  async fn product(&self, seller_id: i64, product_id: i64) -> Option<Product> {
    self.store.find_seller_product(seller_id, product_id).await.unwrap()
  }

  fn file_for(&self, stored_path: &str) -> PathBuf {
    self.upload_dir.path().join(stored_path.trim_start_matches("uploads/"))
  }

  fn stored_files(&self) -> usize {
    std::fs::read_dir(self.upload_dir.path().join("products"))
      .map(|entries| entries.count())
      .unwrap_or(0)
  }
}

fn as_seller(req: test::TestRequest, seller_id: i64) -> test::TestRequest {
  req
    .insert_header(("X-User-ID", seller_id.to_string()))
    .insert_header(("X-User-Role", "seller"))
}

fn multipart_body(fields: &[(&str, &str)], image: Option<&[u8]>) -> Vec<u8> {
  let mut body = Vec::new();
  for (name, value) in fields {
    body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
        BOUNDARY, name, value
      )
      .as_bytes(),
    );
  }
  if let Some(bytes) = image {
    body.extend_from_slice(
      format!(
        "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\nContent-Type: image/png\r\n\r\n",
        BOUNDARY
      )
      .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(b"\r\n");
  }
  body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
  body
}

fn multipart_post(uri: &str, seller_id: i64, fields: &[(&str, &str)], image: Option<&[u8]>) -> test::TestRequest {
  as_seller(test::TestRequest::post().uri(uri), seller_id)
    .insert_header((
      header::CONTENT_TYPE,
      format!("multipart/form-data; boundary={}", BOUNDARY),
    ))
    .set_payload(multipart_body(fields, image))
}

fn chair_fields() -> Vec<(&'static str, &'static str)> {
  vec![
    ("name", "Chair"),
    ("description", "Oak dining chair"),
    ("price", "100"),
    ("category_id", "1"),
  ]
}

async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
  String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
}

fn location<B>(resp: &ServiceResponse<B>) -> &str {
  resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

/// The `name=value` part of the response's Set-Cookie, ready to send back.
fn flash_cookie<B>(resp: &ServiceResponse<B>) -> String {
  let set_cookie = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
  set_cookie.split(';').next().unwrap().to_string()
}

/// Value rendered in the dashboard stat card labelled `label`.
fn stat(body: &str, label: &str) -> String {
  let after_label = &body[body.find(&format!(">{}</h3>", label)).unwrap()..];
  let value_start = after_label.find("font-bold\">").unwrap() + "font-bold\">".len();
  let rest = &after_label[value_start..];
  rest[..rest.find('<').unwrap()].to_string()
}

#[actix_rt::test]
async fn test_health_check() {
  let app = TestApp::new();
  let svc = init_app!(app);

  let resp = test::call_service(&svc, test::TestRequest::get().uri("/health").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_text(resp).await, r#"{"status":"ok"}"#);
}

#[actix_rt::test]
async fn test_pages_redirect_home_without_a_seller_identity() {
  let app = TestApp::new();
  let svc = init_app!(app);

  for uri in ["/seller/dashboard", "/seller/products/new", "/seller/products/edit?id=1"] {
    let resp = test::call_service(&svc, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", uri);
    assert_eq!(location(&resp), "/");
  }

  let buyer = test::TestRequest::get()
    .uri("/seller")
    .insert_header(("X-User-ID", "3"))
    .insert_header(("X-User-Role", "buyer"))
    .to_request();
  let resp = test::call_service(&svc, buyer).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert_eq!(location(&resp), "/");
}

#[actix_rt::test]
async fn test_adding_a_chair_shows_up_in_dashboard_stats() {
  let app = TestApp::new();
  let svc = init_app!(app);

  let resp = test::call_service(&svc, multipart_post("/seller/products/new", SELLER, &chair_fields(), Some(PNG)).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_text(resp).await;
  assert!(body.contains("Product added successfully"));
  assert!(body.contains("Add another product"));

  let products = app.store.list_seller_products(SELLER).await.unwrap();
  assert_eq!(products.len(), 1);
  assert_eq!(products[0].name, "Chair");
  assert_eq!(products[0].status, ProductStatus::Active);
  assert!(app.file_for(&products[0].image).exists());

  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri("/seller/dashboard"), SELLER).to_request()).await;
  let body = body_text(resp).await;
  assert_eq!(stat(&body, "Total products"), "1");
  assert_eq!(stat(&body, "Active products"), "1");
  assert_eq!(stat(&body, "Total sales"), "0");
  assert_eq!(stat(&body, "Total revenue"), "0.00");
  assert!(body.contains("Chair"));
  assert!(body.contains("Furniture"));
  assert!(body.contains("return confirm("));
}

#[actix_rt::test]
async fn test_add_with_a_blank_field_or_no_image_creates_nothing() {
  let app = TestApp::new();
  let svc = init_app!(app);

  let mut blank_name = chair_fields();
  blank_name[0] = ("name", "  ");
  let resp = test::call_service(&svc, multipart_post("/seller/products/new", SELLER, &blank_name, Some(PNG)).to_request()).await;
  assert!(body_text(resp).await.contains("All fields are required"));

  let resp = test::call_service(&svc, multipart_post("/seller/products/new", SELLER, &chair_fields(), None).to_request()).await;
  assert!(body_text(resp).await.contains("Please upload a product image"));

  let resp = test::call_service(&svc, multipart_post("/seller/products/new", SELLER, &chair_fields(), Some(&b""[..])).to_request()).await;
  assert!(body_text(resp).await.contains("Please upload a product image"));

  assert_eq!(app.store.product_count(), 0);
  assert_eq!(app.stored_files(), 0);
}

#[actix_rt::test]
async fn test_add_with_a_rejected_upload_creates_nothing() {
  let app = TestApp::new();
  let svc = init_app!(app);

  let resp = test::call_service(
    &svc,
    multipart_post("/seller/products/new", SELLER, &chair_fields(), Some(&b"MZ\x90\x00not an image"[..])).to_request(),
  )
  .await;
  let body = body_text(resp).await;
  assert!(body.contains("Only JPG, PNG, WEBP and GIF images are allowed"));
  assert_eq!(app.store.product_count(), 0);
  assert_eq!(app.stored_files(), 0);
}

#[actix_rt::test]
async fn test_failed_insert_removes_the_staged_image() {
  let app = TestApp::new();
  let svc = init_app!(app);
  app.store.set_fail_writes(true);

  let resp = test::call_service(&svc, multipart_post("/seller/products/new", SELLER, &chair_fields(), Some(PNG)).to_request()).await;
  let body = body_text(resp).await;
  assert!(body.contains("Error adding product: simulated write failure"));
  assert_eq!(app.store.product_count(), 0);
  assert_eq!(app.stored_files(), 0);
}

#[actix_rt::test]
async fn test_edit_form_is_prefilled_for_the_owner_only() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;
  let uri = format!("/seller/products/edit?id={}", chair.id);

  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri(&uri), SELLER).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_text(resp).await;
  assert!(body.contains(r#"value="Chair""#));
  assert!(body.contains(r#"value="active" selected"#));
  assert!(body.contains(&format!("/{}", chair.image)));

  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri(&uri), OTHER_SELLER).to_request()).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert_eq!(location(&resp), "/seller/dashboard");
  let cookie = flash_cookie(&resp);

  let dashboard = as_seller(test::TestRequest::get().uri("/seller/dashboard"), OTHER_SELLER)
    .insert_header((header::COOKIE, cookie))
    .to_request();
  let body = body_text(test::call_service(&svc, dashboard).await).await;
  assert!(body.contains("Product not found or does not belong to you"));
  assert!(!body.contains(r#"value="Chair""#));
}

#[actix_rt::test]
async fn test_edit_without_an_id_redirects_with_a_flash() {
  let app = TestApp::new();
  let svc = init_app!(app);

  for uri in ["/seller/products/edit", "/seller/products/edit?id=abc"] {
    let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri(uri), SELLER).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let cookie = flash_cookie(&resp);
    let dashboard = as_seller(test::TestRequest::get().uri("/seller/dashboard"), SELLER)
      .insert_header((header::COOKIE, cookie))
      .to_request();
    assert!(body_text(test::call_service(&svc, dashboard).await).await.contains("Product ID not specified"));
  }
}

#[actix_rt::test]
async fn test_edit_to_sold_without_new_image_keeps_the_image() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;

  let mut fields = chair_fields();
  fields.push(("status", "sold"));
  let uri = format!("/seller/products/edit?id={}", chair.id);
  let resp = test::call_service(&svc, multipart_post(&uri, SELLER, &fields, None).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_text(resp).await;
  assert!(body.contains("Product updated successfully"));
  assert!(body.contains(r#"value="sold" selected"#));

  let updated = app.product(SELLER, chair.id).await.unwrap();
  assert_eq!(updated.status, ProductStatus::Sold);
  assert_eq!(updated.image, chair.image);
  assert!(app.file_for(&chair.image).exists());
}

#[actix_rt::test]
async fn test_edit_with_new_image_removes_the_old_one_after_commit() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;

  let mut fields = chair_fields();
  fields[0] = ("name", "Armchair");
  let uri = format!("/seller/products/edit?id={}", chair.id);
  let resp = test::call_service(&svc, multipart_post(&uri, SELLER, &fields, Some(GIF)).to_request()).await;
  assert!(body_text(resp).await.contains("Product updated successfully"));

  let updated = app.product(SELLER, chair.id).await.unwrap();
  assert_eq!(updated.name, "Armchair");
  assert_ne!(updated.image, chair.image);
  assert!(updated.image.ends_with(".gif"));
  assert!(app.file_for(&updated.image).exists());
  assert!(!app.file_for(&chair.image).exists());
  assert_eq!(app.stored_files(), 1);
}

#[actix_rt::test]
async fn test_edit_with_a_rejected_upload_changes_nothing() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;

  let mut fields = chair_fields();
  fields[0] = ("name", "Renamed");
  let uri = format!("/seller/products/edit?id={}", chair.id);
  let resp = test::call_service(&svc, multipart_post(&uri, SELLER, &fields, Some(&b"plain text"[..])).to_request()).await;
  let body = body_text(resp).await;
  assert!(body.contains("Only JPG, PNG, WEBP and GIF images are allowed"));
  // The stored record is re-rendered, not the submitted one.
  assert!(body.contains(r#"value="Chair""#));

  assert_eq!(app.product(SELLER, chair.id).await.unwrap(), chair);
  assert!(app.file_for(&chair.image).exists());
  assert_eq!(app.stored_files(), 1);
}

#[actix_rt::test]
async fn test_failed_update_removes_the_replacement_and_keeps_the_original() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;
  app.store.set_fail_writes(true);

  let uri = format!("/seller/products/edit?id={}", chair.id);
  let resp = test::call_service(&svc, multipart_post(&uri, SELLER, &chair_fields(), Some(GIF)).to_request()).await;
  assert!(body_text(resp).await.contains("Error updating product: simulated write failure"));

  assert_eq!(app.product(SELLER, chair.id).await.unwrap(), chair);
  assert!(app.file_for(&chair.image).exists());
  assert_eq!(app.stored_files(), 1);
}

#[actix_rt::test]
async fn test_delete_requires_explicit_confirmation() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;
  let uri = format!("/seller/products/delete?id={}", chair.id);

  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri(&uri), SELLER).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_text(resp).await;
  assert!(body.contains("Chair"));
  assert!(body.contains("Category: Furniture"));
  assert!(body.contains(r#"name="confirm_delete" value="1""#));

  let unconfirmed = as_seller(test::TestRequest::post().uri(&uri), SELLER)
    .set_form([("confirm_delete", "0")])
    .to_request();
  let resp = test::call_service(&svc, unconfirmed).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert!(app.product(SELLER, chair.id).await.is_some());

  let empty = as_seller(test::TestRequest::post().uri(&uri), SELLER).to_request();
  assert_eq!(test::call_service(&svc, empty).await.status(), StatusCode::OK);
  assert!(app.product(SELLER, chair.id).await.is_some());
}

#[actix_rt::test]
async fn test_confirmed_delete_removes_row_and_file_and_flashes_once() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;
  let keep = app.seed_product(SELLER, "Table").await;

  let confirmed = as_seller(
    test::TestRequest::post().uri(&format!("/seller/products/delete?id={}", chair.id)),
    SELLER,
  )
  .set_form([("confirm_delete", "1")])
  .to_request();
  let resp = test::call_service(&svc, confirmed).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert_eq!(location(&resp), "/seller/dashboard");
  let cookie = flash_cookie(&resp);

  assert!(app.product(SELLER, chair.id).await.is_none());
  assert!(!app.file_for(&chair.image).exists());
  assert!(app.product(SELLER, keep.id).await.is_some());
  assert!(app.file_for(&keep.image).exists());

  let dashboard = as_seller(test::TestRequest::get().uri("/seller/dashboard"), SELLER)
    .insert_header((header::COOKIE, cookie))
    .to_request();
  let resp = test::call_service(&svc, dashboard).await;
  let cleared = resp.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap().to_string();
  assert!(cleared.starts_with("seller_flash=;"));
  assert!(cleared.contains("Max-Age=0"));
  let body = body_text(resp).await;
  assert!(body.contains("Product deleted"));
  assert_eq!(stat(&body, "Total products"), "1");

  // The browser drops the cleared cookie; the next load has no banner.
  let again = as_seller(test::TestRequest::get().uri("/seller/dashboard"), SELLER).to_request();
  let resp = test::call_service(&svc, again).await;
  assert!(resp.headers().get(header::SET_COOKIE).is_none());
  assert!(!body_text(resp).await.contains("Product deleted"));
}

#[actix_rt::test]
async fn test_delete_of_a_foreign_product_changes_nothing() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;

  let req = as_seller(
    test::TestRequest::post().uri(&format!("/seller/products/delete?id={}", chair.id)),
    OTHER_SELLER,
  )
  .set_form([("confirm_delete", "1")])
  .to_request();
  let resp = test::call_service(&svc, req).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert!(flash_cookie(&resp).contains("not_found"));

  assert!(app.product(SELLER, chair.id).await.is_some());
  assert!(app.file_for(&chair.image).exists());
}

#[actix_rt::test]
async fn test_failed_delete_keeps_row_and_file_and_reports_the_error() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;
  app.store.set_fail_writes(true);

  let req = as_seller(
    test::TestRequest::post().uri(&format!("/seller/products/delete?id={}", chair.id)),
    SELLER,
  )
  .set_form([("confirm_delete", "1")])
  .to_request();
  let resp = test::call_service(&svc, req).await;
  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  let cookie = flash_cookie(&resp);

  assert!(app.product(SELLER, chair.id).await.is_some());
  assert!(app.file_for(&chair.image).exists());

  let dashboard = as_seller(test::TestRequest::get().uri("/seller/dashboard"), SELLER)
    .insert_header((header::COOKIE, cookie))
    .to_request();
  let body = body_text(test::call_service(&svc, dashboard).await).await;
  assert!(body.contains("Error deleting product: simulated write failure"));
}

#[actix_rt::test]
async fn test_dashboard_survives_a_failing_sales_aggregate() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;
  app.store.record_sale(1, "paid", chair.id, Decimal::from(100), 2);
  app.store.set_fail_sales(true);

  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri("/seller"), SELLER).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_text(resp).await;
  assert_eq!(stat(&body, "Total products"), "1");
  assert_eq!(stat(&body, "Total sales"), "0");
  assert_eq!(stat(&body, "Total revenue"), "0.00");

  app.store.set_fail_sales(false);
  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri("/seller"), SELLER).to_request()).await;
  let body = body_text(resp).await;
  assert_eq!(stat(&body, "Total sales"), "1");
  assert_eq!(stat(&body, "Total revenue"), "200.00");
}

#[actix_rt::test]
async fn test_empty_dashboard_offers_first_product_link() {
  let app = TestApp::new();
  let svc = init_app!(app);

  let resp = test::call_service(&svc, as_seller(test::TestRequest::get().uri("/seller/dashboard"), SELLER).to_request()).await;
  let body = body_text(resp).await;
  assert!(body.contains("Add your first product"));
  assert_eq!(stat(&body, "Total products"), "0");
}

#[actix_rt::test]
async fn test_uploads_are_served_with_sniffed_content_type() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;

  let resp = test::call_service(&svc, test::TestRequest::get().uri(&format!("/{}", chair.image)).to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
  assert_eq!(test::read_body(resp).await.as_ref(), PNG);

  let resp = test::call_service(&svc, test::TestRequest::get().uri("/uploads/products/missing.png").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);

  let resp = test::call_service(&svc, test::TestRequest::get().uri("/uploads/%2E%2E/secret").to_request()).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn armchair_form(image: &[u8]) -> ProductFormInput {
  ProductFormInput {
    name: "Armchair".to_string(),
    description: "Reupholstered".to_string(),
    price: "250".to_string(),
    category_id: "1".to_string(),
    status: None,
    image: Some(ImageUpload {
      file_name: Some("armchair.gif".to_string()),
      bytes: image.to_vec(),
    }),
  }
}

#[actix_rt::test]
async fn test_update_of_a_product_owned_elsewhere_is_not_found_and_drops_the_staged_image() {
  let app = TestApp::new();
  let lamp = app.seed_product(OTHER_SELLER, "Lamp").await;

  // The handler's ownership check is bypassed, as when ownership changes mid-request.
  let ctx_data = ContextData::new(EditProductCtxData::new(
    app.state.clone(),
    SELLER,
    lamp.id,
    lamp.image.clone(),
    armchair_form(GIF),
  ));
  let result = app.state.flows.run(ctx_data.clone()).await;

  assert!(matches!(result, Err(AppError::NotFound(_))));
  let guard = ctx_data.read();
  assert_eq!(guard.staged_image, None);
  assert!(!guard.previous_image_discarded);
  drop(guard);
  assert_eq!(app.stored_files(), 1);
  assert_eq!(app.product(OTHER_SELLER, lamp.id).await.unwrap(), lamp);
  assert!(app.file_for(&lamp.image).exists());
}

#[actix_rt::test]
async fn test_delete_of_a_product_owned_elsewhere_is_not_found_and_keeps_row_and_file() {
  let app = TestApp::new();
  let lamp = app.seed_product(OTHER_SELLER, "Lamp").await;

  let ctx_data = ContextData::new(DeleteProductCtxData::new(
    app.state.clone(),
    SELLER,
    lamp.id,
    lamp.image.clone(),
  ));
  let result = app.state.flows.run(ctx_data.clone()).await;

  assert!(matches!(result, Err(AppError::NotFound(_))));
  assert!(!ctx_data.read().row_deleted);
  assert!(!ctx_data.read().image_removed);
  assert_eq!(app.product(OTHER_SELLER, lamp.id).await.unwrap(), lamp);
  assert!(app.file_for(&lamp.image).exists());
}

#[actix_rt::test]
async fn test_edit_post_by_another_seller_redirects_and_changes_nothing() {
  let app = TestApp::new();
  let svc = init_app!(app);
  let chair = app.seed_product(SELLER, "Chair").await;

  let mut fields = chair_fields();
  fields[0] = ("name", "Stolen");
  let uri = format!("/seller/products/edit?id={}", chair.id);
  let resp = test::call_service(&svc, multipart_post(&uri, OTHER_SELLER, &fields, Some(GIF)).to_request()).await;

  assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  assert_eq!(location(&resp), "/seller/dashboard");
  assert!(flash_cookie(&resp).contains("not_found"));

  assert_eq!(app.product(SELLER, chair.id).await.unwrap(), chair);
  assert!(app.file_for(&chair.image).exists());
  assert_eq!(app.stored_files(), 1);
}

#[actix_rt::test]
async fn test_add_rejects_a_price_beyond_the_column_precision() {
  let app = TestApp::new();
  let svc = init_app!(app);

  let mut fields = chair_fields();
  fields[2] = ("price", "1000000000000");
  let resp = test::call_service(
    &svc,
    multipart_post("/seller/products/new", SELLER, &fields, Some(PNG)).to_request(),
  )
  .await;

  assert!(body_text(resp).await.contains(PRICE_TOO_HIGH));
  assert_eq!(app.store.product_count(), 0);
  assert_eq!(app.stored_files(), 0);
}

#[actix_rt::test]
async fn test_add_accepts_an_upload_limit_at_the_top_of_the_range() {
  let app = TestApp::with_max_upload(usize::MAX);
  let svc = init_app!(app);

  let resp = test::call_service(
    &svc,
    multipart_post("/seller/products/new", SELLER, &chair_fields(), Some(PNG)).to_request(),
  )
  .await;

  assert!(body_text(resp).await.contains("Product added successfully"));
  assert_eq!(app.store.product_count(), 1);
  assert_eq!(app.stored_files(), 1);
}
