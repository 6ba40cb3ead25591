// seller_panel/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{dashboard_handlers, delete_handlers, media_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Called from `main.rs` (and the page tests) to mount every route.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    // Stored product images; public, like the storefront that embeds them.
    .route("/uploads/{path:.*}", web::get().to(media_handlers::serve_upload_handler))
    .service(
      web::scope("/seller")
        .route("", web::get().to(dashboard_handlers::dashboard_handler))
        .route("/dashboard", web::get().to(dashboard_handlers::dashboard_handler))
        .service(
          web::resource("/products/new")
            .route(web::get().to(product_handlers::new_product_form_handler))
            .route(web::post().to(product_handlers::create_product_handler)),
        )
        .service(
          web::resource("/products/edit")
            .route(web::get().to(product_handlers::edit_product_form_handler))
            .route(web::post().to(product_handlers::update_product_handler)),
        )
        .service(
          web::resource("/products/delete")
            .route(web::get().to(delete_handlers::confirm_delete_handler))
            .route(web::post().to(delete_handlers::delete_product_handler)),
        ),
    );
}
