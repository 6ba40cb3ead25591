// seller_panel/src/web/views/layout.rs

//! Page chrome shared by every seller page.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use maud::{html, Markup, DOCTYPE};
use rust_decimal::Decimal;

use crate::web::flash::{Flash, FlashOutcome};

pub const DASHBOARD_PATH: &str = "/seller/dashboard";
pub const NEW_PRODUCT_PATH: &str = "/seller/products/new";

pub fn edit_path(product_id: i64) -> String {
  format!("/seller/products/edit?id={}", product_id)
}

pub fn delete_path(product_id: i64) -> String {
  format!("/seller/products/delete?id={}", product_id)
}

/// Stored image paths are relative; they are served from the site root.
pub fn image_src(stored_path: &str) -> String {
  format!("/{}", stored_path.trim_start_matches('/'))
}

pub fn format_price(price: Decimal) -> String {
  format!("{:.2}", price)
}

pub fn page(title: &str, content: Markup) -> Markup {
  html! {
    (DOCTYPE)
    html lang="en" {
      head {
        meta charset="utf-8";
        meta name="viewport" content="width=device-width, initial-scale=1";
        title { (title) " | Seller Panel" }
      }
      body class="bg-black text-white" {
        header class="border-b border-zinc-800" {
          nav class="container mx-auto px-4 py-4 flex justify-between" {
            a href="/" class="font-bold" { "Marketplace" }
            div class="space-x-4" {
              a href=(DASHBOARD_PATH) { "Seller dashboard" }
              a href=(NEW_PRODUCT_PATH) { "Add product" }
            }
          }
        }
        main class="container mx-auto px-4 py-8" { (content) }
        footer class="border-t border-zinc-800 text-zinc-500 text-sm" {
          div class="container mx-auto px-4 py-6" { "Seller Panel" }
        }
      }
    }
  }
}

/// Success or error banner. Renders nothing without a flash.
pub fn banner(flash: Option<&Flash>) -> Markup {
  html! {
    @if let Some(flash) = flash {
      @match flash.outcome {
        FlashOutcome::Success => {
          div class="flash flash-success bg-green-900/30 border border-green-800 text-green-200 px-4 py-3 rounded mb-4" role="status" {
            (flash.message)
          }
        }
        _ => {
          div class="flash flash-error bg-red-900/30 border border-red-800 text-red-200 px-4 py-3 rounded mb-4" role="alert" {
            (flash.message)
          }
        }
      }
    }
  }
}

pub fn back_to_dashboard() -> Markup {
  html! {
    div class="mb-4" {
      a href=(DASHBOARD_PATH) class="text-zinc-400" { "← Back to seller dashboard" }
    }
  }
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
  page(
    status.canonical_reason().unwrap_or("Error"),
    html! {
      h1 class="text-2xl font-bold mb-4" { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
      p class="mb-4" { (message) }
      a href=(DASHBOARD_PATH) { "Return to the dashboard" }
    },
  )
}

pub fn html_response(status: StatusCode, markup: Markup) -> HttpResponse {
  HttpResponse::build(status)
    .content_type("text/html; charset=utf-8")
    .body(markup.into_string())
}
