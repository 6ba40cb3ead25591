// seller_panel/src/web/views/dashboard.rs

use maud::{html, Markup};

use crate::models::{Product, ProductStatus, SellerStats};
use crate::web::flash::Flash;
use crate::web::views::layout::{self, banner, delete_path, edit_path, format_price, image_src, NEW_PRODUCT_PATH};

const DELETE_CONFIRM_JS: &str = "return confirm('Are you sure you want to delete this product?')";

fn stat_card(label: &str, value: String) -> Markup {
  html! {
    div class="stat bg-zinc-900 border border-zinc-800 rounded-lg p-6" {
      h3 class="text-lg font-medium mb-2" { (label) }
      p class="text-3xl font-bold" { (value) }
    }
  }
}

fn status_badge(status: ProductStatus) -> Markup {
  let class = match status {
    ProductStatus::Active => "badge badge-active bg-green-900/30 text-green-200",
    ProductStatus::Inactive => "badge badge-inactive bg-zinc-800 text-zinc-300",
    ProductStatus::Sold => "badge badge-sold bg-red-900/30 text-red-200",
  };
  html! { span class=(class) { (status.label()) } }
}

pub fn render(stats: &SellerStats, products: &[Product], flash: Option<&Flash>) -> Markup {
  layout::page(
    "Seller dashboard",
    html! {
      h1 class="text-3xl font-bold mb-6" { "Seller dashboard" }
      (banner(flash))

      div class="stats grid grid-cols-1 md:grid-cols-4 gap-6 mb-8" {
        (stat_card("Total products", stats.total_products.to_string()))
        (stat_card("Active products", stats.active_products.to_string()))
        (stat_card("Total sales", stats.total_sales.to_string()))
        (stat_card("Total revenue", format_price(stats.total_revenue)))
      }

      div class="flex justify-between items-center mb-6" {
        h2 class="text-2xl font-bold" { "My products" }
        a href=(NEW_PRODUCT_PATH) { "Add product" }
      }

      @if products.is_empty() {
        div class="empty-state bg-zinc-900 border border-zinc-800 rounded-lg p-8 text-center" {
          p class="mb-4" { "You have no products yet" }
          a href=(NEW_PRODUCT_PATH) { "Add your first product" }
        }
      } @else {
        table class="products w-full" {
          thead {
            tr {
              th { "Product" }
              th { "Category" }
              th { "Price" }
              th { "Status" }
              th { "Actions" }
            }
          }
          tbody {
            @for product in products {
              tr data-product-id=(product.id) {
                td {
                  @if !product.image.is_empty() {
                    img src=(image_src(&product.image)) alt=(product.name) class="w-16 h-16 object-cover rounded mr-4";
                  }
                  h3 { (product.name) }
                  p class="text-zinc-400 text-sm truncate" { (product.description) }
                }
                td { (product.category_name) }
                td { (format_price(product.price)) }
                td { (status_badge(product.status)) }
                td {
                  a href=(edit_path(product.id)) { "Edit" }
                  " "
                  a href=(delete_path(product.id)) onclick=(DELETE_CONFIRM_JS) { "Delete" }
                }
              }
            }
          }
        }
      }
    },
  )
}
