// seller_panel/src/web/views/delete_confirm.rs

use maud::{html, Markup};

use crate::models::Product;
use crate::web::views::layout::{self, back_to_dashboard, delete_path, format_price, image_src, DASHBOARD_PATH};

pub fn render(product: &Product) -> Markup {
  layout::page(
    "Delete product",
    html! {
      (back_to_dashboard())
      div class="bg-zinc-900 border border-zinc-800 rounded-lg p-6 max-w-lg mx-auto" {
        h1 class="text-2xl font-bold mb-6 text-center" { "Delete product" }
        div class="text-center mb-6" {
          @if !product.image.is_empty() {
            img src=(image_src(&product.image)) alt=(product.name) class="w-32 h-32 mx-auto object-cover";
          }
          h2 class="text-xl font-bold mb-2" { (product.name) }
          p class="text-zinc-400 mb-2" { "Category: " (product.category_name) }
          p class="text-zinc-400 mb-4" { "Price: " (format_price(product.price)) }
          p class="text-red-400 mb-4" { "Do you really want to delete this product? This cannot be undone." }
        }
        div class="flex justify-center space-x-4" {
          a href=(DASHBOARD_PATH) { "Cancel" }
          form method="post" action=(delete_path(product.id)) {
            input type="hidden" name="confirm_delete" value="1";
            button type="submit" { "Delete" }
          }
        }
      }
    },
  )
}
