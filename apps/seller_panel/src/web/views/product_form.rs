// seller_panel/src/web/views/product_form.rs

//! Add and edit forms.

use maud::{html, Markup};

use crate::models::{Category, Product, ProductStatus};
use crate::web::flash::Flash;
use crate::web::views::layout::{self, back_to_dashboard, banner, edit_path, format_price, image_src, DASHBOARD_PATH, NEW_PRODUCT_PATH};

fn category_select(categories: &[Category], selected: Option<i64>) -> Markup {
  html! {
    label for="category_id" { "Category" }
    select id="category_id" name="category_id" required {
      option value="" { "Choose a category" }
      @for category in categories {
        option value=(category.id) selected[selected == Some(category.id)] { (category.name) }
      }
    }
  }
}

/// The add form. Submitted values are not kept after a failed attempt.
pub fn render_add(categories: &[Category], flash: Option<&Flash>) -> Markup {
  let succeeded = flash.is_some_and(Flash::is_success);
  layout::page(
    "Add product",
    html! {
      (back_to_dashboard())
      h1 class="text-2xl font-bold mb-6 text-center" { "Add product" }
      (banner(flash))
      @if succeeded {
        div class="mb-4 space-x-4" {
          a href=(DASHBOARD_PATH) { "Back to my products" }
          a href=(NEW_PRODUCT_PATH) { "Add another product" }
        }
      }
      form method="post" action=(NEW_PRODUCT_PATH) enctype="multipart/form-data" {
        label for="name" { "Product name" }
        input id="name" name="name" type="text" required;

        label for="price" { "Price" }
        input id="price" name="price" type="number" min="0.01" step="0.01" required;

        (category_select(categories, None))

        label for="description" { "Description" }
        textarea id="description" name="description" rows="4" required {}

        label for="image" { "Product image" }
        input id="image" name="image" type="file" accept="image/png,image/jpeg,image/webp,image/gif" required;

        button type="submit" { "Add product" }
      }
    },
  )
}

/// The edit form, pre-filled from the stored record.
pub fn render_edit(product: &Product, categories: &[Category], flash: Option<&Flash>) -> Markup {
  layout::page(
    "Edit product",
    html! {
      (back_to_dashboard())
      h1 class="text-2xl font-bold mb-6 text-center" { "Edit product" }
      (banner(flash))
      form method="post" action=(edit_path(product.id)) enctype="multipart/form-data" {
        label for="name" { "Product name" }
        input id="name" name="name" type="text" value=(product.name) required;

        label for="price" { "Price" }
        input id="price" name="price" type="number" min="0.01" step="0.01" value=(format_price(product.price)) required;

        (category_select(categories, Some(product.category_id)))

        label for="status" { "Status" }
        select id="status" name="status" required {
          @for status in ProductStatus::ALL {
            option value=(status.as_str()) selected[status == product.status] { (status.label()) }
          }
        }

        label for="description" { "Description" }
        textarea id="description" name="description" rows="4" required { (product.description) }

        @if !product.image.is_empty() {
          div class="current-image" {
            p { "Current image" }
            img src=(image_src(&product.image)) alt=(product.name) class="w-32 h-32 object-cover";
          }
        }
        label for="image" { "Replace image (optional)" }
        input id="image" name="image" type="file" accept="image/png,image/jpeg,image/webp,image/gif";

        button type="submit" { "Save changes" }
      }
    },
  )
}
