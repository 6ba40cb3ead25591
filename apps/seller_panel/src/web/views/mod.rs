// seller_panel/src/web/views/mod.rs

//! Server-rendered pages (maud).

pub mod dashboard;
pub mod delete_confirm;
pub mod layout;
pub mod product_form;
