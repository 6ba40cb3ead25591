// seller_panel/src/web/mod.rs

pub mod flash;
pub mod forms;
pub mod handlers;
pub mod routes;
pub mod session;
pub mod views;

pub use routes::configure_app_routes;
