// seller_panel/src/services/mod.rs

pub mod image_storage;
pub mod stats_service;
