pub mod app_config;
pub mod product_file;

pub use app_config::Config;
pub use product_file::{
    load_from_path, load_products, save_products, save_to_path, LoadReport, StoreError,
};
