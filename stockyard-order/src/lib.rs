pub mod models;
pub mod manager;
pub mod generator;
pub mod record;

pub use models::{Order, QuantityEdit};
pub use manager::{OrderError, OrderManager};
pub use generator::{GeneratorConfig, RandomOrderGenerator};
pub use record::OrderRecordError;
