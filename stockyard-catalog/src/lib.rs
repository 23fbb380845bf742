pub mod product;
pub mod pricing;
pub mod record;
pub mod warehouse;

pub use product::{Product, ProductDetails, ProductError, ProductKind};
pub use pricing::{PricingConfig, PricingEngine, PricingError};
pub use record::{ProductRecord, RecordError};
pub use warehouse::{LookupStats, Warehouse, WarehouseError};
pub use stockyard_core::{IdAllocator, ProductId};
