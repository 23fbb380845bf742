use crate::manager::OrderError;
use crate::models::Order;
use serde::Deserialize;
use stockyard_catalog::Warehouse;
use stockyard_core::{CoreError, RandomGenerator};

/// Settings for random order generation
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_items_per_order")]
    pub items_per_order: usize,
    #[serde(default = "default_min_quantity")]
    pub min_quantity: u32,
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,
}

fn default_items_per_order() -> usize { 3 }
fn default_min_quantity() -> u32 { 1 }
fn default_max_quantity() -> u32 { 5 }

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            items_per_order: default_items_per_order(),
            min_quantity: default_min_quantity(),
            max_quantity: default_max_quantity(),
        }
    }
}

/// Builds orders from randomly picked warehouse products.
///
/// The same product may be picked more than once, in which case its
/// quantities merge into one line.
pub struct RandomOrderGenerator {
    config: GeneratorConfig,
}

impl RandomOrderGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, OrderError> {
        if config.items_per_order == 0 {
            return Err(OrderError::InvalidSettings(
                "items_per_order must be at least 1".to_string(),
            ));
        }
        if config.min_quantity == 0 || config.min_quantity > config.max_quantity {
            return Err(OrderError::InvalidSettings(format!(
                "quantity range [{}, {}] must be positive and non-empty",
                config.min_quantity, config.max_quantity
            )));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self, warehouse: &Warehouse) -> Result<Order, OrderError> {
        let products = warehouse.products();
        if products.is_empty() {
            tracing::warn!("Cannot generate an order from an empty warehouse");
            return Err(OrderError::EmptyWarehouse);
        }

        let mut order = Order::new();
        for _ in 0..self.config.items_per_order {
            let index = RandomGenerator::random_index(products.len()).map_err(settings_error)?;
            let qty = RandomGenerator::random_int(
                i64::from(self.config.min_quantity),
                i64::from(self.config.max_quantity),
            )
            .map_err(settings_error)?;
            order.add_item(&products[index], qty)?;
        }

        tracing::debug!(order_id = %order.id, lines = order.item_count(), "Generated random order");
        Ok(order)
    }
}

impl Default for RandomOrderGenerator {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }
}

fn settings_error(e: CoreError) -> OrderError {
    OrderError::InvalidSettings(e.to_string())
}
