use anyhow::Context;
use stockyard_catalog::{LookupStats, PricingEngine, Product, Warehouse};
use stockyard_order::{OrderManager, RandomOrderGenerator};
use stockyard_store::Config;

/// Everything the menu operates on
pub struct AppState {
    pub warehouse: Warehouse,
    pub orders: OrderManager,
    pub pricing: PricingEngine,
    pub generator: RandomOrderGenerator,
    pub lookups: LookupStats,
    pub data_file: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let pricing =
            PricingEngine::new(config.pricing.clone()).context("invalid [pricing] settings")?;
        let generator =
            RandomOrderGenerator::new(config.orders.clone()).context("invalid [orders] settings")?;

        let mut state = Self {
            warehouse: Warehouse::new(),
            orders: OrderManager::new(),
            pricing,
            generator,
            lookups: LookupStats::default(),
            data_file: config.warehouse.data_file.clone(),
        };

        if config.warehouse.seed_demo_products {
            state.seed_demo_products()?;
        }
        Ok(state)
    }

    fn seed_demo_products(&mut self) -> anyhow::Result<()> {
        self.warehouse.add(Product::electronic("Laptop Pro", 4500.0, 10, 1.2, "2 years"))?;
        self.warehouse.add(Product::clothing("Jeans", 150.0, 25, 0.4, "M"))?;
        self.warehouse.add(Product::food("Yogurt", 3.5, 100, 0.2, "2024-10-01"))?;
        tracing::info!(products = self.warehouse.len(), "Seeded demo products");
        Ok(())
    }
}
