use serde::Deserialize;
use std::env;
use std::path::Path;
use stockyard_catalog::PricingConfig;
use stockyard_order::GeneratorConfig;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub warehouse: WarehouseConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub orders: GeneratorConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WarehouseConfig {
    /// Default path offered by the load/save menu entries
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Stock the warehouse with a few demo products at startup
    #[serde(default = "default_seed_demo_products")]
    pub seed_demo_products: bool,
}

fn default_data_file() -> String { "data/products.txt".to_string() }
fn default_seed_demo_products() -> bool { true }

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            seed_demo_products: default_seed_demo_products(),
        }
    }
}

impl Config {
    /// Load from `./config`
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new("config"))
    }

    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        let source = |name: &str| {
            config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
        };

        let s = config::Config::builder()
            .add_source(source("default"))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(source(&run_mode))
            // Not checked in
            .add_source(source("local"))
            // Eg. `STOCKYARD_PRICING__MARKDOWN_FACTOR=0.95`
            .add_source(
                config::Environment::with_prefix("STOCKYARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
