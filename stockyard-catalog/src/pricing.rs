use serde::Deserialize;

/// Multiplier applied by one periodic markdown cycle (1% off)
pub const DEFAULT_MARKDOWN_FACTOR: f64 = 0.99;

/// Pricing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Price multiplier per markdown cycle, in `(0, 1]`
    #[serde(default = "default_markdown_factor")]
    pub markdown_factor: f64,
}

fn default_markdown_factor() -> f64 {
    DEFAULT_MARKDOWN_FACTOR
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            markdown_factor: DEFAULT_MARKDOWN_FACTOR,
        }
    }
}

/// Periodic price adjustment.
///
/// Each cycle multiplies the current price by the factor, so repeated
/// cycles compound rather than taking a flat percentage off the
/// original price.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Result<Self, PricingError> {
        let factor = config.markdown_factor;
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(PricingError::InvalidFactor(factor));
        }
        Ok(Self { config })
    }

    pub fn factor(&self) -> f64 {
        self.config.markdown_factor
    }

    /// Price after one markdown cycle
    pub fn markdown(&self, price: f64) -> f64 {
        price * self.config.markdown_factor
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self {
            config: PricingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Markdown factor must be in (0, 1], got {0}")]
    InvalidFactor(f64),
}
