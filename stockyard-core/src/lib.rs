pub mod ids;
pub mod random;
pub mod text;

pub use ids::{IdAllocator, ProductId};
pub use random::RandomGenerator;
pub use text::{quote, TextError, Tokens};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: String, max: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
