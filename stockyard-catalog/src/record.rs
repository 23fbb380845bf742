//! Line-oriented text form of a product:
//!
//! ```text
//! <Type> <name> <price> <quantity> <weight> <variant-field>
//! ```
//!
//! Names and variant fields are written quoted so they survive embedded
//! whitespace; bare tokens are accepted when reading.

use crate::product::{Product, ProductDetails, ProductKind};
use std::str::FromStr;
use stockyard_core::{quote, IdAllocator, TextError, Tokens};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("Unknown product type: {0}")]
    UnknownType(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    Text(#[from] TextError),

    #[error("Unexpected trailing input: {0:?}")]
    TrailingInput(String),
}

/// A parsed record line that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub kind: ProductKind,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub weight: f64,
    pub detail: String,
}

impl ProductRecord {
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut tokens = Tokens::new(line);

        let tag = next_field(&mut tokens, "type")?;
        let kind = tag
            .parse::<ProductKind>()
            .map_err(|_| RecordError::UnknownType(tag))?;
        let name = next_field(&mut tokens, "name")?;
        let price = next_measure(&mut tokens, "price")?;
        let quantity = next_number(&mut tokens, "quantity")?;
        let weight = next_measure(&mut tokens, "weight")?;
        let detail = next_field(&mut tokens, kind.detail_field())?;

        if !tokens.is_exhausted() {
            return Err(RecordError::TrailingInput(tokens.remainder().to_string()));
        }

        Ok(Self {
            kind,
            name,
            price,
            quantity,
            weight,
            detail,
        })
    }

    /// Allocate an id and build the product, clamping negative numbers
    pub fn into_product(self, ids: &IdAllocator) -> Product {
        Product::with_allocator(
            ids,
            self.name,
            self.price,
            self.quantity,
            self.weight,
            ProductDetails::new(self.kind, self.detail),
        )
    }
}

impl FromStr for ProductRecord {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Product {
    /// Canonical record line for this product (without the id)
    pub fn to_record(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.kind().label(),
            quote(self.name()),
            self.price(),
            self.quantity(),
            self.weight(),
            quote(self.details().value())
        )
    }

    /// Decode a record line, taking the id from the process-wide allocator
    pub fn from_record(line: &str) -> Result<Product, RecordError> {
        ProductRecord::parse(line).map(|record| record.into_product(IdAllocator::global()))
    }
}

fn next_field(tokens: &mut Tokens<'_>, field: &'static str) -> Result<String, RecordError> {
    match tokens.next() {
        Some(token) => Ok(token?),
        None => Err(RecordError::MissingField(field)),
    }
}

fn next_number<T: FromStr>(tokens: &mut Tokens<'_>, field: &'static str) -> Result<T, RecordError> {
    let raw = next_field(tokens, field)?;
    raw.parse::<T>()
        .map_err(|_| RecordError::InvalidNumber { field, value: raw })
}

/// Finite decimal; `NaN` and infinities are rejected
fn next_measure(tokens: &mut Tokens<'_>, field: &'static str) -> Result<f64, RecordError> {
    let raw = next_field(tokens, field)?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RecordError::InvalidNumber { field, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_round_trip() {
        let apples = Product::food("Organic Apples", 4.5, 10, 1.0, "2025-12-31");
        let line = apples.to_record();
        assert_eq!(line, r#"Food "Organic Apples" 4.5 10 1 "2025-12-31""#);

        let decoded = Product::from_record(&line).unwrap();
        assert_ne!(decoded.id(), apples.id());
        assert_eq!(decoded.name(), "Organic Apples");
        assert_eq!(decoded.price(), 4.5);
        assert_eq!(decoded.quantity(), 10);
        assert_eq!(decoded.weight(), 1.0);
        assert_eq!(decoded.details(), apples.details());
    }

    #[test]
    fn test_quotes_inside_fields_survive() {
        let monitor = Product::electronic(
            r#"27" "Pro" Monitor"#,
            899.99,
            3,
            6.25,
            r#"3 years \ onsite"#,
        );
        let decoded = Product::from_record(&monitor.to_record()).unwrap();
        assert_eq!(decoded.name(), monitor.name());
        assert_eq!(decoded.details().value(), r#"3 years \ onsite"#);
        assert_eq!(decoded.price(), 899.99);
    }

    #[test]
    fn test_bare_tokens_are_accepted() {
        let record = ProductRecord::parse("Clothing Jeans 150 25 0.4 M").unwrap();
        assert_eq!(record.kind, ProductKind::Clothing);
        assert_eq!(record.name, "Jeans");
        assert_eq!(record.detail, "M");
    }

    #[test]
    fn test_negative_numbers_clamp_on_load() {
        let ids = IdAllocator::starting_at(10);
        let product = ProductRecord::parse(r#"Food "Milk" -1 -4 -0.5 "2030-01-01""#)
            .unwrap()
            .into_product(&ids);
        assert_eq!(product.id().get(), 10);
        assert_eq!(product.price(), 0.0);
        assert_eq!(product.quantity(), 0);
        assert_eq!(product.weight(), 0.0);
    }

    #[test]
    fn test_malformed_records() {
        assert_eq!(
            ProductRecord::parse(r#"Gadget "X" 1 1 1 "y""#),
            Err(RecordError::UnknownType("Gadget".to_string()))
        );
        assert_eq!(ProductRecord::parse(""), Err(RecordError::MissingField("type")));
        assert_eq!(
            ProductRecord::parse(r#"Electronic "TV" 300 2 12.5"#),
            Err(RecordError::MissingField("warranty"))
        );
        assert_eq!(
            ProductRecord::parse(r#"Food "Tea" cheap 2 0.1 "2026""#),
            Err(RecordError::InvalidNumber { field: "price", value: "cheap".to_string() })
        );
        assert_eq!(
            ProductRecord::parse(r#"Food "Tea" 2 2.5 0.1 "2026""#),
            Err(RecordError::InvalidNumber { field: "quantity", value: "2.5".to_string() })
        );
        assert_eq!(
            ProductRecord::parse(r#"Food "Tea 2 2 0.1"#),
            Err(RecordError::Text(TextError::UnterminatedQuote(5)))
        );
        assert_eq!(
            ProductRecord::parse(r#"Clothing "Hat" 5 1 0.1 "L" extra"#),
            Err(RecordError::TrailingInput("extra".to_string()))
        );
    }

    #[test]
    fn test_non_finite_measures_rejected() {
        assert_eq!(
            ProductRecord::parse(r#"Food "Tea" NaN 1 0.1 "2030""#),
            Err(RecordError::InvalidNumber { field: "price", value: "NaN".to_string() })
        );
        assert_eq!(
            ProductRecord::parse(r#"Food "Tea" 1 1 inf "2030""#),
            Err(RecordError::InvalidNumber { field: "weight", value: "inf".to_string() })
        );
        assert_eq!(
            ProductRecord::parse(r#"Food "Tea" -infinity 1 0.1 "2030""#),
            Err(RecordError::InvalidNumber { field: "price", value: "-infinity".to_string() })
        );
        assert!(Product::from_record(r#"Clothing "Cap" 1e400 1 0.1 "M""#).is_err());
    }
}
