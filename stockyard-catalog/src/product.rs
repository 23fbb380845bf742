use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use stockyard_core::{IdAllocator, ProductId};

/// Product variants carried by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductKind {
    Electronic,
    Clothing,
    Food,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [
        ProductKind::Electronic,
        ProductKind::Clothing,
        ProductKind::Food,
    ];

    /// Type tag used in record lines and descriptions
    pub fn label(self) -> &'static str {
        match self {
            ProductKind::Electronic => "Electronic",
            ProductKind::Clothing => "Clothing",
            ProductKind::Food => "Food",
        }
    }

    /// Name of the variant-specific field
    pub fn detail_field(self) -> &'static str {
        match self {
            ProductKind::Electronic => "warranty",
            ProductKind::Clothing => "size",
            ProductKind::Food => "expiration date",
        }
    }

    fn detail_label(self) -> &'static str {
        match self {
            ProductKind::Electronic => "Warranty",
            ProductKind::Clothing => "Size",
            ProductKind::Food => "Expires",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductKind {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| ProductError::UnknownKind(s.to_string()))
    }
}

/// Variant-specific payload. Expiration dates are free-form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductDetails {
    Electronic { warranty: String },
    Clothing { size: String },
    Food { expiration_date: String },
}

impl ProductDetails {
    pub fn new(kind: ProductKind, value: impl Into<String>) -> Self {
        let value = value.into();
        match kind {
            ProductKind::Electronic => ProductDetails::Electronic { warranty: value },
            ProductKind::Clothing => ProductDetails::Clothing { size: value },
            ProductKind::Food => ProductDetails::Food { expiration_date: value },
        }
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            ProductDetails::Electronic { .. } => ProductKind::Electronic,
            ProductDetails::Clothing { .. } => ProductKind::Clothing,
            ProductDetails::Food { .. } => ProductKind::Food,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ProductDetails::Electronic { warranty } => warranty,
            ProductDetails::Clothing { size } => size,
            ProductDetails::Food { expiration_date } => expiration_date,
        }
    }
}

/// Product-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    #[error("Unknown product type: {0}")]
    UnknownKind(String),
}

/// A stocked item.
///
/// The id is taken from an [`IdAllocator`] at construction and never
/// changes. Price, weight and quantity are clamped to zero whenever a
/// negative value would be stored. Products are not `Clone`: a
/// warehouse owns each one exclusively.
#[derive(Debug, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    quantity: u32,
    weight: f64,
    details: ProductDetails,
}

impl Product {
    /// Build a product with an id from the process-wide allocator
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        weight: f64,
        details: ProductDetails,
    ) -> Self {
        Self::with_allocator(IdAllocator::global(), name, price, quantity, weight, details)
    }

    pub fn with_allocator(
        ids: &IdAllocator,
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        weight: f64,
        details: ProductDetails,
    ) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            price: non_negative("price", price),
            quantity: clamp_quantity(quantity),
            weight: non_negative("weight", weight),
            details,
        }
    }

    pub fn electronic(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        weight: f64,
        warranty: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            price,
            quantity,
            weight,
            ProductDetails::Electronic { warranty: warranty.into() },
        )
    }

    pub fn clothing(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        weight: f64,
        size: impl Into<String>,
    ) -> Self {
        Self::new(name, price, quantity, weight, ProductDetails::Clothing { size: size.into() })
    }

    pub fn food(
        name: impl Into<String>,
        price: f64,
        quantity: i64,
        weight: f64,
        expiration_date: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            price,
            quantity,
            weight,
            ProductDetails::Food { expiration_date: expiration_date.into() },
        )
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Weight in kilograms
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn details(&self) -> &ProductDetails {
        &self.details
    }

    pub fn kind(&self) -> ProductKind {
        self.details.kind()
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = non_negative("price", price);
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = non_negative("weight", weight);
    }

    /// Apply a stock delta, never dropping below zero
    pub fn update_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity).saturating_add(delta);
        self.quantity = clamp_quantity(next);
    }

    /// Price, then name, then id. `None` when either price is NaN.
    pub fn compare(&self, other: &Product) -> Option<Ordering> {
        let by_price = self.price.partial_cmp(&other.price)?;
        Some(
            by_price
                .then_with(|| self.name.cmp(&other.name))
                .then_with(|| self.id.cmp(&other.id)),
        )
    }

    /// Total variant of [`Product::compare`] for sorting; NaN prices go last
    pub fn total_order(&self, other: &Product) -> Ordering {
        match (self.price.is_nan(), other.price.is_nan()) {
            (false, false) => self.compare(other).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => self
                .name
                .cmp(&other.name)
                .then_with(|| self.id.cmp(&other.id)),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.kind();
        write!(
            f,
            "{}: [ID:{}] {} | Price: {} | Qty: {} | Weight: {} kg | {}: {}",
            kind.label(),
            self.id,
            self.name,
            self.price,
            self.quantity,
            self.weight,
            kind.detail_label(),
            self.details.value()
        )
    }
}

fn non_negative(field: &'static str, value: f64) -> f64 {
    if value < 0.0 {
        tracing::warn!(field, value, "Negative value clamped to 0");
        0.0
    } else if value == 0.0 {
        // folds -0.0 into 0.0
        0.0
    } else {
        value
    }
}

fn clamp_quantity(value: i64) -> u32 {
    if value < 0 {
        tracing::warn!(value, "Negative quantity clamped to 0");
        return 0;
    }
    u32::try_from(value).unwrap_or(u32::MAX)
}
