use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use stockyard_catalog::{Product, Warehouse};
use stockyard_core::ProductId;
use uuid::Uuid;

use crate::manager::OrderError;

/// Outcome of [`Order::edit_quantity`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityEdit {
    Updated,
    Removed,
    Missing,
}

/// Requested quantities keyed by product id.
///
/// An order only stores ids, so it outlives any particular warehouse and
/// may reference products that no longer exist. Every stored quantity is
/// positive.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    items: BTreeMap<ProductId, u32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            items: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add `quantity` units of a product, merging with an existing line.
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> Result<u32, OrderError> {
        self.add_item_id(product.id(), quantity)
    }

    pub fn add_item_id(&mut self, product_id: ProductId, quantity: i64) -> Result<u32, OrderError> {
        let units = match u32::try_from(quantity) {
            Ok(units) if units > 0 => units,
            _ => {
                tracing::warn!(
                    order_id = %self.id,
                    %product_id,
                    quantity,
                    "Rejected non-positive order quantity"
                );
                return Err(OrderError::InvalidQuantity(quantity));
            }
        };

        let line = self.items.entry(product_id).or_insert(0);
        *line = line.saturating_add(units);
        let total = *line;
        self.touch();
        Ok(total)
    }

    /// Drop a line; returns whether it existed
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let removed = self.items.remove(&product_id).is_some();
        if removed {
            self.touch();
        }
        removed
    }

    /// Set a line's quantity. Non-positive quantities remove the line;
    /// editing never creates one.
    pub fn edit_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> QuantityEdit {
        if new_quantity <= 0 {
            return if self.remove_item(product_id) {
                QuantityEdit::Removed
            } else {
                QuantityEdit::Missing
            };
        }

        match self.items.get_mut(&product_id) {
            Some(line) => {
                *line = u32::try_from(new_quantity).unwrap_or(u32::MAX);
                self.touch();
                QuantityEdit::Updated
            }
            None => {
                tracing::debug!(
                    order_id = %self.id,
                    %product_id,
                    "Edit ignored for product not in order"
                );
                QuantityEdit::Missing
            }
        }
    }

    /// Number of distinct products
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all quantities
    pub fn total_units(&self) -> u64 {
        self.items.values().map(|&qty| u64::from(qty)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.items.get(&product_id).copied()
    }

    pub fn items(&self) -> &BTreeMap<ProductId, u32> {
        &self.items
    }

    /// Price the order against the warehouse's current prices.
    ///
    /// Lines whose product cannot be found contribute nothing and are
    /// logged; the total is always produced.
    pub fn total_price(&self, warehouse: &Warehouse) -> f64 {
        self.items
            .iter()
            .map(|(&product_id, &qty)| match warehouse.find_by_id(product_id) {
                Ok(product) => product.price() * f64::from(qty),
                Err(e) => {
                    tracing::warn!(order_id = %self.id, error = %e, "Order line priced at 0");
                    0.0
                }
            })
            .fold(0.0, |total, line| total + line)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub(crate) fn from_items(items: BTreeMap<ProductId, u32>) -> Self {
        let mut order = Self::new();
        order.items = items;
        order
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[+] Order details:")?;
        for (product_id, qty) in &self.items {
            writeln!(f, " - ID: {} | Quantity: x {}", product_id, qty)?;
        }
        Ok(())
    }
}
