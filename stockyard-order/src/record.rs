//! Text form of an order: an item count followed by that many
//! `<productId> <quantity>` pairs, all whitespace-delimited.

use crate::models::Order;
use std::collections::BTreeMap;
use std::str::FromStr;
use stockyard_core::ProductId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderRecordError {
    #[error("Missing item count")]
    MissingCount,

    #[error("Invalid item count: {0:?}")]
    InvalidCount(String),

    #[error("Item {index}: missing {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("Item {index}: invalid product id {value:?}")]
    InvalidProductId { index: usize, value: String },

    #[error("Item {index}: quantity must be a positive integer, got {value:?}")]
    InvalidQuantity { index: usize, value: String },

    #[error("Unexpected trailing input: {0:?}")]
    TrailingInput(String),
}

impl Order {
    pub fn to_record(&self) -> String {
        let mut out = self.item_count().to_string();
        for (product_id, qty) in self.items() {
            out.push_str(&format!(" {} {}", product_id, qty));
        }
        out
    }

    /// Decode an order; repeated product ids accumulate like `add_item`
    pub fn from_record(input: &str) -> Result<Order, OrderRecordError> {
        let mut tokens = input.split_whitespace();

        let raw_count = tokens.next().ok_or(OrderRecordError::MissingCount)?;
        let count = raw_count
            .parse::<usize>()
            .map_err(|_| OrderRecordError::InvalidCount(raw_count.to_string()))?;

        let mut items: BTreeMap<ProductId, u32> = BTreeMap::new();
        for index in 0..count {
            let raw_id = tokens
                .next()
                .ok_or(OrderRecordError::MissingField { index, field: "product id" })?;
            let product_id = raw_id
                .parse::<ProductId>()
                .map_err(|_| OrderRecordError::InvalidProductId {
                    index,
                    value: raw_id.to_string(),
                })?;

            let raw_qty = tokens
                .next()
                .ok_or(OrderRecordError::MissingField { index, field: "quantity" })?;
            let qty = raw_qty
                .parse::<u32>()
                .ok()
                .filter(|&qty| qty > 0)
                .ok_or_else(|| OrderRecordError::InvalidQuantity {
                    index,
                    value: raw_qty.to_string(),
                })?;

            let line = items.entry(product_id).or_insert(0);
            *line = line.saturating_add(qty);
        }

        let trailing: Vec<&str> = tokens.collect();
        if !trailing.is_empty() {
            return Err(OrderRecordError::TrailingInput(trailing.join(" ")));
        }

        Ok(Order::from_items(items))
    }
}

impl FromStr for Order {
    type Err = OrderRecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Order::from_record(s)
    }
}
