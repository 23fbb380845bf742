use crate::models::Order;
use std::io::{self, Write};

/// Holds submitted orders in submission order
#[derive(Debug, Default)]
pub struct OrderManager {
    orders: Vec<Order>,
}

impl OrderManager {
    pub fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Store a copy of the order; returns its index
    pub fn create_order(&mut self, order: &Order) -> usize {
        self.orders.push(order.clone());
        let index = self.orders.len() - 1;
        tracing::info!(order_id = %order.id, index, items = order.item_count(), "Order created");
        index
    }

    pub fn get_order(&self, index: usize) -> Result<&Order, OrderError> {
        let len = self.orders.len();
        self.orders
            .get(index)
            .ok_or(OrderError::IndexOutOfRange { index, len })
    }

    pub fn get_order_mut(&mut self, index: usize) -> Result<&mut Order, OrderError> {
        let len = self.orders.len();
        self.orders
            .get_mut(index)
            .ok_or(OrderError::IndexOutOfRange { index, len })
    }

    /// Remove by index; out-of-range indices are ignored
    pub fn remove_order(&mut self, index: usize) -> Option<Order> {
        if index >= self.orders.len() {
            tracing::debug!(index, len = self.orders.len(), "Ignoring removal of missing order");
            return None;
        }
        let order = self.orders.remove(index);
        tracing::info!(order_id = %order.id, index, "Order removed");
        Some(order)
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Write every order. Stands in for real fulfilment.
    pub fn process_all_orders<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "[+] Processing all orders...")?;
        for order in &self.orders {
            writeln!(out, "{}", order)?;
        }
        tracing::info!(orders = self.orders.len(), "Processed all orders");
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order index {index} out of range (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Order quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("Warehouse is empty; no products available for an order")]
    EmptyWarehouse,

    #[error("Invalid generator settings: {0}")]
    InvalidSettings(String),
}
