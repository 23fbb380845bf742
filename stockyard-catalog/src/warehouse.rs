use crate::pricing::PricingEngine;
use crate::product::Product;
use std::io::{self, Write};
use stockyard_core::ProductId;

/// Counters for name lookups, owned by whoever wants them
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    pub name_lookups: u64,
    pub hits: u64,
}

impl LookupStats {
    pub fn record(&mut self, found: bool) {
        self.name_lookups += 1;
        if found {
            self.hits += 1;
        }
    }

    pub fn misses(&self) -> u64 {
        self.name_lookups - self.hits
    }
}

/// Owns the stocked products, in insertion order until sorted
#[derive(Debug, Default)]
pub struct Warehouse {
    products: Vec<Product>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Take ownership of a product
    pub fn add(&mut self, product: Product) -> Result<ProductId, WarehouseError> {
        let id = product.id();
        if self.products.iter().any(|p| p.id() == id) {
            tracing::error!(product_id = %id, "Rejected product with duplicate id");
            return Err(WarehouseError::DuplicateId(id));
        }
        tracing::debug!(
            product_id = %id,
            name = product.name(),
            kind = %product.kind(),
            "Product added"
        );
        self.products.push(product);
        Ok(id)
    }

    /// Add a product that may be absent; `None` is logged and ignored
    pub fn add_optional(&mut self, product: Option<Product>) -> Option<ProductId> {
        match product {
            Some(product) => self.add(product).ok(),
            None => {
                tracing::warn!("Ignoring attempt to add a missing product");
                None
            }
        }
    }

    /// First product whose name matches exactly
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// [`Warehouse::find_by_name`] that also counts the lookup
    pub fn lookup_by_name(&self, name: &str, stats: &mut LookupStats) -> Option<&Product> {
        let found = self.find_by_name(name);
        stats.record(found.is_some());
        found
    }

    pub fn find_by_id(&self, id: ProductId) -> Result<&Product, WarehouseError> {
        self.products
            .iter()
            .find(|p| p.id() == id)
            .ok_or(WarehouseError::NotFound(id))
    }

    pub fn find_by_id_mut(&mut self, id: ProductId) -> Result<&mut Product, WarehouseError> {
        self.products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(WarehouseError::NotFound(id))
    }

    /// Remove a product and hand ownership back to the caller
    pub fn remove(&mut self, id: ProductId) -> Result<Product, WarehouseError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id() == id)
            .ok_or(WarehouseError::NotFound(id))?;
        tracing::debug!(product_id = %id, "Product removed");
        Ok(self.products.remove(index))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Write one description line per product, in order
    pub fn print_all<'a, W: Write>(
        products: impl IntoIterator<Item = &'a Product>,
        out: &mut W,
    ) -> io::Result<()> {
        for product in products {
            writeln!(out, "{}", product)?;
        }
        Ok(())
    }

    /// Sort by price, then name, then id
    pub fn sort_by_price_ascending(&mut self) {
        self.products.sort_by(Product::total_order);
    }

    /// One markdown cycle at the default 1%
    pub fn periodic_update(&mut self) {
        self.apply_markdown(&PricingEngine::default());
    }

    pub fn apply_markdown(&mut self, engine: &PricingEngine) {
        for product in &mut self.products {
            let price = engine.markdown(product.price());
            product.set_price(price);
        }
        tracing::info!(
            products = self.products.len(),
            factor = engine.factor(),
            "Applied price markdown"
        );
    }
}

impl<'a> IntoIterator for &'a Warehouse {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WarehouseError {
    #[error("no product with id={0}")]
    NotFound(ProductId),

    #[error("product id={0} is already stocked")]
    DuplicateId(ProductId),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::PricingConfig;
    use crate::product::{ProductDetails, ProductKind};
    use stockyard_core::IdAllocator;

    fn stocked() -> Warehouse {
        let mut warehouse = Warehouse::new();
        warehouse.add(Product::electronic("Laptop Pro", 4500.0, 10, 1.2, "2 years")).unwrap();
        warehouse.add(Product::clothing("Jeans", 150.0, 25, 0.4, "M")).unwrap();
        warehouse.add(Product::food("Yogurt", 3.5, 100, 0.2, "2024-10-01")).unwrap();
        warehouse
    }

    #[test]
    fn test_find_by_name() {
        let warehouse = stocked();
        let mut stats = LookupStats::default();

        assert_eq!(warehouse.lookup_by_name("Jeans", &mut stats).unwrap().price(), 150.0);
        assert!(warehouse.lookup_by_name("jeans", &mut stats).is_none());
        assert!(warehouse.find_by_name("Socks").is_none());

        assert_eq!(stats.name_lookups, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses(), 1);
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let mut warehouse = Warehouse::new();
        let first = warehouse.add(Product::food("Milk", 1.0, 1, 1.0, "a")).unwrap();
        warehouse.add(Product::food("Milk", 2.0, 1, 1.0, "b")).unwrap();
        assert_eq!(warehouse.find_by_name("Milk").unwrap().id(), first);
    }

    #[test]
    fn test_find_by_id() {
        let warehouse = stocked();
        let yogurt_id = warehouse.products()[2].id();
        assert_eq!(warehouse.find_by_id(yogurt_id).unwrap().name(), "Yogurt");

        let missing = ProductId::new(u64::MAX);
        let err = warehouse.find_by_id(missing).unwrap_err();
        assert_eq!(err, WarehouseError::NotFound(missing));
        assert_eq!(err.to_string(), format!("no product with id={}", u64::MAX));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let ids = IdAllocator::starting_at(7);
        let other_ids = IdAllocator::starting_at(7);
        let mut warehouse = Warehouse::new();

        let details = || ProductDetails::new(ProductKind::Clothing, "XL");
        warehouse.add(Product::with_allocator(&ids, "Coat", 80.0, 2, 1.5, details())).unwrap();
        let clash = Product::with_allocator(&other_ids, "Scarf", 20.0, 4, 0.2, details());

        assert_eq!(warehouse.add(clash), Err(WarehouseError::DuplicateId(ProductId::new(7))));
        assert_eq!(warehouse.len(), 1);
    }

    #[test]
    fn test_add_optional() {
        let mut warehouse = Warehouse::new();
        assert!(warehouse.add_optional(None).is_none());
        assert!(warehouse.is_empty());
        assert!(warehouse.add_optional(Some(Product::food("Rice", 2.0, 5, 1.0, "2027"))).is_some());
        assert_eq!(warehouse.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut warehouse = stocked();
        let jeans_id = warehouse.find_by_name("Jeans").unwrap().id();

        let jeans = warehouse.remove(jeans_id).unwrap();
        assert_eq!(jeans.name(), "Jeans");
        assert_eq!(warehouse.len(), 2);
        assert_eq!(warehouse.remove(jeans_id), Err(WarehouseError::NotFound(jeans_id)));
    }

    #[test]
    fn test_sort_by_price_then_name() {
        let mut warehouse = Warehouse::new();
        let a = warehouse.add(Product::food("Banana", 10.0, 1, 0.1, "x")).unwrap();
        let b = warehouse.add(Product::food("Apple", 10.0, 1, 0.1, "x")).unwrap();
        let c = warehouse.add(Product::food("Zeta", 5.0, 1, 0.1, "x")).unwrap();
        let nan = warehouse.add(Product::food("Void", f64::NAN, 1, 0.1, "x")).unwrap();

        warehouse.sort_by_price_ascending();

        let order: Vec<_> = warehouse.iter().map(Product::id).collect();
        assert_eq!(order, vec![c, b, a, nan]);
    }

    #[test]
    fn test_periodic_update_compounds() {
        let mut warehouse = Warehouse::new();
        let id = warehouse.add(Product::electronic("Tablet", 100.0, 1, 0.5, "1 year")).unwrap();

        warehouse.periodic_update();
        warehouse.periodic_update();

        let price = warehouse.find_by_id(id).unwrap().price();
        assert!((price - 98.01).abs() < 1e-9, "price was {}", price);
    }

    #[test]
    fn test_apply_configured_markdown() {
        let mut warehouse = stocked();
        let engine = PricingEngine::new(PricingConfig { markdown_factor: 0.5 }).unwrap();
        warehouse.apply_markdown(&engine);
        assert_eq!(warehouse.find_by_name("Jeans").unwrap().price(), 75.0);
    }

    #[test]
    fn test_print_all() {
        let warehouse = stocked();
        let mut out = Vec::new();
        Warehouse::print_all(&warehouse, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Electronic: "));
        assert!(lines[1].contains("Jeans"));
        assert!(lines[2].ends_with("Expires: 2024-10-01"));
    }

    #[test]
    fn test_stock_edit_through_find_mut() {
        let mut warehouse = stocked();
        let id = warehouse.find_by_name("Yogurt").unwrap().id();
        warehouse.find_by_id_mut(id).unwrap().update_quantity(-150);
        assert_eq!(warehouse.find_by_id(id).unwrap().quantity(), 0);
    }
}
