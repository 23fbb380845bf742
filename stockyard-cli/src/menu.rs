use crate::state::AppState;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use stockyard_catalog::{ProductRecord, Warehouse};
use stockyard_core::{IdAllocator, ProductId};
use stockyard_order::{OrderError, QuantityEdit};

const MENU: &str = "\n================ MENU ================\n\
1. Display warehouse products\n\
2. Add new product (record line)\n\
3. Load products from file\n\
4. Save products to file\n\
5. Create new order (random)\n\
6. Edit order\n\
7. Delete order\n\
8. Process all orders\n\
9. Reduce prices in warehouse\n\
10. Display all orders\n\
11. Sort products by price\n\
12. Find product by name\n\
0. Exit\n\
[?] Your choice: ";

/// Line-driven interactive menu.
///
/// Every invalid entry produces a message and returns to the menu; the
/// loop ends on `0` or end of input.
pub struct Menu<R, W> {
    input: R,
    out: W,
    state: AppState,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(input: R, out: W, state: AppState) -> Self {
        Self { input, out, state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_parts(self) -> (W, AppState) {
        (self.out, self.state)
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(line) = self.prompt(MENU)? else { break };
            let choice = match line.trim().parse::<u32>() {
                Ok(choice) => choice,
                Err(_) => {
                    writeln!(self.out, "Invalid input.")?;
                    continue;
                }
            };

            match choice {
                0 => break,
                1 => self.display_products()?,
                2 => self.add_product()?,
                3 => self.load_file()?,
                4 => self.save_file()?,
                5 => self.create_random_order()?,
                6 => self.edit_order()?,
                7 => self.delete_order()?,
                8 => self.process_orders()?,
                9 => self.reduce_prices()?,
                10 => self.display_orders()?,
                11 => self.sort_products()?,
                12 => self.find_by_name()?,
                _ => writeln!(self.out, "Unknown option.")?,
            }
        }

        writeln!(self.out, "[+] Exiting the program...")?;
        self.out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        self.read_line()
    }

    fn prompt_index(&mut self) -> io::Result<Option<usize>> {
        let last = self.state.orders.len().saturating_sub(1);
        let line = self.prompt(&format!("Enter order index [0..{}]: ", last))?;
        Ok(line.and_then(|line| line.trim().parse().ok()))
    }

    fn display_products(&mut self) -> io::Result<()> {
        if self.state.warehouse.is_empty() {
            return writeln!(self.out, "Warehouse is empty.");
        }
        writeln!(self.out, "Warehouse products:")?;
        Warehouse::print_all(&self.state.warehouse, &mut self.out)
    }

    fn add_product(&mut self) -> io::Result<()> {
        let text = "Enter product: <Electronic|Clothing|Food> \"name\" price quantity weight \
                    \"warranty|size|expiration\"\n> ";
        let Some(line) = self.prompt(text)? else { return Ok(()) };

        match ProductRecord::parse(&line) {
            Ok(record) => {
                let product = record.into_product(IdAllocator::global());
                match self.state.warehouse.add(product) {
                    Ok(id) => {
                        writeln!(self.out, "[+] New product added to the warehouse (id {}).", id)
                    }
                    Err(e) => writeln!(self.out, "Error: {}", e),
                }
            }
            Err(e) => writeln!(self.out, "Invalid data: {}", e),
        }
    }

    fn load_file(&mut self) -> io::Result<()> {
        let default = self.state.data_file.clone();
        let text = format!("Enter file name to load [{}]: ", default);
        let Some(line) = self.prompt(&text)? else { return Ok(()) };
        let path = if line.trim().is_empty() { default } else { line.trim().to_string() };

        let ids = IdAllocator::global();
        match stockyard_store::load_from_path(&path, &mut self.state.warehouse, ids) {
            Ok(report) => {
                let added = report.loaded.len();
                writeln!(self.out, "Products loaded from file: {} ({} added)", path, added)?;
                for skipped in &report.skipped {
                    writeln!(self.out, "  skipped {}", skipped)?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.out, "Unable to load file: {}", e),
        }
    }

    fn save_file(&mut self) -> io::Result<()> {
        let default = self.state.data_file.clone();
        let text = format!("Enter file name to save [{}]: ", default);
        let Some(line) = self.prompt(&text)? else { return Ok(()) };
        let path = if line.trim().is_empty() { default } else { line.trim().to_string() };

        match stockyard_store::save_to_path(&path, &self.state.warehouse) {
            Ok(written) => {
                writeln!(self.out, "Products saved to file: {} ({} written)", path, written)
            }
            Err(e) => writeln!(self.out, "Unable to save file: {}", e),
        }
    }

    fn create_random_order(&mut self) -> io::Result<()> {
        match self.state.generator.generate(&self.state.warehouse) {
            Ok(order) => {
                let index = self.state.orders.create_order(&order);
                writeln!(
                    self.out,
                    "Created order #{} with {} random picks!",
                    index,
                    self.state.generator.config().items_per_order
                )
            }
            Err(OrderError::EmptyWarehouse) => {
                writeln!(self.out, "Warehouse is empty. No products available for order!")
            }
            Err(e) => writeln!(self.out, "Error: {}", e),
        }
    }

    fn edit_order(&mut self) -> io::Result<()> {
        if self.state.orders.is_empty() {
            return writeln!(self.out, "No orders to edit!");
        }
        let index = match self.prompt_index()? {
            Some(index) if index < self.state.orders.len() => index,
            _ => return writeln!(self.out, "Invalid index!"),
        };

        let summary = match self.state.orders.get_order(index) {
            Ok(order) => order.to_string(),
            Err(e) => return writeln!(self.out, "Error: {}", e),
        };
        writeln!(self.out, "Editing order:\n{}", summary)?;
        let text = "--- Available actions ---\n\
1. Add item (productId, qty)\n\
2. Remove item (productId)\n\
3. Change quantity (productId, newQty)\n\
Other choice -> cancel\n\
Your choice: ";
        let Some(choice) = self.prompt(text)? else { return Ok(()) };

        match choice.trim() {
            "1" => {
                let Some(line) = self.prompt("Enter product ID and quantity:\n> ")? else {
                    return Ok(());
                };
                let Some((product_id, qty)) = parse_pair::<ProductId, i64>(&line) else {
                    return writeln!(self.out, "Invalid input.");
                };
                let product = match self.state.warehouse.find_by_id(product_id) {
                    Ok(product) => product,
                    Err(e) => return writeln!(self.out, "Error: {}", e),
                };
                let order = match self.state.orders.get_order_mut(index) {
                    Ok(order) => order,
                    Err(e) => return writeln!(self.out, "Error: {}", e),
                };
                match order.add_item(product, qty) {
                    Ok(_) => writeln!(self.out, "Added to order."),
                    Err(e) => writeln!(self.out, "Error: {}", e),
                }
            }
            "2" => {
                let Some(line) = self.prompt("Enter product ID to remove:\n> ")? else {
                    return Ok(());
                };
                let Ok(product_id) = line.parse::<ProductId>() else {
                    return writeln!(self.out, "Invalid input.");
                };
                let removed = match self.state.orders.get_order_mut(index) {
                    Ok(order) => order.remove_item(product_id),
                    Err(e) => return writeln!(self.out, "Error: {}", e),
                };
                if removed {
                    writeln!(self.out, "Removed from order.")
                } else {
                    writeln!(self.out, "Product {} is not in this order.", product_id)
                }
            }
            "3" => {
                let Some(line) = self.prompt("Enter product ID and new quantity:\n> ")? else {
                    return Ok(());
                };
                let Some((product_id, qty)) = parse_pair::<ProductId, i64>(&line) else {
                    return writeln!(self.out, "Invalid input.");
                };
                let edit = match self.state.orders.get_order_mut(index) {
                    Ok(order) => order.edit_quantity(product_id, qty),
                    Err(e) => return writeln!(self.out, "Error: {}", e),
                };
                match edit {
                    QuantityEdit::Updated => writeln!(self.out, "Quantity changed."),
                    QuantityEdit::Removed => writeln!(self.out, "Item removed from order."),
                    QuantityEdit::Missing => {
                        writeln!(self.out, "Product {} is not in this order.", product_id)
                    }
                }
            }
            _ => writeln!(self.out, "Cancelled."),
        }
    }

    fn delete_order(&mut self) -> io::Result<()> {
        if self.state.orders.is_empty() {
            return writeln!(self.out, "No orders to delete!");
        }
        let removed = self
            .prompt_index()?
            .and_then(|index| self.state.orders.remove_order(index));
        match removed {
            Some(_) => writeln!(self.out, "Order deleted."),
            None => writeln!(self.out, "Invalid index!"),
        }
    }

    fn process_orders(&mut self) -> io::Result<()> {
        if self.state.orders.is_empty() {
            return writeln!(self.out, "No orders.");
        }
        self.state.orders.process_all_orders(&mut self.out)
    }

    fn reduce_prices(&mut self) -> io::Result<()> {
        self.state.warehouse.apply_markdown(&self.state.pricing);
        let percent = ((1.0 - self.state.pricing.factor()) * 10_000.0).round() / 100.0;
        writeln!(self.out, "Prices reduced by {}%.", percent)
    }

    fn display_orders(&mut self) -> io::Result<()> {
        if self.state.orders.is_empty() {
            return writeln!(self.out, "No orders.");
        }
        for (index, order) in self.state.orders.orders().iter().enumerate() {
            let total = order.total_price(&self.state.warehouse);
            write!(self.out, "\n--- Order #{} ---\n{}", index, order)?;
            writeln!(self.out, "Total price: {:.2}", total)?;
        }
        Ok(())
    }

    fn sort_products(&mut self) -> io::Result<()> {
        self.state.warehouse.sort_by_price_ascending();
        writeln!(self.out, "Products sorted by price.")?;
        self.display_products()
    }

    fn find_by_name(&mut self) -> io::Result<()> {
        let Some(name) = self.prompt("Enter product name: ")? else { return Ok(()) };
        match self.state.warehouse.lookup_by_name(&name, &mut self.state.lookups) {
            Some(product) => writeln!(self.out, "{}", product)?,
            None => writeln!(self.out, "No product named {:?}.", name)?,
        }
        let stats = self.state.lookups;
        writeln!(self.out, "(name lookups: {}, hits: {})", stats.name_lookups, stats.hits)
    }
}

fn parse_pair<A: FromStr, B: FromStr>(line: &str) -> Option<(A, B)> {
    let mut parts = line.split_whitespace();
    let first = parts.next()?.parse().ok()?;
    let second = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}
