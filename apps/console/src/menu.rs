//! # Menu
//!
//! The interactive text menu and its rendering.
//!
//! ## Menu Tree
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Main Menu                                                              │
//! │  ├── 1. Product Management                                              │
//! │  │      view / add / update / delete / search / by category / restock   │
//! │  ├── 2. Sales Management                                                │
//! │  │      record / view all / view today                                  │
//! │  ├── 3. Reports                                                         │
//! │  │      inventory / sales / low-stock alert                             │
//! │  └── 0. Exit                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure path prints a clear, specific message and returns control
//! to the menu; the menus themselves never error. End-of-input (Ctrl-D)
//! unwinds to a normal exit.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use chrono::Local;

use shopkeep_core::{Product, Sale, LOW_STOCK_THRESHOLD};
use shopkeep_services::{InventoryService, SaleService};
use shopkeep_store::{FsLineStore, ProductLedger, SaleLedger, PRODUCTS_FILE, SALES_FILE};

use crate::input::{
    prompt_category, prompt_choice, prompt_i64, prompt_money, prompt_required,
};

/// The wired application: storage → ledgers → services.
pub struct App {
    inventory: InventoryService<ProductLedger>,
    sales: SaleService<ProductLedger, SaleLedger>,
}

impl App {
    /// Wires the whole stack against flat files under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        let store = FsLineStore::new(data_dir);

        let products = Rc::new(RefCell::new(ProductLedger::new(
            Box::new(store.clone()),
            PRODUCTS_FILE,
        )));
        let sales = Rc::new(RefCell::new(SaleLedger::new(
            Box::new(store),
            SALES_FILE,
        )));

        App {
            inventory: InventoryService::new(products.clone()),
            sales: SaleService::new(products, sales),
        }
    }

    /// Runs the main menu loop until Exit or end-of-input.
    pub fn run(&self) {
        println!("=== Shopkeep Supermarket Management ===");

        loop {
            println!();
            println!("Main Menu");
            println!("  1. Product Management");
            println!("  2. Sales Management");
            println!("  3. Reports");
            println!("  0. Exit");

            match prompt_choice("Select option: ", 3) {
                Some(1) => {
                    if self.product_menu().is_none() {
                        break;
                    }
                }
                Some(2) => {
                    if self.sales_menu().is_none() {
                        break;
                    }
                }
                Some(3) => {
                    if self.reports_menu().is_none() {
                        break;
                    }
                }
                Some(_) | None => break,
            }
        }

        println!("Goodbye.");
    }

    // =========================================================================
    // Product Management
    // =========================================================================

    fn product_menu(&self) -> Option<()> {
        loop {
            println!();
            println!("Product Management");
            println!("  1. View all products");
            println!("  2. Add product");
            println!("  3. Update product");
            println!("  4. Delete product");
            println!("  5. Search products");
            println!("  6. Products by category");
            println!("  7. Restock product");
            println!("  0. Back");

            match prompt_choice("Select option: ", 7)? {
                1 => print_products(&self.inventory.list_products()),
                2 => self.add_product()?,
                3 => self.update_product()?,
                4 => self.delete_product()?,
                5 => self.search_products()?,
                6 => self.products_by_category()?,
                7 => self.restock_product()?,
                _ => return Some(()),
            }
        }
    }

    fn add_product(&self) -> Option<()> {
        let id = prompt_required("Product id: ")?;
        let name = prompt_required("Name: ")?;
        let category = prompt_category()?;
        let price = prompt_money("Price: ")?;
        let quantity_in_stock = prompt_i64("Quantity in stock: ")?;

        let product = Product {
            id,
            name,
            category,
            price,
            quantity_in_stock,
        };

        match self.inventory.add_product(product) {
            Ok(()) => println!("Product added."),
            Err(err) => println!("Could not add product: {err}"),
        }
        Some(())
    }

    fn update_product(&self) -> Option<()> {
        let id = prompt_required("Product id to update: ")?;

        let Some(existing) = self.inventory.get_product(&id) else {
            println!("Product not found: {id}");
            return Some(());
        };
        println!(
            "Updating {} ({}, {}, stock {})",
            existing.name, existing.category, existing.price, existing.quantity_in_stock
        );

        let name = prompt_required("New name: ")?;
        let category = prompt_category()?;
        let price = prompt_money("New price: ")?;
        let quantity_in_stock = prompt_i64("New quantity in stock: ")?;

        let product = Product {
            id,
            name,
            category,
            price,
            quantity_in_stock,
        };

        match self.inventory.update_product(product) {
            Ok(()) => println!("Product updated."),
            Err(err) => println!("Could not update product: {err}"),
        }
        Some(())
    }

    fn delete_product(&self) -> Option<()> {
        let id = prompt_required("Product id to delete: ")?;

        if self.inventory.delete_product(&id) {
            println!("Product deleted.");
        } else {
            println!("Product not found: {id}");
        }
        Some(())
    }

    fn search_products(&self) -> Option<()> {
        let query = prompt_required("Search for: ")?;
        let hits = self.inventory.search_products(&query);

        if hits.is_empty() {
            println!("No products match '{query}'.");
        } else {
            print_products(&hits);
        }
        Some(())
    }

    fn products_by_category(&self) -> Option<()> {
        let category = prompt_category()?;
        let hits = self.inventory.products_by_category(category);

        if hits.is_empty() {
            println!("No products in {category}.");
        } else {
            print_products(&hits);
        }
        Some(())
    }

    fn restock_product(&self) -> Option<()> {
        let id = prompt_required("Product id to restock: ")?;
        let amount = prompt_i64("Amount to add: ")?;

        match self.inventory.restock_product(&id, amount) {
            Ok(new_quantity) => println!("Restocked. New quantity: {new_quantity}"),
            Err(err) => println!("Could not restock: {err}"),
        }
        Some(())
    }

    // =========================================================================
    // Sales Management
    // =========================================================================

    fn sales_menu(&self) -> Option<()> {
        loop {
            println!();
            println!("Sales Management");
            println!("  1. Record sale");
            println!("  2. View all sales");
            println!("  3. View today's sales");
            println!("  0. Back");

            match prompt_choice("Select option: ", 3)? {
                1 => self.record_sale()?,
                2 => print_sales(&self.sales.list_sales()),
                3 => print_sales(&self.sales.today_sales()),
                _ => return Some(()),
            }
        }
    }

    fn record_sale(&self) -> Option<()> {
        let product_id = prompt_required("Product id: ")?;
        let quantity = prompt_i64("Quantity: ")?;

        match self.sales.record_sale(&product_id, quantity) {
            Ok(sale) => println!(
                "Sale recorded: {} x {} = {}",
                sale.quantity,
                sale.product_name,
                sale.total()
            ),
            Err(err) => println!("Could not record sale: {err}"),
        }
        Some(())
    }

    // =========================================================================
    // Reports
    // =========================================================================

    fn reports_menu(&self) -> Option<()> {
        loop {
            println!();
            println!("Reports");
            println!("  1. Inventory report");
            println!("  2. Sales report");
            println!("  3. Low-stock alert");
            println!("  0. Back");

            match prompt_choice("Select option: ", 3)? {
                1 => self.inventory_report(),
                2 => self.sales_report(),
                3 => self.low_stock_alert(),
                _ => return Some(()),
            }
        }
    }

    fn inventory_report(&self) {
        let report = self.inventory.generate_inventory_report();

        println!();
        println!("Inventory Report");
        println!("  Products:          {}", report.total_products);
        println!("  Total stock value: {}", report.total_stock_value);

        if !report.low_stock.is_empty() {
            println!("  Low stock (<= {LOW_STOCK_THRESHOLD}):");
            for product in &report.low_stock {
                println!(
                    "    {} {} ({} left)",
                    product.id, product.name, product.quantity_in_stock
                );
            }
        }

        if !report.out_of_stock.is_empty() {
            println!("  Out of stock:");
            for product in &report.out_of_stock {
                println!("    {} {}", product.id, product.name);
            }
        }
    }

    fn sales_report(&self) {
        let sales = self.sales.list_sales();

        println!();
        println!("Sales Report");
        print_sales(&sales);
        println!("  Total revenue: {}", self.sales.total_revenue());
    }

    fn low_stock_alert(&self) {
        let low = self.inventory.low_stock_products();

        println!();
        if low.is_empty() {
            println!("No products at or below {LOW_STOCK_THRESHOLD} in stock.");
            return;
        }

        println!("Low-Stock Alert (<= {LOW_STOCK_THRESHOLD})");
        for product in &low {
            if product.is_out_of_stock() {
                println!("  {} {} - OUT OF STOCK", product.id, product.name);
            } else {
                println!(
                    "  {} {} - {} left",
                    product.id, product.name, product.quantity_in_stock
                );
            }
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products.");
        return;
    }

    println!(
        "{:<10} {:<24} {:<12} {:>10} {:>8}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    for product in products {
        println!(
            "{:<10} {:<24} {:<12} {:>10} {:>8}",
            product.id,
            product.name,
            product.category.label(),
            product.price.to_string(),
            product.quantity_in_stock
        );
    }
}

fn print_sales(sales: &[Sale]) {
    if sales.is_empty() {
        println!("No sales.");
        return;
    }

    println!(
        "{:<24} {:<10} {:<20} {:>6} {:>10} {:>10}",
        "ID", "PRODUCT", "TIME", "QTY", "UNIT", "TOTAL"
    );
    for sale in sales {
        let time = sale
            .recorded_at()
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} {:<20} {:>6} {:>10} {:>10}",
            sale.id,
            sale.product_id,
            time,
            sale.quantity,
            sale.price_per_unit.to_string(),
            sale.total().to_string()
        );
    }
}
