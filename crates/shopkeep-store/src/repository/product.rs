//! # Product Ledger
//!
//! The in-memory authoritative list of products, mirrored to a file.
//!
//! ## Load Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Construction Sequence                                │
//! │                                                                         │
//! │  ProductLedger::new(store, "products.txt")                              │
//! │       │                                                                 │
//! │       ├── initialize: create the file empty if absent                   │
//! │       │                                                                 │
//! │       └── reload: read every line through the codec                     │
//! │              │                                                          │
//! │              ├── decodes ──────► into the cache, file order kept        │
//! │              └── malformed ────► dropped silently (codec returns None), │
//! │                                  count logged once                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is write-through: memory first, then the entire file is
//! rewritten from the in-memory state.

use tracing::{debug, warn};

use shopkeep_core::codec::LineRecord;
use shopkeep_core::validation::validate_product;
use shopkeep_core::{Category, Product};

use crate::error::{LedgerError, LedgerResult};
use crate::line_store::LineStore;
use crate::repository::ProductRepository;

/// File-backed product ledger.
///
/// ## Usage
/// ```rust,ignore
/// let mut ledger = ProductLedger::new(Box::new(store), PRODUCTS_FILE);
///
/// ledger.add(product)?;
/// let hits = ledger.search_by_name("milk");
/// ```
pub struct ProductLedger {
    store: Box<dyn LineStore>,
    file_name: String,
    products: Vec<Product>,
}

impl ProductLedger {
    /// Creates the ledger: ensures the backing file exists, then loads the
    /// cache from it.
    pub fn new(store: Box<dyn LineStore>, file_name: impl Into<String>) -> Self {
        let mut ledger = ProductLedger {
            store,
            file_name: file_name.into(),
            products: Vec::new(),
        };
        ledger.store.initialize(&ledger.file_name);
        ledger.reload();
        ledger
    }

    /// Clears and refills the cache from the backing file, discarding
    /// malformed lines.
    fn reload(&mut self) {
        let lines = self.store.read_lines(&self.file_name);
        let total = lines.len();

        self.products = lines
            .iter()
            .filter_map(|line| Product::from_line(line))
            .collect();

        let dropped = total - self.products.len();
        if dropped > 0 {
            warn!(file = %self.file_name, dropped, "Discarded malformed product lines");
        }
        debug!(file = %self.file_name, count = self.products.len(), "Product ledger loaded");
    }

    /// Rewrites the entire file from the in-memory state.
    fn persist(&self) {
        let lines: Vec<String> = self.products.iter().map(Product::to_line).collect();
        self.store.write_lines(&self.file_name, &lines);
    }
}

impl ProductRepository for ProductLedger {
    fn get_all(&self) -> Vec<Product> {
        self.products.clone()
    }

    fn get_by_id(&self, id: &str) -> Option<Product> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn add(&mut self, product: Product) -> LedgerResult<()> {
        validate_product(&product)?;

        if self.products.iter().any(|p| p.id == product.id) {
            return Err(LedgerError::DuplicateId(product.id));
        }

        debug!(id = %product.id, name = %product.name, "Adding product");
        self.products.push(product);
        self.persist();
        Ok(())
    }

    fn update(&mut self, product: Product) -> LedgerResult<()> {
        validate_product(&product)?;

        let Some(existing) = self.products.iter_mut().find(|p| p.id == product.id) else {
            return Err(LedgerError::not_found("Product", product.id));
        };

        debug!(id = %product.id, "Updating product");
        *existing = product;
        self.persist();
        Ok(())
    }

    fn delete(&mut self, id: &str) -> bool {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() < before;

        if removed {
            debug!(id = %id, "Deleted product");
            self.persist();
        }
        removed
    }

    fn count(&self) -> usize {
        self.products.len()
    }

    fn search_by_name(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn get_by_category(&self, category: Category) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    fn low_stock(&self, threshold: i64) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.quantity_in_stock <= threshold)
            .cloned()
            .collect()
    }

    fn out_of_stock(&self) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_out_of_stock())
            .cloned()
            .collect()
    }

    fn update_quantity(&mut self, id: &str, new_quantity: i64) -> LedgerResult<()> {
        let Some(mut product) = self.get_by_id(id) else {
            return Err(LedgerError::not_found("Product", id));
        };

        product.quantity_in_stock = new_quantity;
        self.update(product)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_store::MemoryLineStore;
    use shopkeep_core::Money;

    const FILE: &str = "products.txt";

    fn product(id: &str, name: &str, category: Category, cents: i64, qty: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category,
            price: Money::from_cents(cents),
            quantity_in_stock: qty,
        }
    }

    fn milk() -> Product {
        product("P1", "Milk", Category::Dairy, 250, 20)
    }

    fn ledger_with(store: &MemoryLineStore) -> ProductLedger {
        ProductLedger::new(Box::new(store.clone()), FILE)
    }

    #[test]
    fn test_add_then_get_by_id() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        assert_eq!(ledger.get_by_id("P1"), Some(milk()));
        assert_eq!(ledger.count(), 1);
    }

    #[test]
    fn test_add_duplicate_id_fails_and_leaves_ledger_unchanged() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        let clash = product("P1", "Cream", Category::Dairy, 300, 5);
        assert!(matches!(
            ledger.add(clash),
            Err(LedgerError::DuplicateId(_))
        ));

        assert_eq!(ledger.count(), 1);
        assert_eq!(ledger.get_by_id("P1").unwrap().name, "Milk");
    }

    #[test]
    fn test_add_invalid_product_fails() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        let invalid = product("P1", "Milk", Category::Dairy, 0, 20);
        assert!(matches!(ledger.add(invalid), Err(LedgerError::Invalid(_))));
        assert_eq!(ledger.count(), 0);
    }

    #[test]
    fn test_add_is_write_through() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        assert_eq!(store.read_lines(FILE), vec!["P1,Milk,DAIRY,2.50,20"]);
    }

    #[test]
    fn test_update_preserves_position() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        ledger
            .add(product("P2", "Bread", Category::Bakery, 180, 15))
            .unwrap();

        let repriced = product("P1", "Milk", Category::Dairy, 275, 20);
        ledger.update(repriced).unwrap();

        let all = ledger.get_all();
        assert_eq!(all[0].id, "P1");
        assert_eq!(all[0].price, Money::from_cents(275));
        assert_eq!(all[1].id, "P2");
        assert_eq!(store.read_lines(FILE)[0], "P1,Milk,DAIRY,2.75,20");
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        assert!(matches!(
            ledger.update(milk()),
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_reports_whether_anything_was_removed() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        assert!(ledger.delete("P1"));
        assert!(!ledger.delete("P1"));
        assert_eq!(ledger.count(), 0);
        assert!(store.read_lines(FILE).is_empty());
    }

    #[test]
    fn test_search_by_name_is_case_insensitive_substring() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        ledger
            .add(product("P2", "Almond Milk", Category::Beverages, 320, 8))
            .unwrap();
        ledger
            .add(product("P3", "Bread", Category::Bakery, 180, 15))
            .unwrap();

        let hits = ledger.search_by_name("MILK");
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| p.name.to_lowercase().contains("milk")));
    }

    #[test]
    fn test_category_and_stock_filters() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(product("P1", "Milk", Category::Dairy, 250, 0)).unwrap();
        ledger.add(product("P2", "Yogurt", Category::Dairy, 120, 5)).unwrap();
        ledger.add(product("P3", "Bread", Category::Bakery, 180, 50)).unwrap();

        assert_eq!(ledger.get_by_category(Category::Dairy).len(), 2);
        assert_eq!(ledger.get_by_category(Category::Frozen).len(), 0);

        // low stock is inclusive of zero
        let low = ledger.low_stock(10);
        assert_eq!(low.len(), 2);

        let out = ledger.out_of_stock();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "P1");
    }

    #[test]
    fn test_update_quantity() {
        let store = MemoryLineStore::new();
        let mut ledger = ledger_with(&store);

        ledger.add(milk()).unwrap();
        ledger.update_quantity("P1", 15).unwrap();
        assert_eq!(ledger.get_by_id("P1").unwrap().quantity_in_stock, 15);

        assert!(matches!(
            ledger.update_quantity("P9", 1),
            Err(LedgerError::NotFound { .. })
        ));
        // negative quantities violate the validity invariant
        assert!(matches!(
            ledger.update_quantity("P1", -1),
            Err(LedgerError::Invalid(_))
        ));
    }

    #[test]
    fn test_load_discards_malformed_lines() {
        let store = MemoryLineStore::new();
        store.write_lines(
            FILE,
            &[
                "P1,Milk,DAIRY,2.50,20".to_string(),
                "not a product line".to_string(),
                "P2,Bread,BAKERY,1.80,abc".to_string(),
                "P3,Eggs,DAIRY,3.20,12".to_string(),
            ],
        );

        let ledger = ledger_with(&store);
        assert_eq!(ledger.count(), 2);
        assert!(ledger.get_by_id("P1").is_some());
        assert!(ledger.get_by_id("P3").is_some());
    }

    #[test]
    fn test_cache_survives_reconstruction() {
        let store = MemoryLineStore::new();
        {
            let mut ledger = ledger_with(&store);
            ledger.add(milk()).unwrap();
        }

        let reloaded = ledger_with(&store);
        assert_eq!(reloaded.get_by_id("P1"), Some(milk()));
    }
}
