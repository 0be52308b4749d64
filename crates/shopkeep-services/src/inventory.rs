//! # Inventory Service
//!
//! Product policy on top of the product ledger.
//!
//! ## Policy Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Inventory Service Policy                             │
//! │                                                                         │
//! │  add_product      duplicate NAME (case-insensitive) → warn, proceed     │
//! │                   duplicate ID → the ledger rejects it                  │
//! │                                                                         │
//! │  update_product   unknown id → fails at THIS layer, before the ledger   │
//! │                   gets a say (the service gate is authoritative)        │
//! │                                                                         │
//! │  search_products  blank query → empty result, never "all"               │
//! │                                                                         │
//! │  restock_product  amount <= 0 → rejected; otherwise current + amount    │
//! │                                                                         │
//! │  inventory report pure snapshot over get_all(), never cached            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};

use shopkeep_core::validation::validate_restock_amount;
use shopkeep_core::{Category, CoreError, InventoryReport, Money, Product, LOW_STOCK_THRESHOLD};
use shopkeep_store::ProductRepository;

use crate::error::ServiceResult;

/// Business rules for the product catalog.
///
/// Shares the product ledger with [`crate::SaleService`] through
/// `Rc<RefCell<_>>`: exactly one logical actor mutates it, so no locking
/// discipline is needed.
pub struct InventoryService<P: ProductRepository> {
    products: Rc<RefCell<P>>,
}

impl<P: ProductRepository> InventoryService<P> {
    pub fn new(products: Rc<RefCell<P>>) -> Self {
        InventoryService { products }
    }

    /// Adds a product to the catalog.
    ///
    /// An existing product with a case-insensitive-equal name only produces
    /// a logged warning; distinct ids may legitimately share a name (e.g.
    /// different package sizes). The duplicate-ID policy lives in the
    /// ledger.
    pub fn add_product(&self, product: Product) -> ServiceResult<()> {
        let name_taken = self
            .products
            .borrow()
            .get_all()
            .iter()
            .any(|existing| existing.name.eq_ignore_ascii_case(&product.name));
        if name_taken {
            warn!(name = %product.name, "A product with this name already exists");
        }

        self.products.borrow_mut().add(product)?;
        Ok(())
    }

    /// Updates an existing product.
    ///
    /// The not-found gate here is redundant with the ledger's own check;
    /// the service layer is the authoritative one.
    pub fn update_product(&self, product: Product) -> ServiceResult<()> {
        if self.products.borrow().get_by_id(&product.id).is_none() {
            return Err(CoreError::ProductNotFound(product.id).into());
        }

        self.products.borrow_mut().update(product)?;
        Ok(())
    }

    /// Deletes a product. Returns whether anything was removed.
    pub fn delete_product(&self, id: &str) -> bool {
        self.products.borrow_mut().delete(id)
    }

    /// Product by id, if present.
    pub fn get_product(&self, id: &str) -> Option<Product> {
        self.products.borrow().get_by_id(id)
    }

    /// The full catalog, in file order.
    pub fn list_products(&self) -> Vec<Product> {
        self.products.borrow().get_all()
    }

    /// Number of products in the catalog.
    pub fn product_count(&self) -> usize {
        self.products.borrow().count()
    }

    /// Case-insensitive substring search. A blank query yields an empty
    /// result, never the whole catalog.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        self.products.borrow().search_by_name(query)
    }

    /// Products in the given category.
    pub fn products_by_category(&self, category: Category) -> Vec<Product> {
        self.products.borrow().get_by_category(category)
    }

    /// Products at or below the low-stock threshold.
    pub fn low_stock_products(&self) -> Vec<Product> {
        self.products.borrow().low_stock(LOW_STOCK_THRESHOLD)
    }

    /// Computes the inventory report as a pure transformation over a
    /// snapshot of the ledger. Nothing is cached; staleness is impossible.
    pub fn generate_inventory_report(&self) -> InventoryReport {
        let products = self.products.borrow();
        let all = products.get_all();

        InventoryReport {
            total_products: all.len(),
            total_stock_value: all.iter().map(Product::stock_value).sum::<Money>(),
            low_stock: products.low_stock(LOW_STOCK_THRESHOLD),
            out_of_stock: products.out_of_stock(),
        }
    }

    /// Increases a product's stock by `amount`. Returns the new quantity.
    pub fn restock_product(&self, id: &str, amount: i64) -> ServiceResult<i64> {
        validate_restock_amount(amount)?;

        let product = self
            .products
            .borrow()
            .get_by_id(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))?;

        let new_quantity = product.quantity_in_stock + amount;
        self.products.borrow_mut().update_quantity(id, new_quantity)?;

        info!(id = %id, amount, new_quantity, "Product restocked");
        Ok(new_quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use shopkeep_core::ValidationError;
    use shopkeep_store::{LedgerError, MemoryLineStore, ProductLedger};

    use crate::error::ServiceError;

    fn product(id: &str, name: &str, cents: i64, qty: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: Category::Dairy,
            price: Money::from_cents(cents),
            quantity_in_stock: qty,
        }
    }

    fn service() -> InventoryService<ProductLedger> {
        let store = MemoryLineStore::new();
        let ledger = ProductLedger::new(Box::new(store), "products.txt");
        InventoryService::new(Rc::new(RefCell::new(ledger)))
    }

    #[test]
    fn test_add_then_get() {
        let service = service();
        service.add_product(product("P1", "Milk", 250, 20)).unwrap();

        assert_eq!(service.product_count(), 1);
        assert_eq!(service.get_product("P1").unwrap().name, "Milk");
    }

    #[test]
    fn test_duplicate_name_is_a_warning_not_a_failure() {
        let service = service();
        service.add_product(product("P1", "Milk", 250, 20)).unwrap();
        // same name, different id: allowed
        service.add_product(product("P2", "milk", 320, 10)).unwrap();
        assert_eq!(service.product_count(), 2);
    }

    #[test]
    fn test_duplicate_id_is_rejected_by_the_ledger() {
        let service = service();
        service.add_product(product("P1", "Milk", 250, 20)).unwrap();
        let err = service
            .add_product(product("P1", "Cream", 300, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Ledger(LedgerError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_update_unknown_product_fails_at_the_service_gate() {
        let service = service();
        let err = service
            .update_product(product("P9", "Ghost", 100, 1))
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Core(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_blank_search_is_empty_not_all() {
        let service = service();
        service.add_product(product("P1", "Milk", 250, 20)).unwrap();

        assert!(service.search_products("").is_empty());
        assert!(service.search_products("   ").is_empty());
        assert_eq!(service.search_products("mil").len(), 1);
    }

    #[test]
    fn test_restock_adds_to_current_quantity() {
        let service = service();
        service.add_product(product("P1", "Milk", 250, 20)).unwrap();

        assert_eq!(service.restock_product("P1", 5).unwrap(), 25);
        assert_eq!(service.get_product("P1").unwrap().quantity_in_stock, 25);
    }

    #[test]
    fn test_restock_rejects_non_positive_amounts() {
        let service = service();
        service.add_product(product("P1", "Milk", 250, 20)).unwrap();

        for amount in [0, -5] {
            let err = service.restock_product("P1", amount).unwrap_err();
            assert!(matches!(
                err,
                ServiceError::Core(CoreError::Validation(ValidationError::MustBePositive { .. }))
            ));
            // stock unchanged
            assert_eq!(service.get_product("P1").unwrap().quantity_in_stock, 20);
        }
    }

    #[test]
    fn test_restock_unknown_product_fails() {
        let service = service();
        assert!(matches!(
            service.restock_product("P9", 5).unwrap_err(),
            ServiceError::Core(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_inventory_report_scenario() {
        // products with qty 0, 5 and 50 against threshold 10
        let service = service();
        service.add_product(product("P1", "Milk", 250, 0)).unwrap();
        service.add_product(product("P2", "Yogurt", 120, 5)).unwrap();
        service.add_product(product("P3", "Butter", 410, 50)).unwrap();

        let report = service.generate_inventory_report();

        assert_eq!(report.total_products, 3);
        // 0×2.50 + 5×1.20 + 50×4.10 = 0 + 6.00 + 205.00
        assert_eq!(report.total_stock_value, Money::from_cents(21100));

        let low_ids: Vec<&str> = report.low_stock.iter().map(|p| p.id.as_str()).collect();
        // inclusive <= policy: the out-of-stock product overlaps into low stock
        assert_eq!(low_ids, vec!["P1", "P2"]);

        let out_ids: Vec<&str> = report.out_of_stock.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(out_ids, vec!["P1"]);
    }
}
