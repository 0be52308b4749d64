//! # Sale Service
//!
//! The cross-ledger sale transaction, plus sale queries.
//!
//! ## The Saga
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      record_sale(product_id, qty)                       │
//! │                                                                         │
//! │  1. qty <= 0?  ─────────────────────────► fail (validation)            │
//! │  2. product missing? ───────────────────► fail (not found)              │
//! │  3. stock < qty? ───────────────────────► fail (insufficient stock)    │
//! │  4. build Sale (id token, name + price snapshots, timestamp)            │
//! │  5. sale ledger add  ── fails ──────────► fail, stock untouched        │
//! │  6. product ledger update_quantity                                      │
//! │        │                                                                │
//! │        ├── ok ──────────────────────────► success, both committed       │
//! │        │                                                                │
//! │        └── fails ──► compensating delete of the sale                    │
//! │                │                                                        │
//! │                ├── removed ─────────────► SaleRolledBack (clean)        │
//! │                └── not removed ─────────► LedgersInconsistent           │
//! │                                           (logged, unresolved)          │
//! │                                                                         │
//! │  Not a true atomic transaction: an explicit forward action +            │
//! │  compensating action pair. The only place two independently             │
//! │  persisted collections must move together.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use shopkeep_core::validation::validate_sale_quantity;
use shopkeep_core::{CoreError, Money, Sale};
use shopkeep_store::{ProductRepository, SaleRepository};

use crate::error::{ServiceError, ServiceResult};

/// Coordinates the sale ledger and the product ledger.
pub struct SaleService<P: ProductRepository, S: SaleRepository> {
    products: Rc<RefCell<P>>,
    sales: Rc<RefCell<S>>,
}

impl<P: ProductRepository, S: SaleRepository> SaleService<P, S> {
    pub fn new(products: Rc<RefCell<P>>, sales: Rc<RefCell<S>>) -> Self {
        SaleService { products, sales }
    }

    /// Records a sale of `quantity` units of `product_id`.
    ///
    /// On success both ledgers are committed: the sale is appended and the
    /// stock is decremented. On failure after the append, the sale is
    /// deleted again (best-effort compensation); see [`ServiceError`] for
    /// the two distinct failure shapes.
    ///
    /// The stock check and the decrement are not atomic with respect to
    /// any other mutator - acceptable because the ledgers have exactly one
    /// writer, this single synchronous session.
    pub fn record_sale(&self, product_id: &str, quantity: i64) -> ServiceResult<Sale> {
        validate_sale_quantity(quantity)?;

        let product = self
            .products
            .borrow()
            .get_by_id(product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))?;

        if product.quantity_in_stock < quantity {
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                available: product.quantity_in_stock,
                requested: quantity,
            }
            .into());
        }

        let now = Utc::now();
        let sale = Sale {
            id: generate_sale_id(now.timestamp_millis()),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            price_per_unit: product.price,
            timestamp_ms: now.timestamp_millis(),
        };

        // Forward action: append the sale. If this fails nothing has
        // changed yet.
        self.sales.borrow_mut().add(sale.clone())?;

        // Second leg: decrement stock. A failure here triggers the
        // compensating delete of the sale just appended.
        let remaining = product.quantity_in_stock - quantity;
        if let Err(stock_err) = self.products.borrow_mut().update_quantity(product_id, remaining) {
            warn!(
                sale_id = %sale.id,
                product_id = %product_id,
                error = %stock_err,
                "Stock update failed after sale append, compensating"
            );

            let compensated = self.sales.borrow_mut().delete(&sale.id);
            if compensated {
                return Err(ServiceError::SaleRolledBack {
                    sale_id: sale.id,
                    source: stock_err,
                });
            }

            error!(
                sale_id = %sale.id,
                product_id = %product_id,
                "Compensating delete failed, ledgers are inconsistent"
            );
            return Err(ServiceError::LedgersInconsistent { sale_id: sale.id });
        }

        info!(
            sale_id = %sale.id,
            product_id = %product_id,
            quantity,
            total = %sale.total(),
            "Sale recorded"
        );
        Ok(sale)
    }

    /// All sales, most-recent-first.
    pub fn list_sales(&self) -> Vec<Sale> {
        self.sales.borrow().get_all()
    }

    /// Sale by id, if present.
    pub fn get_sale(&self, id: &str) -> Option<Sale> {
        self.sales.borrow().get_by_id(id)
    }

    /// Number of recorded sales.
    pub fn sale_count(&self) -> usize {
        self.sales.borrow().count()
    }

    /// Sales recorded since local midnight.
    pub fn today_sales(&self) -> Vec<Sale> {
        self.sales.borrow().today_sales()
    }

    /// Sales within `[start_ms, end_ms]`, inclusive.
    pub fn sales_in_range(&self, start_ms: i64, end_ms: i64) -> Vec<Sale> {
        self.sales.borrow().sales_in_range(start_ms, end_ms)
    }

    /// Sales referencing a product.
    pub fn sales_for_product(&self, product_id: &str) -> Vec<Sale> {
        self.sales.borrow().sales_by_product(product_id)
    }

    /// Sum of all sales' totals.
    pub fn total_revenue(&self) -> Money {
        self.sales.borrow().total_revenue()
    }

    /// Corrective delete of a recorded sale. Does NOT restore stock; a
    /// correction of the stock level is a separate restock.
    pub fn delete_sale(&self, id: &str) -> bool {
        self.sales.borrow_mut().delete(id)
    }
}

// =============================================================================
// Sale Identifiers
// =============================================================================

/// Generates a sale id: epoch milliseconds plus a random fragment.
///
/// ## Format
/// `1700000000000-4f9a02c1`
///
/// The time prefix keeps ids roughly sortable like the original scheme; the
/// random suffix closes the collision hole of two sales landing in the same
/// millisecond.
fn generate_sale_id(timestamp_ms: i64) -> String {
    let fragment = Uuid::new_v4().simple().to_string();
    format!("{}-{}", timestamp_ms, &fragment[..8])
}

// =============================================================================
// Unit Tests
// =============================================================================
