//! # Repository Module
//!
//! Ledger implementations for Shopkeep.
//!
//! ## Ledger Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Ledger Pattern Explained                           │
//! │                                                                         │
//! │  A ledger is an ordered in-memory collection mirrored to a file.        │
//! │  The cache is the sole source of truth during a run; the file only      │
//! │  matters at load time and after a crash.                                │
//! │                                                                         │
//! │  Service call                                                           │
//! │       │                                                                 │
//! │       │  products.update_quantity("P1", 15)                             │
//! │       ▼                                                                 │
//! │  ProductLedger                                                          │
//! │  ├── 1. mutate the in-memory Vec                                        │
//! │  └── 2. rewrite the ENTIRE file from the Vec (write-through)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LineStore → products.txt                                               │
//! │                                                                         │
//! │  Write-through is O(n) per mutation but the file always reflects the    │
//! │  full current cache: no partial writes, no log replay on restart.       │
//! │                                                                         │
//! │  Benefits of the trait seam:                                            │
//! │  • Services are tested against stub repositories                        │
//! │  • The saga's compensation path is reachable in tests                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Ledgers
//!
//! - [`product::ProductLedger`] - Product CRUD, search and stock filters
//! - [`sale::SaleLedger`] - Append-oriented sale history, queries, revenue

pub mod product;
pub mod sale;

use shopkeep_core::{Category, Money, Product, Sale};

use crate::error::LedgerResult;

// =============================================================================
// Repository Traits
// =============================================================================

/// Operations of the product ledger.
///
/// Implemented by [`product::ProductLedger`]; services depend on this trait
/// so tests can substitute failing stubs.
pub trait ProductRepository {
    /// Defensive copy of the full collection, in file order.
    fn get_all(&self) -> Vec<Product>;

    /// First product with the given id, if any.
    fn get_by_id(&self, id: &str) -> Option<Product>;

    /// Adds a product. Fails on a duplicate id or an invalid product.
    fn add(&mut self, product: Product) -> LedgerResult<()>;

    /// Replaces the entry with the same id in place, preserving position.
    /// Fails if no such entry exists or the new value is invalid.
    fn update(&mut self, product: Product) -> LedgerResult<()>;

    /// Removes all entries with the given id (normally 0 or 1). Returns
    /// whether anything was removed; the file is rewritten only if so.
    fn delete(&mut self, id: &str) -> bool;

    /// Number of products in the cache.
    fn count(&self) -> usize;

    /// Case-insensitive substring match over product names. A blank query
    /// matches everything; the service layer is the one that turns blank
    /// into an empty result.
    fn search_by_name(&self, query: &str) -> Vec<Product>;

    /// Products with exactly the given category.
    fn get_by_category(&self, category: Category) -> Vec<Product>;

    /// Products with `quantity_in_stock <= threshold` (zero included).
    fn low_stock(&self, threshold: i64) -> Vec<Product>;

    /// Products with zero stock.
    fn out_of_stock(&self) -> Vec<Product>;

    /// Convenience: fetch, copy with the new quantity, delegate to
    /// [`ProductRepository::update`]. Fails if the id is absent.
    fn update_quantity(&mut self, id: &str, new_quantity: i64) -> LedgerResult<()>;
}

/// Operations of the sale ledger.
pub trait SaleRepository {
    /// Defensive copy, most-recent-first.
    fn get_all(&self) -> Vec<Sale>;

    /// Sale with the given id, if any.
    fn get_by_id(&self, id: &str) -> Option<Sale>;

    /// Inserts at the front of the collection (most-recent-first order)
    /// and rewrites the file.
    fn add(&mut self, sale: Sale) -> LedgerResult<()>;

    /// Always fails: sales are immutable by design, not by omission.
    fn update(&mut self, sale: Sale) -> LedgerResult<()>;

    /// Removes matching entries (correction-only path). Returns whether
    /// anything was removed.
    fn delete(&mut self, id: &str) -> bool;

    /// Number of sales in the cache.
    fn count(&self) -> usize;

    /// Sales referencing the given product id.
    fn sales_by_product(&self, product_id: &str) -> Vec<Sale>;

    /// Sales with `start <= timestamp_ms <= end`, inclusive both ends.
    fn sales_in_range(&self, start_ms: i64, end_ms: i64) -> Vec<Sale>;

    /// Sum of all sales' total amounts.
    fn total_revenue(&self) -> Money;

    /// Sales recorded at or after the start of the current local calendar
    /// day.
    fn today_sales(&self) -> Vec<Sale>;
}
