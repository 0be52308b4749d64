//! # shopkeep-store: Persistence Layer for Shopkeep
//!
//! This crate provides file-backed storage for the Shopkeep system. Records
//! live in flat delimited text files, mirrored by in-memory ledger caches.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Data Flow                               │
//! │                                                                         │
//! │  Service call (inventory.restock_product)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shopkeep-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   LineStore   │    │    Ledgers     │    │    Errors    │  │   │
//! │  │   │(line_store.rs)│    │ (repository/)  │    │  (error.rs)  │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ FsLineStore   │◄───│ ProductLedger  │    │ LedgerError  │  │   │
//! │  │   │ MemoryLine-   │    │ SaleLedger     │    │              │  │   │
//! │  │   │ Store (tests) │    │                │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   data/products.txt, data/sales.txt             │   │
//! │  │   UTF-8, one record per line, comma-delimited fields            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows bottom-up on load (file → ledger cache) and top-down on
//! mutation (ledger cache → whole-file rewrite).
//!
//! ## Module Organization
//!
//! - [`line_store`] - The LineStore capability trait and its backings
//! - [`error`] - Ledger error types
//! - [`repository`] - Ledger implementations (product, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shopkeep_store::{FsLineStore, ProductLedger, PRODUCTS_FILE};
//!
//! let store = FsLineStore::new("data");
//! let mut products = ProductLedger::new(Box::new(store), PRODUCTS_FILE);
//! products.add(product)?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod line_store;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LedgerError, LedgerResult};
pub use line_store::{FsLineStore, LineStore, MemoryLineStore};
pub use repository::product::ProductLedger;
pub use repository::sale::SaleLedger;
pub use repository::{ProductRepository, SaleRepository};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default file name for the product ledger.
pub const PRODUCTS_FILE: &str = "products.txt";

/// Default file name for the sale ledger.
pub const SALES_FILE: &str = "sales.txt";
