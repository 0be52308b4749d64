//! # shopkeep-services: Business Services for Shopkeep
//!
//! The policy layer between the console menu and the ledgers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Service Layer                                    │
//! │                                                                         │
//! │  Console menu                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────┐      ┌──────────────────────────────────┐  │
//! │  │    InventoryService     │      │          SaleService             │  │
//! │  │  ─────────────────────  │      │  ──────────────────────────────  │  │
//! │  │  duplicate-name warning │      │  record_sale: the only place     │  │
//! │  │  not-found gate         │      │  two independently persisted     │  │
//! │  │  restock rules          │      │  ledgers must move together      │  │
//! │  │  inventory report       │      │  (forward + compensating action) │  │
//! │  └──────────┬──────────────┘      └───────────┬──────────┬───────────┘  │
//! │             │                                 │          │              │
//! │             ▼                                 ▼          ▼              │
//! │      ProductRepository  ◄──── shared ────  Product     Sale             │
//! │      (Rc<RefCell<_>>)                      ledger      ledger           │
//! │                                                                         │
//! │  Single-threaded, synchronous: one command at a time to completion.     │
//! │  Rc<RefCell<_>> is the single-actor sharing discipline - no locks.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`inventory`] - Product policy and the inventory report
//! - [`sale`] - The cross-ledger sale transaction and sale queries
//! - [`error`] - Service error type, including the saga's two failure shapes

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod sale;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ServiceError, ServiceResult};
pub use inventory::InventoryService;
pub use sale::SaleService;
