//! # shopkeep-core: Pure Business Logic for Shopkeep
//!
//! This crate is the **heart** of Shopkeep. It contains the domain types and
//! all pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopkeep Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console Menu (apps/console)                  │   │
//! │  │    Product Management ──► Sales Management ──► Reports          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shopkeep-services (business rules)                 │   │
//! │  │    InventoryService, SaleService (the two-ledger saga)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              shopkeep-store (ledgers + line store)              │   │
//! │  │    ProductLedger, SaleLedger, FsLineStore                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shopkeep-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐   │   │
//! │  │   │   types   │  │   money   │  │   codec   │  │ validation│   │   │
//! │  │   │  Product  │  │   Money   │  │ LineRecord│  │   rules   │   │   │
//! │  │   │   Sale    │  │ exact i64 │  │ to/from   │  │  checks   │   │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, Category, InventoryReport)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`codec`] - The delimited line format entities are persisted in
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: File system, console, and clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use shopkeep_core::Money` instead of
// `use shopkeep_core::money::Money`

pub use codec::LineRecord;
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock level at or below which a product counts as "low stock".
///
/// ## Why a constant?
/// The inventory report and the low-stock alert both use the same boundary.
/// The comparison is inclusive (`quantity <= threshold`), so out-of-stock
/// products appear in the low-stock set as well as the out-of-stock set.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

/// Field separator for the persisted line format.
///
/// A delimiter occurring inside a field value (e.g. a comma in a product
/// name) is NOT escaped and corrupts that row on the next load. This is a
/// known limitation of the format, see [`codec`].
pub const FIELD_DELIMITER: char = ',';
