//! # Service Error Types
//!
//! The error surface the console menu sees.
//!
//! ## The Saga's Two Failure Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record_sale: stock decrement fails AFTER the sale was appended         │
//! │                                                                         │
//! │       compensating delete succeeds          compensating delete fails   │
//! │       ─────────────────────────────         ───────────────────────────│
//! │       SaleRolledBack { .. }                 LedgersInconsistent { .. }  │
//! │       no sale recorded, stock               sale recorded, stock        │
//! │       unchanged - clean failure             unchanged - detectable but  │
//! │                                             unresolved inconsistency    │
//! │                                                                         │
//! │  The two outcomes are DISTINCT variants so the caller (and the log)     │
//! │  can tell a clean rollback from a corrupted pair of ledgers.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use shopkeep_core::{CoreError, ValidationError};
use shopkeep_store::LedgerError;

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule violation from the domain layer.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A rule violation raised by a ledger (duplicate id, not found,
    /// validity, immutability).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The stock decrement failed after the sale was appended, and the
    /// compensating delete removed the sale again. Both ledgers are as they
    /// were before the call.
    #[error("Sale {sale_id} was rolled back, stock update failed: {source}")]
    SaleRolledBack {
        sale_id: String,
        source: LedgerError,
    },

    /// The stock decrement failed AND the compensating delete failed. The
    /// sale is recorded but stock is unchanged: a detectable inconsistency
    /// this design does not resolve automatically.
    #[error("Ledgers inconsistent: sale {sale_id} is recorded but stock was not decremented")]
    LedgersInconsistent { sale_id: String },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Core(CoreError::Validation(err))
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
