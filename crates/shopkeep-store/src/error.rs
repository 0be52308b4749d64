//! # Ledger Error Types
//!
//! Error types for ledger operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Filesystem error (std::io::Error)                                      │
//! │       │                                                                 │
//! │       ✗  STOPS HERE: logged by the line store, degraded to an           │
//! │          empty read or a no-op write. Callers cannot distinguish        │
//! │          "empty" from "unreadable" - a deliberate weak point of         │
//! │          the flat-file design.                                          │
//! │                                                                         │
//! │  LedgerError (this module) ← cache rule violations only                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ServiceError (shopkeep-services) ← adds saga outcomes                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Console prints a specific message, returns to the menu                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use shopkeep_core::ValidationError;

/// Ledger operation errors.
///
/// Because I/O failures are swallowed at the line store boundary, every
/// variant here is a business rule the in-memory cache enforces itself.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No entry with the given id exists in the cache.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An entry with the given id already exists (duplicate-id policy).
    #[error("Duplicate id: '{0}' already exists")]
    DuplicateId(String),

    /// The entity fails its validity invariant.
    #[error("Validation error: {0}")]
    Invalid(#[from] ValidationError),

    /// The ledger does not permit updates (sales are immutable by design).
    #[error("{entity} records are immutable and cannot be updated")]
    Immutable { entity: &'static str },
}

impl LedgerError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::not_found("Product", "P9");
        assert_eq!(err.to_string(), "Product not found: P9");

        let err = LedgerError::DuplicateId("P1".to_string());
        assert_eq!(err.to_string(), "Duplicate id: 'P1' already exists");

        let err = LedgerError::Immutable { entity: "Sale" };
        assert_eq!(
            err.to_string(),
            "Sale records are immutable and cannot be updated"
        );
    }
}
