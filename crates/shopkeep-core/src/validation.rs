//! # Validation Module
//!
//! Input validation for Shopkeep.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompts                                               │
//! │  ├── Type-level checks (number parses, category index in range)         │
//! │  └── Immediate re-prompt on bad input                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Services                                                      │
//! │  ├── Business gates (positive quantity, product exists)                 │
//! │  └── THIS MODULE: entity validity rules                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledgers                                                       │
//! │  ├── Re-check validity on add/update (defense in depth)                 │
//! │  └── Duplicate-id rejection                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates the product validity invariant.
///
/// ## Rules
/// - `id` non-blank
/// - `name` non-blank
/// - `price` strictly positive
/// - `quantity_in_stock` not negative
///
/// ## Example
/// ```rust
/// use shopkeep_core::money::Money;
/// use shopkeep_core::types::{Category, Product};
/// use shopkeep_core::validation::validate_product;
///
/// let product = Product {
///     id: "P1".to_string(),
///     name: "Milk".to_string(),
///     category: Category::Dairy,
///     price: Money::from_cents(250),
///     quantity_in_stock: 20,
/// };
/// assert!(validate_product(&product).is_ok());
/// ```
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required { field: "id" });
    }

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if !product.price.is_positive() {
        return Err(ValidationError::MustBePositive { field: "price" });
    }

    if product.quantity_in_stock < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "quantity" });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity. Must be strictly positive.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    Ok(())
}

/// Validates a restock amount. Must be strictly positive; restocking by
/// zero or a negative amount is rejected rather than treated as a no-op.
pub fn validate_restock_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "restock amount",
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
