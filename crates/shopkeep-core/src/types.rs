//! # Domain Types
//!
//! Core domain types used throughout Shopkeep.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────┐   ┌─────────────────────┐  │
//! │  │    Product      │   │      Sale        │   │  InventoryReport    │  │
//! │  │  ─────────────  │   │  ──────────────  │   │  ─────────────────  │  │
//! │  │  id             │   │  id (time token) │   │  total_products     │  │
//! │  │  name           │   │  product_id      │   │  total_stock_value  │  │
//! │  │  category       │   │  product_name ★  │   │  low_stock          │  │
//! │  │  price          │   │  price_per_unit ★│   │  out_of_stock       │  │
//! │  │  quantity       │   │  quantity        │   │  (never persisted)  │  │
//! │  └─────────────────┘   │  timestamp_ms    │   └─────────────────────┘  │
//! │                        └──────────────────┘                             │
//! │                        ★ = snapshot frozen at sale time                 │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │    Category     │  Closed enum. Persisted by canonical name          │
//! │  │  DAIRY, BAKERY… │  (DAIRY), displayed by label (Dairy).              │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// A closed set: unknown input parses to `None`, never to a catch-all
/// variant, so a corrupted category field drops the whole row at load time
/// instead of silently reclassifying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Dairy,
    Bakery,
    Produce,
    Meat,
    Beverages,
    Snacks,
    Frozen,
    Household,
    Other,
}

impl Category {
    /// All categories, in menu/display order.
    pub const ALL: [Category; 9] = [
        Category::Dairy,
        Category::Bakery,
        Category::Produce,
        Category::Meat,
        Category::Beverages,
        Category::Snacks,
        Category::Frozen,
        Category::Household,
        Category::Other,
    ];

    /// Canonical name used in the persisted line format (`DAIRY`).
    ///
    /// Distinct from [`Category::label`]: the canonical name is a stable
    /// wire identifier and never changes, the label is free to.
    pub const fn canonical_name(&self) -> &'static str {
        match self {
            Category::Dairy => "DAIRY",
            Category::Bakery => "BAKERY",
            Category::Produce => "PRODUCE",
            Category::Meat => "MEAT",
            Category::Beverages => "BEVERAGES",
            Category::Snacks => "SNACKS",
            Category::Frozen => "FROZEN",
            Category::Household => "HOUSEHOLD",
            Category::Other => "OTHER",
        }
    }

    /// Human-readable label shown in menus and reports (`Dairy`).
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Dairy => "Dairy",
            Category::Bakery => "Bakery",
            Category::Produce => "Produce",
            Category::Meat => "Meat",
            Category::Beverages => "Beverages",
            Category::Snacks => "Snacks",
            Category::Frozen => "Frozen",
            Category::Household => "Household",
            Category::Other => "Other",
        }
    }

    /// Total parse from a canonical name. Case-insensitive, `None` for
    /// anything outside the closed set.
    pub fn parse(input: &str) -> Option<Category> {
        let input = input.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.canonical_name().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Owned exclusively by the product ledger's in-memory collection; created
/// via console input, mutated by restock/sale, destroyed only by explicit
/// delete.
///
/// ## Validity Invariant
/// `id` and `name` non-blank, `price > 0`, `quantity_in_stock >= 0`.
/// Enforced by [`crate::validation::validate_product`] on every add/update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (non-blank, chosen by the operator).
    pub id: String,

    /// Display name shown in menus and on sale snapshots.
    pub name: String,

    /// Category from the closed set.
    pub category: Category,

    /// Unit price. Must be strictly positive.
    pub price: Money,

    /// Current stock level. Never negative.
    pub quantity_in_stock: i64,
}

impl Product {
    /// True when the product has no stock left.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity_in_stock == 0
    }

    /// Value of the stock on hand (price × quantity).
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.price * self.quantity_in_stock
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale transaction.
///
/// ## Snapshot Pattern
/// `product_name` and `price_per_unit` are frozen at sale time, so the sale
/// history stays correct even if the product is renamed, repriced, or
/// deleted later. `product_id` is a plain reference with no foreign-key
/// enforcement - it may dangle after a product delete.
///
/// Sales are immutable once recorded; the only mutation the sale ledger
/// allows is a corrective delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier, a time-based token (epoch millis + random suffix).
    pub id: String,

    /// The product sold. Not enforced as a foreign key.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Units sold. Strictly positive.
    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub price_per_unit: Money,

    /// When the sale was recorded, in milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
}

impl Sale {
    /// Total amount of the sale (quantity × unit price). Derived, never
    /// stored.
    #[inline]
    pub fn total(&self) -> Money {
        self.price_per_unit * self.quantity
    }

    /// The sale timestamp as a UTC datetime, for display.
    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_ms).single()
    }
}

// =============================================================================
// Inventory Report
// =============================================================================

/// Point-in-time inventory aggregate.
///
/// Recomputed on demand from a snapshot of the product ledger; never
/// persisted or cached, so it cannot go stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryReport {
    /// Number of products in the catalog.
    pub total_products: usize,

    /// Σ price × quantity over all products.
    pub total_stock_value: Money,

    /// Products at or below the low-stock threshold. Includes out-of-stock
    /// products: the comparison is `quantity <= threshold`, so the two lists
    /// overlap at zero.
    pub low_stock: Vec<Product>,

    /// Products with zero stock.
    pub out_of_stock: Vec<Product>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_canonical_names() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.canonical_name()), Some(category));
        }
    }

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!(Category::parse("dairy"), Some(Category::Dairy));
        assert_eq!(Category::parse("Beverages"), Some(Category::Beverages));
    }

    #[test]
    fn test_category_parse_rejects_unknown() {
        assert_eq!(Category::parse("ELECTRONICS"), None);
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Dairy Products"), None);
    }

    #[test]
    fn test_sale_total_is_exact() {
        let sale = Sale {
            id: "1700000000000-abcd1234".to_string(),
            product_id: "P1".to_string(),
            product_name: "Milk".to_string(),
            quantity: 5,
            price_per_unit: Money::from_cents(250),
            timestamp_ms: 1_700_000_000_000,
        };
        assert_eq!(sale.total(), Money::from_cents(1250));
    }

    #[test]
    fn test_product_stock_value() {
        let product = Product {
            id: "P1".to_string(),
            name: "Milk".to_string(),
            category: Category::Dairy,
            price: Money::from_cents(250),
            quantity_in_stock: 20,
        };
        assert_eq!(product.stock_value(), Money::from_cents(5000));
        assert!(!product.is_out_of_stock());
    }
}
