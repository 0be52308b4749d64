//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In many retail systems:                                                │
//! │    $10.00 / 3 = $3.33 (×3 = $9.99)  → Lost $0.01!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    price 2.50 is stored as 250 cents                                    │
//! │    5 × 250 = 1250 cents = 12.50, exactly                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The persisted line format carries prices as plain decimals (`2.50`), so
//! `Money` also owns the exact decimal parse/format pair used by the codec.
//!
//! ## Usage
//! ```rust
//! use shopkeep_core::money::Money;
//!
//! let price = Money::from_cents(250); // 2.50
//! let total = price * 5;              // 12.50
//! assert_eq!(total.to_string(), "12.50");
//! assert_eq!(Money::parse("12.50"), Some(total));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: totals and corrections can go negative in principle
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support plus total ordering for report sorting
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ```rust
    /// use shopkeep_core::money::Money;
    ///
    /// let price = Money::from_cents(250); // 2.50
    /// assert_eq!(price.cents(), 250);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Zero value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// True for values strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses a plain decimal string (`"2"`, `"2.5"`, `"2.50"`) into Money.
    ///
    /// Returns `None` for anything else: more than two fraction digits,
    /// thousands separators, currency symbols, or non-numeric input. This is
    /// the parse half of the line codec, so it must be total - bad input is
    /// an absent value, never a panic or an error.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major_part, minor_part) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_part.is_empty() || !major_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if minor_part.len() > 2 || !minor_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let major: i64 = major_part.parse().ok()?;
        // "2.5" means 50 cents, not 5
        let minor: i64 = match minor_part.len() {
            0 => 0,
            1 => minor_part.parse::<i64>().ok()? * 10,
            _ => minor_part.parse().ok()?,
        };

        let cents = major.checked_mul(100)?.checked_add(minor)?;
        Some(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Display (also the codec's serialized form)
// =============================================================================

impl fmt::Display for Money {
    /// Always renders two fraction digits, e.g. `2.50`, `-0.05`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Arithmetic
// =============================================================================

impl Add for Money {
    type Output = Money;

    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    /// Quantity × unit price. Exact, no rounding involved.
    #[inline]
    fn mul(self, rhs: i64) -> Money {
        Money(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_fraction_digits() {
        assert_eq!(Money::from_cents(250).to_string(), "2.50");
        assert_eq!(Money::from_cents(1205).to_string(), "12.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_parse_valid() {
        assert_eq!(Money::parse("2.50"), Some(Money::from_cents(250)));
        assert_eq!(Money::parse("2.5"), Some(Money::from_cents(250)));
        assert_eq!(Money::parse("2"), Some(Money::from_cents(200)));
        assert_eq!(Money::parse("0.05"), Some(Money::from_cents(5)));
        assert_eq!(Money::parse("-1.25"), Some(Money::from_cents(-125)));
        assert_eq!(Money::parse(" 3.10 "), Some(Money::from_cents(310)));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("abc"), None);
        assert_eq!(Money::parse("2.505"), None);
        assert_eq!(Money::parse("2."), Some(Money::from_cents(200)));
        assert_eq!(Money::parse("$2.50"), None);
        assert_eq!(Money::parse("2,50"), None);
        assert_eq!(Money::parse(".50"), None);
    }

    #[test]
    fn test_parse_display_round_trip() {
        for cents in [0, 1, 99, 100, 250, 1250, 99999] {
            let money = Money::from_cents(cents);
            assert_eq!(Money::parse(&money.to_string()), Some(money));
        }
    }

    #[test]
    fn test_arithmetic() {
        let price = Money::from_cents(250);
        assert_eq!(price * 5, Money::from_cents(1250));
        assert_eq!(price + Money::from_cents(50), Money::from_cents(300));
        assert_eq!(price - Money::from_cents(50), Money::from_cents(200));

        let total: Money = [price, price, Money::from_cents(100)].into_iter().sum();
        assert_eq!(total, Money::from_cents(600));
    }
}
