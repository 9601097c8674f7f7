//! # Money Module
//!
//! Provides the `Money` type for daily rates, fees and bill totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats: 3 × 45.99 × 1.10 = 151.76700000000002                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    subtotal = 3 × 4599       = 13797 cents                              │
//! │    tax      = round(13797/10) =  1380 cents                             │
//! │    total    = 15177 cents    = $151.77                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rental_core::money::Money;
//!
//! let rate = Money::from_cents(4599); // $45.99 per day
//! let fee = rate.multiply_days(3).unwrap(); // $137.97
//! assert_eq!(fee.to_string(), "$137.97");
//!
//! // Console input is parsed without ever touching f64
//! let parsed = Money::parse("$45.99").unwrap();
//! assert_eq!(parsed, rate);
//! ```

use std::fmt;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// Car.rate_cents ──► Booking.rate_cents (snapshot) ──► Booking.total_fee_cents
///                                                            │
///                                          Bill: subtotal ◄──┘
///                                                  │
///                                          calculate_tax(10%)
///                                                  │
///                                          Bill: total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Parses a dollar amount typed at the console.
    ///
    /// ## Accepted Forms
    /// - `45`, `45.5`, `45.99`
    /// - a leading `$` and thousands separators: `$1,250.00`
    ///
    /// At most two fractional digits are accepted; anything finer than a
    /// cent is rejected rather than silently rounded.
    pub fn parse(input: &str) -> Result<Money, ValidationError> {
        let cleaned: String = input
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        if cleaned.is_empty() {
            return Err(ValidationError::Required {
                field: "amount".to_string(),
            });
        }

        let (whole, frac) = match cleaned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (cleaned.as_str(), ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a number like 45.99"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a number like 45.99"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }

        let dollars: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount too large"))?
        };
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad cents"))?,
        };

        dollars
            .checked_mul(100)
            .and_then(|d| d.checked_add(cents))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Calculates tax, rounding half-cents up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ```rust
    /// use rental_core::money::Money;
    /// use rental_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(13797);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1000));
    /// // $137.97 × 10% = $13.797 → $13.80
    /// assert_eq!(tax.cents(), 1380);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies a daily rate by a number of rental days.
    ///
    /// Returns `None` when the product does not fit in i64 cents.
    #[inline]
    pub const fn multiply_days(&self, days: i32) -> Option<Self> {
        match self.0.checked_mul(days as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34` (or `-$12.34`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(4599);
        assert_eq!(money.cents(), 4599);
        assert_eq!(money.dollars(), 45);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(4599).to_string(), "$45.99");
        assert_eq!(Money::from_cents(4000).to_string(), "$40.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(Money::parse("45.99").unwrap().cents(), 4599);
        assert_eq!(Money::parse("45").unwrap().cents(), 4500);
        assert_eq!(Money::parse("38.5").unwrap().cents(), 3850);
        assert_eq!(Money::parse(" $40.00 ").unwrap().cents(), 4000);
        assert_eq!(Money::parse("$1,250.00").unwrap().cents(), 125000);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            Money::parse(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse("1.999").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_tax_rounds_half_up() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(Money::from_cents(1000).calculate_tax(rate).cents(), 100);
        // 0.5 cent rounds up
        assert_eq!(Money::from_cents(5).calculate_tax(rate).cents(), 1);
        assert_eq!(Money::from_cents(4).calculate_tax(rate).cents(), 0);
    }

    #[test]
    fn test_multiply_days() {
        assert_eq!(Money::from_cents(3850).multiply_days(10).unwrap().cents(), 38500);
    }

    #[test]
    fn test_overflow_is_reported_not_wrapped() {
        let huge = Money::parse("50000000000000000").unwrap();
        assert_eq!(huge.multiply_days(2), None);
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(1000).checked_add(Money::from_cents(500)),
            Some(Money::from_cents(1500))
        );
    }
}
