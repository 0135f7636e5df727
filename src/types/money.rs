//! Exact two-decimal money amounts.
//!
//! ## Overview
//!
//! A [`Money`] value is a pair of integer whole dollars and integer cents
//! (always normalized to `0..=99`). Addition, subtraction and comparison are
//! pure integer operations with explicit carry and borrow.
//!
//! ## Division
//!
//! Averages need money divided by a count. [`Money::checked_div`] uses the
//! two-part rounding procedure the reference reports were produced with:
//! the dollar part is divided and truncated, the cents part is divided and
//! rounded, and the truncated dollar remainder is rounded to cents and added
//! back. This is the only place a floating-point intermediate is used.
//!
//! ## Examples
//!
//! ```
//! use donation_matcher::types::Money;
//!
//! let a: Money = "4.60".parse().unwrap();
//! let b: Money = "0.50".parse().unwrap();
//! assert_eq!((a + b).to_string(), "$5.10");
//!
//! let ten = Money::new(10, 0);
//! assert_eq!(ten.checked_div(3), Some(Money::new(3, 33)));
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use crate::error::MatchError;

/// Number of cents in a dollar
pub const CENTS_PER_DOLLAR: i64 = 100;

/// An exact amount of money: whole dollars plus cents in `0..=99`.
///
/// Ordering is lexicographic on (dollars, cents), which equals numeric
/// ordering because cents are always normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    dollars: i64,
    cents: u8,
}

impl Money {
    /// $0.00
    pub const ZERO: Money = Money { dollars: 0, cents: 0 };

    /// Sentinel used for caps that a round policy leaves unspecified.
    pub const UNLIMITED: Money = Money {
        dollars: i32::MAX as i64,
        cents: 0,
    };

    /// Create an amount from dollars and cents, carrying cents above 99.
    pub const fn new(dollars: i64, cents: u8) -> Self {
        Money {
            dollars: dollars + (cents / 100) as i64,
            cents: cents % 100,
        }
    }

    /// Create an amount from a total number of cents.
    pub fn from_cents(total: i64) -> Self {
        Money {
            dollars: total.div_euclid(CENTS_PER_DOLLAR),
            cents: total.rem_euclid(CENTS_PER_DOLLAR) as u8,
        }
    }

    /// Normalize an arbitrary (dollars, cents) pair.
    fn from_parts(dollars: i64, cents: i64) -> Self {
        Money {
            dollars: dollars + cents.div_euclid(CENTS_PER_DOLLAR),
            cents: cents.rem_euclid(CENTS_PER_DOLLAR) as u8,
        }
    }

    #[inline]
    pub fn dollars(&self) -> i64 {
        self.dollars
    }

    #[inline]
    pub fn cents(&self) -> u8 {
        self.cents
    }

    /// Total value in cents
    #[inline]
    pub fn as_cents(&self) -> i64 {
        self.dollars * CENTS_PER_DOLLAR + self.cents as i64
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.dollars == 0 && self.cents == 0
    }

    /// Divide by a positive count using the two-part rounding procedure.
    ///
    /// # Returns
    ///
    /// * `Some(Money)` - the quotient
    /// * `None` - if `divisor` is zero
    ///
    /// # Example
    ///
    /// ```
    /// use donation_matcher::types::Money;
    ///
    /// assert_eq!(Money::new(100, 0).checked_div(8), Some(Money::new(12, 50)));
    /// assert_eq!(Money::new(0, 99).checked_div(2), Some(Money::new(0, 50)));
    /// assert_eq!(Money::new(1, 0).checked_div(0), None);
    /// ```
    pub fn checked_div(self, divisor: u64) -> Option<Money> {
        if divisor == 0 {
            return None;
        }
        let n = divisor as f64;
        let dollars = self.dollars as f64 / n;
        let whole = dollars.trunc();
        let remainder_cents = ((dollars - whole) * 100.0).round();
        let cents = (self.cents as f64 / n).round();
        Some(Money::from_parts(
            whole as i64,
            (cents + remainder_cents) as i64,
        ))
    }

    /// Ratio of `self` to `total` as a percentage; zero when `total` is zero.
    pub fn percent_of(self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        self.as_cents() as f64 / total.as_cents() as f64 * 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        let mut dollars = self.dollars + rhs.dollars;
        let mut cents = self.cents + rhs.cents;
        if cents >= 100 {
            cents -= 100;
            dollars += 1;
        }
        Money { dollars, cents }
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        let mut dollars = self.dollars - rhs.dollars;
        let mut cents = self.cents as i16 - rhs.cents as i16;
        if cents < 0 {
            cents += 100;
            dollars -= 1;
        }
        Money {
            dollars,
            cents: cents as u8,
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

impl FromStr for Money {
    type Err = MatchError;

    /// Parse `"12"`, `"12.5"`, `"12.50"` or `"$1,234.56"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .trim()
            .chars()
            .filter(|c| *c != '$' && *c != ',')
            .collect();
        let invalid = || MatchError::InvalidMoney(s.to_string());

        let decimal = Decimal::from_str(&cleaned).map_err(|_| invalid())?;
        if decimal.is_sign_negative() || decimal.normalize().scale() > 2 {
            return Err(invalid());
        }
        let cents = decimal
            .checked_mul(Decimal::from(CENTS_PER_DOLLAR))
            .and_then(|d| d.round_dp(0).to_i64())
            .ok_or_else(invalid)?;
        Ok(Money::from_cents(cents))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dollars < 0 {
            let abs = Money::from_cents(-self.as_cents());
            write!(f, "-${}.{:02}", abs.dollars, abs.cents)
        } else {
            write!(f, "${}.{:02}", self.dollars, self.cents)
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn m(s: &str) -> Money {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_carries_cents() {
        assert_eq!(Money::new(1, 150), Money::new(2, 50));
        assert_eq!(Money::new(3, 0).cents(), 0);
    }

    #[test]
    fn test_add_carry() {
        assert_eq!(m("4.60") + m("0.50"), m("5.10"));
        assert_eq!(m("0.99") + m("0.01"), m("1.00"));
        assert_eq!(m("0.99") + m("0.99"), m("1.98"));
    }

    #[test]
    fn test_sub_borrow() {
        assert_eq!(m("2.00") - m("0.30"), m("1.70"));
        assert_eq!(m("10.05") - m("0.06"), m("9.99"));
        assert_eq!(m("5.00") - m("5.00"), Money::ZERO);
    }

    #[test]
    fn test_sub_below_zero_keeps_cents_in_range() {
        let diff = m("0.00") - m("0.30");
        assert_eq!(diff.dollars(), -1);
        assert_eq!(diff.cents(), 70);
        assert_eq!(diff.as_cents(), -30);
        assert_eq!(diff.to_string(), "-$0.30");
    }

    #[test]
    fn test_ordering() {
        assert!(m("1.99") < m("2.00"));
        assert!(m("2.01") > m("2.00"));
        assert!(m("0.00") < Money::UNLIMITED);
        assert_eq!(m("25").min(m("30")), m("25"));
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!(m("12"), Money::new(12, 0));
        assert_eq!(m("12.5"), Money::new(12, 50));
        assert_eq!(m("12.05"), Money::new(12, 5));
        assert_eq!(m("$1,234.56"), Money::new(1234, 56));
        assert_eq!(m(" 7.10 "), Money::new(7, 10));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("abc".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("-5.00".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(5, 3).to_string(), "$5.03");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::new(1800, 0).to_string(), "$1800.00");
    }

    #[test]
    fn test_checked_div_two_part_rounding() {
        assert_eq!(m("10.00").checked_div(3), Some(m("3.33")));
        assert_eq!(m("100.00").checked_div(8), Some(m("12.50")));
        assert_eq!(m("0.99").checked_div(2), Some(m("0.50")));
        // both halves round up and carry into the dollar part
        assert_eq!(m("199.99").checked_div(2), Some(m("100.00")));
        assert_eq!(m("55.00").checked_div(2), Some(m("27.50")));
        assert_eq!(m("5.00").checked_div(1), Some(m("5.00")));
        assert_eq!(m("5.00").checked_div(0), None);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(m("25.00").percent_of(m("100.00")), 25.0);
        assert_eq!(m("25.00").percent_of(Money::ZERO), 0.0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [m("1.50"), m("2.75"), m("0.75")].iter().sum();
        assert_eq!(total, m("5.00"));
    }
}
