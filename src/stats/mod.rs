//! Post-pass statistics.
//!
//! ## Components
//!
//! - [`CategoryStatistics`]: per role/house totals over final recipient snapshots
//! - [`HourlyStatistics`]: per clock-hour donation totals
//!
//! ## Averages
//!
//! Every mean and every even-count median goes through [`Money::checked_div`],
//! so the cent rounding is the same in every table.

pub mod category;
pub mod hourly;

pub use category::{CategoryRow, CategoryStatistics};
pub use hourly::{HourlyRow, HourlyStatistics};

use crate::types::Money;

/// Mean of `values`, zero for an empty slice.
pub fn mean(values: &[Money]) -> Money {
    let total: Money = values.iter().sum();
    total.checked_div(values.len() as u64).unwrap_or(Money::ZERO)
}

/// Median of `values`, zero for an empty list.
///
/// Sorts in place. An even count averages the two middle elements.
pub fn median(values: &mut [Money]) -> Money {
    values.sort_unstable();
    let n = values.len();
    match n {
        0 => Money::ZERO,
        _ if n % 2 == 1 => values[n / 2],
        _ => (values[n / 2 - 1] + values[n / 2])
            .checked_div(2)
            .unwrap_or(Money::ZERO),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty_is_zero() {
        assert_eq!(mean(&[]), Money::ZERO);
    }

    #[test]
    fn test_mean_rounds_cents() {
        let values = [Money::new(10, 0), Money::new(0, 1), Money::new(0, 0)];
        // $10.01 / 3: $3 + 1/3 cent + 1/3 dollar remainder
        assert_eq!(mean(&values), Money::new(3, 33));
    }

    #[test]
    fn test_median_odd_and_even() {
        let mut odd = [Money::new(5, 0), Money::new(1, 0), Money::new(3, 0)];
        assert_eq!(median(&mut odd), Money::new(3, 0));

        let mut even = [Money::new(4, 0), Money::new(1, 0), Money::new(3, 0), Money::new(10, 0)];
        assert_eq!(median(&mut even), Money::new(3, 50));
    }

    #[test]
    fn test_median_empty_is_zero() {
        assert_eq!(median(&mut []), Money::ZERO);
    }
}
