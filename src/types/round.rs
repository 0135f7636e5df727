//! Matching round policies.

use crate::types::{Money, Timestamp};

/// A time-boxed matching policy: two pools, three caps and a window.
///
/// Pools left unspecified are zero; caps left unspecified are
/// [`Money::UNLIMITED`].
///
/// ## Example
///
/// ```
/// use donation_matcher::types::{MatchingRound, Money, Timestamp};
///
/// let round = MatchingRound::new(
///     Timestamp::parse("12/01/2020", "00:00:00").unwrap(),
///     Timestamp::parse("12/01/2020", "11:59:59").unwrap(),
/// )
/// .with_general_pool(Money::new(100, 0))
/// .with_recipient_pool(Money::new(50, 0))
/// .with_max_per_donation(Money::new(25, 0));
///
/// assert_eq!(round.max_per_donor, Money::UNLIMITED);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingRound {
    /// Funds matchable against any eligible donation
    pub general_pool: Money,
    /// Funds matchable only against donations to dancers
    pub recipient_pool: Money,
    /// Cap on what one donor can have matched toward one recipient
    pub max_per_donor: Money,
    /// Cap on the total matched toward one recipient
    pub max_per_recipient: Money,
    /// Cap on the matched portion of any single donation
    pub max_per_donation: Money,
    /// Inclusive window start
    pub start: Timestamp,
    /// Inclusive window end
    pub end: Timestamp,
}

impl MatchingRound {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self {
            general_pool: Money::ZERO,
            recipient_pool: Money::ZERO,
            max_per_donor: Money::UNLIMITED,
            max_per_recipient: Money::UNLIMITED,
            max_per_donation: Money::UNLIMITED,
            start,
            end,
        }
    }

    pub fn with_general_pool(mut self, amount: Money) -> Self {
        self.general_pool = amount;
        self
    }

    pub fn with_recipient_pool(mut self, amount: Money) -> Self {
        self.recipient_pool = amount;
        self
    }

    pub fn with_max_per_donor(mut self, amount: Money) -> Self {
        self.max_per_donor = amount;
        self
    }

    pub fn with_max_per_recipient(mut self, amount: Money) -> Self {
        self.max_per_recipient = amount;
        self
    }

    pub fn with_max_per_donation(mut self, amount: Money) -> Self {
        self.max_per_donation = amount;
        self
    }

    /// Whether `ts` falls inside the inclusive window
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(time: &str) -> Timestamp {
        Timestamp::parse("12/01/2020", time).unwrap()
    }

    #[test]
    fn test_defaults() {
        let round = MatchingRound::new(ts("00:00:00"), ts("11:59:59"));
        assert_eq!(round.general_pool, Money::ZERO);
        assert_eq!(round.recipient_pool, Money::ZERO);
        assert_eq!(round.max_per_recipient, Money::UNLIMITED);
        assert_eq!(round.max_per_donation, Money::UNLIMITED);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let round = MatchingRound::new(ts("00:00:00"), ts("11:59:59"));
        assert!(round.contains(ts("00:00:00")));
        assert!(round.contains(ts("11:59:59")));
        assert!(!round.contains(ts("12:00:00")));
    }
}
