//! Pool balances and the two draw tiers.
//!
//! ## Draw Rules
//!
//! Both tiers first compute a *matchable* amount from the active caps:
//!
//! 1. Nothing if the recipient or the donor-to-recipient cap is already reached
//! 2. Clamp the donation to `max_per_donation`
//! 3. Take the binding constraint of the clamped amount, the recipient's
//!    headroom and the donor-to-recipient headroom
//!
//! The dancer tier then draws from the recipient pool first and takes any
//! shortfall from the general pool. The leadership tier draws only from the
//! general pool. Every draw is clamped to the balance, so pools never go
//! negative; once pools run dry the match can be less than the caps allow.

use crate::types::{MatchingRound, Money};

/// Caps of the active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps {
    pub max_per_donor: Money,
    pub max_per_recipient: Money,
    pub max_per_donation: Money,
}

impl Caps {
    /// All caps zero: nothing is matchable
    pub const NONE: Caps = Caps {
        max_per_donor: Money::ZERO,
        max_per_recipient: Money::ZERO,
        max_per_donation: Money::ZERO,
    };
}

/// Amounts actually drawn for one donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Draw {
    /// Drawn from the recipient-dedicated pool
    pub recipient_pool: Money,
    /// Drawn from the general pool
    pub general_pool: Money,
}

impl Draw {
    pub const NONE: Draw = Draw {
        recipient_pool: Money::ZERO,
        general_pool: Money::ZERO,
    };

    #[inline]
    pub fn total(&self) -> Money {
        self.recipient_pool + self.general_pool
    }
}

/// Live balances and caps of whatever round is active.
///
/// In a gap or after the last round every field is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub general: Money,
    pub recipient: Money,
    pub caps: Caps,
}

impl Default for PoolState {
    fn default() -> Self {
        Self::empty()
    }
}

impl PoolState {
    /// The "no matching" state
    pub const fn empty() -> Self {
        Self {
            general: Money::ZERO,
            recipient: Money::ZERO,
            caps: Caps::NONE,
        }
    }

    /// Balances and caps exactly as configured on `round`
    pub fn from_round(round: &MatchingRound) -> Self {
        Self {
            general: round.general_pool,
            recipient: round.recipient_pool,
            caps: Caps {
                max_per_donor: round.max_per_donor,
                max_per_recipient: round.max_per_recipient,
                max_per_donation: round.max_per_donation,
            },
        }
    }

    /// Balances of `round` plus the residual of the round before it
    pub fn carried_over(round: &MatchingRound, general: Money, recipient: Money) -> Self {
        let mut pools = Self::from_round(round);
        pools.general += general;
        pools.recipient += recipient;
        pools
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_zero() && self.recipient.is_zero()
    }

    /// Largest amount the caps allow for this donation, before pool limits.
    ///
    /// # Arguments
    ///
    /// * `amount` - raw donation amount
    /// * `donor_matched` - already matched from this donor toward this recipient
    /// * `recipient_matched` - already matched toward this recipient in total
    pub fn matchable(&self, amount: Money, donor_matched: Money, recipient_matched: Money) -> Money {
        let caps = &self.caps;
        if recipient_matched >= caps.max_per_recipient || donor_matched >= caps.max_per_donor {
            return Money::ZERO;
        }
        amount
            .min(caps.max_per_donation)
            .min(caps.max_per_recipient - recipient_matched)
            .min(caps.max_per_donor - donor_matched)
    }

    /// Dancer tier: recipient pool first, shortfall from the general pool.
    pub fn dancer_match(&mut self, amount: Money, donor_matched: Money, recipient_matched: Money) -> Draw {
        let wanted = self.matchable(amount, donor_matched, recipient_matched);
        let from_recipient = wanted.min(self.recipient);
        self.recipient -= from_recipient;
        let from_general = (wanted - from_recipient).min(self.general);
        self.general -= from_general;
        Draw {
            recipient_pool: from_recipient,
            general_pool: from_general,
        }
    }

    /// Leadership tier: general pool only, no substitution.
    pub fn steering_match(&mut self, amount: Money, donor_matched: Money, recipient_matched: Money) -> Draw {
        let wanted = self.matchable(amount, donor_matched, recipient_matched);
        let from_general = wanted.min(self.general);
        self.general -= from_general;
        Draw {
            recipient_pool: Money::ZERO,
            general_pool: from_general,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timestamp;

    fn m(dollars: i64) -> Money {
        Money::new(dollars, 0)
    }

    fn round(general: i64, recipient: i64, donor: i64, per_recipient: i64, donation: i64) -> MatchingRound {
        MatchingRound::new(
            Timestamp::parse("12/01/2020", "00:00:00").unwrap(),
            Timestamp::parse("12/01/2020", "11:59:59").unwrap(),
        )
        .with_general_pool(m(general))
        .with_recipient_pool(m(recipient))
        .with_max_per_donor(m(donor))
        .with_max_per_recipient(m(per_recipient))
        .with_max_per_donation(m(donation))
    }

    #[test]
    fn test_empty_state_matches_nothing() {
        let mut pools = PoolState::empty();
        assert_eq!(pools.dancer_match(m(30), Money::ZERO, Money::ZERO), Draw::NONE);
        assert_eq!(pools.steering_match(m(30), Money::ZERO, Money::ZERO), Draw::NONE);
    }

    #[test]
    fn test_dancer_match_clamps_to_per_donation() {
        let mut pools = PoolState::from_round(&round(100, 50, 25, 40, 25));
        let draw = pools.dancer_match(m(30), Money::ZERO, Money::ZERO);
        assert_eq!(draw.recipient_pool, m(25));
        assert_eq!(draw.general_pool, Money::ZERO);
        assert_eq!(pools.recipient, m(25));
        assert_eq!(pools.general, m(100));
    }

    #[test]
    fn test_donor_cap_reached_is_zero() {
        let mut pools = PoolState::from_round(&round(100, 50, 25, 40, 25));
        let draw = pools.dancer_match(m(30), m(25), m(25));
        assert_eq!(draw, Draw::NONE);
        assert_eq!(pools.recipient, m(50));
    }

    #[test]
    fn test_recipient_headroom_binds() {
        let pools = PoolState::from_round(&round(100, 50, 100, 40, 100));
        assert_eq!(pools.matchable(m(30), Money::ZERO, m(25)), m(15));
    }

    #[test]
    fn test_donor_headroom_binds() {
        let pools = PoolState::from_round(&round(100, 50, 25, 100, 100));
        assert_eq!(pools.matchable(m(30), m(20), Money::ZERO), m(5));
    }

    #[test]
    fn test_dancer_match_spills_into_general() {
        let mut pools = PoolState::from_round(&round(100, 10, 100, 100, 100));
        let draw = pools.dancer_match(m(30), Money::ZERO, Money::ZERO);
        assert_eq!(draw.recipient_pool, m(10));
        assert_eq!(draw.general_pool, m(20));
        assert_eq!(draw.total(), m(30));
        assert_eq!(pools.recipient, Money::ZERO);
        assert_eq!(pools.general, m(80));
    }

    #[test]
    fn test_dancer_match_best_effort_when_dry() {
        let mut pools = PoolState::from_round(&round(5, 10, 100, 100, 100));
        let draw = pools.dancer_match(m(30), Money::ZERO, Money::ZERO);
        assert_eq!(draw.total(), m(15));
        assert!(pools.is_empty());
    }

    #[test]
    fn test_steering_match_ignores_recipient_pool() {
        let mut pools = PoolState::from_round(&round(10, 50, 100, 100, 100));
        let draw = pools.steering_match(m(30), Money::ZERO, Money::ZERO);
        assert_eq!(draw.recipient_pool, Money::ZERO);
        assert_eq!(draw.general_pool, m(10));
        assert_eq!(pools.recipient, m(50));
        assert_eq!(pools.general, Money::ZERO);
    }

    #[test]
    fn test_carried_over_adds_residual() {
        let pools = PoolState::carried_over(&round(100, 50, 1, 1, 1), m(7), Money::new(0, 50));
        assert_eq!(pools.general, m(107));
        assert_eq!(pools.recipient, Money::new(50, 50));
    }

    #[test]
    fn test_unlimited_caps() {
        let r = MatchingRound::new(
            Timestamp::parse("12/01/2020", "00:00:00").unwrap(),
            Timestamp::parse("12/01/2020", "11:59:59").unwrap(),
        )
        .with_general_pool(m(1000));
        let mut pools = PoolState::from_round(&r);
        let draw = pools.steering_match(m(500), m(400), m(900));
        assert_eq!(draw.general_pool, m(500));
    }
}
