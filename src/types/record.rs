//! Per-donation match outcome.
//!
//! ## SSZ Serialization
//!
//! Records are serialized using SSZ for deterministic encoding, so the run
//! receipt root is identical for identical input.

use ssz_rs::prelude::*;

use crate::types::{Money, RecipientTier};

/// The outcome of pushing one donation through the engine.
///
/// Amounts are stored as whole cents.
///
/// ## Example
///
/// ```
/// use donation_matcher::types::{MatchRecord, Money, RecipientTier};
///
/// let record = MatchRecord::new(
///     0,                      // donation index
///     1606780800,             // unix seconds
///     Money::new(30, 0),      // donated
///     Money::new(25, 0),      // drawn from the recipient pool
///     Money::ZERO,            // drawn from the general pool
///     RecipientTier::Dancer,
/// );
/// assert_eq!(record.matched(), Money::new(25, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct MatchRecord {
    /// Position of the donation in the input sequence
    pub index: u64,

    /// Donation time in unix seconds
    pub timestamp: u64,

    /// Donated amount in cents (never clamped)
    pub amount_cents: u64,

    /// Cents drawn from the recipient-dedicated pool
    pub recipient_pool_cents: u64,

    /// Cents drawn from the general pool
    pub general_pool_cents: u64,

    /// Recipient tier as u8 (0=Internal, 1=Dancer, 2=Leadership)
    pub tier_raw: u8,
}

impl MatchRecord {
    pub fn new(
        index: u64,
        timestamp: i64,
        amount: Money,
        from_recipient_pool: Money,
        from_general_pool: Money,
        tier: RecipientTier,
    ) -> Self {
        Self {
            index,
            timestamp: timestamp.max(0) as u64,
            amount_cents: to_cents(amount),
            recipient_pool_cents: to_cents(from_recipient_pool),
            general_pool_cents: to_cents(from_general_pool),
            tier_raw: tier.to_u8(),
        }
    }

    /// Total matched amount (both pools)
    pub fn matched(&self) -> Money {
        Money::from_cents((self.recipient_pool_cents + self.general_pool_cents) as i64)
    }

    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents as i64)
    }

    pub fn tier(&self) -> RecipientTier {
        RecipientTier::from_u8(self.tier_raw).unwrap_or_default()
    }

    pub fn is_matched(&self) -> bool {
        self.recipient_pool_cents + self.general_pool_cents > 0
    }
}

fn to_cents(amount: Money) -> u64 {
    amount.as_cents().max(0) as u64
}

// ============================================================================
// Unit Tests
// ============================================================================
