//! Round schedule: which matching round is active for a given timestamp.
//!
//! ## States
//!
//! ```text
//!            start reached                 end passed, next already started
//!   Gap ─────────────────────> Active ─────────────────────────────> Active (carry-over)
//!    ^                           │
//!    │  end passed, next later    │ end passed, no rounds left
//!    └───────────────────────────┤
//!                                v
//!                            Exhausted
//! ```
//!
//! - Leaving `Active` records the round's two residual balances in the
//!   unused-funds ledger.
//! - `Active -> Active` adds those residuals to the next round's configured
//!   pools. Through a gap nothing is carried.
//! - Transitions repeat until the state is stable for the timestamp, so a
//!   round that no donation fell inside still activates and finishes.

use std::collections::VecDeque;

use tracing::debug;

use crate::engine::PoolState;
use crate::types::{MatchingRound, Money, Timestamp};

/// Residual balances of a finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedFunds {
    /// Start of the round the funds belonged to
    pub round_start: Timestamp,
    /// Leftover general pool
    pub general: Money,
    /// Leftover recipient pool
    pub recipient: Money,
}

/// Where the schedule currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    /// A round is live
    Active(MatchingRound),
    /// Between rounds, or before the first one
    Gap,
    /// No rounds left
    Exhausted,
}

/// Ordered rounds plus the live pool balances.
#[derive(Debug, Clone)]
pub struct RoundSchedule {
    pending: VecDeque<MatchingRound>,
    state: RoundState,
    pools: PoolState,
    unused: Vec<UnusedFunds>,
}

impl RoundSchedule {
    /// Build a schedule from rounds in any order.
    ///
    /// # Example
    ///
    /// ```
    /// use donation_matcher::engine::{RoundSchedule, RoundState};
    /// use donation_matcher::types::{MatchingRound, Money, Timestamp};
    ///
    /// let round = MatchingRound::new(
    ///     Timestamp::parse("12/01/2020", "10:00:00").unwrap(),
    ///     Timestamp::parse("12/01/2020", "11:59:59").unwrap(),
    /// )
    /// .with_general_pool(Money::new(100, 0));
    ///
    /// let mut schedule = RoundSchedule::new(vec![round]);
    /// assert_eq!(*schedule.state(), RoundState::Gap);
    ///
    /// let pools = schedule.advance(Timestamp::parse("12/01/2020", "10:30:00").unwrap());
    /// assert_eq!(pools.general, Money::new(100, 0));
    /// ```
    pub fn new(mut rounds: Vec<MatchingRound>) -> Self {
        rounds.sort_by_key(|round| round.start);
        let state = if rounds.is_empty() {
            RoundState::Exhausted
        } else {
            RoundState::Gap
        };
        Self {
            pending: rounds.into(),
            state,
            pools: PoolState::empty(),
            unused: Vec::new(),
        }
    }

    /// Bring the active round up to date for `ts` and return its pools.
    pub fn advance(&mut self, ts: Timestamp) -> &mut PoolState {
        loop {
            let finished = match &self.state {
                RoundState::Active(round) if ts > round.end => Some(round.start),
                RoundState::Gap => None,
                RoundState::Active(_) | RoundState::Exhausted => break,
            };
            let next_start = self.pending.front().map(|next| next.start);

            match finished {
                Some(round_start) => {
                    let (general, recipient) = (self.pools.general, self.pools.recipient);
                    debug!(%round_start, %general, %recipient, "matching round finished");
                    self.unused.push(UnusedFunds {
                        round_start,
                        general,
                        recipient,
                    });
                    match next_start {
                        Some(start) if ts >= start => self.activate(Some((general, recipient))),
                        Some(_) => self.enter_gap(),
                        None => self.exhaust(),
                    }
                }
                None => match next_start {
                    Some(start) if ts >= start => self.activate(None),
                    Some(_) => break,
                    None => {
                        self.exhaust();
                        break;
                    }
                },
            }
        }
        &mut self.pools
    }

    /// Close the schedule at the end of the pass.
    ///
    /// The active round's residuals and every round that never activated
    /// (with its configured amounts) are appended to the unused-funds
    /// ledger. Calling this twice has no further effect.
    pub fn close(&mut self) -> &[UnusedFunds] {
        if let RoundState::Active(round) = &self.state {
            self.unused.push(UnusedFunds {
                round_start: round.start,
                general: self.pools.general,
                recipient: self.pools.recipient,
            });
        }
        for round in self.pending.drain(..) {
            self.unused.push(UnusedFunds {
                round_start: round.start,
                general: round.general_pool,
                recipient: round.recipient_pool,
            });
        }
        self.state = RoundState::Exhausted;
        self.pools = PoolState::empty();
        &self.unused
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn pools(&self) -> &PoolState {
        &self.pools
    }

    pub fn active_round(&self) -> Option<&MatchingRound> {
        match &self.state {
            RoundState::Active(round) => Some(round),
            _ => None,
        }
    }

    /// Rounds not yet activated, ascending by start
    pub fn pending(&self) -> impl Iterator<Item = &MatchingRound> {
        self.pending.iter()
    }

    pub fn unused_funds(&self) -> &[UnusedFunds] {
        &self.unused
    }

    /// Pop the next round and make it live, optionally carrying residuals.
    fn activate(&mut self, carry: Option<(Money, Money)>) {
        if let Some(round) = self.pending.pop_front() {
            let pools = match carry {
                Some((general, recipient)) => PoolState::carried_over(&round, general, recipient),
                None => PoolState::from_round(&round),
            };
            debug!(
                start = %round.start,
                end = %round.end,
                general = %pools.general,
                recipient = %pools.recipient,
                carried = carry.is_some(),
                "matching round activated"
            );
            self.pools = pools;
            self.state = RoundState::Active(round);
        }
    }

    fn enter_gap(&mut self) {
        debug!("no matching until the next round starts");
        self.pools = PoolState::empty();
        self.state = RoundState::Gap;
    }

    fn exhaust(&mut self) {
        debug!("all matching rounds finished");
        self.pools = PoolState::empty();
        self.state = RoundState::Exhausted;
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
