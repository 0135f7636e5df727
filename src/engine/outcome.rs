//! Final tables produced by a finished pass.

use std::collections::BTreeMap;

use crate::engine::UnusedFunds;
use crate::registry::{AlumniDonor, Donor, Recipient};
use crate::stats::{CategoryRow, HourlyRow};
use crate::types::{MatchRecord, Money, RunReceipt};

/// One line of the payout table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub raised: Money,
    pub matched: Money,
    /// Distinct donors per the identity rule
    pub distinct_donors: usize,
}

impl From<&Recipient> for PayoutRow {
    fn from(recipient: &Recipient) -> Self {
        Self {
            id: recipient.info.id.clone(),
            name: recipient.info.name.clone(),
            email: recipient.info.email.clone(),
            raised: recipient.raised,
            matched: recipient.matched,
            distinct_donors: recipient.distinct_donors(),
        }
    }
}

/// Everything a pass produces, ready for report writing.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Recipient id to payout line
    pub payouts: BTreeMap<String, PayoutRow>,
    /// Category name to statistics
    pub categories: BTreeMap<String, CategoryRow>,
    /// Hourly rows in input order
    pub hourly: Vec<HourlyRow>,
    /// Merged donors in first-seen order
    pub donors: Vec<Donor>,
    /// Alumni donors in first-seen order
    pub alumni: Vec<AlumniDonor>,
    /// Residuals of every round, in the order they finished
    pub unused_funds: Vec<UnusedFunds>,
    /// One record per donation
    pub records: Vec<MatchRecord>,
    pub receipt: RunReceipt,
    pub total_raised: Money,
    pub total_matched: Money,
}

impl MatchOutcome {
    /// Total left over across every round
    pub fn total_unused(&self) -> Money {
        self.unused_funds
            .iter()
            .map(|funds| funds.general + funds.recipient)
            .sum()
    }
}
