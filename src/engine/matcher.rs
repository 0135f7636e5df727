//! The forward pass over the donation stream.
//!
//! ## Per-donation Steps
//!
//! 1. Advance the round schedule to the donation's timestamp
//! 2. Look up (or create) the recipient and read the donor's ledger line
//! 3. Draw by tier: internal recipients get nothing, dancers use
//!    [`PoolState::dancer_match`], everyone else [`PoolState::steering_match`]
//! 4. Credit the recipient, the merged donor and, for alumni, the alumni record
//! 5. Emit a [`MatchRecord`]
//!
//! Input must be sorted by timestamp. The engine does not reject unsorted
//! input; it logs a warning the first time time goes backwards.

use tracing::{info, trace, warn};

use crate::engine::{Draw, MatchOutcome, PayoutRow, PoolState, RoundSchedule};
use crate::error::Result;
use crate::registry::{AlumniRegistry, DonorRegistry, RecipientRegistry};
use crate::stats::{CategoryStatistics, HourlyStatistics};
use crate::types::{Donation, MatchRecord, MatchingRound, Money, RecipientTier, RunReceipt, Timestamp};

/// Relation substring that marks a donor as an alumnus
pub const DEFAULT_ALUMNI_MARKER: &str = "alum";

/// Engine tuning and classification knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Expected number of donations, used to pre-size stores
    pub capacity: usize,
    /// Case-insensitive substring of the donor relation field marking an alumnus
    pub alumni_marker: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            alumni_marker: DEFAULT_ALUMNI_MARKER.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_alumni_marker(mut self, marker: impl Into<String>) -> Self {
        self.alumni_marker = marker.into();
        self
    }
}

/// Single-pass donation matching engine.
///
/// ## Example
///
/// ```
/// use donation_matcher::engine::MatchingEngine;
/// use donation_matcher::types::{Donation, DonorInfo, MatchingRound, Money, RecipientInfo, Timestamp};
///
/// let round = MatchingRound::new(
///     Timestamp::parse("12/01/2020", "00:00:00").unwrap(),
///     Timestamp::parse("12/01/2020", "11:59:59").unwrap(),
/// )
/// .with_recipient_pool(Money::new(50, 0))
/// .with_max_per_donation(Money::new(25, 0));
///
/// let donation = Donation::new(
///     Timestamp::parse("12/01/2020", "09:00:00").unwrap(),
///     Money::new(30, 0),
///     DonorInfo { phone: "555-0100".into(), ..DonorInfo::default() },
///     RecipientInfo { id: "dancer1".into(), role: "Dancer".into(), ..RecipientInfo::default() },
/// );
///
/// let mut engine = MatchingEngine::new(vec![round]);
/// let record = engine.process(&donation);
/// assert_eq!(record.matched(), Money::new(25, 0));
///
/// let outcome = engine.finish().unwrap();
/// assert_eq!(outcome.payouts["dancer1"].matched, Money::new(25, 0));
/// ```
#[derive(Debug)]
pub struct MatchingEngine {
    config: EngineConfig,
    schedule: RoundSchedule,
    donors: DonorRegistry,
    alumni: AlumniRegistry,
    recipients: RecipientRegistry,
    hourly: HourlyStatistics,
    records: Vec<MatchRecord>,
    total_raised: Money,
    total_matched: Money,
    last_timestamp: Option<Timestamp>,
    out_of_order: bool,
}

impl MatchingEngine {
    /// Create an engine with the default configuration
    pub fn new(rounds: Vec<MatchingRound>) -> Self {
        Self::with_config(rounds, EngineConfig::default())
    }

    pub fn with_config(rounds: Vec<MatchingRound>, config: EngineConfig) -> Self {
        let capacity = config.capacity;
        Self {
            schedule: RoundSchedule::new(rounds),
            donors: DonorRegistry::with_capacity(capacity),
            alumni: AlumniRegistry::new(),
            recipients: RecipientRegistry::with_capacity(capacity),
            hourly: HourlyStatistics::new(config.alumni_marker.clone()),
            records: Vec::with_capacity(capacity),
            total_raised: Money::ZERO,
            total_matched: Money::ZERO,
            last_timestamp: None,
            out_of_order: false,
            config,
        }
    }

    /// Run a whole pass and finalize it.
    pub fn run<'a, I>(rounds: Vec<MatchingRound>, donations: I, config: EngineConfig) -> Result<MatchOutcome>
    where
        I: IntoIterator<Item = &'a Donation>,
    {
        let mut engine = Self::with_config(rounds, config);
        for donation in donations {
            engine.process(donation);
        }
        engine.finish()
    }

    // ========================================================================
    // Forward pass
    // ========================================================================

    /// Match one donation and fold it into every running total.
    pub fn process(&mut self, donation: &Donation) -> MatchRecord {
        self.check_order(donation.timestamp);

        let index = self.records.len() as u64;
        let tier = donation.tier();
        let amount = donation.amount;

        let pools = self.schedule.advance(donation.timestamp);
        let recipient = self.recipients.entry(&donation.recipient);
        let donor_matched = recipient.donor_matched(&donation.donor);
        let draw = draw(pools, tier, amount, donor_matched, recipient.matched);
        let matched = draw.total();

        recipient.credit(&donation.donor, amount, matched);
        self.donors.record(&donation.donor, amount, matched);
        if donation.donor.is_alumnus(&self.config.alumni_marker) {
            self.alumni
                .record(&donation.donor, amount, matched, &donation.recipient.id, tier);
        }
        self.hourly.push(donation);
        self.total_raised += amount;
        self.total_matched += matched;

        let record = MatchRecord::new(
            index,
            donation.timestamp.unix_seconds(),
            amount,
            draw.recipient_pool,
            draw.general_pool,
            tier,
        );
        trace!(
            index,
            recipient = %donation.recipient.id,
            tier = tier.label(),
            %amount,
            %matched,
            "donation processed"
        );
        self.records.push(record.clone());
        record
    }

    fn check_order(&mut self, ts: Timestamp) {
        if let Some(last) = self.last_timestamp {
            if ts < last && !self.out_of_order {
                warn!(
                    previous = %last,
                    current = %ts,
                    "donations are not sorted by timestamp; results are unreliable"
                );
                self.out_of_order = true;
            }
        }
        self.last_timestamp = Some(ts);
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Close the schedule and build every report table.
    pub fn finish(mut self) -> Result<MatchOutcome> {
        let unused_funds = self.schedule.close().to_vec();

        let mut categories = CategoryStatistics::new();
        for recipient in self.recipients.iter() {
            categories.file(recipient);
        }

        let payouts = self
            .recipients
            .iter()
            .map(|recipient| (recipient.id().to_string(), PayoutRow::from(recipient)))
            .collect();

        let receipt = RunReceipt::from_records(&self.records)?;
        info!(
            donations = receipt.donations_processed,
            matched = receipt.donations_matched,
            total_raised = %self.total_raised,
            total_matched = %self.total_matched,
            root = %receipt.state_root_hex(),
            "matching pass complete"
        );

        Ok(MatchOutcome {
            payouts,
            categories: categories.finalize(self.total_raised),
            hourly: self.hourly.finish(),
            donors: self.donors.iter().cloned().collect(),
            alumni: self.alumni.iter().cloned().collect(),
            unused_funds,
            records: self.records,
            receipt,
            total_raised: self.total_raised,
            total_matched: self.total_matched,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn schedule(&self) -> &RoundSchedule {
        &self.schedule
    }

    pub fn donors(&self) -> &DonorRegistry {
        &self.donors
    }

    pub fn alumni(&self) -> &AlumniRegistry {
        &self.alumni
    }

    pub fn recipients(&self) -> &RecipientRegistry {
        &self.recipients
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn total_raised(&self) -> Money {
        self.total_raised
    }

    pub fn total_matched(&self) -> Money {
        self.total_matched
    }
}

fn draw(pools: &mut PoolState, tier: RecipientTier, amount: Money, donor_matched: Money, recipient_matched: Money) -> Draw {
    match tier {
        RecipientTier::Internal => Draw::NONE,
        RecipientTier::Dancer => pools.dancer_match(amount, donor_matched, recipient_matched),
        RecipientTier::Leadership => pools.steering_match(amount, donor_matched, recipient_matched),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
