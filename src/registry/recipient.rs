//! Recipients and the per-donor matched ledger.
//!
//! ## Architecture
//!
//! - **Slab**: recipient records, keyed by insertion order
//! - **HashMap**: recipient id to slab key mapping (exact string match)
//!
//! Each recipient keeps a ledger of how much every donor has had matched
//! toward it. The ledger is looked up with the donor identity rule, so two
//! records of the "same" donor share one ledger line.

use std::collections::HashMap;

use slab::Slab;

use crate::types::{DonorInfo, Money, RecipientInfo, RecipientTier};

/// One line of a recipient's donor ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub donor: DonorInfo,
    /// Cumulative amount this donor has had matched toward the recipient
    pub matched: Money,
}

/// A recipient ("dancer") with cumulative totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    /// Fields of the first donation naming this recipient
    pub info: RecipientInfo,
    /// Total raised (full donation amounts)
    pub raised: Money,
    /// Total matched
    pub matched: Money,
    ledger: Vec<LedgerEntry>,
}

impl Recipient {
    pub fn new(info: RecipientInfo) -> Self {
        Self {
            info,
            raised: Money::ZERO,
            matched: Money::ZERO,
            ledger: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.info.id
    }

    #[inline]
    pub fn tier(&self) -> RecipientTier {
        self.info.tier()
    }

    /// Amount `donor` has already had matched toward this recipient
    pub fn donor_matched(&self, donor: &DonorInfo) -> Money {
        self.ledger
            .iter()
            .find(|entry| entry.donor.same_donor(donor))
            .map_or(Money::ZERO, |entry| entry.matched)
    }

    /// Credit a donation and its matched amount.
    pub fn credit(&mut self, donor: &DonorInfo, donated: Money, matched: Money) {
        self.raised += donated;
        self.matched += matched;
        match self.ledger.iter_mut().find(|entry| entry.donor.same_donor(donor)) {
            Some(entry) => entry.matched += matched,
            None => self.ledger.push(LedgerEntry {
                donor: donor.clone(),
                matched,
            }),
        }
    }

    /// Number of distinct donors (per the identity rule)
    pub fn distinct_donors(&self) -> usize {
        self.ledger.len()
    }

    pub fn ledger(&self) -> &[LedgerEntry] {
        &self.ledger
    }
}

/// Recipient store with O(1) lookup by id.
#[derive(Debug, Default)]
pub struct RecipientRegistry {
    recipients: Slab<Recipient>,
    index: HashMap<String, usize>,
}

impl RecipientRegistry {
    pub fn new() -> Self {
        Self {
            recipients: Slab::new(),
            index: HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            recipients: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Slab key for the recipient, inserting it on first sight
    pub fn get_or_insert(&mut self, info: &RecipientInfo) -> usize {
        if let Some(&key) = self.index.get(&info.id) {
            return key;
        }
        let key = self.recipients.insert(Recipient::new(info.clone()));
        self.index.insert(info.id.clone(), key);
        key
    }

    /// Mutable recipient for `info`, inserting it on first sight
    pub fn entry(&mut self, info: &RecipientInfo) -> &mut Recipient {
        let key = self.get_or_insert(info);
        &mut self.recipients[key]
    }

    pub fn get(&self, key: usize) -> Option<&Recipient> {
        self.recipients.get(key)
    }

    pub fn get_mut(&mut self, key: usize) -> Option<&mut Recipient> {
        self.recipients.get_mut(key)
    }

    pub fn by_id(&self, id: &str) -> Option<&Recipient> {
        self.index.get(id).and_then(|&key| self.recipients.get(key))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    /// Recipients in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.iter().map(|(_, recipient)| recipient)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
