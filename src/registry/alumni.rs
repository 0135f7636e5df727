//! Alumni donors: donor totals plus the distinct recipients they gave to.
//!
//! The breakdown partitions recipient ids into three non-overlapping
//! categories by the recipient's tier (internal, dancer, leadership).

use std::collections::{BTreeMap, BTreeSet};

use slab::Slab;

use crate::registry::Donor;
use crate::types::{DonorInfo, Money, RecipientTier};

/// An alumnus donor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlumniDonor {
    pub donor: Donor,
    breakdown: BTreeMap<RecipientTier, BTreeSet<String>>,
}

impl AlumniDonor {
    pub fn new(info: DonorInfo) -> Self {
        Self {
            donor: Donor::new(info),
            breakdown: BTreeMap::new(),
        }
    }

    /// Number of distinct recipients of the given tier donated to
    pub fn donated_to(&self, tier: RecipientTier) -> usize {
        self.breakdown.get(&tier).map_or(0, BTreeSet::len)
    }

    /// Distinct recipients donated to, summed over the three categories
    pub fn recipients_donated_to(&self) -> usize {
        self.breakdown.values().map(BTreeSet::len).sum()
    }

    fn credit(&mut self, donated: Money, matched: Money, recipient_id: &str, tier: RecipientTier) {
        self.donor.credit(donated, matched);
        self.breakdown
            .entry(tier)
            .or_default()
            .insert(recipient_id.to_string());
    }
}

/// Insertion-ordered store of alumni donors.
///
/// Uses the same first-match merge rule as [`crate::registry::DonorRegistry`].
#[derive(Debug, Default)]
pub struct AlumniRegistry {
    alumni: Slab<AlumniDonor>,
}

impl AlumniRegistry {
    pub fn new() -> Self {
        Self { alumni: Slab::new() }
    }

    pub fn find(&self, info: &DonorInfo) -> Option<usize> {
        self.alumni
            .iter()
            .find(|(_, alumnus)| alumnus.donor.info.same_donor(info))
            .map(|(key, _)| key)
    }

    /// Merge an alumnus donation, creating the record if needed.
    pub fn record(
        &mut self,
        info: &DonorInfo,
        donated: Money,
        matched: Money,
        recipient_id: &str,
        tier: RecipientTier,
    ) -> usize {
        let key = match self.find(info) {
            Some(key) => key,
            None => self.alumni.insert(AlumniDonor::new(info.clone())),
        };
        self.alumni[key].credit(donated, matched, recipient_id, tier);
        key
    }

    pub fn get(&self, key: usize) -> Option<&AlumniDonor> {
        self.alumni.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alumni.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alumni.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlumniDonor> {
        self.alumni.iter().map(|(_, alumnus)| alumnus)
    }
}
