//! Donor identities and their running totals.
//!
//! ## Identity Merge
//!
//! Donors are deduplicated by an explicit linear scan in insertion order
//! using [`DonorInfo::same_donor`]. The first stored donor that matches wins.
//! Because the rule is not transitive, the grouping depends on the order in
//! which donors are first seen; it is kept as-is rather than closed under
//! transitivity.
//!
//! ## Slab Integration
//!
//! Records live in a `Slab` and are never removed, so keys are handed out
//! sequentially and slab iteration order equals insertion order.

use slab::Slab;

use crate::types::{DonorInfo, Money};

/// A deduplicated donor with cumulative totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donor {
    /// Fields of the first donation that created this record
    pub info: DonorInfo,
    /// Total donated across all recipients
    pub donated: Money,
    /// Total matched across all recipients
    pub matched: Money,
}

impl Donor {
    pub fn new(info: DonorInfo) -> Self {
        Self {
            info,
            donated: Money::ZERO,
            matched: Money::ZERO,
        }
    }

    #[inline]
    pub fn credit(&mut self, donated: Money, matched: Money) {
        self.donated += donated;
        self.matched += matched;
    }
}

/// Insertion-ordered store of deduplicated donors.
#[derive(Debug, Default)]
pub struct DonorRegistry {
    donors: Slab<Donor>,
}

impl DonorRegistry {
    pub fn new() -> Self {
        Self { donors: Slab::new() }
    }

    /// Create a registry with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            donors: Slab::with_capacity(capacity),
        }
    }

    /// Key of the first stored donor considered the same as `info`
    pub fn find(&self, info: &DonorInfo) -> Option<usize> {
        self.donors
            .iter()
            .find(|(_, donor)| donor.info.same_donor(info))
            .map(|(key, _)| key)
    }

    /// Merge a donation into the matching donor, creating one if needed.
    ///
    /// # Returns
    ///
    /// The slab key of the donor that was credited
    pub fn record(&mut self, info: &DonorInfo, donated: Money, matched: Money) -> usize {
        let key = match self.find(info) {
            Some(key) => key,
            None => self.donors.insert(Donor::new(info.clone())),
        };
        self.donors[key].credit(donated, matched);
        key
    }

    pub fn get(&self, key: usize) -> Option<&Donor> {
        self.donors.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.donors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }

    /// Donors in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &Donor> {
        self.donors.iter().map(|(_, donor)| donor)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
