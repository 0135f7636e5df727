//! Category statistics over final recipient totals.
//!
//! Each non-internal recipient is filed under its role, its house and, for
//! the leadership tier, the synthetic `"Leadership"` category. A category
//! maps recipient id to that recipient's raised total, so filing the same
//! recipient twice overwrites rather than double counts.

use std::collections::{BTreeMap, BTreeSet};

use crate::registry::Recipient;
use crate::stats::{mean, median};
use crate::types::{Money, RecipientTier, ROLE_LEADERSHIP};

/// One row of the category table.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    /// Sum of member recipients' raised totals
    pub total: Money,
    pub mean: Money,
    pub median: Money,
    /// Share of the grand total raised, 0-100
    pub percent_of_total_raised: f64,
    /// Distinct recipients filed under the category
    pub participants: usize,
    /// Share of all non-internal recipients, 0-100
    pub percent_of_participants: f64,
}

/// Accumulates recipient snapshots per category.
#[derive(Debug, Default, Clone)]
pub struct CategoryStatistics {
    categories: BTreeMap<String, BTreeMap<String, Money>>,
    participants: BTreeSet<String>,
}

impl CategoryStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a recipient's current totals. Internal recipients are ignored.
    pub fn file(&mut self, recipient: &Recipient) {
        let tier = recipient.tier();
        if tier == RecipientTier::Internal {
            return;
        }
        let id = recipient.id();
        self.participants.insert(id.to_string());

        self.snapshot(&recipient.info.role, id, recipient.raised);
        self.snapshot(&recipient.info.house, id, recipient.raised);
        if tier == RecipientTier::Leadership {
            self.snapshot(ROLE_LEADERSHIP, id, recipient.raised);
        }
    }

    fn snapshot(&mut self, category: &str, id: &str, raised: Money) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(id.to_string(), raised);
    }

    /// Distinct recipients filed so far
    pub fn participants(&self) -> usize {
        self.participants.len()
    }

    /// Build the table against the grand total raised.
    pub fn finalize(&self, total_raised: Money) -> BTreeMap<String, CategoryRow> {
        let all = self.participants();
        self.categories
            .iter()
            .map(|(name, members)| {
                let mut raised: Vec<Money> = members.values().copied().collect();
                let total: Money = raised.iter().sum();
                let row = CategoryRow {
                    total,
                    mean: mean(&raised),
                    median: median(&mut raised),
                    percent_of_total_raised: total.percent_of(total_raised),
                    participants: members.len(),
                    percent_of_participants: percent(members.len(), all),
                };
                (name.clone(), row)
            })
            .collect()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

// ============================================================================
// Unit Tests
// ============================================================================
