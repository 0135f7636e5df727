//! Hourly statistics over the donation stream.
//!
//! Donations are grouped into contiguous runs sharing the same date and
//! hour. With sorted input every hour is exactly one run; unsorted input
//! produces one row per run, so an hour can repeat.

use std::collections::BTreeSet;

use crate::stats::{mean, median};
use crate::types::{Donation, Money, Timestamp};

/// One row of the hourly table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyRow {
    /// Start of the hour
    pub hour: Timestamp,
    pub total: Money,
    pub mean: Money,
    pub median: Money,
    /// Number of donations in the run
    pub donations: usize,
    /// Distinct donor phone numbers
    pub unique_donors: usize,
    /// Donations made by alumni
    pub alumni_donations: usize,
    /// Distinct alumni phone numbers
    pub unique_alumni_donors: usize,
}

#[derive(Debug, Clone)]
struct Bucket {
    hour: Timestamp,
    amounts: Vec<Money>,
    phones: BTreeSet<String>,
    alumni_donations: usize,
    alumni_phones: BTreeSet<String>,
}

impl Bucket {
    fn new(hour: Timestamp) -> Self {
        Self {
            hour,
            amounts: Vec::new(),
            phones: BTreeSet::new(),
            alumni_donations: 0,
            alumni_phones: BTreeSet::new(),
        }
    }

    fn into_row(mut self) -> HourlyRow {
        HourlyRow {
            hour: self.hour,
            total: self.amounts.iter().sum(),
            mean: mean(&self.amounts),
            median: median(&mut self.amounts),
            donations: self.amounts.len(),
            unique_donors: self.phones.len(),
            alumni_donations: self.alumni_donations,
            unique_alumni_donors: self.alumni_phones.len(),
        }
    }
}

/// Streaming builder for the hourly table.
///
/// ## Example
///
/// ```
/// use donation_matcher::stats::HourlyStatistics;
///
/// let stats = HourlyStatistics::new("alum");
/// assert!(stats.finish().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct HourlyStatistics {
    alumni_marker: String,
    current: Option<Bucket>,
    rows: Vec<HourlyRow>,
}

impl HourlyStatistics {
    pub fn new(alumni_marker: impl Into<String>) -> Self {
        Self {
            alumni_marker: alumni_marker.into(),
            current: None,
            rows: Vec::new(),
        }
    }

    /// Add the next donation in input order.
    pub fn push(&mut self, donation: &Donation) {
        let hour = donation.timestamp.truncate_to_hour();
        let bucket = match self.current.take() {
            Some(bucket) if bucket.hour == hour => bucket,
            Some(done) => {
                self.rows.push(done.into_row());
                Bucket::new(hour)
            }
            None => Bucket::new(hour),
        };
        let bucket = self.current.insert(bucket);

        bucket.amounts.push(donation.amount);
        bucket.phones.insert(donation.donor.phone.clone());
        if donation.donor.is_alumnus(&self.alumni_marker) {
            bucket.alumni_donations += 1;
            bucket.alumni_phones.insert(donation.donor.phone.clone());
        }
    }

    /// Close the open run and return all rows in input order.
    pub fn finish(mut self) -> Vec<HourlyRow> {
        if let Some(bucket) = self.current.take() {
            self.rows.push(bucket.into_row());
        }
        self.rows
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
