//! Run receipt summarizing one matching pass.
//!
//! The receipt carries a SHA-256 root over the SSZ encoding of every
//! [`MatchRecord`] in input order, so two runs can be compared by root alone.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

use crate::error::MatchError;
use crate::types::MatchRecord;

/// Summary of a completed pass.
///
/// ## Example
///
/// ```
/// use donation_matcher::types::RunReceipt;
///
/// let receipt = RunReceipt::from_records(&[]).unwrap();
/// assert!(receipt.is_empty());
/// assert_eq!(receipt.state_root_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RunReceipt {
    /// Number of donations processed
    pub donations_processed: u64,

    /// Number of donations that received a non-zero match
    pub donations_matched: u64,

    /// Sum of all donation amounts, in cents
    pub total_raised_cents: u64,

    /// Sum of all matched amounts, in cents
    pub total_matched_cents: u64,

    /// SHA-256 root over the SSZ-encoded match records
    pub state_root: [u8; 32],
}

impl RunReceipt {
    /// Build a receipt from the records of a pass.
    pub fn from_records(records: &[MatchRecord]) -> crate::error::Result<Self> {
        let mut hasher = Sha256::new();
        let mut receipt = RunReceipt::default();

        for record in records {
            let bytes = ssz_rs::serialize(record)
                .map_err(|e| MatchError::Encoding(format!("{e:?}")))?;
            hasher.update(&bytes);

            receipt.donations_processed += 1;
            receipt.total_raised_cents += record.amount_cents;
            if record.is_matched() {
                receipt.donations_matched += 1;
                receipt.total_matched_cents += record.recipient_pool_cents + record.general_pool_cents;
            }
        }

        receipt.state_root.copy_from_slice(&hasher.finalize());
        Ok(receipt)
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    pub fn is_empty(&self) -> bool {
        self.donations_processed == 0
    }

    /// Fraction of donations that were matched at all.
    ///
    /// Returns None if nothing was processed.
    pub fn match_rate(&self) -> Option<f64> {
        if self.donations_processed == 0 {
            None
        } else {
            Some(self.donations_matched as f64 / self.donations_processed as f64)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Money, RecipientTier};

    fn records() -> Vec<MatchRecord> {
        vec![
            MatchRecord::new(0, 100, Money::new(30, 0), Money::new(25, 0), Money::ZERO, RecipientTier::Dancer),
            MatchRecord::new(1, 200, Money::new(10, 0), Money::ZERO, Money::ZERO, RecipientTier::Internal),
            MatchRecord::new(2, 300, Money::new(5, 0), Money::ZERO, Money::new(5, 0), RecipientTier::Leadership),
        ]
    }

    #[test]
    fn test_receipt_totals() {
        let receipt = RunReceipt::from_records(&records()).unwrap();
        assert_eq!(receipt.donations_processed, 3);
        assert_eq!(receipt.donations_matched, 2);
        assert_eq!(receipt.total_raised_cents, 4500);
        assert_eq!(receipt.total_matched_cents, 3000);
        assert_eq!(receipt.match_rate(), Some(2.0 / 3.0));
    }

    #[test]
    fn test_receipt_root_determinism() {
        let r1 = RunReceipt::from_records(&records()).unwrap();
        let r2 = RunReceipt::from_records(&records()).unwrap();
        assert_eq!(r1.state_root, r2.state_root);

        let mut changed = records();
        changed[2].general_pool_cents = 499;
        let r3 = RunReceipt::from_records(&changed).unwrap();
        assert_ne!(r1.state_root, r3.state_root);
    }

    #[test]
    fn test_receipt_order_sensitive() {
        let mut reversed = records();
        reversed.reverse();
        let r1 = RunReceipt::from_records(&records()).unwrap();
        let r2 = RunReceipt::from_records(&reversed).unwrap();
        assert_ne!(r1.state_root, r2.state_root);
    }

    #[test]
    fn test_receipt_empty() {
        let receipt = RunReceipt::from_records(&[]).unwrap();
        assert!(receipt.is_empty());
        assert_eq!(receipt.match_rate(), None);
        // SHA-256 of the empty string
        assert_eq!(
            receipt.state_root_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_receipt_ssz_size() {
        let bytes = ssz_rs::serialize(&RunReceipt::default()).expect("Failed to serialize");
        // 8 + 8 + 8 + 8 + 32
        assert_eq!(bytes.len(), 64, "RunReceipt should serialize to 64 bytes");
    }
}
