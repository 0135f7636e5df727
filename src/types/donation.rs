//! Donation records and the donor/recipient fields they carry.
//!
//! ## Roles
//!
//! A recipient's role string is an open set. Two values are special:
//!
//! - `"DMUM"`: organization-internal, never matched, excluded from category statistics
//! - `"Dancer"`: eligible for the dedicated recipient pool
//!
//! Every other role is treated as leadership and draws only from the general pool.

use crate::types::{Money, Timestamp};

/// Role string of organization-internal recipients
pub const ROLE_INTERNAL: &str = "DMUM";

/// Role string of recipients eligible for the recipient pool
pub const ROLE_DANCER: &str = "Dancer";

/// Category label shared by every non-dancer, non-internal role
pub const ROLE_LEADERSHIP: &str = "Leadership";

// ============================================================================
// RecipientTier enum
// ============================================================================

/// Which draw tier a recipient belongs to.
///
/// Represented as u8 for match-record encoding:
/// - Internal = 0
/// - Dancer = 1
/// - Leadership = 2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RecipientTier {
    /// Organization-internal (`"DMUM"`), never matched
    Internal,
    /// Dancer, recipient pool first then general pool
    Dancer,
    /// Any other role, general pool only
    #[default]
    Leadership,
}

impl RecipientTier {
    /// Classify a role string
    pub fn from_role(role: &str) -> Self {
        match role {
            ROLE_INTERNAL => RecipientTier::Internal,
            ROLE_DANCER => RecipientTier::Dancer,
            _ => RecipientTier::Leadership,
        }
    }

    /// Label used for the alumni breakdown columns
    pub fn label(self) -> &'static str {
        match self {
            RecipientTier::Internal => ROLE_INTERNAL,
            RecipientTier::Dancer => ROLE_DANCER,
            RecipientTier::Leadership => ROLE_LEADERSHIP,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            RecipientTier::Internal => 0,
            RecipientTier::Dancer => 1,
            RecipientTier::Leadership => 2,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(RecipientTier::Internal),
            1 => Some(RecipientTier::Dancer),
            2 => Some(RecipientTier::Leadership),
            _ => None,
        }
    }
}

// ============================================================================
// Donor / recipient fields
// ============================================================================

/// Donor fields as they appear on a donation record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DonorInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Last four digits of the card used
    pub card: String,
    /// Relation to the organization (e.g. "Alumni", "Parent")
    pub relation: String,
}

impl DonorInfo {
    /// Approximate identity rule.
    ///
    /// Two donors are the same if their phones match, OR their emails match,
    /// OR both card-last-4 and last name match. The relation is not
    /// transitive, so merge results depend on insertion order.
    pub fn same_donor(&self, other: &DonorInfo) -> bool {
        self.phone == other.phone
            || self.email == other.email
            || (self.card == other.card && self.last_name == other.last_name)
    }

    /// Whether the relation field marks this donor as an alumnus.
    ///
    /// `marker` is matched case-insensitively as a substring.
    pub fn is_alumnus(&self, marker: &str) -> bool {
        !marker.is_empty()
            && self
                .relation
                .to_lowercase()
                .contains(&marker.to_lowercase())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Recipient fields as they appear on a donation record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipientInfo {
    pub name: String,
    pub email: String,
    /// Unique peer id (exact string match)
    pub id: String,
    pub role: String,
    pub house: String,
    pub team: String,
}

impl RecipientInfo {
    pub fn tier(&self) -> RecipientTier {
        RecipientTier::from_role(&self.role)
    }
}

// ============================================================================
// Donation struct
// ============================================================================

/// An immutable donation record.
///
/// ## Example
///
/// ```
/// use donation_matcher::types::{Donation, DonorInfo, Money, RecipientInfo, RecipientTier, Timestamp};
///
/// let donation = Donation::new(
///     Timestamp::parse("12/01/2020", "09:15:00").unwrap(),
///     Money::new(30, 0),
///     DonorInfo { phone: "555-0100".into(), ..Default::default() },
///     RecipientInfo { id: "dancer1".into(), role: "Dancer".into(), ..Default::default() },
/// );
/// assert_eq!(donation.tier(), RecipientTier::Dancer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    pub timestamp: Timestamp,
    pub amount: Money,
    pub donor: DonorInfo,
    pub recipient: RecipientInfo,
}

impl Donation {
    pub fn new(timestamp: Timestamp, amount: Money, donor: DonorInfo, recipient: RecipientInfo) -> Self {
        Self {
            timestamp,
            amount,
            donor,
            recipient,
        }
    }

    #[inline]
    pub fn tier(&self) -> RecipientTier {
        self.recipient.tier()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn donor(phone: &str, email: &str, card: &str, last: &str) -> DonorInfo {
        DonorInfo {
            first_name: "Pat".into(),
            last_name: last.into(),
            email: email.into(),
            phone: phone.into(),
            card: card.into(),
            relation: String::new(),
        }
    }

    #[test]
    fn test_tier_from_role() {
        assert_eq!(RecipientTier::from_role("DMUM"), RecipientTier::Internal);
        assert_eq!(RecipientTier::from_role("Dancer"), RecipientTier::Dancer);
        assert_eq!(RecipientTier::from_role("Captain"), RecipientTier::Leadership);
        // exact match only
        assert_eq!(RecipientTier::from_role("dancer"), RecipientTier::Leadership);
    }

    #[test]
    fn test_tier_conversion() {
        for tier in [RecipientTier::Internal, RecipientTier::Dancer, RecipientTier::Leadership] {
            assert_eq!(RecipientTier::from_u8(tier.to_u8()), Some(tier));
        }
        assert_eq!(RecipientTier::from_u8(3), None);
    }

    #[test]
    fn test_same_donor_by_phone() {
        let a = donor("555-0100", "a@x.org", "1111", "Smith");
        let b = donor("555-0100", "b@x.org", "2222", "Jones");
        assert!(a.same_donor(&b));
    }

    #[test]
    fn test_same_donor_by_email() {
        let a = donor("555-0100", "a@x.org", "1111", "Smith");
        let b = donor("555-0199", "a@x.org", "2222", "Jones");
        assert!(a.same_donor(&b));
    }

    #[test]
    fn test_same_donor_card_requires_last_name() {
        let a = donor("555-0100", "a@x.org", "1111", "Smith");
        let b = donor("555-0199", "b@x.org", "1111", "Smith");
        let c = donor("555-0199", "b@x.org", "1111", "Jones");
        assert!(a.same_donor(&b));
        assert!(!a.same_donor(&c));
    }

    #[test]
    fn test_same_donor_not_transitive() {
        let a = donor("1", "a@x.org", "1111", "Smith");
        let b = donor("1", "b@x.org", "2222", "Jones");
        let c = donor("2", "b@x.org", "3333", "Brown");
        assert!(a.same_donor(&b));
        assert!(b.same_donor(&c));
        assert!(!a.same_donor(&c));
    }

    #[test]
    fn test_is_alumnus() {
        let mut d = donor("1", "a@x.org", "1111", "Smith");
        d.relation = "DM Alumni".into();
        assert!(d.is_alumnus("alum"));
        d.relation = "Parent".into();
        assert!(!d.is_alumnus("alum"));
        assert!(!d.is_alumnus(""));
    }
}
