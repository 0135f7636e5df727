//! Identity stores for donors, alumni and recipients.
//!
//! ## Components
//!
//! - [`DonorRegistry`]: deduplicated donors with donated/matched totals
//! - [`AlumniRegistry`]: alumni donors with a per-category recipient breakdown
//! - [`RecipientRegistry`]: recipients by id, each with a per-donor matched ledger
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Recipient lookup by id | O(1) |
//! | Donor merge | O(n) linear scan |
//! | Ledger lookup | O(k) donors of that recipient |
//!
//! The donor identity rule is a disjunction over three keys and is not
//! transitive, so donors have no single hash key.

pub mod donor;
pub mod alumni;
pub mod recipient;

pub use donor::{Donor, DonorRegistry};
pub use alumni::{AlumniDonor, AlumniRegistry};
pub use recipient::{LedgerEntry, Recipient, RecipientRegistry};
