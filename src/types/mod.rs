//! Core data types for the donation matcher
//!
//! ## Types
//!
//! - [`Money`]: exact dollars + cents amount
//! - [`Timestamp`]: date-time with hour truncation
//! - [`Donation`]: an immutable donation record with its donor/recipient fields
//! - [`RecipientTier`]: which matching tier a recipient role belongs to
//! - [`MatchingRound`]: a time-boxed pool/cap policy
//! - [`MatchRecord`]: the per-donation outcome of a pass
//! - [`RunReceipt`]: pass summary with a deterministic root
//!
//! ## Money Arithmetic
//!
//! Addition, subtraction and comparison never touch floating point. Only
//! averaging (see [`Money::checked_div`]) uses a floating intermediate.

pub mod money;
mod timestamp;
mod donation;
mod round;
mod record;
mod receipt;

pub use money::Money;
pub use timestamp::Timestamp;
pub use donation::{
    Donation, DonorInfo, RecipientInfo, RecipientTier, ROLE_DANCER, ROLE_INTERNAL, ROLE_LEADERSHIP,
};
pub use round::MatchingRound;
pub use record::MatchRecord;
pub use receipt::RunReceipt;
