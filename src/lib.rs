//! # Donation Matcher
//!
//! Donation-matching payouts and fundraising statistics for a timed
//! charity event.
//!
//! ## Architecture
//!
//! The crate consists of:
//! - **Types**: Core values (Money, Timestamp, Donation, MatchingRound, MatchRecord)
//! - **Registry**: Donor, alumni and recipient identity stores
//! - **Engine**: Round schedule, pool draws and the single forward pass
//! - **Stats**: Category and hourly statistics
//! - **IO**: CSV/policy loaders and report writers
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical input produces identical records and receipt root
//! 2. **Exact Money**: Dollars and cents as integers; only averages use a float intermediate
//! 3. **Sorted Input**: Donations are processed strictly in timestamp order
//! 4. **Fail Fast**: Malformed input aborts the run before any report is written
//!
//! ## Example
//!
//! ```
//! use donation_matcher::engine::{EngineConfig, MatchingEngine};
//! use donation_matcher::io::parse_rounds;
//! use donation_matcher::types::Donation;
//!
//! let rounds = parse_rounds(
//!     "BEGIN CRITERION\n\
//!      START DATE: 12/01/2020\nSTART TIME: 00:00:00\n\
//!      END DATE: 12/01/2020\nEND TIME: 23:59:59\n\
//!      GENERAL MATCHING AMOUNT: 500.00\n\
//!      END CRITERION\n",
//! )
//! .unwrap();
//!
//! let donations: Vec<Donation> = Vec::new();
//! let outcome = MatchingEngine::run(rounds, &donations, EngineConfig::default()).unwrap();
//! assert_eq!(outcome.unused_funds.len(), 1);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error taxonomy and result alias
pub mod error;

/// Core data types: Money, Timestamp, Donation, MatchingRound, MatchRecord
pub mod types;

/// Identity stores: donors, alumni, recipients
pub mod registry;

/// Matching engine: round schedule, pool draws, forward pass
pub mod engine;

/// Post-pass statistics
pub mod stats;

/// Loaders and report writers
pub mod io;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{MatchError, Result};
pub use types::{Donation, MatchRecord, MatchingRound, Money, RunReceipt, Timestamp};
pub use engine::{EngineConfig, MatchOutcome, MatchingEngine};
