//! Matching engine module.
//!
//! ## Design Principles
//!
//! The engine is designed for:
//!
//! 1. **Determinism**: Same input always produces the same records and root
//! 2. **Exact Money**: Pool and cap arithmetic never touches floating point
//! 3. **Single Pass**: Donations are consumed once, strictly in input order
//!
//! ## Components
//!
//! - [`RoundSchedule`]: the {Active, Gap, Exhausted} round state machine
//! - [`PoolState`]: balances, caps and the two draw tiers
//! - [`MatchingEngine`]: the forward pass and finalization
//!
//! ## Example
//!
//! ```
//! use donation_matcher::engine::{EngineConfig, MatchingEngine};
//! use donation_matcher::types::Donation;
//!
//! let donations: Vec<Donation> = Vec::new();
//! let outcome = MatchingEngine::run(Vec::new(), &donations, EngineConfig::default()).unwrap();
//! assert!(outcome.receipt.is_empty());
//! assert!(outcome.unused_funds.is_empty());
//! ```

pub mod pools;
pub mod schedule;
pub mod matcher;
pub mod outcome;

pub use pools::{Caps, Draw, PoolState};
pub use schedule::{RoundSchedule, RoundState, UnusedFunds};
pub use matcher::{EngineConfig, MatchingEngine, DEFAULT_ALUMNI_MARKER};
pub use outcome::{MatchOutcome, PayoutRow};
