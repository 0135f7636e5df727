//! File adapters around the engine.
//!
//! - [`donations`]: donation CSV loader
//! - [`policy`]: round-policy text parser and writer
//! - [`report`]: CSV report writers
//!
//! Inputs are loaded completely before the engine runs; reports are only
//! written from a finished [`crate::engine::MatchOutcome`].

pub mod donations;
pub mod policy;
pub mod report;

pub use donations::{load_donations, read_donations};
pub use policy::{load_rounds, parse_rounds, write_rounds};
pub use report::{write_all, write_unused_summary};
