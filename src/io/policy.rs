//! Round-policy text format.
//!
//! ## Format
//!
//! ```text
//! BEGIN CRITERION
//! START DATE: 12/01/2020
//! START TIME: 00:00:00
//! END DATE: 12/01/2020
//! END TIME: 13:59:59
//! DANCER MATCHING AMOUNT: 1800.00
//! GENERAL MATCHING AMOUNT: 2700.00
//! MAX PER DONATION: 25.00
//! MAX PER DONOR: 25.00
//! MAX PER DANCER: 50.00
//! END CRITERION
//! ```
//!
//! Keys are case-insensitive. Blank lines and `#` comments are skipped.
//! Omitted pool amounts are zero, omitted caps are [`Money::UNLIMITED`].
//! Any structural or value error aborts the parse with the 1-based line.

use std::fs;
use std::path::Path;

use crate::error::{MatchError, Result};
use crate::types::{MatchingRound, Money, Timestamp};

const BEGIN: &str = "BEGIN CRITERION";
const END: &str = "END CRITERION";

const START_DATE: &str = "START DATE";
const START_TIME: &str = "START TIME";
const END_DATE: &str = "END DATE";
const END_TIME: &str = "END TIME";
const DANCER_AMOUNT: &str = "DANCER MATCHING AMOUNT";
const GENERAL_AMOUNT: &str = "GENERAL MATCHING AMOUNT";
const MAX_PER_DONATION: &str = "MAX PER DONATION";
const MAX_PER_DONOR: &str = "MAX PER DONOR";
const MAX_PER_DANCER: &str = "MAX PER DANCER";

/// Fields collected between BEGIN and END.
#[derive(Debug, Default)]
struct Block {
    start_date: Option<(usize, String)>,
    start_time: Option<(usize, String)>,
    end_date: Option<(usize, String)>,
    end_time: Option<(usize, String)>,
    recipient_pool: Option<Money>,
    general_pool: Option<Money>,
    max_per_donation: Option<Money>,
    max_per_donor: Option<Money>,
    max_per_recipient: Option<Money>,
}

impl Block {
    fn set(&mut self, line: usize, key: &str, value: &str) -> Result<()> {
        let money = || {
            value
                .parse::<Money>()
                .map_err(|e| MatchError::policy(line, format!("{key}: {e}")))
        };
        match key {
            START_DATE => self.start_date = Some((line, value.to_string())),
            START_TIME => self.start_time = Some((line, value.to_string())),
            END_DATE => self.end_date = Some((line, value.to_string())),
            END_TIME => self.end_time = Some((line, value.to_string())),
            DANCER_AMOUNT => self.recipient_pool = Some(money()?),
            GENERAL_AMOUNT => self.general_pool = Some(money()?),
            MAX_PER_DONATION => self.max_per_donation = Some(money()?),
            MAX_PER_DONOR => self.max_per_donor = Some(money()?),
            MAX_PER_DANCER => self.max_per_recipient = Some(money()?),
            _ => return Err(MatchError::policy(line, format!("unknown field '{key}'"))),
        }
        Ok(())
    }

    fn finish(self, end_line: usize) -> Result<MatchingRound> {
        let start = timestamp(end_line, "start", self.start_date, self.start_time)?;
        let end = timestamp(end_line, "end", self.end_date, self.end_time)?;
        if end < start {
            return Err(MatchError::policy(end_line, format!("round ends ({end}) before it starts ({start})")));
        }
        Ok(MatchingRound::new(start, end)
            .with_recipient_pool(self.recipient_pool.unwrap_or(Money::ZERO))
            .with_general_pool(self.general_pool.unwrap_or(Money::ZERO))
            .with_max_per_donation(self.max_per_donation.unwrap_or(Money::UNLIMITED))
            .with_max_per_donor(self.max_per_donor.unwrap_or(Money::UNLIMITED))
            .with_max_per_recipient(self.max_per_recipient.unwrap_or(Money::UNLIMITED)))
    }
}

fn timestamp(
    end_line: usize,
    which: &str,
    date: Option<(usize, String)>,
    time: Option<(usize, String)>,
) -> Result<Timestamp> {
    match (date, time) {
        (Some((line, date)), Some((_, time))) => {
            Timestamp::parse(&date, &time).map_err(|e| MatchError::policy(line, e.to_string()))
        }
        (None, _) => Err(MatchError::policy(end_line, format!("missing {which} date"))),
        (_, None) => Err(MatchError::policy(end_line, format!("missing {which} time"))),
    }
}

/// Parse every round in `text`.
///
/// # Example
///
/// ```
/// use donation_matcher::io::parse_rounds;
/// use donation_matcher::types::Money;
///
/// let rounds = parse_rounds(
///     "BEGIN CRITERION\n\
///      START DATE: 12/01/2020\nSTART TIME: 00:00:00\n\
///      END DATE: 12/01/2020\nEND TIME: 11:59:59\n\
///      GENERAL MATCHING AMOUNT: 100.00\n\
///      END CRITERION\n",
/// )
/// .unwrap();
/// assert_eq!(rounds[0].general_pool, Money::new(100, 0));
/// assert_eq!(rounds[0].max_per_donor, Money::UNLIMITED);
/// ```
pub fn parse_rounds(text: &str) -> Result<Vec<MatchingRound>> {
    let mut rounds = Vec::new();
    let mut open: Option<(usize, Block)> = None;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let upper = trimmed.to_ascii_uppercase();
        if upper == BEGIN {
            if let Some((begun, _)) = open {
                return Err(MatchError::policy(
                    line,
                    format!("{BEGIN} while the block from line {begun} is still open"),
                ));
            }
            open = Some((line, Block::default()));
        } else if upper == END {
            let (_, block) = open
                .take()
                .ok_or_else(|| MatchError::policy(line, format!("{END} without {BEGIN}")))?;
            rounds.push(block.finish(line)?);
        } else {
            let (key, value) = trimmed
                .split_once(':')
                .ok_or_else(|| MatchError::policy(line, format!("expected 'KEY: value', got '{trimmed}'")))?;
            let key = key.trim().to_ascii_uppercase();
            let (_, block) = open
                .as_mut()
                .ok_or_else(|| MatchError::policy(line, format!("'{key}' outside a criterion block")))?;
            block.set(line, &key, value.trim())?;
        }
    }

    if let Some((begun, _)) = open {
        return Err(MatchError::policy(begun, format!("{BEGIN} is never closed")));
    }
    Ok(rounds)
}

/// Read and parse a round-policy file.
pub fn load_rounds(path: impl AsRef<Path>) -> Result<Vec<MatchingRound>> {
    parse_rounds(&fs::read_to_string(path)?)
}

/// Render rounds in the policy format.
///
/// Unlimited caps are left out, so parsing the output gives back the same
/// rounds.
pub fn write_rounds(rounds: &[MatchingRound]) -> String {
    rounds.iter().map(write_round).collect::<Vec<_>>().join("\n")
}

fn write_round(round: &MatchingRound) -> String {
    let mut lines = vec![
        BEGIN.to_string(),
        format!("{START_DATE}: {}", round.start.date_string()),
        format!("{START_TIME}: {}", round.start.time_string()),
        format!("{END_DATE}: {}", round.end.date_string()),
        format!("{END_TIME}: {}", round.end.time_string()),
        format!("{DANCER_AMOUNT}: {}", round.recipient_pool),
        format!("{GENERAL_AMOUNT}: {}", round.general_pool),
    ];
    for (key, cap) in [
        (MAX_PER_DONATION, round.max_per_donation),
        (MAX_PER_DONOR, round.max_per_donor),
        (MAX_PER_DANCER, round.max_per_recipient),
    ] {
        if cap != Money::UNLIMITED {
            lines.push(format!("{key}: {cap}"));
        }
    }
    lines.push(END.to_string());
    lines.join("\n") + "\n"
}

// ============================================================================
// Unit Tests
// ============================================================================
