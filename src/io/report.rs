//! CSV report writers.
//!
//! Every table is written with its header row even when it has no rows.
//! Money cells use the `$D.CC` display form; percentages have two decimals.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::engine::{MatchOutcome, UnusedFunds};
use crate::error::Result;
use crate::types::RecipientTier;

pub const MATCHING_FILE: &str = "matching.csv";
pub const CATEGORY_FILE: &str = "dancer_statistics.csv";
pub const DONORS_FILE: &str = "donors.csv";
pub const ALUMNI_FILE: &str = "alumni_donors.csv";
pub const ALUMNI_STATISTICS_FILE: &str = "alumni_statistics.csv";
pub const HOURLY_FILE: &str = "hourly_statistics.csv";
pub const UNUSED_FILE: &str = "unused_funds.csv";

const MATCHING_HEADER: [&str; 6] = [
    "Dancer Peer ID",
    "Dancer Name",
    "Dancer Email",
    "Dancer Amount Raised",
    "Dancer Amount Matched",
    "Num Unique Donations",
];
const CATEGORY_HEADER: [&str; 7] = [
    "Type",
    "Total Fundraised",
    "Mean Fundraising",
    "Median Fundraising",
    "% of Total Fundraising",
    "Number of Participants",
    "% of Total Participants",
];
const DONORS_HEADER: [&str; 5] = ["Donor Name", "Donor Phone", "Donor Email", "Amount Donated", "Amount Matched"];
const ALUMNI_HEADER: [&str; 6] = [
    "Donor Name",
    "Donor Phone",
    "Donor Email",
    "Amount Donated",
    "Amount Matched",
    "Num Donated To",
];
const ALUMNI_STATISTICS_HEADER: [&str; 3] = ["DMUM", "Dancer", "Leadership"];
const HOURLY_HEADER: [&str; 8] = [
    "Hour",
    "Hourly fundraising",
    "mean donation size",
    "median donation size",
    "num donors",
    "num unique donors",
    "number of alumni donors",
    "number of unique alumni donors",
];
const UNUSED_HEADER: [&str; 3] = ["Round Start", "Unused General", "Unused Dancer"];

fn percent(value: f64) -> String {
    format!("{value:.2}")
}

fn write_table<W, T, I>(out: W, header: &[&str], rows: I) -> Result<()>
where
    W: Write,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(out);
    writer.write_record(header)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Payout table, one line per recipient ordered by id.
pub fn write_matching<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome.payouts.values().map(|row| {
        (&row.id, &row.name, &row.email, row.raised, row.matched, row.distinct_donors)
    });
    write_table(out, &MATCHING_HEADER, rows)
}

pub fn write_categories<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome.categories.iter().map(|(name, row)| {
        (
            name,
            row.total,
            row.mean,
            row.median,
            percent(row.percent_of_total_raised),
            row.participants,
            percent(row.percent_of_participants),
        )
    });
    write_table(out, &CATEGORY_HEADER, rows)
}

pub fn write_donors<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome.donors.iter().map(|donor| {
        (
            donor.info.full_name(),
            &donor.info.phone,
            &donor.info.email,
            donor.donated,
            donor.matched,
        )
    });
    write_table(out, &DONORS_HEADER, rows)
}

pub fn write_alumni<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome.alumni.iter().map(|alumnus| {
        let donor = &alumnus.donor;
        (
            donor.info.full_name(),
            &donor.info.phone,
            &donor.info.email,
            donor.donated,
            donor.matched,
            alumnus.recipients_donated_to(),
        )
    });
    write_table(out, &ALUMNI_HEADER, rows)
}

/// Per-alumnus counts of distinct recipients in each tier.
pub fn write_alumni_statistics<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome.alumni.iter().map(|alumnus| {
        (
            alumnus.donated_to(RecipientTier::Internal),
            alumnus.donated_to(RecipientTier::Dancer),
            alumnus.donated_to(RecipientTier::Leadership),
        )
    });
    write_table(out, &ALUMNI_STATISTICS_HEADER, rows)
}

pub fn write_hourly<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome.hourly.iter().map(|row| {
        (
            row.hour,
            row.total,
            row.mean,
            row.median,
            row.donations,
            row.unique_donors,
            row.alumni_donations,
            row.unique_alumni_donors,
        )
    });
    write_table(out, &HOURLY_HEADER, rows)
}

pub fn write_unused<W: Write>(out: W, outcome: &MatchOutcome) -> Result<()> {
    let rows = outcome
        .unused_funds
        .iter()
        .map(|funds| (funds.round_start, funds.general, funds.recipient));
    write_table(out, &UNUSED_HEADER, rows)
}

/// Human-readable unused-funds ledger, two lines per round.
pub fn write_unused_summary<W: Write>(mut out: W, funds: &[UnusedFunds]) -> Result<()> {
    for entry in funds {
        writeln!(
            out,
            "Dancer matching money unused during round beginning at {}: {}",
            entry.round_start, entry.recipient
        )?;
        writeln!(
            out,
            "General matching money unused during round beginning at {}: {}",
            entry.round_start, entry.general
        )?;
    }
    Ok(())
}

/// Write every report into `dir`, creating it if needed.
pub fn write_all(dir: impl AsRef<Path>, outcome: &MatchOutcome) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    type Writer = fn(File, &MatchOutcome) -> Result<()>;
    let tables: [(&str, Writer); 7] = [
        (MATCHING_FILE, write_matching),
        (CATEGORY_FILE, write_categories),
        (DONORS_FILE, write_donors),
        (ALUMNI_FILE, write_alumni),
        (ALUMNI_STATISTICS_FILE, write_alumni_statistics),
        (HOURLY_FILE, write_hourly),
        (UNUSED_FILE, write_unused),
    ];
    for (name, write) in tables {
        let path = dir.join(name);
        write(File::create(&path)?, outcome)?;
        debug!(path = %path.display(), "report written");
    }
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, MatchingEngine};
    use crate::types::{Donation, DonorInfo, MatchingRound, Money, RecipientInfo, Timestamp};

    fn ts(time: &str) -> Timestamp {
        Timestamp::parse("12/01/2020", time).unwrap()
    }

    fn outcome() -> MatchOutcome {
        let round = MatchingRound::new(ts("00:00:00"), ts("11:59:59"))
            .with_general_pool(Money::new(100, 0))
            .with_recipient_pool(Money::new(50, 0))
            .with_max_per_donation(Money::new(25, 0));
        let donor = DonorInfo {
            first_name: "Alex".into(),
            last_name: "Doe".into(),
            email: "alex@x.org".into(),
            phone: "555-0100".into(),
            card: "1234".into(),
            relation: "Alumni".into(),
        };
        let recipient = RecipientInfo {
            name: "Sam Lee".into(),
            email: "sam@x.org".into(),
            id: "d1".into(),
            role: "Dancer".into(),
            house: "Blue".into(),
            team: "Morale".into(),
        };
        let donations = vec![Donation::new(ts("10:15:00"), Money::new(30, 0), donor, recipient)];
        MatchingEngine::run(vec![round], &donations, EngineConfig::default()).unwrap()
    }

    fn render(write: fn(&mut Vec<u8>, &MatchOutcome) -> Result<()>, outcome: &MatchOutcome) -> String {
        let mut buf = Vec::new();
        write(&mut buf, outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_matching_table() {
        let text = render(|w, o| write_matching(w, o), &outcome());
        assert_eq!(
            text,
            "Dancer Peer ID,Dancer Name,Dancer Email,Dancer Amount Raised,Dancer Amount Matched,Num Unique Donations\n\
             d1,Sam Lee,sam@x.org,$30.00,$25.00,1\n"
        );
    }

    #[test]
    fn test_category_table() {
        let text = render(|w, o| write_categories(w, o), &outcome());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Blue,$30.00,$30.00,$30.00,100.00,1,100.00");
        assert_eq!(lines[2], "Dancer,$30.00,$30.00,$30.00,100.00,1,100.00");
    }

    #[test]
    fn test_alumni_tables() {
        let outcome = outcome();
        let alumni = render(|w, o| write_alumni(w, o), &outcome);
        assert!(alumni.ends_with("Alex Doe,555-0100,alex@x.org,$30.00,$25.00,1\n"));

        let stats = render(|w, o| write_alumni_statistics(w, o), &outcome);
        assert_eq!(stats, "DMUM,Dancer,Leadership\n0,1,0\n");
    }

    #[test]
    fn test_hourly_and_unused_tables() {
        let outcome = outcome();
        let hourly = render(|w, o| write_hourly(w, o), &outcome);
        assert!(hourly.ends_with("2020/12/01 10:00:00,$30.00,$30.00,$30.00,1,1,1,1\n"));

        let unused = render(|w, o| write_unused(w, o), &outcome);
        assert_eq!(
            unused,
            "Round Start,Unused General,Unused Dancer\n2020/12/01 00:00:00,$100.00,$25.00\n"
        );
    }

    #[test]
    fn test_empty_table_keeps_header() {
        let empty = MatchingEngine::run(Vec::new(), &Vec::<Donation>::new(), EngineConfig::default()).unwrap();
        let text = render(|w, o| write_donors(w, o), &empty);
        assert_eq!(text, "Donor Name,Donor Phone,Donor Email,Amount Donated,Amount Matched\n");
    }

    #[test]
    fn test_unused_summary() {
        let mut buf = Vec::new();
        write_unused_summary(&mut buf, &outcome().unused_funds).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("Dancer matching money unused during round beginning at 2020/12/01 00:00:00: $25.00"));
    }
}
