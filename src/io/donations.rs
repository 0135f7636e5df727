//! Donation CSV loader.
//!
//! Columns are addressed by header. The date and time columns are the first
//! headers containing `Date` and `Time`; every other column has an exact
//! header. `Donor Card` is optional.
//!
//! Rows are numbered from 1, header excluded. The loaded donations are
//! stable-sorted by timestamp before they are returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{MatchError, Result};
use crate::types::{Donation, DonorInfo, Money, RecipientInfo, Timestamp};

pub const DONOR_FIRST_NAME: &str = "Donor First Name";
pub const DONOR_LAST_NAME: &str = "Donor Last Name";
pub const DONOR_EMAIL: &str = "Donor Email";
pub const DONOR_PHONE: &str = "Donor Phone";
pub const DONOR_CARD: &str = "Donor Card";
pub const DONOR_RELATION: &str = "Donor Relation";
pub const DONATION_AMOUNT: &str = "Donation Amount";
pub const DANCER_NAME: &str = "Dancer Name";
pub const DANCER_EMAIL: &str = "Dancer Email";
pub const DANCER_ID: &str = "Dancer Peer ID";
pub const DANCER_ROLE: &str = "Dancer Role";
pub const DANCER_HOUSE: &str = "Dancer House";
pub const DANCER_TEAM: &str = "Dancer Team";

/// Column indices resolved from the header row.
#[derive(Debug, Clone)]
struct Columns {
    date: usize,
    time: usize,
    first_name: usize,
    last_name: usize,
    email: usize,
    phone: usize,
    card: Option<usize>,
    relation: usize,
    amount: usize,
    dancer_name: usize,
    dancer_email: usize,
    dancer_id: usize,
    role: usize,
    house: usize,
    team: usize,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let exact = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| exact(name).ok_or_else(|| MatchError::donation(0, format!("missing column '{name}'")));
        let containing = |part: &str| {
            headers
                .iter()
                .position(|h| h.contains(part))
                .ok_or_else(|| MatchError::donation(0, format!("no column header contains '{part}'")))
        };

        Ok(Self {
            date: containing("Date")?,
            time: containing("Time")?,
            first_name: required(DONOR_FIRST_NAME)?,
            last_name: required(DONOR_LAST_NAME)?,
            email: required(DONOR_EMAIL)?,
            phone: required(DONOR_PHONE)?,
            card: exact(DONOR_CARD),
            relation: required(DONOR_RELATION)?,
            amount: required(DONATION_AMOUNT)?,
            dancer_name: required(DANCER_NAME)?,
            dancer_email: required(DANCER_EMAIL)?,
            dancer_id: required(DANCER_ID)?,
            role: required(DANCER_ROLE)?,
            house: required(DANCER_HOUSE)?,
            team: required(DANCER_TEAM)?,
        })
    }

    fn donation(&self, row: usize, record: &StringRecord) -> Result<Donation> {
        let cell = |index: usize| {
            record
                .get(index)
                .ok_or_else(|| MatchError::donation(row, format!("missing field {}", index + 1)))
        };
        let text = |index: usize| cell(index).map(str::to_string);

        let (date, time) = if self.date == self.time {
            // one combined column: "<date> <time>"
            let combined = cell(self.date)?;
            combined
                .split_once(char::is_whitespace)
                .ok_or_else(|| MatchError::donation(row, format!("expected date and time in '{combined}'")))?
        } else {
            (cell(self.date)?, cell(self.time)?)
        };
        let timestamp = Timestamp::parse(date, time).map_err(|e| MatchError::donation(row, e.to_string()))?;

        let amount = cell(self.amount)?
            .parse::<Money>()
            .map_err(|e| MatchError::donation(row, e.to_string()))?;

        let donor = DonorInfo {
            first_name: text(self.first_name)?,
            last_name: text(self.last_name)?,
            email: text(self.email)?,
            phone: text(self.phone)?,
            card: match self.card {
                Some(index) => text(index)?,
                None => String::new(),
            },
            relation: text(self.relation)?,
        };
        let recipient = RecipientInfo {
            name: text(self.dancer_name)?,
            email: text(self.dancer_email)?,
            id: text(self.dancer_id)?,
            role: text(self.role)?,
            house: text(self.house)?,
            team: text(self.team)?,
        };
        Ok(Donation::new(timestamp, amount, donor, recipient))
    }
}

/// Read donations from any CSV source with a header row.
pub fn read_donations<R: Read>(source: R) -> Result<Vec<Donation>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let columns = Columns::resolve(reader.headers()?)?;
    let mut donations = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        donations.push(columns.donation(i + 1, &record)?);
    }

    donations.sort_by_key(|donation| donation.timestamp);
    Ok(donations)
}

/// Open and read a donation CSV file.
pub fn load_donations(path: impl AsRef<Path>) -> Result<Vec<Donation>> {
    read_donations(File::open(path)?)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Donation Date,Donation Time,Donor First Name,Donor Last Name,Donor Email,Donor Phone,\
Donor Card,Donor Relation,Donation Amount,Dancer Name,Dancer Email,Dancer Peer ID,Dancer Role,Dancer House,Dancer Team";

    fn csv(rows: &[&str]) -> String {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_reads_all_fields() {
        let text = csv(&["12/01/2020,10:15:00,Alex,Doe,alex@x.org,555-0100,1234,Alumni,\"$1,030.50\",Sam Lee,sam@x.org,d1,Dancer,Blue,Morale"]);
        let donations = read_donations(text.as_bytes()).unwrap();
        assert_eq!(donations.len(), 1);

        let d = &donations[0];
        assert_eq!(d.timestamp, Timestamp::parse("12/01/2020", "10:15:00").unwrap());
        assert_eq!(d.amount, Money::new(1030, 50));
        assert_eq!(d.donor.card, "1234");
        assert_eq!(d.donor.relation, "Alumni");
        assert_eq!(d.recipient.id, "d1");
        assert_eq!(d.recipient.house, "Blue");
    }

    #[test]
    fn test_card_column_optional() {
        let text = "Date,Time,Donor First Name,Donor Last Name,Donor Email,Donor Phone,Donor Relation,\
Donation Amount,Dancer Name,Dancer Email,Dancer Peer ID,Dancer Role,Dancer House,Dancer Team
12/01/2020,10:15,A,B,a@x.org,1,,5,N,n@x.org,d1,Dancer,H,T";
        let donations = read_donations(text.as_bytes()).unwrap();
        assert_eq!(donations[0].donor.card, "");
        assert_eq!(donations[0].amount, Money::new(5, 0));
    }

    #[test]
    fn test_combined_date_time_column() {
        let text = "Date Time,Donor First Name,Donor Last Name,Donor Email,Donor Phone,Donor Relation,\
Donation Amount,Dancer Name,Dancer Email,Dancer Peer ID,Dancer Role,Dancer House,Dancer Team
12/01/2020 9:05 PM,A,B,a@x.org,1,,5,N,n@x.org,d1,Dancer,H,T";
        let donations = read_donations(text.as_bytes()).unwrap();
        assert_eq!(donations[0].timestamp, Timestamp::parse("12/01/2020", "21:05:00").unwrap());
    }

    #[test]
    fn test_sorted_by_timestamp() {
        let text = csv(&[
            "12/01/2020,11:00:00,A,A,a@x.org,1,,,1,N,n@x.org,d1,Dancer,H,T",
            "12/01/2020,09:00:00,B,B,b@x.org,2,,,2,N,n@x.org,d1,Dancer,H,T",
        ]);
        let donations = read_donations(text.as_bytes()).unwrap();
        assert_eq!(donations[0].donor.first_name, "B");
        assert_eq!(donations[1].donor.first_name, "A");
    }

    #[test]
    fn test_missing_column() {
        let text = "Date,Time,Donor First Name\n12/01/2020,10:00,A";
        let err = read_donations(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MatchError::Donation { row: 0, .. }));
    }

    #[test]
    fn test_bad_amount_names_row() {
        let text = csv(&[
            "12/01/2020,09:00:00,A,A,a@x.org,1,,,1,N,n@x.org,d1,Dancer,H,T",
            "12/01/2020,10:00:00,B,B,b@x.org,2,,,ten,N,n@x.org,d1,Dancer,H,T",
        ]);
        let err = read_donations(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MatchError::Donation { row: 2, .. }));
    }

    #[test]
    fn test_short_row_names_row() {
        let text = csv(&[
            "12/01/2020,09:00:00,A,A,a@x.org,1,,,1,N,n@x.org,d1,Dancer,H,T",
            "12/01/2020,10:00:00,B,B,b@x.org,2,,,2,N,n@x.org,d1,Dancer",
        ]);
        let err = read_donations(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MatchError::Donation { row: 2, .. }));
    }

    #[test]
    fn test_bad_date_names_row() {
        let text = csv(&["yesterday,09:00:00,A,A,a@x.org,1,,,1,N,n@x.org,d1,Dancer,H,T"]);
        let err = read_donations(text.as_bytes()).unwrap_err();
        assert!(matches!(err, MatchError::Donation { row: 1, .. }));
    }
}
