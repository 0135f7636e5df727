//! Date-time values for donations and round windows.
//!
//! A [`Timestamp`] is ordered lexicographically by date, then time. Hourly
//! statistics bucket donations by [`Timestamp::truncate_to_hour`].

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};

use crate::error::{MatchError, Result};

const DATE_FORMATS: [&str; 4] = ["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%m-%d-%Y"];
const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// A (year, month, day, hour, minute, second) point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Build a timestamp from its six components.
    ///
    /// # Example
    ///
    /// ```
    /// use donation_matcher::types::Timestamp;
    ///
    /// let ts = Timestamp::from_ymd_hms(2020, 12, 1, 14, 30, 5).unwrap();
    /// assert_eq!(ts.to_string(), "2020/12/01 14:30:05");
    /// ```
    pub fn from_ymd_hms(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            MatchError::InvalidTimestamp(format!("{year:04}-{month:02}-{day:02}"))
        })?;
        let time = NaiveTime::from_hms_opt(hour, min, sec).ok_or_else(|| {
            MatchError::InvalidTimestamp(format!("{hour:02}:{min:02}:{sec:02}"))
        })?;
        Ok(Timestamp(date.and_time(time)))
    }

    /// Parse a date string and a time string.
    ///
    /// Dates may be `MM/DD/YYYY`, `YYYY-MM-DD`, `YYYY/MM/DD` or `MM-DD-YYYY`;
    /// times may be 24-hour `HH:MM[:SS]` or 12-hour with an AM/PM suffix.
    pub fn parse(date: &str, time: &str) -> Result<Self> {
        Ok(Timestamp(parse_date(date)?.and_time(parse_time(time)?)))
    }

    /// Same instant with minutes and seconds zeroed.
    pub fn truncate_to_hour(&self) -> Timestamp {
        let hour = self.0.date().and_hms_opt(self.0.hour(), 0, 0);
        Timestamp(hour.unwrap_or(self.0))
    }

    /// Seconds since the Unix epoch, treating the value as UTC.
    pub fn unix_seconds(&self) -> i64 {
        self.0.and_utc().timestamp()
    }

    /// Date portion as `YYYY/MM/DD`.
    pub fn date_string(&self) -> String {
        format!("{:04}/{:02}/{:02}", self.0.year(), self.0.month(), self.0.day())
    }

    /// Time portion as `HH:MM:SS`.
    pub fn time_string(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.0.hour(), self.0.minute(), self.0.second())
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Timestamp(value)
    }
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    let date = date.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
        .ok_or_else(|| MatchError::InvalidTimestamp(format!("unrecognized date '{date}'")))
}

fn parse_time(time: &str) -> Result<NaiveTime> {
    let time = time.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time, fmt).ok())
        .ok_or_else(|| MatchError::InvalidTimestamp(format!("unrecognized time '{time}'")))
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date_string(), self.time_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(date: &str, time: &str) -> Timestamp {
        Timestamp::parse(date, time).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Timestamp::from_ymd_hms(2020, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(ts("12/01/2020", "00:00:00"), expected);
        assert_eq!(ts("12/1/2020", "00:00:00"), expected);
        assert_eq!(ts("2020-12-01", "00:00:00"), expected);
        assert_eq!(ts("2020/12/01", "00:00"), expected);
        assert_eq!(ts("12-01-2020", "12:00:00 AM"), expected);
    }

    #[test]
    fn test_parse_twelve_hour_clock() {
        assert_eq!(ts("12/01/2020", "2:15:00 PM").hour(), 14);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Timestamp::parse("13/45/2020", "00:00:00").is_err());
        assert!(Timestamp::parse("12/01/2020", "25:00:00").is_err());
        assert!(Timestamp::parse("yesterday", "noon").is_err());
    }

    #[test]
    fn test_ordering_date_then_time() {
        assert!(ts("12/01/2020", "23:59:59") < ts("12/02/2020", "00:00:00"));
        assert!(ts("12/01/2020", "10:00:00") < ts("12/01/2020", "10:00:01"));
        assert!(ts("11/30/2021", "00:00:00") > ts("12/31/2020", "23:00:00"));
    }

    #[test]
    fn test_truncate_to_hour() {
        let t = ts("12/01/2020", "14:37:22");
        assert_eq!(t.truncate_to_hour(), ts("12/01/2020", "14:00:00"));
        assert_eq!(t.truncate_to_hour().to_string(), "2020/12/01 14:00:00");
    }

    #[test]
    fn test_unix_seconds() {
        assert_eq!(ts("1970-01-01", "00:01:00").unix_seconds(), 60);
    }
}
