use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Years a key can hold while staying exactly four digits wide.
pub const KEY_YEARS: RangeInclusive<i32> = 1..=9999;

/// Canonical `YYYY-MM-DD` key for one calendar day.
///
/// Year, month and day are zero-padded, so the derived lexicographic ordering
/// is also chronological ordering for every year in [`KEY_YEARS`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

/// A decoded key. `month0` is 0-based (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub year: i32,
    pub month0: u32,
    pub day: u32,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum DateKeyError {
    #[error("malformed date key: {0}")]
    Malformed(String),
    #[error("not a calendar date: {0}")]
    NotADate(String),
}

impl DateKey {
    /// Builds a key from already-normalized calendar values. No range checks.
    pub fn encode(year: i32, month0: u32, day: u32) -> Self {
        DateKey(format!("{:04}-{:02}-{:02}", year, month0 + 1, day))
    }

    pub fn decode(&self) -> Result<DateParts, DateKeyError> {
        let malformed = || DateKeyError::Malformed(self.0.clone());
        let mut parts = self.0.split('-');
        let year = parts
            .next()
            .and_then(|p| p.parse::<i32>().ok())
            .ok_or_else(malformed)?;
        let month = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|m| *m >= 1)
            .ok_or_else(malformed)?;
        let day = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(DateParts {
            year,
            month0: month - 1,
            day,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        DateKey::encode(date.year(), date.month0(), date.day())
    }

    pub fn to_date(&self) -> Option<NaiveDate> {
        let parts = self.decode().ok()?;
        NaiveDate::from_ymd_opt(parts.year, parts.month0 + 1, parts.day)
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    /// Parses user input, accepting only real calendar dates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .filter(|d| KEY_YEARS.contains(&d.year()))
            .ok_or_else(|| DateKeyError::NotADate(trimmed.to_string()))?;
        Ok(DateKey::from_date(date))
    }
}
