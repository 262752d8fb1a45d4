//! Business date - the day a sign-off pertains to

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Calendar date a sign-off applies to, independent of wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessDate(NaiveDate);

impl BusinessDate {
    /// Build from year/month/day, `None` if the date does not exist
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today's date in the local timezone
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }
}

impl fmt::Display for BusinessDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for BusinessDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CoreError::InvalidBusinessDate(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let date: BusinessDate = "2026-10-19".parse().unwrap();
        assert_eq!(date, BusinessDate::from_ymd(2026, 10, 19).unwrap());
        assert_eq!(date.to_string(), "2026-10-19");
    }

    #[test]
    fn test_parse_invalid() {
        assert!("19/10/2026".parse::<BusinessDate>().is_err());
        assert!("2026-02-30".parse::<BusinessDate>().is_err());
        assert!(BusinessDate::from_ymd(2026, 13, 1).is_none());
    }

    #[test]
    fn test_serde_is_iso_string() {
        let date = BusinessDate::from_ymd(2026, 1, 5).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2026-01-05\"");
    }
}
