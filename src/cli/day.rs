use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::utils::time::parse_date_key;

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Turns user input into a calendar day. Accepts `YYYY-MM-DD` as well as anything
/// `chrono-english` understands, like "yesterday" or "15/03/2025".
pub fn parse_day(input: &str, style: DateStyle, now: DateTime<Local>) -> Result<NaiveDate> {
    if let Some(date) = parse_date_key(input) {
        return Ok(date);
    }
    match parse_date_string(input, now, style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input:?}: {e}"),
            )
            .into()),
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{Local, NaiveDate, TimeZone};

    use super::{parse_day, DateStyle};

    #[test]
    fn test_parse_day_formats() -> Result<()> {
        let now = Local.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();

        assert_eq!(
            parse_day("2025-03-01", DateStyle::Uk, now)?,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        assert_eq!(
            parse_day("yesterday", DateStyle::Uk, now)?,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert_eq!(
            parse_day("04/03/2025", DateStyle::Uk, now)?,
            NaiveDate::from_ymd_opt(2025, 3, 4).unwrap()
        );
        assert_eq!(
            parse_day("04/03/2025", DateStyle::Us, now)?,
            NaiveDate::from_ymd_opt(2025, 4, 3).unwrap()
        );
        Ok(())
    }

    #[test]
    fn test_parse_day_rejects_nonsense() {
        let now = Local.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap();

        assert!(parse_day("not a date at all", DateStyle::Uk, now).is_err());
    }
}
