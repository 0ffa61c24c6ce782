use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use super::Args;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum DateStyle {
    #[default]
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

/// Turns a user supplied date into a calendar date. ISO dates are taken as is, anything else goes
/// through english date parsing, e.g. "yesterday", "friday" or "15/03/2025". A missing value
/// means today.
pub fn parse_date(
    input: Option<&str>,
    now: DateTime<Local>,
    date_style: DateStyle,
) -> Result<NaiveDate> {
    let Some(input) = input.map(str::trim) else {
        return Ok(now.date_naive());
    };

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    match parse_date_string(input, now, date_style.into()) {
        Ok(v) => Ok(v.date_naive()),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate date {input:?}: {e}"),
            )
            .into()),
    }
}
