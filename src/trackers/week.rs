use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, Context};
use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Day of the week used as a natural key by the planner and the gym/diet log.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Day {
    #[serde(rename = "Lunes")]
    #[value(alias = "lunes", alias = "mon")]
    Monday,
    #[serde(rename = "Martes")]
    #[value(alias = "martes", alias = "tue")]
    Tuesday,
    #[serde(rename = "Miércoles")]
    #[value(alias = "miercoles", alias = "miércoles", alias = "wed")]
    Wednesday,
    #[serde(rename = "Jueves")]
    #[value(alias = "jueves", alias = "thu")]
    Thursday,
    #[serde(rename = "Viernes")]
    #[value(alias = "viernes", alias = "fri")]
    Friday,
    #[serde(rename = "Sábado")]
    #[value(alias = "sabado", alias = "sábado", alias = "sat")]
    Saturday,
    #[serde(rename = "Domingo")]
    #[value(alias = "domingo", alias = "sun")]
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Day::Monday => "Lunes",
            Day::Tuesday => "Martes",
            Day::Wednesday => "Miércoles",
            Day::Thursday => "Jueves",
            Day::Friday => "Viernes",
            Day::Saturday => "Sábado",
            Day::Sunday => "Domingo",
        }
    }

    pub fn of(date: NaiveDate) -> Day {
        date.weekday().into()
    }
}

impl From<Weekday> for Day {
    fn from(value: Weekday) -> Self {
        Day::ALL[value.num_days_from_monday() as usize]
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub const FIRST_HOUR: u8 = 6;
pub const LAST_HOUR: u8 = 23;

/// One-hour slot of the weekly planner, from 06:00 to 23:00. Stored as `"HH:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hour(u8);

impl Hour {
    pub fn new_opt(hour: u8) -> Option<Hour> {
        (FIRST_HOUR..=LAST_HOUR).contains(&hour).then_some(Hour(hour))
    }

    pub fn all() -> impl Iterator<Item = Hour> {
        (FIRST_HOUR..=LAST_HOUR).map(Hour)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Display for Hour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for Hour {
    type Err = anyhow::Error;

    /// Accepts `9`, `09`, `9:00` and `09:00`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hour = s.strip_suffix(":00").unwrap_or(s);
        let hour = hour
            .parse::<u8>()
            .with_context(|| format!("Can't parse {s} into an hour"))?;
        Hour::new_opt(hour)
            .ok_or_else(|| anyhow!("Hour {hour} is outside of {FIRST_HOUR:02}:00-{LAST_HOUR}:00"))
    }
}

impl TryFrom<String> for Hour {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hour> for String {
    fn from(value: Hour) -> Self {
        value.to_string()
    }
}
