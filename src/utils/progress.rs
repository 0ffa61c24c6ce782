use std::{fmt::Display, ops::Deref, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

pub const MAX_PROGRESS: u8 = 100;

/// Step used by the `+`/`-` progress controls.
pub const PROGRESS_STEP: i32 = 10;

/// Completion of a hobby or project. Always within 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "f64", into = "u8")]
pub struct Progress(u8);

impl Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Progress {
    /// Clamps `value` into the valid range.
    pub fn clamped(value: i32) -> Progress {
        Progress(value.clamp(0, MAX_PROGRESS as i32) as u8)
    }

    pub fn new_opt(value: i32) -> Option<Progress> {
        if (0..=MAX_PROGRESS as i32).contains(&value) {
            Some(Progress(value as u8))
        } else {
            None
        }
    }

    pub fn apply(self, delta: i32) -> Progress {
        Progress::clamped((self.0 as i32).saturating_add(delta))
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            return Progress::default();
        }
        Progress(value.round().clamp(0., MAX_PROGRESS as f64) as u8)
    }
}

impl From<Progress> for u8 {
    fn from(value: Progress) -> Self {
        value.0
    }
}

impl FromStr for Progress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end_matches("%");
        let v = s.parse::<i32>()?;
        Progress::new_opt(v).ok_or_else(|| anyhow!("Can't parse {s} into progress"))
    }
}

impl Deref for Progress {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
