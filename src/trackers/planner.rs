use std::fmt::Display;

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::{
    binding::Binding,
    keyed::{Keyed, KeyedCollection},
    slot::SlotStorage,
};

use super::week::{Day, Hour};

pub const TIME_BLOCKS_SLOT: &str = "timeBlocks";
pub const DAY_NOTES_SLOT: &str = "dayNotes";

/// What a planner hour is dedicated to. Unplanned hours are [Activity::Free].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum Activity {
    #[serde(rename = "Trabajo")]
    #[value(alias = "trabajo")]
    Work,
    #[serde(rename = "Estudio")]
    #[value(alias = "estudio")]
    Study,
    #[serde(rename = "Gym")]
    Gym,
    #[serde(rename = "Hobby")]
    Hobby,
    #[default]
    #[serde(rename = "Libre")]
    #[value(alias = "libre")]
    Free,
}

impl Activity {
    /// Order in which clicking a planner cell rotates activities.
    pub const CYCLE: [Activity; 5] = [
        Activity::Work,
        Activity::Study,
        Activity::Gym,
        Activity::Hobby,
        Activity::Free,
    ];

    pub fn next(self) -> Activity {
        let index = Self::CYCLE.iter().position(|v| *v == self).unwrap_or(0);
        Self::CYCLE[(index + 1) % Self::CYCLE.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Activity::Work => "Trabajo",
            Activity::Study => "Estudio",
            Activity::Gym => "Gym",
            Activity::Hobby => "Hobby",
            Activity::Free => "Libre",
        }
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub day: Day,
    pub hour: Hour,
    pub activity: Activity,
}

impl Keyed for TimeBlock {
    type Key = (Day, Hour);

    fn key(&self) -> Self::Key {
        (self.day, self.hour)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayNote {
    pub day: Day,
    pub note: String,
}

impl Keyed for DayNote {
    type Key = Day;

    fn key(&self) -> Self::Key {
        self.day
    }
}

/// One row of the weekly grid: an hour and the activity of every day at that hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekRow {
    pub hour: Hour,
    pub activities: [Activity; 7],
}

/// Weekly schedule plus a free-text note per day.
pub struct Planner<S> {
    time_blocks: Binding<Vec<TimeBlock>, S>,
    day_notes: Binding<Vec<DayNote>, S>,
}

impl<S: SlotStorage + Clone> Planner<S> {
    pub fn open(storage: S) -> Result<Self> {
        Ok(Self {
            time_blocks: Binding::bind(storage.clone(), TIME_BLOCKS_SLOT, vec![])?,
            day_notes: Binding::bind(storage, DAY_NOTES_SLOT, vec![])?,
        })
    }
}

impl<S: SlotStorage> Planner<S> {
    pub fn time_blocks(&self) -> &[TimeBlock] {
        self.time_blocks.get()
    }

    pub fn activity_at(&self, day: Day, hour: Hour) -> Activity {
        self.time_blocks
            .get()
            .find_key(&(day, hour))
            .map(|v| v.activity)
            .unwrap_or_default()
    }

    /// Moves the block to the next activity of [Activity::CYCLE] and returns it.
    pub fn cycle_activity(&mut self, day: Day, hour: Hour) -> Result<Activity> {
        let activity = self.activity_at(day, hour).next();
        self.set_activity(day, hour, activity)?;
        Ok(activity)
    }

    pub fn set_activity(&mut self, day: Day, hour: Hour, activity: Activity) -> Result<()> {
        debug!("Setting {day} {hour} to {activity}");
        self.time_blocks.update(|prev| {
            let mut next = prev.clone();
            next.upsert(TimeBlock {
                day,
                hour,
                activity,
            });
            next
        })?;
        Ok(())
    }

    pub fn day_note(&self, day: Day) -> &str {
        self.day_notes
            .get()
            .find_key(&day)
            .map(|v| v.note.as_str())
            .unwrap_or_default()
    }

    pub fn set_day_note(&mut self, day: Day, note: impl Into<String>) -> Result<()> {
        let note = note.into();
        self.day_notes.update(|prev| {
            let mut next = prev.clone();
            next.upsert(DayNote { day, note });
            next
        })?;
        Ok(())
    }

    /// The whole week as rows of hours.
    pub fn week(&self) -> Vec<WeekRow> {
        Hour::all()
            .map(|hour| WeekRow {
                hour,
                activities: Day::ALL.map(|day| self.activity_at(day, hour)),
            })
            .collect()
    }
}
