use std::fmt::Display;

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    storage::{
        binding::Binding,
        keyed::{Keyed, KeyedCollection},
        slot::SlotStorage,
    },
    utils::time::rolling_window,
};

pub const MOODS_SLOT: &str = "moods";

/// Length of the "recent moods" window, today included.
pub const RECENT_DAYS: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Mood {
    #[serde(rename = "Feliz")]
    #[value(alias = "feliz")]
    Happy,
    #[serde(rename = "Triste")]
    #[value(alias = "triste")]
    Sad,
    #[serde(rename = "Estresado")]
    #[value(alias = "estresado")]
    Stressed,
    #[serde(rename = "Motivado")]
    #[value(alias = "motivado")]
    Motivated,
    #[serde(rename = "Cansado")]
    #[value(alias = "cansado")]
    Tired,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Feliz",
            Mood::Sad => "Triste",
            Mood::Stressed => "Estresado",
            Mood::Motivated => "Motivado",
            Mood::Tired => "Cansado",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Stressed => "😰",
            Mood::Motivated => "💪",
            Mood::Tired => "😴",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Mood recorded for a calendar date. A date has at most one entry. Empty notes are never
/// stored, the field is left out instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Keyed for MoodEntry {
    type Key = NaiveDate;

    fn key(&self) -> Self::Key {
        self.date
    }
}

/// A day of the recent window and whatever was recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMood<'a> {
    pub date: NaiveDate,
    pub entry: Option<&'a MoodEntry>,
}

pub struct MoodTracker<S> {
    moods: Binding<Vec<MoodEntry>, S>,
}

impl<S: SlotStorage> MoodTracker<S> {
    pub fn open(storage: S) -> Result<Self> {
        Ok(Self {
            moods: Binding::bind(storage, MOODS_SLOT, vec![])?,
        })
    }

    /// Records the mood of `date`, replacing an earlier entry for the same date.
    pub fn record(&mut self, date: NaiveDate, mood: Mood, note: Option<&str>) -> Result<MoodEntry> {
        let entry = MoodEntry {
            date,
            mood,
            note: note
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned),
        };
        debug!("Recording {mood} for {date}");
        self.moods.update(|prev| {
            let mut next = prev.clone();
            next.upsert(entry.clone());
            next
        })?;
        Ok(entry)
    }

    pub fn mood_on(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.moods.get().find_key(&date)
    }

    /// Last [RECENT_DAYS] days ending with `today`, oldest first.
    pub fn recent(&self, today: NaiveDate) -> Vec<DayMood<'_>> {
        rolling_window(today, RECENT_DAYS)
            .into_iter()
            .map(|date| DayMood {
                date,
                entry: self.mood_on(date),
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.moods.get().len()
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use crate::storage::slot::{MemorySlotStorage, SlotStorage};

    use super::{Mood, MoodTracker, MOODS_SLOT};

    fn date(v: &str) -> NaiveDate {
        v.parse().unwrap()
    }

    #[test]
    fn test_one_entry_per_date() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut tracker = MoodTracker::open(&storage)?;

        tracker.record(date("2024-05-01"), Mood::Sad, Some("lluvia"))?;
        tracker.record(date("2024-05-02"), Mood::Happy, None)?;
        tracker.record(date("2024-05-01"), Mood::Motivated, Some("  sol  "))?;

        let reloaded = MoodTracker::open(&storage)?;
        assert_eq!(reloaded.count(), 2);
        let entry = reloaded.mood_on(date("2024-05-01")).unwrap();
        assert_eq!(entry.mood, Mood::Motivated);
        assert_eq!(entry.note.as_deref(), Some("sol"));
        Ok(())
    }

    #[test]
    fn test_blank_note_is_omitted() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut tracker = MoodTracker::open(&storage)?;

        let entry = tracker.record(date("2024-05-01"), Mood::Tired, Some("   "))?;

        assert_eq!(entry.note, None);
        assert_eq!(
            storage.read(MOODS_SLOT)?.as_deref(),
            Some(r#"[{"date":"2024-05-01","mood":"Cansado"}]"#)
        );
        Ok(())
    }

    #[test]
    fn test_recent_window() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut tracker = MoodTracker::open(&storage)?;
        tracker.record(date("2024-04-30"), Mood::Stressed, None)?;
        tracker.record(date("2024-05-03"), Mood::Happy, None)?;
        // Outside of the window.
        tracker.record(date("2024-04-20"), Mood::Sad, None)?;

        let recent = tracker.recent(date("2024-05-03"));

        assert_eq!(recent.len(), 7);
        assert_eq!(recent[0].date, date("2024-04-27"));
        assert_eq!(recent[6].date, date("2024-05-03"));
        let recorded = recent
            .iter()
            .filter_map(|v| v.entry.map(|e| e.mood))
            .collect::<Vec<_>>();
        assert_eq!(recorded, vec![Mood::Stressed, Mood::Happy]);
        Ok(())
    }

    #[test]
    fn test_entries_written_by_older_versions_are_read() -> Result<()> {
        let storage = MemorySlotStorage::new();
        storage.write(
            MOODS_SLOT,
            r#"[{"date":"2024-01-10","mood":"Feliz","note":"bien"},{"date":"2024-01-11","mood":"Triste"}]"#,
        )?;

        let tracker = MoodTracker::open(&storage)?;

        assert_eq!(tracker.count(), 2);
        assert_eq!(tracker.mood_on(date("2024-01-11")).unwrap().note, None);
        Ok(())
    }
}
