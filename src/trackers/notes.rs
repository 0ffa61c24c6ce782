use anyhow::Result;
use chrono::{DateTime, Days, NaiveDate, TimeZone};
use now::DateTimeNow;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    storage::{
        binding::Binding,
        keyed::{Keyed, KeyedCollection},
        slot::SlotStorage,
    },
    utils::time::date_to_record_name,
};

use super::{new_id, RecordId};

pub const DAILY_NOTES_SLOT: &str = "dailyNotes";

/// Listings show at most this many characters of a note.
pub const PREVIEW_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    pub id: RecordId,
    pub date: NaiveDate,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

impl DailyNote {
    pub fn preview(&self) -> String {
        let mut chars = self.content.chars();
        let preview = chars.by_ref().take(PREVIEW_LENGTH).collect::<String>();
        if chars.next().is_some() {
            format!("{preview}...")
        } else {
            preview
        }
    }
}

impl Keyed for DailyNote {
    type Key = RecordId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteStats {
    pub total: usize,
    pub this_month: usize,
    /// Notes dated within the last 7 days, today included.
    pub this_week: usize,
}

pub struct Notes<S> {
    notes: Binding<Vec<DailyNote>, S>,
}

impl<S: SlotStorage> Notes<S> {
    pub fn open(storage: S) -> Result<Self> {
        Ok(Self {
            notes: Binding::bind(storage, DAILY_NOTES_SLOT, vec![])?,
        })
    }

    pub fn list(&self) -> &[DailyNote] {
        self.notes.get()
    }

    pub fn note_for(&self, date: NaiveDate) -> Option<&DailyNote> {
        self.notes.get().iter().find(|v| v.date == date)
    }

    /// Writes the note of `date`. An existing note keeps its id and only gets new content.
    /// Blank content is ignored.
    pub fn save(&mut self, date: NaiveDate, content: &str) -> Result<Option<DailyNote>> {
        if content.trim().is_empty() {
            debug!("Ignoring empty note for {date}");
            return Ok(None);
        }

        let note = match self.note_for(date) {
            Some(existing) => DailyNote {
                content: content.to_owned(),
                ..existing.clone()
            },
            None => DailyNote {
                id: new_id(),
                date,
                content: content.to_owned(),
                mood: None,
            },
        };
        self.notes.update(|prev| {
            let mut next = prev.clone();
            next.upsert(note.clone());
            next
        })?;
        Ok(Some(note))
    }

    pub fn delete(&mut self, id: RecordId) -> Result<Option<DailyNote>> {
        let mut next = self.notes.get().clone();
        let removed = next.remove_key(&id);
        if removed.is_some() {
            self.notes.set(next)?;
        }
        Ok(removed)
    }

    /// Notes whose content contains `term` ignoring case, or whose `YYYY-MM-DD` date contains
    /// `term`. Newest first.
    pub fn search(&self, term: &str) -> Vec<&DailyNote> {
        let needle = term.to_lowercase();
        let mut found = self
            .notes
            .get()
            .iter()
            .filter(|v| {
                v.content.to_lowercase().contains(&needle)
                    || date_to_record_name(v.date).contains(term)
            })
            .collect::<Vec<_>>();
        found.sort_by(|a, b| b.date.cmp(&a.date));
        found
    }

    pub fn stats<Tz: TimeZone>(&self, now: DateTime<Tz>) -> NoteStats {
        let month_start = now.beginning_of_month().date_naive();
        let month_end = now.end_of_month().date_naive();
        let today = now.date_naive();
        let week_start = today.checked_sub_days(Days::new(6)).unwrap_or(today);

        let notes = self.notes.get();
        NoteStats {
            total: notes.len(),
            this_month: notes
                .iter()
                .filter(|v| month_start <= v.date && v.date <= month_end)
                .count(),
            this_week: notes.iter().filter(|v| v.date >= week_start).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::{storage::slot::MemorySlotStorage, trackers::new_id};

    use super::{DailyNote, NoteStats, Notes};

    fn date(v: &str) -> NaiveDate {
        v.parse().unwrap()
    }

    #[test]
    fn test_search_by_content_and_date() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut notes = Notes::open(&storage)?;
        notes.save(date("2024-01-01"), "Hello")?;
        notes.save(date("2024-02-02"), "World")?;

        let by_content = notes.search("hel");
        assert_eq!(by_content.len(), 1);
        assert_eq!(by_content[0].content, "Hello");

        let by_date = notes.search("2024-02");
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].content, "World");

        let all = notes.search("");
        assert_eq!(
            all.iter().map(|v| v.content.as_str()).collect::<Vec<_>>(),
            vec!["World", "Hello"]
        );
        Ok(())
    }

    #[test]
    fn test_save_replaces_content_of_same_date() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut notes = Notes::open(&storage)?;

        let first = notes.save(date("2024-03-03"), "Borrador")?.unwrap();
        let second = notes.save(date("2024-03-03"), "Versión final")?.unwrap();
        assert!(notes.save(date("2024-03-04"), "  \n ")?.is_none());

        assert_eq!(first.id, second.id);
        let reloaded = Notes::open(&storage)?;
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(
            reloaded.note_for(date("2024-03-03")).unwrap().content,
            "Versión final"
        );
        Ok(())
    }

    #[test]
    fn test_delete() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut notes = Notes::open(&storage)?;
        let note = notes.save(date("2024-03-03"), "Algo")?.unwrap();

        assert!(notes.delete(new_id())?.is_none());
        assert_eq!(notes.delete(note.id)?.map(|v| v.content), Some("Algo".into()));
        assert!(Notes::open(&storage)?.list().is_empty());
        Ok(())
    }

    #[test]
    fn test_stats() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut notes = Notes::open(&storage)?;
        for (day, content) in [
            ("2024-04-30", "fin de abril"),
            ("2024-05-01", "inicio de mayo"),
            ("2024-05-09", "hace una semana"),
            ("2024-05-10", "hace seis días"),
            ("2024-05-16", "hoy"),
            ("2024-06-01", "futuro"),
        ] {
            notes.save(date(day), content)?;
        }

        let now = Utc.with_ymd_and_hms(2024, 5, 16, 10, 0, 0).unwrap();
        assert_eq!(
            notes.stats(now),
            NoteStats {
                total: 6,
                this_month: 4,
                this_week: 3,
            }
        );
        Ok(())
    }

    #[test]
    fn test_preview_truncates() {
        let note = DailyNote {
            id: new_id(),
            date: date("2024-01-01"),
            content: "ñ".repeat(120),
            mood: None,
        };
        let preview = note.preview();
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));

        let short = DailyNote {
            content: "corto".into(),
            ..note
        };
        assert_eq!(short.preview(), "corto");
    }
}
