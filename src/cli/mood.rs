use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::{
    storage::slot::SlotStorage,
    trackers::{
        mood::{Mood, MoodTracker},
        week::Day,
    },
};

use super::Context;

#[derive(Debug, Subcommand)]
pub enum MoodCommand {
    #[command(about = "Record the mood of a day. Recording again replaces it")]
    Log {
        #[arg(value_enum)]
        mood: Mood,
        #[arg(short, long, help = "Day to record. Defaults to today")]
        date: Option<String>,
        #[arg(short, long)]
        note: Option<String>,
    },
    #[command(about = "Print the mood of a day")]
    Show {
        #[arg(short, long, help = "Defaults to today")]
        date: Option<String>,
    },
    #[command(about = "Print the last 7 days")]
    Recent,
}

pub fn process_mood_command<S: SlotStorage + Clone>(
    command: MoodCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut tracker = MoodTracker::open(context.storage.clone())?;
    let palette = context.palette;

    match command {
        MoodCommand::Log { mood, date, note } => {
            let date = context.date(date.as_deref())?;
            let entry = tracker.record(date, mood, note.as_deref())?;
            writeln!(out, "{date}: {}", palette.mood(entry.mood))?;
        }
        MoodCommand::Show { date } => {
            let date = context.date(date.as_deref())?;
            match tracker.mood_on(date) {
                Some(entry) => {
                    writeln!(out, "{date}: {}", palette.mood(entry.mood))?;
                    if let Some(note) = &entry.note {
                        writeln!(out, "  {note}")?;
                    }
                }
                None => writeln!(out, "{}", palette.dim(format!("Nothing recorded for {date}")))?,
            }
        }
        MoodCommand::Recent => {
            writeln!(out, "{}", palette.heading("Últimos 7 días"))?;
            for day in tracker.recent(context.today()) {
                let mood = day
                    .entry
                    .map_or_else(|| palette.dim("-"), |v| palette.mood(v.mood));
                writeln!(
                    out,
                    "{:<10} {} {mood}",
                    Day::of(day.date).label(),
                    day.date
                )?;
            }
            writeln!(out, "Total entries: {}", tracker.count())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        cli::test_support::{clock, context, output},
        storage::slot::MemorySlotStorage,
        trackers::mood::{Mood, MoodTracker},
    };

    use super::{process_mood_command, MoodCommand};

    #[test]
    fn test_log_defaults_to_today() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let clock = clock();
        let context = context(&storage, &clock);

        let mut out = vec![];
        process_mood_command(
            MoodCommand::Log {
                mood: Mood::Motivated,
                date: None,
                note: Some("Buen día".into()),
            },
            &context,
            &mut out,
        )?;

        assert_eq!(output(out), "2024-05-15: 💪 Motivado\n");
        let tracker = MoodTracker::open(&storage)?;
        let entry = tracker.mood_on(context.today()).unwrap();
        assert_eq!(entry.note.as_deref(), Some("Buen día"));
        Ok(())
    }

    #[test]
    fn test_recent_lists_seven_days() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let clock = clock();
        let context = context(&storage, &clock);
        for (date, mood) in [("2024-05-13", Mood::Tired), ("2024-05-01", Mood::Sad)] {
            process_mood_command(
                MoodCommand::Log {
                    mood,
                    date: Some(date.into()),
                    note: None,
                },
                &context,
                &mut vec![],
            )?;
        }

        let mut out = vec![];
        process_mood_command(MoodCommand::Recent, &context, &mut out)?;
        let printed = output(out);
        let lines = printed.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 9);
        assert!(lines[1].starts_with("Jueves"));
        assert!(lines[1].contains("2024-05-09"));
        assert!(lines[5].contains("2024-05-13 😴 Cansado"));
        assert!(lines[7].starts_with("Miércoles"));
        assert!(lines[7].ends_with('-'));
        assert_eq!(lines[8], "Total entries: 2");
        Ok(())
    }

    #[test]
    fn test_show_missing_day() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let clock = clock();
        let context = context(&storage, &clock);

        let mut out = vec![];
        process_mood_command(
            MoodCommand::Show {
                date: Some("2024-05-02".into()),
            },
            &context,
            &mut out,
        )?;

        assert_eq!(output(out), "Nothing recorded for 2024-05-02\n");
        Ok(())
    }
}
