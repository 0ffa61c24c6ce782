use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use crate::{
    storage::slot::SlotStorage,
    trackers::{
        planner::{Activity, Planner},
        week::{Day, Hour},
    },
};

use super::Context;

const CELL_WIDTH: usize = 10;

#[derive(Debug, Subcommand)]
pub enum PlannerCommand {
    #[command(about = "Print the weekly grid and day notes")]
    Show,
    #[command(about = "Rotate an hour to the next activity: Trabajo → Estudio → Gym → Hobby → Libre")]
    Cycle {
        #[arg(value_enum)]
        day: Day,
        #[arg(help = "Hour between 6 and 23, e.g. 9 or 09:00")]
        hour: Hour,
    },
    #[command(about = "Set the activity of an hour")]
    Set {
        #[arg(value_enum)]
        day: Day,
        #[arg(help = "Hour between 6 and 23, e.g. 9 or 09:00")]
        hour: Hour,
        #[arg(value_enum)]
        activity: Activity,
    },
    #[command(about = "Show or replace the note of a day")]
    Note {
        #[arg(value_enum)]
        day: Day,
        #[arg(help = "New note. Without it the current note is printed")]
        text: Vec<String>,
    },
}

/// Command to process `planner` command.
pub fn process_planner_command<S: SlotStorage + Clone>(
    command: PlannerCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut planner = Planner::open(context.storage.clone())?;

    match command {
        PlannerCommand::Show => print_week(&planner, context, out),
        PlannerCommand::Cycle { day, hour } => {
            let activity = planner.cycle_activity(day, hour)?;
            writeln!(
                out,
                "{day} {hour}: {}",
                context.palette.activity(activity, activity.label())
            )?;
            Ok(())
        }
        PlannerCommand::Set {
            day,
            hour,
            activity,
        } => {
            planner.set_activity(day, hour, activity)?;
            writeln!(
                out,
                "{day} {hour}: {}",
                context.palette.activity(activity, activity.label())
            )?;
            Ok(())
        }
        PlannerCommand::Note { day, text } if text.is_empty() => {
            let note = planner.day_note(day);
            if note.is_empty() {
                writeln!(out, "{}", context.palette.dim(format!("No note for {day}")))?;
            } else {
                writeln!(out, "{note}")?;
            }
            Ok(())
        }
        PlannerCommand::Note { day, text } => {
            planner.set_day_note(day, text.join(" "))?;
            writeln!(out, "Saved note for {day}")?;
            Ok(())
        }
    }
}

fn print_week<S: SlotStorage>(
    planner: &Planner<S>,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let palette = context.palette;

    let mut header = format!("{:<6}", "Hora");
    for day in Day::ALL {
        header.push_str(&format!(" {:<CELL_WIDTH$}", day.label()));
    }
    writeln!(out, "{}", palette.heading(header.trim_end()))?;

    for row in planner.week() {
        let mut line = format!("{:<6}", row.hour.to_string());
        for activity in row.activities {
            let cell = format!("{:<CELL_WIDTH$}", activity.label());
            line.push(' ');
            line.push_str(&palette.activity(activity, cell));
        }
        writeln!(out, "{}", line.trim_end())?;
    }

    writeln!(out)?;
    for day in Day::ALL {
        let note = planner.day_note(day);
        if !note.is_empty() {
            writeln!(out, "{}: {note}", palette.heading(day.label()))?;
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
        trackers::{
            planner::{Activity, Planner},
            week::{Day, Hour},
        },
    };

    use super::{process_planner_command, PlannerCommand};

    #[test]
    fn test_cycle_and_show() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let clock = clock();
        let context = context(&storage, &clock);
        let hour = Hour::new_opt(8).unwrap();

        let mut out = vec![];
        for _ in 0..2 {
            process_planner_command(
                PlannerCommand::Cycle {
                    day: Day::Thursday,
                    hour,
                },
                &context,
                &mut out,
            )?;
        }
        process_planner_command(
            PlannerCommand::Note {
                day: Day::Thursday,
                text: vec!["Examen".into(), "final".into()],
            },
            &context,
            &mut out,
        )?;
        assert_eq!(
            output(out),
            "Jueves 08:00: Trabajo\nJueves 08:00: Estudio\nSaved note for Jueves\n"
        );

        let mut out = vec![];
        process_planner_command(PlannerCommand::Show, &context, &mut out)?;
        let printed = output(out);
        let lines = printed.lines().collect::<Vec<_>>();
        assert!(lines[0].starts_with("Hora"));
        assert!(lines[0].contains("Miércoles"));
        assert!(lines[3].starts_with("08:00"));
        assert!(lines[3].contains("Estudio"));
        assert!(printed.contains("Jueves: Examen final"));

        let planner = Planner::open(&storage)?;
        assert_eq!(planner.activity_at(Day::Thursday, hour), Activity::Study);
        Ok(())
    }

    #[test]
    fn test_note_without_text_prints_note() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let clock = clock();
        let context = context(&storage, &clock);

        let mut out = vec![];
        process_planner_command(
            PlannerCommand::Note {
                day: Day::Monday,
                text: vec![],
            },
            &context,
            &mut out,
        )?;

        assert_eq!(output(out), "No note for Lunes\n");
        Ok(())
    }
}
