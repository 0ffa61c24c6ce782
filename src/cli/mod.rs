pub mod dates;
pub mod fitness;
pub mod hobbies;
pub mod mood;
pub mod notes;
pub mod planner;
pub mod projects;
pub mod render;

use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dates::{parse_date, DateStyle};
use fitness::{process_diet_command, process_gym_command, DietCommand, GymCommand};
use hobbies::{process_hobby_command, HobbyCommand};
use mood::{process_mood_command, MoodCommand};
use notes::{process_note_command, NoteCommand};
use planner::{process_planner_command, PlannerCommand};
use projects::{process_project_command, ProjectCommand};
use render::Palette;
use tracing::info;

use crate::{
    storage::slot::{FileSlotStorage, SlotStorage},
    trackers::ALL_SLOTS,
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::enable_logging,
    },
};

#[derive(Parser, Debug)]
#[command(name = "LifePlanner", version, long_about = None)]
#[command(about = "Weekly planner, mood, gym, hobby, project and note tracking", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        env = "LIFEPLANNER_DIR",
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print trace logs to stderr")]
    log: bool,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Weekly schedule and day notes")]
    Planner {
        #[command(subcommand)]
        command: PlannerCommand,
    },
    #[command(about = "Daily mood log")]
    Mood {
        #[command(subcommand)]
        command: MoodCommand,
    },
    #[command(about = "Workouts per day of the week")]
    Gym {
        #[command(subcommand)]
        command: GymCommand,
    },
    #[command(about = "Meals per day of the week")]
    Diet {
        #[command(subcommand)]
        command: DietCommand,
    },
    #[command(about = "Hobby progress")]
    Hobby {
        #[command(subcommand)]
        command: HobbyCommand,
    },
    #[command(about = "Personal projects board")]
    Project {
        #[command(subcommand)]
        command: ProjectCommand,
    },
    #[command(about = "Daily notes")]
    Note {
        #[command(subcommand)]
        command: NoteCommand,
    },
    #[command(about = "Clear stored data of a tracker collection")]
    Reset {
        #[arg(help = "Collection to clear, e.g. moods or dailyNotes")]
        slot: Option<String>,
        #[arg(long, conflicts_with = "slot", help = "Clear every collection")]
        all: bool,
    },
}

/// Everything a command needs besides its own arguments.
pub struct Context<'a, S> {
    pub storage: S,
    pub clock: &'a dyn Clock,
    pub date_style: DateStyle,
    pub palette: Palette,
}

impl<S> Context<'_, S> {
    pub fn date(&self, input: Option<&str>) -> Result<NaiveDate> {
        parse_date(input, self.clock.time(), self.date_style)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = args
        .dir
        .map_or_else(create_application_default_path, ensure_dir)?;

    enable_logging(&app_dir.join("logs"), args.log)?;

    let storage = FileSlotStorage::new(app_dir.join("storage"))?;
    info!("Using storage in {:?}", storage.dir());

    let stdout = io::stdout();
    let context = Context {
        storage: &storage,
        clock: &DefaultClock,
        date_style: args.date_style,
        palette: Palette::new(stdout.is_terminal()),
    };
    let mut out = stdout.lock();

    match args.commands {
        Commands::Planner { command } => process_planner_command(command, &context, &mut out),
        Commands::Mood { command } => process_mood_command(command, &context, &mut out),
        Commands::Gym { command } => process_gym_command(command, &context, &mut out),
        Commands::Diet { command } => process_diet_command(command, &context, &mut out),
        Commands::Hobby { command } => process_hobby_command(command, &context, &mut out),
        Commands::Project { command } => process_project_command(command, &context, &mut out),
        Commands::Note { command } => process_note_command(command, &context, &mut out),
        Commands::Reset { slot, all } => reset_slots(&storage, slot, all, &mut out),
    }
}

/// Drops stored collections. Trackers start from their defaults the next time they are opened.
pub fn reset_slots(
    storage: &impl SlotStorage,
    slot: Option<String>,
    all: bool,
    out: &mut impl Write,
) -> Result<()> {
    let slots = match (slot, all) {
        (_, true) => ALL_SLOTS.to_vec(),
        (Some(slot), false) => match ALL_SLOTS.iter().find(|v| **v == slot) {
            Some(slot) => vec![*slot],
            None => bail!(
                "Unknown collection {slot:?}, expected one of {}",
                ALL_SLOTS.join(", ")
            ),
        },
        (None, false) => bail!("Specify a collection or --all"),
    };

    for slot in slots {
        storage.remove(slot)?;
        info!("Cleared {slot}");
        writeln!(out, "Cleared {slot}")?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Local, TimeZone};

    use crate::{storage::slot::MemorySlotStorage, utils::clock::FixedClock};

    use super::{dates::DateStyle, render::Palette, Context};

    /// Wednesday, 2024-05-15 at noon.
    pub fn clock() -> FixedClock {
        FixedClock(Local.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap())
    }

    pub fn context<'a>(
        storage: &'a MemorySlotStorage,
        clock: &'a FixedClock,
    ) -> Context<'a, &'a MemorySlotStorage> {
        Context {
            storage,
            clock,
            date_style: DateStyle::Uk,
            palette: Palette::plain(),
        }
    }

    pub fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }
}
