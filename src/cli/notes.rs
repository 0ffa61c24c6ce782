use std::io::Write;

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::{
    storage::slot::SlotStorage,
    trackers::{
        notes::{DailyNote, Notes},
        resolve_id, short_id,
    },
};

use super::{render::Palette, Context};

#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    #[command(about = "Print the full note of a day")]
    Show {
        #[arg(short, long, help = "Defaults to today")]
        date: Option<String>,
    },
    #[command(about = "Write the note of a day, replacing its content")]
    Write {
        #[arg(short, long, help = "Defaults to today")]
        date: Option<String>,
        content: Vec<String>,
    },
    #[command(about = "Delete a note")]
    Delete {
        #[arg(help = "Note id or its prefix")]
        id: String,
    },
    #[command(about = "Find notes by content or by a part of their YYYY-MM-DD date")]
    Search { term: String },
    #[command(about = "List every note, newest first")]
    List,
    #[command(about = "Count notes in total, this month and over the last 7 days")]
    Stats,
}

pub fn process_note_command<S: SlotStorage + Clone>(
    command: NoteCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut notes = Notes::open(context.storage.clone())?;
    let palette = context.palette;

    match command {
        NoteCommand::Show { date } => {
            let date = context.date(date.as_deref())?;
            match notes.note_for(date) {
                Some(note) => {
                    writeln!(out, "{}", palette.heading(date.to_string()))?;
                    writeln!(out, "{}", note.content)?;
                }
                None => writeln!(out, "{}", palette.dim(format!("No note for {date}")))?,
            }
        }
        NoteCommand::Write { date, content } => {
            let date = context.date(date.as_deref())?;
            let Some(note) = notes.save(date, &content.join(" "))? else {
                bail!("Note can't be empty");
            };
            writeln!(out, "Saved note for {} [{}]", note.date, short_id(&note.id))?;
        }
        NoteCommand::Delete { id } => {
            let id = resolve_id(notes.list(), &id)?;
            if let Some(note) = notes.delete(id)? {
                writeln!(out, "Deleted note of {}", note.date)?;
            }
        }
        NoteCommand::Search { term } => {
            let found = notes.search(&term);
            if found.is_empty() {
                writeln!(out, "{}", palette.dim(format!("Nothing matches {term:?}")))?;
            }
            for note in found {
                print_preview(note, palette, out)?;
            }
        }
        NoteCommand::List => {
            for note in notes.search("") {
                print_preview(note, palette, out)?;
            }
        }
        NoteCommand::Stats => {
            let stats = notes.stats(context.clock.time());
            writeln!(out, "Total: {}", stats.total)?;
            writeln!(out, "This month: {}", stats.this_month)?;
            writeln!(out, "This week: {}", stats.this_week)?;
        }
    }
    Ok(())
}

fn print_preview(note: &DailyNote, palette: Palette, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} {} {}",
        palette.dim(short_id(&note.id)),
        palette.heading(note.date.to_string()),
        note.preview().replace('\n', " ")
    )?;
    Ok(())
}
