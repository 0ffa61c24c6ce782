use std::io::Write;

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::{
    storage::slot::SlotStorage,
    trackers::{
        hobbies::{Hobbies, HobbyCategory, HobbyPatch},
        resolve_id, short_id,
    },
    utils::progress::{Progress, PROGRESS_STEP},
};

use super::Context;

#[derive(Debug, Subcommand)]
pub enum HobbyCommand {
    #[command(about = "List hobbies with their progress")]
    List,
    #[command(about = "Add a hobby")]
    Add {
        name: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = HobbyCategory::Other)]
        category: HobbyCategory,
    },
    #[command(about = "Change a hobby")]
    Edit {
        #[arg(help = "Hobby id or its prefix")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum)]
        category: Option<HobbyCategory>,
        #[arg(long)]
        notes: Option<String>,
    },
    #[command(about = "Increase progress by 10%")]
    Inc { id: String },
    #[command(about = "Decrease progress by 10%")]
    Dec { id: String },
    #[command(about = "Set progress to a value between 0 and 100")]
    Set {
        id: String,
        #[arg(help = "Progress such as 40 or 40%")]
        progress: Progress,
    },
    #[command(about = "Delete a hobby")]
    Delete { id: String },
}

pub fn process_hobby_command<S: SlotStorage + Clone>(
    command: HobbyCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut hobbies = Hobbies::open(context.storage.clone())?;
    let palette = context.palette;

    match command {
        HobbyCommand::List => {
            if hobbies.list().is_empty() {
                writeln!(out, "{}", palette.dim("No hobbies yet"))?;
            }
            for hobby in hobbies.list() {
                writeln!(
                    out,
                    "{} {} ({}) {} last: {}",
                    palette.dim(short_id(&hobby.id)),
                    hobby.name,
                    palette.category(hobby.category),
                    palette.progress(hobby.progress),
                    hobby.last_activity
                )?;
                if !hobby.notes.is_empty() {
                    writeln!(out, "    {}", hobby.notes)?;
                }
            }
        }
        HobbyCommand::Add { name, category } => {
            let Some(hobby) = hobbies.add(&name.join(" "), category, context.today())? else {
                bail!("Hobby name can't be empty");
            };
            writeln!(out, "Added {} [{}]", hobby.name, short_id(&hobby.id))?;
        }
        HobbyCommand::Edit {
            id,
            name,
            category,
            notes,
        } => {
            let id = resolve_id(hobbies.list(), &id)?;
            let patch = HobbyPatch {
                name,
                category,
                notes,
            };
            if hobbies.update(id, patch)? {
                writeln!(out, "Updated {}", short_id(&id))?;
            }
        }
        HobbyCommand::Inc { id } => adjust(&mut hobbies, &id, PROGRESS_STEP, context, out)?,
        HobbyCommand::Dec { id } => adjust(&mut hobbies, &id, -PROGRESS_STEP, context, out)?,
        HobbyCommand::Set { id, progress } => {
            let id = resolve_id(hobbies.list(), &id)?;
            if hobbies.set_progress(id, progress, context.today())? {
                writeln!(out, "{}", palette.progress(progress))?;
            }
        }
        HobbyCommand::Delete { id } => {
            let id = resolve_id(hobbies.list(), &id)?;
            if let Some(hobby) = hobbies.delete(id)? {
                writeln!(out, "Deleted {}", hobby.name)?;
            }
        }
    }
    Ok(())
}

fn adjust<S: SlotStorage>(
    hobbies: &mut Hobbies<S>,
    id: &str,
    delta: i32,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let id = resolve_id(hobbies.list(), id)?;
    if let Some(progress) = hobbies.adjust_progress(id, delta, context.today())? {
        writeln!(out, "{}", context.palette.progress(progress))?;
    }
    Ok(())
}
