use std::io::Write;

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::{
    storage::slot::SlotStorage,
    trackers::{
        projects::{ProjectPatch, ProjectStatus, Projects},
        resolve_id, short_id,
    },
    utils::progress::{Progress, PROGRESS_STEP},
};

use super::Context;

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    #[command(about = "Print the board, one column per status")]
    List {
        #[arg(short, long, value_enum, help = "Print a single column")]
        status: Option<ProjectStatus>,
    },
    #[command(about = "Add a project")]
    Add {
        name: Vec<String>,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, value_enum, default_value_t = ProjectStatus::Started)]
        status: ProjectStatus,
    },
    #[command(about = "Change a project")]
    Edit {
        #[arg(help = "Project id or its prefix")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        status: Option<ProjectStatus>,
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
    #[command(about = "Delete a project")]
    Delete { id: String },
}

pub fn process_project_command<S: SlotStorage + Clone>(
    command: ProjectCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut projects = Projects::open(context.storage.clone())?;
    let palette = context.palette;

    match command {
        ProjectCommand::List { status } => {
            let columns = match status {
                Some(status) => vec![(status, projects.by_status(status))],
                None => projects.board(),
            };
            for (status, column) in columns {
                writeln!(out, "{} ({})", palette.status(status), column.len())?;
                for project in column {
                    writeln!(
                        out,
                        "  {} {} {}",
                        palette.dim(short_id(&project.id)),
                        project.name,
                        palette.progress(project.progress)
                    )?;
                    if !project.description.is_empty() {
                        writeln!(out, "      {}", project.description)?;
                    }
                    if !project.notes.is_empty() {
                        writeln!(out, "      {}", palette.dim(&project.notes))?;
                    }
                }
            }
        }
        ProjectCommand::Add {
            name,
            description,
            status,
        } => {
            let name = name.join(" ");
            let Some(project) = projects.add(&name, &description, status, context.today())? else {
                bail!("Project name can't be empty");
            };
            writeln!(out, "Added {} [{}]", project.name, short_id(&project.id))?;
        }
        ProjectCommand::Edit {
            id,
            name,
            description,
            status,
            notes,
        } => {
            let id = resolve_id(projects.list(), &id)?;
            let patch = ProjectPatch {
                name,
                description,
                status,
                notes,
            };
            if projects.update(id, patch)? {
                writeln!(out, "Updated {}", short_id(&id))?;
            }
        }
        ProjectCommand::Inc { id } => adjust(&mut projects, &id, PROGRESS_STEP, context, out)?,
        ProjectCommand::Dec { id } => adjust(&mut projects, &id, -PROGRESS_STEP, context, out)?,
        ProjectCommand::Set { id, progress } => {
            let id = resolve_id(projects.list(), &id)?;
            if projects.set_progress(id, progress)? {
                writeln!(out, "{}", palette.progress(progress))?;
            }
        }
        ProjectCommand::Delete { id } => {
            let id = resolve_id(projects.list(), &id)?;
            if let Some(project) = projects.delete(id)? {
                writeln!(out, "Deleted {}", project.name)?;
            }
        }
    }
    Ok(())
}

fn adjust<S: SlotStorage>(
    projects: &mut Projects<S>,
    id: &str,
    delta: i32,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let id = resolve_id(projects.list(), id)?;
    if let Some(progress) = projects.adjust_progress(id, delta)? {
        writeln!(out, "{}", context.palette.progress(progress))?;
    }
    Ok(())
}
