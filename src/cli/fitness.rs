use std::io::Write;

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::{
    storage::slot::SlotStorage,
    trackers::{
        fitness::{ExercisePatch, Fitness, MealType, Workout},
        resolve_id, short_id,
        week::Day,
    },
};

use super::Context;

#[derive(Debug, Subcommand)]
pub enum GymCommand {
    #[command(about = "Print the workout of a day")]
    Show {
        #[arg(value_enum, help = "Defaults to today")]
        day: Option<Day>,
    },
    #[command(about = "Add an exercise with 3 sets of 10 reps")]
    Add {
        #[arg(value_enum)]
        day: Day,
        name: Vec<String>,
    },
    #[command(about = "Change an exercise")]
    Edit {
        #[arg(value_enum)]
        day: Day,
        #[arg(help = "Exercise id or its prefix")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sets: Option<u32>,
        #[arg(long)]
        reps: Option<u32>,
        #[arg(long, help = "Weight in kg")]
        weight: Option<f64>,
    },
    #[command(about = "Toggle the completion mark of an exercise")]
    Done {
        #[arg(value_enum)]
        day: Day,
        id: String,
    },
    #[command(about = "Remove an exercise")]
    Remove {
        #[arg(value_enum)]
        day: Day,
        id: String,
    },
    #[command(about = "Replace the workout notes of a day")]
    Notes {
        #[arg(value_enum)]
        day: Day,
        text: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum DietCommand {
    #[command(about = "Print the meals of a day grouped by type")]
    Show {
        #[arg(value_enum, help = "Defaults to today")]
        day: Option<Day>,
    },
    #[command(about = "Add a meal")]
    Add {
        #[arg(value_enum)]
        day: Day,
        #[arg(value_enum)]
        meal_type: MealType,
        description: Vec<String>,
    },
    #[command(about = "Replace the description of a meal")]
    Edit {
        #[arg(value_enum)]
        day: Day,
        #[arg(help = "Meal id or its prefix")]
        id: String,
        description: Vec<String>,
    },
    #[command(about = "Remove a meal")]
    Remove {
        #[arg(value_enum)]
        day: Day,
        id: String,
    },
    #[command(about = "Replace the diet notes of a day")]
    Notes {
        #[arg(value_enum)]
        day: Day,
        text: Vec<String>,
    },
}

pub fn process_gym_command<S: SlotStorage + Clone>(
    command: GymCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut fitness = Fitness::open(context.storage.clone())?;

    match command {
        GymCommand::Show { day } => {
            let day = day.unwrap_or_else(|| Day::of(context.today()));
            print_workout(&fitness.workout_for(day), context, out)?;
        }
        GymCommand::Add { day, name } => {
            let name = name.join(" ");
            if name.trim().is_empty() {
                bail!("Exercise name can't be empty");
            }
            let exercise = fitness.add_exercise(day, name)?;
            writeln!(out, "Added {} [{}]", exercise.name, short_id(&exercise.id))?;
        }
        GymCommand::Edit {
            day,
            id,
            name,
            sets,
            reps,
            weight,
        } => {
            let id = resolve_id(&fitness.workout_for(day).exercises, &id)?;
            let patch = ExercisePatch {
                name,
                sets,
                reps,
                weight,
                completed: None,
            };
            if fitness.update_exercise(day, id, patch)? {
                writeln!(out, "Updated {}", short_id(&id))?;
            }
        }
        GymCommand::Done { day, id } => {
            let id = resolve_id(&fitness.workout_for(day).exercises, &id)?;
            if let Some(completed) = fitness.toggle_exercise(day, id)? {
                let mark = if completed { "done" } else { "pending" };
                writeln!(out, "{} is {mark}", short_id(&id))?;
            }
        }
        GymCommand::Remove { day, id } => {
            let id = resolve_id(&fitness.workout_for(day).exercises, &id)?;
            if let Some(exercise) = fitness.remove_exercise(day, id)? {
                writeln!(out, "Removed {}", exercise.name)?;
            }
        }
        GymCommand::Notes { day, text } => {
            fitness.set_workout_notes(day, text.join(" "))?;
            writeln!(out, "Saved workout notes for {day}")?;
        }
    }
    Ok(())
}

fn print_workout<S>(workout: &Workout, context: &Context<'_, S>, out: &mut impl Write) -> Result<()> {
    let palette = context.palette;
    let done = workout.exercises.iter().filter(|v| v.completed).count();
    writeln!(
        out,
        "{} {}",
        palette.heading(format!("Gym {}", workout.day)),
        palette.dim(format!("{done}/{}", workout.exercises.len()))
    )?;

    if workout.exercises.is_empty() {
        writeln!(out, "{}", palette.dim("No exercises"))?;
    }
    for exercise in &workout.exercises {
        let mark = if exercise.completed { "x" } else { " " };
        let weight = exercise
            .weight
            .filter(|v| *v > 0.)
            .map(|v| format!(" @ {v}kg"))
            .unwrap_or_default();
        writeln!(
            out,
            "[{mark}] {} {} {}x{}{weight}",
            palette.dim(short_id(&exercise.id)),
            exercise.name,
            exercise.sets,
            exercise.reps,
        )?;
    }
    if !workout.notes.is_empty() {
        writeln!(out, "Notes: {}", workout.notes)?;
    }
    Ok(())
}

pub fn process_diet_command<S: SlotStorage + Clone>(
    command: DietCommand,
    context: &Context<'_, S>,
    out: &mut impl Write,
) -> Result<()> {
    let mut fitness = Fitness::open(context.storage.clone())?;
    let palette = context.palette;

    match command {
        DietCommand::Show { day } => {
            let day = day.unwrap_or_else(|| Day::of(context.today()));
            let diet = fitness.diet_for(day);
            writeln!(out, "{}", palette.heading(format!("Dieta {day}")))?;
            for (meal_type, meals) in diet.meals_by_type() {
                writeln!(out, "{meal_type}:")?;
                if meals.is_empty() {
                    writeln!(out, "  {}", palette.dim("-"))?;
                }
                for meal in meals {
                    writeln!(
                        out,
                        "  {} {}",
                        palette.dim(short_id(&meal.id)),
                        meal.description
                    )?;
                }
            }
            if !diet.notes.is_empty() {
                writeln!(out, "Notes: {}", diet.notes)?;
            }
        }
        DietCommand::Add {
            day,
            meal_type,
            description,
        } => {
            let meal = fitness.add_meal(day, meal_type, description.join(" "))?;
            writeln!(out, "Added {} [{}]", meal.meal_type, short_id(&meal.id))?;
        }
        DietCommand::Edit {
            day,
            id,
            description,
        } => {
            let id = resolve_id(&fitness.diet_for(day).meals, &id)?;
            if fitness.update_meal(day, id, description.join(" "))? {
                writeln!(out, "Updated {}", short_id(&id))?;
            }
        }
        DietCommand::Remove { day, id } => {
            let id = resolve_id(&fitness.diet_for(day).meals, &id)?;
            if let Some(meal) = fitness.remove_meal(day, id)? {
                writeln!(out, "Removed {}", meal.meal_type)?;
            }
        }
        DietCommand::Notes { day, text } => {
            fitness.set_diet_notes(day, text.join(" "))?;
            writeln!(out, "Saved diet notes for {day}")?;
        }
    }
    Ok(())
}
