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

use super::{new_id, week::Day, RecordId};

pub const WORKOUTS_SLOT: &str = "workouts";
pub const DIETS_SLOT: &str = "diets";

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: RecordId,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    pub completed: bool,
}

impl Exercise {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            weight: Some(0.),
            completed: false,
        }
    }
}

impl Keyed for Exercise {
    type Key = RecordId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

/// Partial update of an [Exercise]. Fields left as `None` are kept.
#[derive(Debug, Clone, Default)]
pub struct ExercisePatch {
    pub name: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub completed: Option<bool>,
}

impl ExercisePatch {
    fn apply(self, exercise: &mut Exercise) {
        if let Some(name) = self.name {
            exercise.name = name;
        }
        if let Some(sets) = self.sets {
            exercise.sets = sets;
        }
        if let Some(reps) = self.reps {
            exercise.reps = reps;
        }
        if let Some(weight) = self.weight {
            exercise.weight = Some(weight);
        }
        if let Some(completed) = self.completed {
            exercise.completed = completed;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: RecordId,
    pub day: Day,
    pub exercises: Vec<Exercise>,
    pub notes: String,
}

impl Workout {
    pub fn empty(day: Day) -> Self {
        Self {
            id: new_id(),
            day,
            exercises: vec![],
            notes: String::new(),
        }
    }
}

impl Keyed for Workout {
    type Key = Day;

    fn key(&self) -> Self::Key {
        self.day
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum MealType {
    #[serde(rename = "Desayuno")]
    #[value(alias = "desayuno")]
    Breakfast,
    #[serde(rename = "Almuerzo")]
    #[value(alias = "almuerzo")]
    Lunch,
    #[serde(rename = "Cena")]
    #[value(alias = "cena")]
    Dinner,
    #[serde(rename = "Snack")]
    Snack,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Desayuno",
            MealType::Lunch => "Almuerzo",
            MealType::Dinner => "Cena",
            MealType::Snack => "Snack",
        }
    }
}

impl Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: RecordId,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub description: String,
}

impl Keyed for Meal {
    type Key = RecordId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diet {
    pub id: RecordId,
    pub day: Day,
    pub meals: Vec<Meal>,
    pub notes: String,
}

impl Diet {
    pub fn empty(day: Day) -> Self {
        Self {
            id: new_id(),
            day,
            meals: vec![],
            notes: String::new(),
        }
    }

    /// Meals of the day grouped by type, in the order of [MealType::ALL].
    pub fn meals_by_type(&self) -> Vec<(MealType, Vec<&Meal>)> {
        MealType::ALL
            .into_iter()
            .map(|meal_type| {
                let meals = self
                    .meals
                    .iter()
                    .filter(|v| v.meal_type == meal_type)
                    .collect();
                (meal_type, meals)
            })
            .collect()
    }
}

impl Keyed for Diet {
    type Key = Day;

    fn key(&self) -> Self::Key {
        self.day
    }
}

/// Gym and diet log. Both are kept per day of the week, every change rewrites the whole day.
pub struct Fitness<S> {
    workouts: Binding<Vec<Workout>, S>,
    diets: Binding<Vec<Diet>, S>,
}

impl<S: SlotStorage + Clone> Fitness<S> {
    pub fn open(storage: S) -> Result<Self> {
        Ok(Self {
            workouts: Binding::bind(storage.clone(), WORKOUTS_SLOT, vec![])?,
            diets: Binding::bind(storage, DIETS_SLOT, vec![])?,
        })
    }
}

impl<S: SlotStorage> Fitness<S> {
    /// Stored workout of `day` or a fresh one. A fresh workout is not saved until it changes.
    pub fn workout_for(&self, day: Day) -> Workout {
        self.workouts
            .get()
            .find_key(&day)
            .cloned()
            .unwrap_or_else(|| Workout::empty(day))
    }

    pub fn diet_for(&self, day: Day) -> Diet {
        self.diets
            .get()
            .find_key(&day)
            .cloned()
            .unwrap_or_else(|| Diet::empty(day))
    }

    /// Saves `workout`, replacing the stored workout of the same day.
    pub fn update_workout(&mut self, workout: Workout) -> Result<()> {
        debug!("Saving workout of {}", workout.day);
        self.workouts.update(|prev| {
            let mut next = prev.clone();
            next.upsert(workout);
            next
        })?;
        Ok(())
    }

    pub fn update_diet(&mut self, diet: Diet) -> Result<()> {
        debug!("Saving diet of {}", diet.day);
        self.diets.update(|prev| {
            let mut next = prev.clone();
            next.upsert(diet);
            next
        })?;
        Ok(())
    }

    pub fn add_exercise(&mut self, day: Day, name: impl Into<String>) -> Result<Exercise> {
        let exercise = Exercise::new(name);
        let mut workout = self.workout_for(day);
        workout.exercises.push(exercise.clone());
        self.update_workout(workout)?;
        Ok(exercise)
    }

    /// Returns false if `day` has no exercise `id`.
    pub fn update_exercise(&mut self, day: Day, id: RecordId, patch: ExercisePatch) -> Result<bool> {
        let mut workout = self.workout_for(day);
        if !workout.exercises.modify_key(&id, |v| patch.apply(v)) {
            return Ok(false);
        }
        self.update_workout(workout)?;
        Ok(true)
    }

    /// Flips the completion mark. Returns the new mark, or `None` if there is no such exercise.
    pub fn toggle_exercise(&mut self, day: Day, id: RecordId) -> Result<Option<bool>> {
        let Some(completed) = self
            .workout_for(day)
            .exercises
            .find_key(&id)
            .map(|v| !v.completed)
        else {
            return Ok(None);
        };
        let patch = ExercisePatch {
            completed: Some(completed),
            ..Default::default()
        };
        self.update_exercise(day, id, patch)?;
        Ok(Some(completed))
    }

    pub fn remove_exercise(&mut self, day: Day, id: RecordId) -> Result<Option<Exercise>> {
        let mut workout = self.workout_for(day);
        let removed = workout.exercises.remove_key(&id);
        if removed.is_some() {
            self.update_workout(workout)?;
        }
        Ok(removed)
    }

    pub fn set_workout_notes(&mut self, day: Day, notes: impl Into<String>) -> Result<()> {
        let workout = Workout {
            notes: notes.into(),
            ..self.workout_for(day)
        };
        self.update_workout(workout)
    }

    pub fn add_meal(
        &mut self,
        day: Day,
        meal_type: MealType,
        description: impl Into<String>,
    ) -> Result<Meal> {
        let meal = Meal {
            id: new_id(),
            meal_type,
            description: description.into(),
        };
        let mut diet = self.diet_for(day);
        diet.meals.push(meal.clone());
        self.update_diet(diet)?;
        Ok(meal)
    }

    /// Returns false if `day` has no meal `id`.
    pub fn update_meal(
        &mut self,
        day: Day,
        id: RecordId,
        description: impl Into<String>,
    ) -> Result<bool> {
        let description = description.into();
        let mut diet = self.diet_for(day);
        if !diet.meals.modify_key(&id, |v| v.description = description) {
            return Ok(false);
        }
        self.update_diet(diet)?;
        Ok(true)
    }

    pub fn remove_meal(&mut self, day: Day, id: RecordId) -> Result<Option<Meal>> {
        let mut diet = self.diet_for(day);
        let removed = diet.meals.remove_key(&id);
        if removed.is_some() {
            self.update_diet(diet)?;
        }
        Ok(removed)
    }

    pub fn set_diet_notes(&mut self, day: Day, notes: impl Into<String>) -> Result<()> {
        let diet = Diet {
            notes: notes.into(),
            ..self.diet_for(day)
        };
        self.update_diet(diet)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        storage::slot::{MemorySlotStorage, SlotStorage},
        trackers::{new_id, week::Day},
    };

    use super::{ExercisePatch, Fitness, MealType, DIETS_SLOT, WORKOUTS_SLOT};

    #[test]
    fn test_fresh_day_is_not_persisted() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let fitness = Fitness::open(&storage)?;

        let workout = fitness.workout_for(Day::Monday);

        assert!(workout.exercises.is_empty());
        assert_eq!(storage.read(WORKOUTS_SLOT)?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn test_exercise_lifecycle() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut fitness = Fitness::open(&storage)?;

        let squat = fitness.add_exercise(Day::Monday, "Sentadilla")?;
        let press = fitness.add_exercise(Day::Monday, "Press banca")?;
        assert_eq!(squat.sets, 3);
        assert_eq!(squat.reps, 10);
        assert_eq!(squat.weight, Some(0.));

        let patch = ExercisePatch {
            sets: Some(5),
            weight: Some(82.5),
            ..Default::default()
        };
        assert!(fitness.update_exercise(Day::Monday, squat.id, patch)?);
        assert_eq!(fitness.toggle_exercise(Day::Monday, press.id)?, Some(true));
        assert_eq!(fitness.toggle_exercise(Day::Monday, new_id())?, None);

        let reloaded = Fitness::open(&storage)?;
        let workout = reloaded.workout_for(Day::Monday);
        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(workout.exercises[0].sets, 5);
        assert_eq!(workout.exercises[0].weight, Some(82.5));
        assert!(workout.exercises[1].completed);
        Ok(())
    }

    #[test]
    fn test_workout_is_upserted_by_day() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut fitness = Fitness::open(&storage)?;

        let first = fitness.add_exercise(Day::Friday, "Remo")?;
        fitness.add_exercise(Day::Friday, "Dominadas")?;
        fitness.set_workout_notes(Day::Friday, "Espalda")?;
        let workout_id = fitness.workout_for(Day::Friday).id;
        assert!(fitness.remove_exercise(Day::Friday, first.id)?.is_some());
        assert!(fitness.remove_exercise(Day::Friday, first.id)?.is_none());

        let reloaded = Fitness::open(&storage)?;
        let workout = reloaded.workout_for(Day::Friday);
        assert_eq!(workout.id, workout_id);
        assert_eq!(workout.notes, "Espalda");
        assert_eq!(workout.exercises.len(), 1);
        assert_eq!(workout.exercises[0].name, "Dominadas");

        let stored: serde_json::Value =
            serde_json::from_str(&storage.read(WORKOUTS_SLOT)?.unwrap())?;
        assert_eq!(stored.as_array().map(|v| v.len()), Some(1));
        Ok(())
    }

    #[test]
    fn test_meals() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut fitness = Fitness::open(&storage)?;

        let oats = fitness.add_meal(Day::Sunday, MealType::Breakfast, "Avena")?;
        fitness.add_meal(Day::Sunday, MealType::Dinner, "Sopa")?;
        fitness.add_meal(Day::Sunday, MealType::Breakfast, "Café")?;
        assert!(fitness.update_meal(Day::Sunday, oats.id, "Avena con fruta")?);
        assert!(!fitness.update_meal(Day::Monday, oats.id, "nope")?);
        fitness.set_diet_notes(Day::Sunday, "Poca sal")?;

        let reloaded = Fitness::open(&storage)?;
        let diet = reloaded.diet_for(Day::Sunday);
        let grouped = diet.meals_by_type();
        assert_eq!(grouped[0].0, MealType::Breakfast);
        assert_eq!(
            grouped[0].1.iter().map(|v| v.description.as_str()).collect::<Vec<_>>(),
            vec!["Avena con fruta", "Café"]
        );
        assert!(grouped[1].1.is_empty());
        assert_eq!(grouped[2].1.len(), 1);
        assert_eq!(diet.notes, "Poca sal");

        assert!(fitness.remove_meal(Day::Sunday, oats.id)?.is_some());
        assert_eq!(Fitness::open(&storage)?.diet_for(Day::Sunday).meals.len(), 2);
        Ok(())
    }

    #[test]
    fn test_meal_type_is_stored_as_type() -> Result<()> {
        let storage = MemorySlotStorage::new();
        let mut fitness = Fitness::open(&storage)?;
        fitness.add_meal(Day::Tuesday, MealType::Snack, "Fruta")?;

        let stored = storage.read(DIETS_SLOT)?.unwrap();
        assert!(stored.contains(r#""type":"Snack""#));
        assert!(stored.contains(r#""day":"Martes""#));
        Ok(())
    }
}
