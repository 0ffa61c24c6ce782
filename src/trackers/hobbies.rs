use std::fmt::Display;

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    storage::{
        binding::Binding,
        keyed::{Keyed, KeyedCollection},
        slot::SlotStorage,
    },
    utils::progress::Progress,
};

use super::{new_id, RecordId};

pub const HOBBIES_SLOT: &str = "hobbies";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum HobbyCategory {
    #[serde(rename = "Pintar")]
    #[value(alias = "pintar")]
    Painting,
    #[serde(rename = "Leer")]
    #[value(alias = "leer")]
    Reading,
    #[serde(rename = "Bicicleta")]
    #[value(alias = "bicicleta")]
    Cycling,
    #[serde(rename = "Skin Care")]
    SkinCare,
    #[serde(rename = "Health Care")]
    HealthCare,
    #[default]
    #[serde(rename = "Otro")]
    #[value(alias = "otro")]
    Other,
}

impl HobbyCategory {
    pub fn label(&self) -> &'static str {
        match self {
            HobbyCategory::Painting => "Pintar",
            HobbyCategory::Reading => "Leer",
            HobbyCategory::Cycling => "Bicicleta",
            HobbyCategory::SkinCare => "Skin Care",
            HobbyCategory::HealthCare => "Health Care",
            HobbyCategory::Other => "Otro",
        }
    }
}

impl Display for HobbyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hobby {
    pub id: RecordId,
    pub name: String,
    pub category: HobbyCategory,
    pub progress: Progress,
    pub notes: String,
    /// Last day the progress was touched.
    pub last_activity: NaiveDate,
}

impl Keyed for Hobby {
    type Key = RecordId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct HobbyPatch {
    pub name: Option<String>,
    pub category: Option<HobbyCategory>,
    pub notes: Option<String>,
}

impl HobbyPatch {
    fn apply(self, hobby: &mut Hobby) {
        if let Some(name) = self.name {
            hobby.name = name;
        }
        if let Some(category) = self.category {
            hobby.category = category;
        }
        if let Some(notes) = self.notes {
            hobby.notes = notes;
        }
    }
}

pub struct Hobbies<S> {
    hobbies: Binding<Vec<Hobby>, S>,
}

impl<S: SlotStorage> Hobbies<S> {
    pub fn open(storage: S) -> Result<Self> {
        Ok(Self {
            hobbies: Binding::bind(storage, HOBBIES_SLOT, vec![])?,
        })
    }

    pub fn list(&self) -> &[Hobby] {
        self.hobbies.get()
    }

    pub fn get(&self, id: RecordId) -> Option<&Hobby> {
        self.hobbies.get().find_key(&id)
    }

    /// Appends a new hobby. A blank name is ignored and nothing is saved.
    pub fn add(
        &mut self,
        name: &str,
        category: HobbyCategory,
        today: NaiveDate,
    ) -> Result<Option<Hobby>> {
        if name.trim().is_empty() {
            debug!("Ignoring hobby without a name");
            return Ok(None);
        }
        let hobby = Hobby {
            id: new_id(),
            name: name.to_owned(),
            category,
            progress: Progress::default(),
            notes: String::new(),
            last_activity: today,
        };
        info!("Adding hobby {}", hobby.name);
        self.hobbies.update(|prev| {
            let mut next = prev.clone();
            next.push(hobby.clone());
            next
        })?;
        Ok(Some(hobby))
    }

    /// Returns false if there is no hobby `id`.
    pub fn update(&mut self, id: RecordId, patch: HobbyPatch) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.hobbies.update(|prev| {
            let mut next = prev.clone();
            next.modify_key(&id, |v| patch.apply(v));
            next
        })?;
        Ok(true)
    }

    pub fn delete(&mut self, id: RecordId) -> Result<Option<Hobby>> {
        let mut next = self.hobbies.get().clone();
        let removed = next.remove_key(&id);
        if removed.is_some() {
            self.hobbies.set(next)?;
        }
        Ok(removed)
    }

    /// Moves progress by `delta`, clamped to 0..=100, and marks `today` as the last activity.
    pub fn adjust_progress(
        &mut self,
        id: RecordId,
        delta: i32,
        today: NaiveDate,
    ) -> Result<Option<Progress>> {
        let Some(progress) = self.get(id).map(|v| v.progress.apply(delta)) else {
            return Ok(None);
        };
        self.set_progress(id, progress, today)?;
        Ok(Some(progress))
    }

    /// Replaces progress and marks `today` as the last activity. Returns false if there is no
    /// hobby `id`.
    pub fn set_progress(
        &mut self,
        id: RecordId,
        progress: Progress,
        today: NaiveDate,
    ) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.hobbies.update(|prev| {
            let mut next = prev.clone();
            next.modify_key(&id, |v| {
                v.progress = progress;
                v.last_activity = today;
            });
            next
        })?;
        Ok(true)
    }
}
