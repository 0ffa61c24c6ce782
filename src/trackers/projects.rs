use std::fmt::Display;

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    storage::{
        binding::Binding,
        keyed::{Keyed, KeyedCollection},
        slot::SlotStorage,
    },
    utils::progress::Progress,
};

use super::{new_id, RecordId};

pub const PROJECTS_SLOT: &str = "personalProjects";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
pub enum ProjectStatus {
    #[default]
    #[serde(rename = "Inicio")]
    #[value(alias = "inicio")]
    Started,
    #[serde(rename = "En Progreso")]
    #[value(alias = "en-progreso")]
    InProgress,
    #[serde(rename = "Avanzado")]
    #[value(alias = "avanzado")]
    Advanced,
    #[serde(rename = "Completado")]
    #[value(alias = "completado")]
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Started,
        ProjectStatus::InProgress,
        ProjectStatus::Advanced,
        ProjectStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Started => "Inicio",
            ProjectStatus::InProgress => "En Progreso",
            ProjectStatus::Advanced => "Avanzado",
            ProjectStatus::Completed => "Completado",
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalProject {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub progress: Progress,
    pub notes: String,
    pub created_at: NaiveDate,
}

impl Keyed for PersonalProject {
    type Key = RecordId;

    fn key(&self) -> Self::Key {
        self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub notes: Option<String>,
}

impl ProjectPatch {
    fn apply(self, project: &mut PersonalProject) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(notes) = self.notes {
            project.notes = notes;
        }
    }
}

pub struct Projects<S> {
    projects: Binding<Vec<PersonalProject>, S>,
}

impl<S: SlotStorage> Projects<S> {
    pub fn open(storage: S) -> Result<Self> {
        Ok(Self {
            projects: Binding::bind(storage, PROJECTS_SLOT, vec![])?,
        })
    }

    pub fn list(&self) -> &[PersonalProject] {
        self.projects.get()
    }

    pub fn get(&self, id: RecordId) -> Option<&PersonalProject> {
        self.projects.get().find_key(&id)
    }

    /// Appends a new project. A blank name is ignored and nothing is saved.
    pub fn add(
        &mut self,
        name: &str,
        description: &str,
        status: ProjectStatus,
        today: NaiveDate,
    ) -> Result<Option<PersonalProject>> {
        if name.trim().is_empty() {
            return Ok(None);
        }
        let project = PersonalProject {
            id: new_id(),
            name: name.to_owned(),
            description: description.to_owned(),
            status,
            progress: Progress::default(),
            notes: String::new(),
            created_at: today,
        };
        info!("Adding project {}", project.name);
        self.projects.update(|prev| {
            let mut next = prev.clone();
            next.push(project.clone());
            next
        })?;
        Ok(Some(project))
    }

    /// Returns false if there is no project `id`.
    pub fn update(&mut self, id: RecordId, patch: ProjectPatch) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.projects.update(|prev| {
            let mut next = prev.clone();
            next.modify_key(&id, |v| patch.apply(v));
            next
        })?;
        Ok(true)
    }

    pub fn delete(&mut self, id: RecordId) -> Result<Option<PersonalProject>> {
        let mut next = self.projects.get().clone();
        let removed = next.remove_key(&id);
        if removed.is_some() {
            self.projects.set(next)?;
        }
        Ok(removed)
    }

    /// Moves progress by `delta`, clamped to 0..=100. Status is left to the user.
    pub fn adjust_progress(&mut self, id: RecordId, delta: i32) -> Result<Option<Progress>> {
        let Some(progress) = self.get(id).map(|v| v.progress.apply(delta)) else {
            return Ok(None);
        };
        self.set_progress(id, progress)?;
        Ok(Some(progress))
    }

    /// Returns false if there is no project `id`.
    pub fn set_progress(&mut self, id: RecordId, progress: Progress) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.projects.update(|prev| {
            let mut next = prev.clone();
            next.modify_key(&id, |v| v.progress = progress);
            next
        })?;
        Ok(true)
    }

    pub fn by_status(&self, status: ProjectStatus) -> Vec<&PersonalProject> {
        self.projects
            .get()
            .iter()
            .filter(|v| v.status == status)
            .collect()
    }

    /// Every status column with its projects, in the order of [ProjectStatus::ALL].
    pub fn board(&self) -> Vec<(ProjectStatus, Vec<&PersonalProject>)> {
        ProjectStatus::ALL
            .into_iter()
            .map(|status| (status, self.by_status(status)))
            .collect()
    }
}
