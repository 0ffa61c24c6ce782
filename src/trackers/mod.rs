//! The six trackers. Each tracker is a handle over its own storage slots and never talks to the
//! other trackers. All of them follow the same shape: bind collections on `open`, expose read
//! accessors, and turn every mutation into a whole-collection update of a [Binding].
//!
//! [Binding]: crate::storage::binding::Binding

pub mod fitness;
pub mod hobbies;
pub mod mood;
pub mod notes;
pub mod planner;
pub mod projects;
pub mod week;

use anyhow::{bail, Result};
use uuid::Uuid;

use crate::storage::keyed::Keyed;

/// Identifier of records that have no natural key.
pub type RecordId = Uuid;

pub fn new_id() -> RecordId {
    Uuid::new_v4()
}

/// Every slot used by the trackers.
pub const ALL_SLOTS: [&str; 8] = [
    planner::TIME_BLOCKS_SLOT,
    planner::DAY_NOTES_SLOT,
    mood::MOODS_SLOT,
    fitness::WORKOUTS_SLOT,
    fitness::DIETS_SLOT,
    hobbies::HOBBIES_SLOT,
    projects::PROJECTS_SLOT,
    notes::DAILY_NOTES_SLOT,
];

/// Finds the id of the single record whose id starts with `prefix`. Dashes are optional, so both
/// the short form printed by the cli and a full id work.
pub fn resolve_id<'a, T>(records: impl IntoIterator<Item = &'a T>, prefix: &str) -> Result<RecordId>
where
    T: Keyed<Key = RecordId> + 'a,
{
    let prefix = prefix.trim().replace('-', "").to_lowercase();
    if prefix.is_empty() {
        bail!("Id can't be empty");
    }

    let mut matches = records
        .into_iter()
        .map(Keyed::key)
        .filter(|id| id.simple().to_string().starts_with(&prefix));

    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id),
        (Some(_), Some(_)) => bail!("Id {prefix} is ambiguous, type more characters"),
        (None, _) => bail!("Nothing matches id {prefix}"),
    }
}

/// Short form of an id used in listings.
pub fn short_id(id: &RecordId) -> String {
    id.simple().to_string()[..8].to_string()
}
