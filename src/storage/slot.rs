use std::{
    cell::RefCell,
    collections::BTreeMap,
    fs::{self, File},
    io::{ErrorKind, Read, Seek, SeekFrom, Write},
    ops::Deref,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use fs4::fs_std::FileExt;
use tracing::{debug, trace};

const SLOT_EXTENSION: &str = "json";

/// Interface for abstracting durable key-value storage. Every slot holds one serialized payload
/// and is always read and written whole.
#[cfg_attr(test, mockall::automock)]
pub trait SlotStorage {
    /// Returns the payload stored under `key`, or `None` if the slot was never written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the payload stored under `key`.
    fn write(&self, key: &str, payload: &str) -> Result<()>;

    /// Clears a slot. Clearing a missing slot is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Lists slots that currently hold a payload.
    fn keys(&self) -> Result<Vec<String>>;
}

impl<T: Deref> SlotStorage for T
where
    T::Target: SlotStorage,
{
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.deref().read(key)
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.deref().write(key, payload)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.deref().remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.deref().keys()
    }
}

/// The main realization of [SlotStorage]. Each slot is a `<key>.json` file inside `slot_dir`.
pub struct FileSlotStorage {
    slot_dir: PathBuf,
}

impl FileSlotStorage {
    pub fn new(slot_dir: PathBuf) -> Result<Self, std::io::Error> {
        fs::create_dir_all(&slot_dir)?;

        Ok(Self { slot_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.slot_dir
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            bail!("Illegal slot name {key:?}");
        }
        Ok(self.slot_dir.join(key).with_extension(SLOT_EXTENSION))
    }

    fn overwrite(mut file: &File, payload: &str) -> std::io::Result<()> {
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(payload.as_bytes())?;
        file.sync_data()
    }
}

impl SlotStorage for FileSlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!("Slot {path:?} doesn't exist yet");
                return Ok(None);
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to open slot {path:?}")),
        };

        debug!("Reading {path:?}");
        FileExt::lock_shared(&file)?;
        let mut bytes = Vec::new();
        let result = file.read_to_end(&mut bytes);
        FileExt::unlock(&file)?;
        result.with_context(|| format!("Failed to read slot {path:?}"))?;

        // Invalid utf-8 is treated like any other corrupt payload by the caller.
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open slot {path:?} for writing"))?;

        debug!("Writing {} bytes into {path:?}", payload.len());
        FileExt::lock_exclusive(&file)?;
        let result = Self::overwrite(&file, payload);
        FileExt::unlock(&file)?;
        result.with_context(|| format!("Failed to write slot {path:?}"))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {path:?}");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove slot {path:?}")),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = vec![];
        for entry in fs::read_dir(&self.slot_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|v| v == SLOT_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    keys.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Keeps slots in memory only. Useful for tests and for throwaway sessions.
#[derive(Default)]
pub struct MemorySlotStorage {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStorage for MemorySlotStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_owned(), payload.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.slots.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, rc::Rc};

    use anyhow::Result;
    use tempfile::tempdir;

    use super::{FileSlotStorage, MemorySlotStorage, SlotStorage};

    #[test]
    fn test_file_storage_missing_slot() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileSlotStorage::new(dir.path().join("storage"))?;

        assert_eq!(storage.read("moods")?, None);
        assert!(storage.keys()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_file_storage_overwrites_whole_slot() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileSlotStorage::new(dir.path().to_owned())?;

        storage.write("hobbies", r#"[{"name":"a long payload that is overwritten"}]"#)?;
        storage.write("hobbies", "[]")?;

        assert_eq!(storage.read("hobbies")?.as_deref(), Some("[]"));
        assert_eq!(fs::read_to_string(dir.path().join("hobbies.json"))?, "[]");
        Ok(())
    }

    #[test]
    fn test_file_storage_survives_reopening() -> Result<()> {
        let dir = tempdir()?;
        {
            let storage = FileSlotStorage::new(dir.path().to_owned())?;
            storage.write("dailyNotes", "[1,2,3]")?;
            storage.write("moods", "[]")?;
        }

        let storage = FileSlotStorage::new(dir.path().to_owned())?;
        assert_eq!(storage.read("dailyNotes")?.as_deref(), Some("[1,2,3]"));
        assert_eq!(storage.keys()?, vec!["dailyNotes".to_string(), "moods".to_string()]);
        Ok(())
    }

    #[test]
    fn test_file_storage_remove() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileSlotStorage::new(dir.path().to_owned())?;

        storage.write("diets", "[]")?;
        storage.remove("diets")?;
        storage.remove("diets")?;

        assert_eq!(storage.read("diets")?, None);
        Ok(())
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileSlotStorage::new(dir.path().to_owned())?;

        assert!(storage.write("../escape", "[]").is_err());
        assert!(storage.read("").is_err());
        Ok(())
    }

    #[test]
    fn test_file_storage_invalid_utf8_is_returned_lossy() -> Result<()> {
        let dir = tempdir()?;
        let storage = FileSlotStorage::new(dir.path().to_owned())?;
        fs::write(dir.path().join("moods.json"), [0xff, 0xfe, b'[', b']'])?;

        let payload = storage.read("moods")?.unwrap();
        assert!(payload.ends_with("[]"));
        Ok(())
    }

    #[test]
    fn test_shared_handles_see_same_slots() -> Result<()> {
        let storage = Rc::new(MemorySlotStorage::new());
        let other = storage.clone();

        storage.write("timeBlocks", "[]")?;

        assert_eq!(other.read("timeBlocks")?.as_deref(), Some("[]"));
        assert_eq!((&*other).keys()?, vec!["timeBlocks".to_string()]);
        Ok(())
    }
}
