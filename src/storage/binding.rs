use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use super::slot::SlotStorage;

/// A value mirrored into a single storage slot. Reads are served from memory, every change is
/// written through to the storage before the call returns.
///
/// The in-memory value is always the last value passed to [Binding::set] or [Binding::update],
/// or the loaded value if there were no changes yet.
pub struct Binding<T, S> {
    storage: S,
    key: String,
    value: T,
}

impl<T, S> Binding<T, S>
where
    T: Serialize + DeserializeOwned,
    S: SlotStorage,
{
    /// Acquires the slot `key`. A parseable payload becomes the current value. Otherwise
    /// `default` is used and immediately written into the slot. An unreadable payload is only
    /// logged, it never reaches the caller as an error.
    #[instrument(level = "debug", skip_all, fields(key = %key.as_ref()))]
    pub fn bind(storage: S, key: impl AsRef<str>, default: T) -> Result<Self> {
        let key = key.as_ref().to_owned();
        let loaded = match storage.read(&key)? {
            Some(payload) => match serde_json::from_str::<T>(&payload) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Slot {key} holds an illegal payload, falling back to default: {e}");
                    None
                }
            },
            None => None,
        };

        match loaded {
            Some(value) => {
                debug!("Loaded slot {key}");
                Ok(Self {
                    storage,
                    key,
                    value,
                })
            }
            None => {
                let binding = Self {
                    storage,
                    key,
                    value: default,
                };
                binding.persist()?;
                Ok(binding)
            }
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the current value and writes it into the slot.
    pub fn set(&mut self, value: T) -> Result<&T> {
        self.value = value;
        self.persist()?;
        Ok(&self.value)
    }

    /// Computes the next value from the previous one and writes it into the slot.
    pub fn update(&mut self, next: impl FnOnce(&T) -> T) -> Result<&T> {
        let value = next(&self.value);
        self.set(value)
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.value)
            .with_context(|| format!("Failed to serialize slot {}", self.key))?;
        self.storage.write(&self.key, &payload)
    }
}
