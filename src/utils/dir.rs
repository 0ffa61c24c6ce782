use std::{env, io, path::PathBuf};

use anyhow::{Context, Result};

pub const APPLICATION_DIR_NAME: &str = "lifeplanner";

/// Resolves the directory where lifeplanner keeps its data. On Windows this is `%APPDATA%`,
/// elsewhere `$XDG_STATE_HOME` or `$HOME/.local/state`.
pub fn create_application_default_path() -> Result<PathBuf> {
    let mut path = platform_state_dir()?;
    path.push(APPLICATION_DIR_NAME);
    ensure_dir(path)
}

fn platform_state_dir() -> Result<PathBuf> {
    cfg_if::cfg_if! {
        if #[cfg(windows)] {
            env::var("APPDATA")
                .map(PathBuf::from)
                .context("APPDATA should be present on Windows")
        } else {
            env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .context("Couldn't find neither XDG_STATE_HOME nor HOME")
        }
    }
}

/// Creates `path` with all of its parents.
pub fn ensure_dir(path: PathBuf) -> Result<PathBuf> {
    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v).with_context(|| format!("Failed to create {path:?}")),
    }
}
