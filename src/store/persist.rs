//! On-disk persistence for the game store.
//!
//! The whole store is one JSON document, overwritten at the end of every
//! run. A missing file is the first run and yields an empty store; any
//! other read or parse failure is fatal and propagates to the caller.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::Store;

/// Default store path (~/.local/share/consoletrack/games.json or platform
/// equivalent).
pub fn default_store_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let data_dir = directories::ProjectDirs::from("", "", "consoletrack")
        .ok_or("Could not determine data directory")?
        .data_dir()
        .to_path_buf();

    std::fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join("games.json"))
}

pub fn load(path: &Path) -> Result<Store, Box<dyn std::error::Error>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Store::new()),
        Err(e) => return Err(e.into()),
    };

    let store: Store = serde_json::from_slice(&bytes)?;

    // a hand-edited or truncated document can break the non-empty-history
    // invariant that the rest of the crate leans on; refuse to load it
    for game in store.games() {
        if game.states().is_empty() {
            return Err(format!("store entry '{}' has no recorded states", game.title).into());
        }
    }

    Ok(store)
}

pub fn save(path: &Path, store: &Store) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let bytes = serde_json::to_vec_pretty(store)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
