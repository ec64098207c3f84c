//! Persisted set of favourite job ids.
//!
//! The set lives in memory and in a single JSON file holding an array of id
//! strings. Insertion order is kept for display. The only mutation is
//! [`FavouritesStore::toggle`], which writes the file before returning.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;

/// Favourite job ids backed by a JSON file.
#[derive(Debug)]
pub struct FavouritesStore {
    path: PathBuf,
    ids: Mutex<Vec<String>>,
}

impl FavouritesStore {
    /// Load the store from `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ids = match fs::read_to_string(&path) {
            Ok(raw) => dedup(serde_json::from_str::<Vec<String>>(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = ids.len(), "Loaded favourites");
        Ok(Self {
            path,
            ids: Mutex::new(ids),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add the id if absent, remove it if present. Returns the new membership.
    ///
    /// The change is persisted before this returns. If writing fails the
    /// in-memory set is restored and the error is returned.
    pub fn toggle(&self, id: &str) -> Result<bool> {
        let mut ids = self.lock();
        let previous = ids.clone();

        let now_favourite = match ids.iter().position(|existing| existing == id) {
            Some(idx) => {
                ids.remove(idx);
                false
            }
            None => {
                ids.push(id.to_string());
                true
            }
        };

        if let Err(e) = persist(&self.path, &ids) {
            tracing::warn!(id, error = %e, "Failed to persist favourites, rolling back");
            *ids = previous;
            return Err(e);
        }

        tracing::info!(id, favourite = now_favourite, "Toggled favourite");
        Ok(now_favourite)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.lock().iter().any(|existing| existing == id)
    }

    /// Snapshot of the ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

fn dedup(ids: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

/// Write the ids to a sibling temp file, then rename over the target.
fn persist(path: &Path, ids: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        serde_json::to_writer(&mut file, ids)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}
