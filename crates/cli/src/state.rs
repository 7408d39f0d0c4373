//! Snapshot file the CLI loads before and saves after each command.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use stowage::store::{MemoryStore, Snapshot};

/// A missing file is an empty warehouse.
pub fn load(path: &Path) -> Result<MemoryStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "state_missing_starting_empty");
        return Ok(MemoryStore::default());
    }
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_slice(&bytes)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    MemoryStore::from_snapshot(snapshot)
        .with_context(|| format!("loading snapshot {}", path.display()))
}

pub fn save(path: &Path, store: &MemoryStore) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating state dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(&store.snapshot())?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
