use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::io::config_io;
use crate::io::persist::{self, LoadError, PersistenceError};
use crate::model::list_doc::ListDocument;

/// Recently opened list files: absolute path -> last-known snapshot.
///
/// Most recently used first. Only consulted at startup to reopen files; once
/// the real file is reloaded the snapshot is stale by definition.
pub type RecentFiles = IndexMap<String, ListDocument>;

/// Default cache path: next to config.toml
pub fn default_recent_path() -> PathBuf {
    config_io::config_dir().join("recent_files.json")
}

/// Read the cache. A missing file is empty; a corrupted one is backed up as
/// `.bak` and treated as empty.
pub fn read_recent_from(path: &Path) -> RecentFiles {
    match persist::read_json::<RecentFiles>(path) {
        Ok(mut recent) => {
            for doc in recent.values_mut() {
                doc.normalize();
            }
            recent
        }
        Err(LoadError::Missing(_)) => RecentFiles::new(),
        Err(e) => {
            let bak = persist::backup_corrupt(path);
            log::warn!(
                "could not read recent files ({}); backed up as {}",
                e,
                bak.map(|b| b.display().to_string())
                    .unwrap_or_else(|| "<none>".to_string())
            );
            RecentFiles::new()
        }
    }
}

pub fn write_recent_to(path: &Path, recent: &RecentFiles) -> Result<(), PersistenceError> {
    persist::write_json(path, recent)
}

/// Abbreviate a path by replacing $HOME with ~
pub fn abbreviate_path(path: &str) -> String {
    if let Ok(home) = std::env::var("HOME")
        && !home.is_empty()
        && let Some(rest) = path.strip_prefix(&home)
    {
        return format!("~{}", rest);
    }
    path.to_string()
}
