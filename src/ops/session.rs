use std::path::{Path, PathBuf};

use crate::io::persist::{LoadError, PersistenceError};
use crate::io::recent::{self, RecentFiles};
use crate::model::list_doc::ListDocument;
use crate::ops::list_ops::ListCollection;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("{0} is not open")]
    NotOpen(String),
    #[error("could not resolve path {path}: {source}")]
    BadPath {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Several list files open at once, one of them active.
///
/// The open set is mirrored into the recent-files cache (absolute path ->
/// snapshot, most recently used first) after every open, switch, save and
/// close, so the next start picks up where this one left off.
#[derive(Debug)]
pub struct MultiFileSession {
    recent_path: PathBuf,
    open_files: RecentFiles,
    active: ListCollection,
}

impl MultiFileSession {
    /// Start from the cache at `recent_path`.
    ///
    /// Entries whose file no longer exists are dropped. The most recent
    /// remaining file becomes active, reloaded from disk; its snapshot is used
    /// only if the reload fails. With nothing left, a fresh unsaved document
    /// is active.
    pub fn restore(recent_path: impl Into<PathBuf>) -> Self {
        let recent_path = recent_path.into();
        let mut open_files = recent::read_recent_from(&recent_path);
        let before = open_files.len();
        open_files.retain(|path, _| Path::new(path).exists());
        if open_files.len() != before {
            log::info!(
                "dropped {} missing file(s) from the recent list",
                before - open_files.len()
            );
        }

        let active = match open_files.first() {
            Some((path, snapshot)) => load_or_snapshot(path, snapshot),
            None => ListCollection::unsaved(),
        };
        let session = MultiFileSession {
            recent_path,
            open_files,
            active,
        };
        if session.open_files.len() != before {
            session.write_cache();
        }
        session
    }

    pub fn active(&self) -> &ListCollection {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ListCollection {
        &mut self.active
    }

    /// Absolute path of the active file, if it has one
    pub fn active_path(&self) -> Option<&Path> {
        self.active.path()
    }

    /// Open files, most recently used first
    pub fn open_files(&self) -> impl Iterator<Item = &str> {
        self.open_files.keys().map(|k| k.as_str())
    }

    pub fn is_open(&self, path: &Path) -> bool {
        key_for(path).is_ok_and(|k| self.open_files.contains_key(&k))
    }

    /// Open `path` and make it active. A file that is already open is
    /// switched to instead of being reloaded.
    pub fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        let key = key_for(path)?;
        if self.open_files.contains_key(&key) {
            log::debug!("{} already open, switching", key);
            return self.switch(path);
        }
        let incoming = ListCollection::open(&key)?;
        self.stash_active()?;
        self.open_files
            .shift_insert(0, key.clone(), incoming.document().clone());
        self.active = incoming;
        log::info!("opened {}", key);
        self.write_cache();
        Ok(())
    }

    /// Make an already-open file active. The outgoing file is saved first.
    pub fn switch(&mut self, path: &Path) -> Result<(), SessionError> {
        let key = key_for(path)?;
        let Some(snapshot) = self.open_files.get(&key).cloned() else {
            return Err(SessionError::NotOpen(key));
        };
        if self.active_key().as_deref() == Some(key.as_str()) {
            return Ok(());
        }
        self.stash_active()?;
        self.active = load_or_snapshot(&key, &snapshot);
        self.promote(&key);
        log::info!("switched to {}", key);
        self.write_cache();
        Ok(())
    }

    /// Close an open file. Closing the active file activates the next open
    /// one, or a fresh unsaved document when none remain.
    pub fn close(&mut self, path: &Path) -> Result<(), SessionError> {
        let key = key_for(path)?;
        if !self.open_files.contains_key(&key) {
            return Err(SessionError::NotOpen(key));
        }
        let closing_active = self.active_key().as_deref() == Some(key.as_str());
        if closing_active {
            self.active.save()?;
        }
        self.open_files.shift_remove(&key);
        if closing_active {
            self.active = match self.open_files.first() {
                Some((next, snapshot)) => load_or_snapshot(next, snapshot),
                None => ListCollection::unsaved(),
            };
        }
        log::info!("closed {}", key);
        self.write_cache();
        Ok(())
    }

    /// Write the active document to `path`, make that its backing file and
    /// add it to the open set.
    pub fn save_as(&mut self, path: &Path) -> Result<(), SessionError> {
        let key = key_for(path)?;
        self.active.set_path(Some(PathBuf::from(&key)));
        self.active.save()?;
        self.open_files.shift_remove(&key);
        self.open_files
            .shift_insert(0, key.clone(), self.active.document().clone());
        log::info!("saved as {}", key);
        self.write_cache();
        Ok(())
    }

    /// Stash the active file and start a fresh unsaved `{"1": []}` document.
    pub fn new_file(&mut self) -> Result<(), SessionError> {
        self.stash_active()?;
        self.active = ListCollection::unsaved();
        Ok(())
    }

    /// Replace the active document wholesale (e.g. after a text import). The
    /// result has no backing file until `save_as`.
    pub fn replace_active(&mut self, doc: ListDocument) -> Result<(), SessionError> {
        self.stash_active()?;
        self.active = ListCollection::new(doc, None);
        Ok(())
    }

    /// Refresh the active file's snapshot and rewrite the cache. Call after
    /// mutating through `active_mut`.
    pub fn sync_active(&mut self) {
        if let Some(key) = self.active_key()
            && let Some(slot) = self.open_files.get_mut(&key)
        {
            *slot = self.active.document().clone();
            self.write_cache();
        }
    }

    fn active_key(&self) -> Option<String> {
        self.active.path().map(|p| p.to_string_lossy().into_owned())
    }

    /// Save the outgoing active file and snapshot it into the open set.
    fn stash_active(&mut self) -> Result<(), SessionError> {
        self.active.save()?;
        if let Some(key) = self.active_key()
            && let Some(slot) = self.open_files.get_mut(&key)
        {
            *slot = self.active.document().clone();
        }
        Ok(())
    }

    fn promote(&mut self, key: &str) {
        if let Some(index) = self.open_files.get_index_of(key) {
            self.open_files.move_index(index, 0);
        }
    }

    /// Cache write failures are logged; the cache is advisory.
    fn write_cache(&self) {
        if let Err(e) = recent::write_recent_to(&self.recent_path, &self.open_files) {
            log::warn!("could not update recent files: {}", e);
        }
    }
}

fn key_for(path: &Path) -> Result<String, SessionError> {
    let abs = std::path::absolute(path).map_err(|e| SessionError::BadPath {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(abs.to_string_lossy().into_owned())
}

fn load_or_snapshot(path: &str, snapshot: &ListDocument) -> ListCollection {
    match ListCollection::open(path) {
        Ok(collection) => collection,
        Err(e) => {
            log::warn!("could not reload {} ({}); using cached copy", path, e);
            ListCollection::new(snapshot.clone(), Some(PathBuf::from(path)))
        }
    }
}
