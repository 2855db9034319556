use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Error writing a document to disk. The in-memory state is unaffected.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not serialize {path}: {source}")]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Error reading a document from disk
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    Missing(PathBuf),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Serialize `value` as pretty JSON and replace the whole file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistenceError> {
    let mut content = serde_json::to_string_pretty(value).map_err(|e| PersistenceError::Serialize {
        path: path.to_path_buf(),
        source: e,
    })?;
    content.push('\n');
    atomic_write(path, content.as_bytes()).map_err(|e| PersistenceError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Read and parse a JSON document. A missing file is `LoadError::Missing`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::Missing(path.to_path_buf()));
        }
        Err(e) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    serde_json::from_str(&content).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy an unreadable file aside as `<name>.bak` so the next save doesn't lose it.
pub fn backup_corrupt(path: &Path) -> Option<PathBuf> {
    let mut name = path.file_name()?.to_os_string();
    name.push(".bak");
    let bak = path.with_file_name(name);
    match fs::copy(path, &bak) {
        Ok(_) => Some(bak),
        Err(e) => {
            log::warn!("could not back up {}: {}", path.display(), e);
            None
        }
    }
}
