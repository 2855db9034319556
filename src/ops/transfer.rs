//! Plain-text import and export of list items.
//!
//! Import builds a fresh single-list document (`"1"`) from the non-blank lines
//! of a text file. Export writes one list, one item per line.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::io::persist;
use crate::model::list_doc::{DEFAULT_LIST, ListDocument};

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Each non-blank line, trimmed, becomes an item of list `"1"`. Trash is empty.
pub fn import_txt(text: &str) -> ListDocument {
    let items: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();
    let mut lists = IndexMap::new();
    lists.insert(DEFAULT_LIST.to_string(), items);
    ListDocument {
        lists,
        trash: Vec::new(),
    }
}

pub fn import_txt_file(path: &Path) -> Result<ListDocument, TransferError> {
    let text = std::fs::read_to_string(path).map_err(|e| TransferError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc = import_txt(&text);
    log::info!(
        "imported {} items from {}",
        doc.item_count(),
        path.display()
    );
    Ok(doc)
}

/// One item per line, newline-terminated
pub fn export_txt(items: &[String]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
    out
}

pub fn export_txt_file(path: &Path, items: &[String]) -> Result<(), TransferError> {
    persist::atomic_write(path, export_txt(items).as_bytes()).map_err(|e| TransferError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::info!("exported {} items to {}", items.len(), path.display());
    Ok(())
}
