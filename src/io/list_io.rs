use std::path::Path;

use crate::io::persist::{self, LoadError, PersistenceError};
use crate::model::list_doc::ListDocument;

/// Load a list document. Errors are returned: the caller asked for this file.
pub fn load_document(path: &Path) -> Result<ListDocument, LoadError> {
    let mut doc: ListDocument = persist::read_json(path)?;
    doc.normalize();
    Ok(doc)
}

/// Overwrite `path` with the whole document.
pub fn save_document(path: &Path, doc: &ListDocument) -> Result<(), PersistenceError> {
    persist::write_json(path, doc)
}
