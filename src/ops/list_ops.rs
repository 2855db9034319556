use std::path::{Path, PathBuf};

use crate::io::list_io;
use crate::io::persist::{LoadError, PersistenceError};
use crate::model::list_doc::{BULK_REMOVAL_INDEX, ListDocument, TrashEntry};

/// Error type for list collection operations
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("a list named '{0}' already exists")]
    DuplicateName(String),
    #[error("cannot delete '{0}': it is the only list")]
    LastList(String),
    #[error("list not found: {0}")]
    NotFound(String),
    #[error("list '{list}' has no item at index {index}")]
    IndexOutOfRange { list: String, index: usize },
    #[error("trash has no entry at index {0}")]
    TrashIndexOutOfRange(usize),
    #[error("list name cannot be blank")]
    BlankName,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// One step up or down within a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn offset(self) -> isize {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
        }
    }
}

/// A list document plus the file it writes through to.
///
/// Every mutating operation validates first, mutates, then saves. Without a
/// backing file (fresh or just-imported documents) the save step is skipped.
#[derive(Debug, Clone)]
pub struct ListCollection {
    doc: ListDocument,
    path: Option<PathBuf>,
}

impl ListCollection {
    pub fn new(mut doc: ListDocument, path: Option<PathBuf>) -> Self {
        doc.normalize();
        ListCollection { doc, path }
    }

    /// A fresh `{"1": []}` document with no backing file
    pub fn unsaved() -> Self {
        ListCollection::new(ListDocument::default(), None)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let doc = list_io::load_document(path)?;
        Ok(ListCollection::new(doc, Some(path.to_path_buf())))
    }

    pub fn document(&self) -> &ListDocument {
        &self.doc
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    pub fn items(&self, list_name: &str) -> Result<&[String], ListError> {
        self.doc
            .list(list_name)
            .ok_or_else(|| ListError::NotFound(list_name.to_string()))
    }

    pub fn trash(&self) -> &[TrashEntry] {
        &self.doc.trash
    }

    /// Write the whole document to the backing file, if there is one.
    pub fn save(&self) -> Result<(), PersistenceError> {
        match &self.path {
            Some(path) => list_io::save_document(path, &self.doc),
            None => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    pub fn add_list(&mut self, name: &str) -> Result<(), ListError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ListError::BlankName);
        }
        if self.doc.lists.contains_key(name) {
            return Err(ListError::DuplicateName(name.to_string()));
        }
        self.doc.lists.insert(name.to_string(), Vec::new());
        log::debug!("added list '{}'", name);
        self.save()?;
        Ok(())
    }

    /// Delete a list, moving all its items to trash as a bulk removal.
    pub fn delete_list(&mut self, name: &str) -> Result<(), ListError> {
        if !self.doc.lists.contains_key(name) {
            return Err(ListError::NotFound(name.to_string()));
        }
        if self.doc.lists.len() <= 1 {
            return Err(ListError::LastList(name.to_string()));
        }
        let items = self.doc.lists.shift_remove(name).unwrap_or_default();
        let count = items.len();
        self.doc.trash.extend(items.into_iter().map(|item| TrashEntry {
            item,
            original_list: Some(name.to_string()),
            original_index: BULK_REMOVAL_INDEX,
        }));
        log::debug!("deleted list '{}' ({} items to trash)", name, count);
        self.save()?;
        Ok(())
    }

    /// Rename a list in place, keeping its items and its position among the
    /// lists. Trash entries tagged with the old name follow the rename.
    pub fn rename_list(&mut self, old: &str, new: &str) -> Result<(), ListError> {
        let new = new.trim();
        if new.is_empty() {
            return Err(ListError::BlankName);
        }
        let position = self
            .doc
            .lists
            .get_index_of(old)
            .ok_or_else(|| ListError::NotFound(old.to_string()))?;
        if new == old {
            return Ok(());
        }
        if self.doc.lists.contains_key(new) {
            return Err(ListError::DuplicateName(new.to_string()));
        }

        let items = self.doc.lists.shift_remove(old).unwrap_or_default();
        self.doc.lists.shift_insert(position, new.to_string(), items);
        for entry in &mut self.doc.trash {
            if entry.original_list.as_deref() == Some(old) {
                entry.original_list = Some(new.to_string());
            }
        }
        log::debug!("renamed list '{}' to '{}'", old, new);
        self.save()?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Items
    // -----------------------------------------------------------------------

    /// Append trimmed `text`. Blank text is ignored; returns whether anything
    /// was added.
    pub fn add_item(&mut self, list_name: &str, text: &str) -> Result<bool, ListError> {
        let items = self.list_mut(list_name)?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        items.push(text.to_string());
        self.save()?;
        Ok(true)
    }

    /// Swap an item with its neighbour. Moving past either end does nothing.
    pub fn move_item(
        &mut self,
        list_name: &str,
        index: usize,
        direction: Direction,
    ) -> Result<bool, ListError> {
        let items = self.list_mut(list_name)?;
        check_index(list_name, items, index)?;
        let Some(target) = index.checked_add_signed(direction.offset()) else {
            return Ok(false);
        };
        if target >= items.len() {
            return Ok(false);
        }
        items.swap(index, target);
        self.save()?;
        Ok(true)
    }

    /// Drag-style reposition within one list: remove at `from`, insert at `to`.
    pub fn reorder_item(&mut self, list_name: &str, from: usize, to: usize) -> Result<bool, ListError> {
        let items = self.list_mut(list_name)?;
        check_index(list_name, items, from)?;
        check_index(list_name, items, to)?;
        if from == to {
            return Ok(false);
        }
        let item = items.remove(from);
        items.insert(to, item);
        self.save()?;
        Ok(true)
    }

    /// Remove an item into the trash, remembering its list and position.
    pub fn delete_item(&mut self, list_name: &str, index: usize) -> Result<String, ListError> {
        let items = self.list_mut(list_name)?;
        check_index(list_name, items, index)?;
        let item = items.remove(index);
        self.doc.trash.push(TrashEntry {
            item: item.clone(),
            original_list: Some(list_name.to_string()),
            original_index: index as i64,
        });
        self.save()?;
        Ok(item)
    }

    /// Move an item to the end of another list.
    pub fn move_item_to_list(
        &mut self,
        list_name: &str,
        index: usize,
        target_list: &str,
    ) -> Result<(), ListError> {
        if !self.doc.lists.contains_key(target_list) {
            return Err(ListError::NotFound(target_list.to_string()));
        }
        let items = self.list_mut(list_name)?;
        check_index(list_name, items, index)?;
        let item = items.remove(index);
        self.list_mut(target_list)?.push(item);
        self.save()?;
        Ok(())
    }

    /// Replace an item's text. A blank replacement is a cancel: the old value
    /// stays and `false` is returned.
    pub fn edit_item(&mut self, list_name: &str, index: usize, new_text: &str) -> Result<bool, ListError> {
        let items = self.list_mut(list_name)?;
        check_index(list_name, items, index)?;
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Ok(false);
        }
        items[index] = new_text.to_string();
        self.save()?;
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Trash
    // -----------------------------------------------------------------------

    /// Restore a trashed item to the end of its original list, or of
    /// `fallback_list` when the original no longer exists. Returns the list
    /// actually used.
    pub fn restore_from_trash(&mut self, trash_index: usize, fallback_list: &str) -> Result<String, ListError> {
        let entry = self
            .doc
            .trash
            .get(trash_index)
            .ok_or(ListError::TrashIndexOutOfRange(trash_index))?;

        let target = match &entry.original_list {
            Some(list) if self.doc.lists.contains_key(list) => list.clone(),
            _ => {
                if !self.doc.lists.contains_key(fallback_list) {
                    return Err(ListError::NotFound(fallback_list.to_string()));
                }
                fallback_list.to_string()
            }
        };

        let entry = self.doc.trash.remove(trash_index);
        if entry.original_list.as_deref() != Some(target.as_str()) {
            log::info!(
                "original list {:?} is gone; restoring '{}' to '{}'",
                entry.original_list,
                entry.item,
                target
            );
        }
        self.list_mut(&target)?.push(entry.item);
        self.save()?;
        Ok(target)
    }

    pub fn clear_trash(&mut self) -> Result<usize, ListError> {
        let count = self.doc.trash.len();
        self.doc.trash.clear();
        self.save()?;
        Ok(count)
    }

    fn list_mut(&mut self, list_name: &str) -> Result<&mut Vec<String>, ListError> {
        self.doc
            .lists
            .get_mut(list_name)
            .ok_or_else(|| ListError::NotFound(list_name.to_string()))
    }
}

fn check_index(list_name: &str, items: &[String], index: usize) -> Result<(), ListError> {
    if index >= items.len() {
        return Err(ListError::IndexOutOfRange {
            list: list_name.to_string(),
            index,
        });
    }
    Ok(())
}
