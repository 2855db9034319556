use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Name of the list every fresh document starts with
pub const DEFAULT_LIST: &str = "1";

/// `original_index` value for items trashed together with their whole list
pub const BULK_REMOVAL_INDEX: i64 = -1;

/// An item removed from a list, tagged with where it came from.
///
/// `original_list` is a name, not a reference: the list may be renamed (the
/// tag follows) or deleted (the tag dangles and restore falls back).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashEntry {
    pub item: String,
    #[serde(default)]
    pub original_list: Option<String>,
    /// Position at removal time; informational only, never used on restore
    #[serde(default = "bulk_removal_index")]
    pub original_index: i64,
}

fn bulk_removal_index() -> i64 {
    BULK_REMOVAL_INDEX
}

/// The persisted unit of the list editor: named ordered lists plus trash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDocument {
    /// List name -> items, in display order
    #[serde(default = "default_lists")]
    pub lists: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub trash: Vec<TrashEntry>,
}

fn default_lists() -> IndexMap<String, Vec<String>> {
    let mut lists = IndexMap::new();
    lists.insert(DEFAULT_LIST.to_string(), Vec::new());
    lists
}

impl Default for ListDocument {
    fn default() -> Self {
        ListDocument {
            lists: default_lists(),
            trash: Vec::new(),
        }
    }
}

impl ListDocument {
    /// Restore the at-least-one-list invariant on documents read from disk.
    pub fn normalize(&mut self) {
        if self.lists.is_empty() {
            self.lists = default_lists();
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.lists.get(name).map(|v| v.as_slice())
    }

    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(|k| k.as_str())
    }

    pub fn first_list_name(&self) -> Option<&str> {
        self.lists.keys().next().map(|k| k.as_str())
    }

    pub fn item_count(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }
}

impl TrashEntry {
    /// Label shown in the trash view, e.g. `milk (from 'Groceries')`
    pub fn label(&self) -> String {
        match &self.original_list {
            Some(list) => format!("{} (from '{}')", self.item, list),
            None => format!("{} (from unknown list)", self.item),
        }
    }
}
