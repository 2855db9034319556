use std::path::Path;

use crate::io::persist::{self, LoadError, PersistenceError};
use crate::model::deadline::Deadline;

/// Load deadlines from a JSON array file.
///
/// Never fails: a missing file is an empty store, and a file that is not an
/// array is backed up as `.bak`, logged, and treated as empty. Records that
/// do not parse are skipped one by one; the file is backed up before the
/// next save drops them.
pub fn load_deadlines(path: &Path) -> Vec<Deadline> {
    let records = match persist::read_json::<Vec<serde_json::Value>>(path) {
        Ok(records) => records,
        Err(LoadError::Missing(_)) => return Vec::new(),
        Err(e) => {
            match persist::backup_corrupt(path) {
                Some(bak) => log::warn!("{} (backed up as {}); starting empty", e, bak.display()),
                None => log::warn!("{}; starting empty", e),
            }
            return Vec::new();
        }
    };

    let total = records.len();
    let deadlines: Vec<Deadline> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(d) => Some(d),
            Err(e) => {
                log::warn!("skipping deadline record {} in {}: {}", i, path.display(), e);
                None
            }
        })
        .collect();

    if deadlines.len() < total {
        match persist::backup_corrupt(path) {
            Some(bak) => log::warn!(
                "{} of {} records unreadable (backed up as {})",
                total - deadlines.len(),
                total,
                bak.display()
            ),
            None => log::warn!("{} of {} records unreadable", total - deadlines.len(), total),
        }
    }
    deadlines
}

/// Overwrite the deadline file with `deadlines`, in the given order.
pub fn save_deadlines(path: &Path, deadlines: &[Deadline]) -> Result<(), PersistenceError> {
    persist::write_json(path, deadlines)
}
