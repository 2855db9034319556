use serde::Serialize;

use crate::model::list_doc::{ListDocument, TrashEntry};
use crate::ops::refresh::DeadlineRow;
use crate::util::text::{display_width, pad_to_width};

/// Date format of the deadline table
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

const NAME_COLUMN_MAX: usize = 40;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct DeadlineJson {
    pub index: usize,
    pub name: String,
    pub deadline: String,
    pub days_needed: Option<u32>,
    pub created: String,
    pub remaining: String,
    pub urgent: bool,
    pub overdue: bool,
}

#[derive(Serialize)]
pub struct ListJson {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Serialize)]
pub struct DocumentJson {
    pub file: Option<String>,
    pub lists: Vec<ListJson>,
}

#[derive(Serialize)]
pub struct TrashEntryJson {
    pub index: usize,
    pub item: String,
    pub original_list: Option<String>,
    pub original_index: i64,
}

#[derive(Serialize)]
pub struct OpenFileJson {
    pub path: String,
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn row_to_json(row: &DeadlineRow) -> DeadlineJson {
    DeadlineJson {
        index: row.index,
        name: row.deadline.name.clone(),
        deadline: row.deadline.deadline_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        days_needed: row.deadline.days_needed,
        created: row.deadline.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        remaining: row.remaining.to_string(),
        urgent: row.urgent,
        overdue: row.overdue,
    }
}

/// Lists of `doc`, or only `only` when given
pub fn document_to_json(doc: &ListDocument, file: Option<String>, only: Option<&str>) -> DocumentJson {
    DocumentJson {
        file,
        lists: doc
            .lists
            .iter()
            .filter(|(name, _)| only.is_none_or(|o| o == name.as_str()))
            .map(|(name, items)| ListJson {
                name: name.clone(),
                items: items.clone(),
            })
            .collect(),
    }
}

pub fn trash_to_json(trash: &[TrashEntry]) -> Vec<TrashEntryJson> {
    trash
        .iter()
        .enumerate()
        .map(|(index, e)| TrashEntryJson {
            index,
            item: e.item.clone(),
            original_list: e.original_list.clone(),
            original_index: e.original_index,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Deadline table, one line per row. Highlighted rows carry a `!` marker.
pub fn format_deadline_table(rows: &[DeadlineRow]) -> Vec<String> {
    let name_width = rows
        .iter()
        .map(|r| display_width(&r.deadline.name))
        .max()
        .unwrap_or(0)
        .clamp(4, NAME_COLUMN_MAX);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!(
        "    #  {}  {:<16}  {:<14}  NEEDED",
        pad_to_width("NAME", name_width),
        "DEADLINE",
        "LEFT"
    ));
    for row in rows {
        let marker = if row.highlighted() { '!' } else { ' ' };
        let needed = row
            .deadline
            .days_needed
            .map(|d| format!("{}d", d))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{} {:>3}  {}  {:<16}  {:<14}  {}",
            marker,
            row.index,
            pad_to_width(&row.deadline.name, name_width),
            row.deadline.deadline_at.format(DISPLAY_DATE_FORMAT).to_string(),
            row.remaining.to_string(),
            needed
        ));
    }
    lines
}

pub fn format_list(name: &str, items: &[String]) -> Vec<String> {
    let mut lines = vec![format!("== {} ({}) ==", name, items.len())];
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{:>3}  {}", i, item));
    }
    lines
}

pub fn format_trash(trash: &[TrashEntry]) -> Vec<String> {
    trash
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{:>3}  {}", i, e.label()))
        .collect()
}
