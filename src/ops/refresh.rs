use chrono::NaiveDateTime;

use crate::model::deadline::{Deadline, Remaining};
use crate::ops::deadline_ops::DeadlineStore;
use crate::ops::notify::UrgencyNotifier;

/// One rendered line of the deadline table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeadlineRow {
    /// Position in the store after sorting; what `edit`/`rm` take
    pub index: usize,
    pub deadline: Deadline,
    pub remaining: Remaining,
    pub urgent: bool,
    pub overdue: bool,
}

impl DeadlineRow {
    /// Overdue rows are flagged even when the lead-time predicate is false.
    pub fn highlighted(&self) -> bool {
        self.urgent || self.overdue
    }
}

/// Build the rows for a display pass without touching the notifier.
pub fn build_rows(store: &mut DeadlineStore, now: NaiveDateTime) -> Vec<DeadlineRow> {
    store.sort_by_deadline();
    store
        .deadlines()
        .iter()
        .enumerate()
        .map(|(index, d)| DeadlineRow {
            index,
            deadline: d.clone(),
            remaining: d.remaining(now),
            urgent: d.is_urgent(now),
            overdue: d.is_overdue(now),
        })
        .collect()
}

/// One display refresh: sort, compute rows, and notify for urgent deadlines
/// whose cooldown has elapsed.
pub fn refresh(
    store: &mut DeadlineStore,
    notifier: &mut UrgencyNotifier,
    now: NaiveDateTime,
) -> Vec<DeadlineRow> {
    let rows = build_rows(store, now);
    for row in &rows {
        if !row.urgent || row.deadline.days_needed.is_none() {
            continue;
        }
        let key = row.deadline.key();
        if notifier.should_notify(&key, now) {
            notifier.notify(&row.deadline, now);
            notifier.record_notified(key, now);
        }
    }
    log::debug!("refreshed {} deadlines", rows.len());
    rows
}
