use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: i64 = 86_400;

/// A named deadline with an optional lead-time requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub name: String,
    /// When the deadline falls (local wall-clock time)
    #[serde(rename = "deadline")]
    pub deadline_at: NaiveDateTime,
    /// Days required to finish the task; `None` disables urgency tracking
    #[serde(default)]
    pub days_needed: Option<u32>,
    /// Set once at creation, never edited
    #[serde(rename = "created")]
    pub created_at: NaiveDateTime,
}

/// Time left until a deadline, decomposed for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    Overdue,
    Left { days: i64, hours: i64, minutes: i64 },
}

impl Remaining {
    pub fn is_overdue(self) -> bool {
        matches!(self, Remaining::Overdue)
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Overdue => write!(f, "OVERDUE"),
            Remaining::Left {
                days,
                hours,
                minutes,
            } => write!(f, "{}d {}h {}m", days, hours, minutes),
        }
    }
}

/// Cooldown identity of a deadline. Two deadlines sharing a name but created
/// at different instants get separate keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeadlineKey {
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl Deadline {
    pub fn new(name: String, deadline_at: NaiveDateTime, days_needed: Option<u32>, now: NaiveDateTime) -> Self {
        Deadline {
            name,
            deadline_at,
            days_needed,
            created_at: now,
        }
    }

    pub fn key(&self) -> DeadlineKey {
        DeadlineKey {
            name: self.name.clone(),
            created_at: self.created_at,
        }
    }

    /// Whole days until the deadline, floored (negative once it has passed)
    pub fn days_remaining(&self, now: NaiveDateTime) -> i64 {
        floor_days(self.deadline_at - now)
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.deadline_at <= now
    }

    /// Remaining time as days/hours/minutes, or `Overdue` once `deadline_at <= now`.
    pub fn remaining(&self, now: NaiveDateTime) -> Remaining {
        let diff = self.deadline_at - now;
        if diff <= TimeDelta::zero() {
            return Remaining::Overdue;
        }
        let secs = diff.num_seconds();
        let days = secs / SECS_PER_DAY;
        let partial = secs % SECS_PER_DAY;
        Remaining::Left {
            days,
            hours: partial / 3600,
            minutes: (partial % 3600) / 60,
        }
    }

    /// Urgent when the floored days remaining are strictly fewer than
    /// `days_needed`. Equal is not urgent. Without `days_needed`, never urgent.
    pub fn is_urgent(&self, now: NaiveDateTime) -> bool {
        match self.days_needed {
            None => false,
            Some(needed) => self.days_remaining(now) < i64::from(needed),
        }
    }
}

/// Floor a signed duration to whole days (`num_days` truncates toward zero).
fn floor_days(delta: TimeDelta) -> i64 {
    let days = delta.num_days();
    if delta < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}
