use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::io::deadline_io;
use crate::io::persist::PersistenceError;
use crate::model::deadline::Deadline;

/// Time used when only a date is given
pub const DEFAULT_TIME: &str = "23:59";

/// Rejected deadline input. Nothing has been mutated when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("deadline date is required")]
    MissingDeadline,
    #[error("deadline must be in the future (got {0})")]
    NotInFuture(NaiveDateTime),
    #[error("days needed must be positive (got {0})")]
    DaysNotPositive(i64),
    #[error("days needed must be a whole number (got '{0}')")]
    DaysNotInteger(String),
    #[error("invalid date/time '{0}': use MM-DD (or YYYY-MM-DD) and HH:MM")]
    BadDateTime(String),
}

/// Error type for deadline store operations
#[derive(Debug, thiserror::Error)]
pub enum DeadlineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no deadline at index {0}")]
    NotFound(usize),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// Assemble a deadline timestamp from form-style input.
///
/// `date` is `MM-DD` (combined with `year`, default: the year of `now`) or a
/// full `YYYY-MM-DD`. `time` is `HH:MM`, default 23:59.
pub fn parse_deadline_input(
    date: &str,
    year: Option<&str>,
    time: Option<&str>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime, ValidationError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDeadline);
    }
    let time = time.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TIME);
    let year = year.map(str::trim).filter(|y| !y.is_empty());

    let full_date = match (date.matches('-').count(), year) {
        (2, _) => date.to_string(),
        (1, Some(y)) => format!("{}-{}", y, date),
        (1, None) => format!("{}-{}", now.year(), date),
        _ => return Err(ValidationError::BadDateTime(date.to_string())),
    };

    let parsed_date = NaiveDate::parse_from_str(&full_date, "%Y-%m-%d")
        .map_err(|_| ValidationError::BadDateTime(full_date.clone()))?;
    let parsed_time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| ValidationError::BadDateTime(time.to_string()))?;
    Ok(parsed_date.and_time(parsed_time))
}

/// Parse the optional lead time. Blank means "not tracked".
pub fn parse_days_needed(text: &str) -> Result<Option<i64>, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::DaysNotInteger(text.to_string()))
}

/// Validate a full set of deadline fields against `now`.
/// Returns the trimmed name and the checked lead time.
pub fn validate(
    name: &str,
    deadline_at: Option<NaiveDateTime>,
    days_needed: Option<i64>,
    now: NaiveDateTime,
) -> Result<(String, NaiveDateTime, Option<u32>), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let deadline_at = deadline_at.ok_or(ValidationError::MissingDeadline)?;
    if deadline_at <= now {
        return Err(ValidationError::NotInFuture(deadline_at));
    }
    let days_needed = match days_needed {
        None => None,
        Some(d) if d <= 0 => return Err(ValidationError::DaysNotPositive(d)),
        Some(d) => Some(u32::try_from(d).map_err(|_| ValidationError::DaysNotInteger(d.to_string()))?),
    };
    Ok((name.to_string(), deadline_at, days_needed))
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// The deadline collection and the file it is written through to
#[derive(Debug)]
pub struct DeadlineStore {
    path: PathBuf,
    deadlines: Vec<Deadline>,
}

impl DeadlineStore {
    /// Load from `path`. A missing or malformed file yields an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let deadlines = deadline_io::load_deadlines(&path);
        log::debug!("loaded {} deadlines from {}", deadlines.len(), path.display());
        DeadlineStore { path, deadlines }
    }

    pub fn deadlines(&self) -> &[Deadline] {
        &self.deadlines
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Deadline> {
        self.deadlines.get(index)
    }

    /// Validate, append with `created_at = now`, and persist.
    pub fn add(
        &mut self,
        name: &str,
        deadline_at: Option<NaiveDateTime>,
        days_needed: Option<i64>,
        now: NaiveDateTime,
    ) -> Result<Deadline, DeadlineError> {
        let (name, deadline_at, days_needed) = validate(name, deadline_at, days_needed, now)?;
        let deadline = Deadline::new(name, deadline_at, days_needed, now);
        self.deadlines.push(deadline.clone());
        log::info!("added deadline '{}' due {}", deadline.name, deadline.deadline_at);
        self.save()?;
        Ok(deadline)
    }

    /// Replace name, timestamp and lead time in place; `created_at` is kept.
    pub fn edit(
        &mut self,
        index: usize,
        name: &str,
        deadline_at: Option<NaiveDateTime>,
        days_needed: Option<i64>,
        now: NaiveDateTime,
    ) -> Result<(), DeadlineError> {
        if index >= self.deadlines.len() {
            return Err(DeadlineError::NotFound(index));
        }
        let (name, deadline_at, days_needed) = validate(name, deadline_at, days_needed, now)?;
        let record = &mut self.deadlines[index];
        record.name = name;
        record.deadline_at = deadline_at;
        record.days_needed = days_needed;
        log::info!("edited deadline {} ('{}')", index, record.name);
        self.save()?;
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> Result<Deadline, DeadlineError> {
        if index >= self.deadlines.len() {
            return Err(DeadlineError::NotFound(index));
        }
        let removed = self.deadlines.remove(index);
        log::info!("deleted deadline '{}'", removed.name);
        self.save()?;
        Ok(removed)
    }

    /// Read-only view ordered by `deadline_at`, earliest first
    pub fn list_sorted_by_deadline(&self) -> Vec<&Deadline> {
        let mut sorted: Vec<&Deadline> = self.deadlines.iter().collect();
        sorted.sort_by_key(|d| d.deadline_at);
        sorted
    }

    /// Reorder the records themselves by deadline so positional indices match
    /// the displayed order. Not persisted on its own.
    pub fn sort_by_deadline(&mut self) {
        self.deadlines.sort_by_key(|d| d.deadline_at);
    }

    pub fn save(&self) -> Result<(), PersistenceError> {
        deadline_io::save_deadlines(&self.path, &self.deadlines)
    }
}
