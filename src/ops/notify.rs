use std::collections::HashMap;
use std::process::Command;
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};

use crate::model::config::NotifyConfig;
use crate::model::deadline::{Deadline, DeadlineKey};

/// Error type for notification delivery. Never reaches the refresh caller.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
}

/// A notification ready to be delivered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub timeout: Duration,
}

/// Delivery mechanism for notifications
pub trait Notifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Emits notifications as warnings through the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        log::warn!(
            "{}: {}",
            notification.title,
            notification.message.replace('\n', " | ")
        );
        Ok(())
    }
}

/// Runs an external program, e.g. `notify-send`.
///
/// Arguments may contain `{title}`, `{message}` and `{timeout_ms}`. When none
/// of them do, title and message are appended as the last two arguments.
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
}

impl CommandNotifier {
    /// `None` for an empty command line
    pub fn from_command_line(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(CommandNotifier {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn expand_args(&self, notification: &Notification) -> Vec<String> {
        let timeout_ms = notification.timeout.as_millis().to_string();
        let has_placeholder = self
            .args
            .iter()
            .any(|a| a.contains("{title}") || a.contains("{message}"));
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|a| {
                a.replace("{title}", &notification.title)
                    .replace("{message}", &notification.message)
                    .replace("{timeout_ms}", &timeout_ms)
            })
            .collect();
        if !has_placeholder {
            args.push(notification.title.clone());
            args.push(notification.message.clone());
        }
        args
    }
}

impl Notifier for CommandNotifier {
    fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let status = Command::new(&self.program)
            .args(self.expand_args(notification))
            .status()
            .map_err(|e| NotifyError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;
        if !status.success() {
            return Err(NotifyError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

/// Pick the backend described by the config
pub fn notifier_from_config(config: &NotifyConfig) -> Box<dyn Notifier> {
    match CommandNotifier::from_command_line(&config.command) {
        Some(cmd) => Box::new(cmd),
        None => Box::new(LogNotifier),
    }
}

/// Rate-limits urgent-deadline notifications per deadline.
///
/// Cooldown state lives in memory only; a restarted process may notify again.
pub struct UrgencyNotifier {
    cooldown: TimeDelta,
    title: String,
    timeout: Duration,
    last_notified: HashMap<DeadlineKey, NaiveDateTime>,
    backend: Box<dyn Notifier>,
}

impl UrgencyNotifier {
    pub fn new(config: &NotifyConfig, backend: Box<dyn Notifier>) -> Self {
        UrgencyNotifier {
            cooldown: i64::try_from(config.cooldown_secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX),
            title: config.title.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            last_notified: HashMap::new(),
            backend,
        }
    }

    pub fn from_config(config: &NotifyConfig) -> Self {
        UrgencyNotifier::new(config, notifier_from_config(config))
    }

    /// True if `key` was never notified, or the cooldown has fully elapsed.
    pub fn should_notify(&self, key: &DeadlineKey, now: NaiveDateTime) -> bool {
        match self.last_notified.get(key) {
            None => true,
            Some(last) => now - *last >= self.cooldown,
        }
    }

    pub fn record_notified(&mut self, key: DeadlineKey, now: NaiveDateTime) {
        self.last_notified.insert(key, now);
    }

    pub fn build_notification(&self, deadline: &Deadline, now: NaiveDateTime) -> Notification {
        let mut message = format!(
            "'{}'\n{} day(s) left",
            deadline.name,
            deadline.days_remaining(now).max(0)
        );
        if let Some(needed) = deadline.days_needed {
            message.push_str(&format!("\n{} day(s) needed to finish!", needed));
        }
        Notification {
            title: self.title.clone(),
            message,
            timeout: self.timeout,
        }
    }

    /// Fire-and-forget: delivery failures are logged, never returned.
    pub fn notify(&self, deadline: &Deadline, now: NaiveDateTime) {
        let notification = self.build_notification(deadline, now);
        match self.backend.send(&notification) {
            Ok(()) => log::info!("notified about '{}'", deadline.name),
            Err(e) => log::warn!("notification for '{}' failed: {}", deadline.name, e),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// Records every notification instead of delivering it
    #[derive(Clone, Default)]
    pub struct RecordingNotifier {
        pub sent: Rc<RefCell<Vec<Notification>>>,
        pub fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.sent.borrow_mut().push(notification.clone());
            if self.fail {
                return Err(NotifyError::Failed {
                    program: "recorder".into(),
                    status: "exit status: 1".into(),
                });
            }
            Ok(())
        }
    }
}
