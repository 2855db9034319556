use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub deadlines: DeadlinesConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlinesConfig {
    /// Deadline file, relative to the working directory unless absolute
    #[serde(default = "default_deadline_file")]
    pub file: PathBuf,
    /// Seconds between display refreshes in `dk deadline watch`
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for DeadlinesConfig {
    fn default() -> Self {
        DeadlinesConfig {
            file: default_deadline_file(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_deadline_file() -> PathBuf {
    PathBuf::from("deadlines.json")
}

fn default_refresh_interval() -> u64 {
    60
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Minimum seconds between two notifications for the same deadline
    #[serde(default = "default_cooldown")]
    pub cooldown_secs: u64,
    /// How long the desktop notification stays up
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_title")]
    pub title: String,
    /// External program plus arguments. Empty: notify through the log.
    /// Arguments may contain `{title}`, `{message}` and `{timeout_ms}`.
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            cooldown_secs: default_cooldown(),
            timeout_secs: default_timeout(),
            title: default_title(),
            command: Vec::new(),
        }
    }
}

fn default_cooldown() -> u64 {
    3600
}

fn default_timeout() -> u64 {
    10
}

fn default_title() -> String {
    "Urgent deadline!".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Recent-files cache location (default: next to config.toml)
    #[serde(default)]
    pub recent_files: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs rotate in this directory instead of going to stderr
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            dir: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.deadlines.refresh_interval_secs, 60);
        assert_eq!(config.notify.cooldown_secs, 3600);
        assert_eq!(config.notify.timeout_secs, 10);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[notify]
cooldown_secs = 120
command = ["notify-send", "{title}", "{message}"]

[deadlines]
file = "/tmp/dl.json"
"#,
        )
        .unwrap();
        assert_eq!(config.notify.cooldown_secs, 120);
        assert_eq!(config.notify.timeout_secs, 10);
        assert_eq!(config.notify.command.len(), 3);
        assert_eq!(config.deadlines.file, PathBuf::from("/tmp/dl.json"));
        assert_eq!(config.deadlines.refresh_interval_secs, 60);
    }
}
