use std::fs;
use std::path::{Path, PathBuf};

use crate::io::persist;
use crate::model::config::AppConfig;

/// Error type for config operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config already exists at {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Directory holding config.toml and the recent-files cache,
/// respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home_dir().join(".config"));
    base.join("docket")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Read the config. Missing file means defaults; a corrupted file is backed
/// up as `.bak` and defaults are used.
pub fn read_config_from(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return AppConfig::default(),
        Err(e) => {
            log::warn!("could not read {}: {}; using defaults", path.display(), e);
            return AppConfig::default();
        }
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(e) => {
            let bak = persist::backup_corrupt(path);
            log::warn!(
                "could not parse {} (backed up as {}): {}",
                path.display(),
                bak.map(|b| b.display().to_string())
                    .unwrap_or_else(|| "<none>".to_string()),
                e
            );
            AppConfig::default()
        }
    }
}

/// Write `config` to `path`, refusing to clobber an existing file unless `force`.
pub fn write_config_to(path: &Path, config: &AppConfig, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let content = toml::to_string_pretty(config)?;
    persist::atomic_write(path, content.as_bytes()).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Where the recent-files cache lives for this config
pub fn recent_files_path(config: &AppConfig) -> PathBuf {
    config
        .lists
        .recent_files
        .clone()
        .unwrap_or_else(crate::io::recent::default_recent_path)
}
