use crate::storage::project_dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional settings read from `config.yml` in the platform config directory.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Task file; defaults to `tasks_v1.yml` in the data directory.
    pub data_file: Option<PathBuf>,
    /// Log file; defaults to `daymark.log` in the data directory.
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn load() -> Config {
        match project_dirs() {
            Ok(dirs) => Config::load_from(&dirs.config_dir().join("config.yml")),
            Err(_) => Config::default(),
        }
    }

    /// Missing or unreadable config falls back to defaults.
    pub fn load_from(path: &Path) -> Config {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(_) => return Config::default(),
        };
        match serde_yaml::from_str::<Config>(&data) {
            Ok(config) => config,
            Err(err) => {
                // Logging is not up yet when the config is read.
                eprintln!("ignoring malformed config {:?}: {}", path, err);
                Config::default()
            }
        }
    }

    /// Command-line values win over file values.
    pub fn merge(mut self, data_file: Option<PathBuf>, log_level: Option<String>) -> Config {
        if data_file.is_some() {
            self.data_file = data_file;
        }
        if log_level.is_some() {
            self.log_level = log_level;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from(&dir.path().join("config.yml")), Config::default());
    }

    #[test]
    fn partial_file_fills_remaining_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "log_level: debug\nunknown: 3\n").unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.data_file, None);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "log_level: [").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn flags_override_file() {
        let config = Config {
            data_file: Some("a.yml".into()),
            log_file: None,
            log_level: Some("warn".into()),
        }
        .merge(Some("b.yml".into()), None);
        assert_eq!(config.data_file, Some(PathBuf::from("b.yml")));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
    }
}
