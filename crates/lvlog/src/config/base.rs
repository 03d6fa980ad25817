//! Core configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Severity;
use crate::core::Result;

/// Logging configuration
///
/// `file` and `folder` are mutually exclusive destinations. When both are
/// set, `file` wins and `folder` is ignored entirely (it is not even
/// created). Empty paths count as unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lowest severity that is emitted
    pub min_level: Severity,

    /// Requested ANSI coloring; only honoured on an interactive terminal
    pub enable_color: bool,

    /// Append every line to this file
    pub file: Option<PathBuf>,

    /// Write into this directory, created on demand
    pub folder: Option<PathBuf>,

    /// In folder mode, one file per severity instead of a shared `log.log`
    pub split_by_level: bool,
}

/// Resolved destination selection of a [`Config`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Standard output
    Terminal,
    /// A single append-only file
    File(PathBuf),
    /// A directory holding `log.log` or one file per level
    Folder {
        /// Directory path
        dir: PathBuf,
        /// One file per severity
        split: bool,
    },
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_level: Severity::Debug,
            enable_color: true,
            file: None,
            folder: None,
            split_by_level: false,
        }
    }
}

impl Config {
    /// Terminal output with default settings
    #[must_use]
    pub fn terminal() -> Self {
        Self::default()
    }

    /// Append all lines to a single file
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }

    /// Write into a folder, either shared `log.log` or one file per level
    #[must_use]
    pub fn folder(path: impl Into<PathBuf>, split_by_level: bool) -> Self {
        Self {
            folder: Some(path.into()),
            split_by_level,
            ..Self::default()
        }
    }

    /// Set the minimum severity
    #[must_use]
    pub fn with_min_level(mut self, level: Severity) -> Self {
        self.min_level = level;
        self
    }

    /// Request or refuse ANSI colors
    #[must_use]
    pub fn with_color(mut self, enable: bool) -> Self {
        self.enable_color = enable;
        self
    }

    /// Parse a JSON configuration document.
    ///
    /// Missing fields take their defaults and level names are matched
    /// case-insensitively, falling back to `INFO`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve which destination this configuration selects
    #[must_use]
    pub fn target(&self) -> Target {
        if let Some(file) = non_empty(self.file.as_deref()) {
            Target::File(file.to_path_buf())
        } else if let Some(dir) = non_empty(self.folder.as_deref()) {
            Target::Folder {
                dir: dir.to_path_buf(),
                split: self.split_by_level,
            }
        } else {
            Target::Terminal
        }
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.min_level, Severity::Debug);
        assert!(config.enable_color);
        assert_eq!(config.target(), Target::Terminal);
    }

    #[test]
    fn test_file_takes_priority_over_folder() {
        let config = Config {
            file: Some("app.log".into()),
            folder: Some("logs".into()),
            split_by_level: true,
            ..Config::default()
        };
        assert_eq!(config.target(), Target::File("app.log".into()));
    }

    #[test]
    fn test_empty_paths_are_unset() {
        let config = Config {
            file: Some(PathBuf::new()),
            folder: Some("logs".into()),
            ..Config::default()
        };
        assert_eq!(
            config.target(),
            Target::Folder {
                dir: "logs".into(),
                split: false
            }
        );

        let config = Config {
            file: Some(PathBuf::new()),
            folder: Some(PathBuf::new()),
            ..Config::default()
        };
        assert_eq!(config.target(), Target::Terminal);
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{"min_level": "warn", "folder": "/tmp/app", "split_by_level": true}"#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config::folder("/tmp/app", true).with_min_level(Severity::Warn)
        );
    }

    #[test]
    fn test_from_json_unknown_level_defaults_to_info() {
        let config = Config::from_json(r#"{"min_level": "chatty"}"#).unwrap();
        assert_eq!(config.min_level, Severity::Info);
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        let err = Config::from_json("{ min_level: ").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidConfig(_)));
    }
}
