//! Tool configuration
//!
//! Defaults, overridden by an optional YAML file. The CLI layers
//! environment variables and flags on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// File name of the hint document inside each scenario directory
pub const HINTS_FILE_NAME: &str = "hints.yaml";

/// Default task document path
pub const DEFAULT_TASKS_PATH: &str = "tasks.yaml";

/// Default progress file path
pub const DEFAULT_PROGRESS_PATH: &str = ".hints-progress.yaml";

/// Default root directory holding one subdirectory per scenario
pub const DEFAULT_SCENARIOS_ROOT: &str = "scenarios";

/// Paths used by the scenario tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ToolConfig {
    /// Task document of the running scenario
    pub tasks_path: PathBuf,
    /// Progress store of the running scenario
    pub progress_path: PathBuf,
    /// Root scanned by `migrate`
    pub scenarios_root: PathBuf,
}

impl ToolConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file; missing keys keep defaults
    ///
    /// # Errors
    /// Returns [`CodecError`] if the file cannot be read or contains
    /// unknown keys.
    pub fn from_file(path: &Path) -> Result<Self, CodecError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CodecError::io_error(path, e))?;
        serde_yaml::from_str(&content).map_err(|source| CodecError::Syntax {
            path: path.to_path_buf(),
            source,
        })
    }

    /// With task document path
    #[inline]
    #[must_use]
    pub fn with_tasks_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tasks_path = path.into();
        self
    }

    /// With progress file path
    #[inline]
    #[must_use]
    pub fn with_progress_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.progress_path = path.into();
        self
    }

    /// With scenarios root
    #[inline]
    #[must_use]
    pub fn with_scenarios_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenarios_root = path.into();
        self
    }

    /// Hint document path for a named scenario
    #[must_use]
    pub fn scenario_hints_path(&self, scenario: &str) -> PathBuf {
        self.scenarios_root.join(scenario).join(HINTS_FILE_NAME)
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tasks_path: PathBuf::from(DEFAULT_TASKS_PATH),
            progress_path: PathBuf::from(DEFAULT_PROGRESS_PATH),
            scenarios_root: PathBuf::from(DEFAULT_SCENARIOS_ROOT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ToolConfig::new()
            .with_tasks_path("/opt/tasks.yaml")
            .with_scenarios_root("/srv/scenarios");

        assert_eq!(config.tasks_path, PathBuf::from("/opt/tasks.yaml"));
        assert_eq!(config.progress_path, PathBuf::from(DEFAULT_PROGRESS_PATH));
        assert_eq!(
            config.scenario_hints_path("node-shock"),
            PathBuf::from("/srv/scenarios/node-shock/hints.yaml")
        );
    }

    #[test]
    fn file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.yaml");
        std::fs::write(&path, "progress-path: /tmp/progress.yaml\n").unwrap();

        let config = ToolConfig::from_file(&path).unwrap();
        assert_eq!(config.progress_path, PathBuf::from("/tmp/progress.yaml"));
        assert_eq!(config.tasks_path, PathBuf::from(DEFAULT_TASKS_PATH));
    }

    #[test]
    fn file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tool.yaml");
        std::fs::write(&path, "task-path: typo.yaml\n").unwrap();

        assert!(matches!(
            ToolConfig::from_file(&path),
            Err(CodecError::Syntax { .. })
        ));
    }
}
