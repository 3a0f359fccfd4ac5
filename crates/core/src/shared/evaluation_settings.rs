use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::constants::DEFAULT_PROGRESS_THROTTLE;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunables for batch transcript evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Cases whose reference or hypothesis exceeds this many tokens are
    /// skipped instead of scored. `None` disables the limit.
    pub max_tokens: Option<usize>,
    pub progress_throttle: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            max_tokens: None,
            progress_throttle: DEFAULT_PROGRESS_THROTTLE,
        }
    }
}

impl EvaluationSettings {
    /// Loads settings from a JSON file. Missing fields take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<usize>) -> Self {
        if max_tokens.is_some() {
            self.max_tokens = max_tokens;
        }
        self
    }
}
