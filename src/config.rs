//! Engine configuration, loadable from RON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema::behavior::Mode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Default number of past messages a session remembers.
pub const DEFAULT_HISTORY_WINDOW: usize = 20;

fn default_history_window() -> usize {
    DEFAULT_HISTORY_WINDOW
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for phrase sampling in sessions.
    #[serde(default)]
    pub seed: u64,
    /// Mode used by session-level behavior descriptions.
    #[serde(default)]
    pub default_mode: Mode,
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Start from the built-in catalogs before applying the files below.
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    /// Extra speech-pattern files, merged in order.
    #[serde(default)]
    pub speech_patterns: Vec<PathBuf>,
    /// Extra trigger files, merged in order.
    #[serde(default)]
    pub triggers: Vec<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            default_mode: Mode::default(),
            history_window: DEFAULT_HISTORY_WINDOW,
            include_builtin: true,
            speech_patterns: Vec::new(),
            triggers: Vec::new(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_ron(path: &Path) -> Result<EngineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<EngineConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
