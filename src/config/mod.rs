//! Logger settings and their TOML loading logic.
//!
//! Settings live beside the executable: `viewer.exe` reads
//! `viewer.exelog.toml`. A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LogError;
use crate::log_file::{CreatePolicy, DEFAULT_SUFFIX};
use crate::writer::MESSAGE_CAPACITY;

/// Smallest accepted message buffer, in bytes.
pub const MIN_MESSAGE_CAPACITY: usize = 16;

/// Largest accepted message buffer, in bytes.
pub const MAX_MESSAGE_CAPACITY: usize = 64 * 1024;

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Appended to the executable path to name the log file.
    pub suffix: String,
    /// When false the base path is used verbatim.
    pub append_suffix: bool,
    /// `"truncate"` or `"create_new"`.
    pub policy: CreatePolicy,
    /// Byte bound on one rendered message; longer output is truncated.
    pub message_capacity: usize,
    /// Also show every message in a blocking dialog. Defaults to the `modal`
    /// cargo feature.
    pub modal: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_owned(),
            append_suffix: true,
            policy: CreatePolicy::default(),
            message_capacity: MESSAGE_CAPACITY,
            modal: cfg!(feature = "modal"),
        }
    }
}

/// Return the settings path for the executable at `exe_path`.
pub fn config_path(exe_path: &Path) -> PathBuf {
    exe_path.with_extension("exelog.toml")
}

impl LogConfig {
    /// Returns `message_capacity` clamped to
    /// [`MIN_MESSAGE_CAPACITY`, `MAX_MESSAGE_CAPACITY`].
    pub fn effective_message_capacity(&self) -> usize {
        self.message_capacity
            .clamp(MIN_MESSAGE_CAPACITY, MAX_MESSAGE_CAPACITY)
    }

    /// The suffix to append, or `None` when the path is used verbatim.
    pub fn effective_suffix(&self) -> Option<&str> {
        self.append_suffix.then_some(self.suffix.as_str())
    }

    /// Load settings from `path`. Returns defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Load settings from `path`, reporting read and parse failures.
    pub fn try_load(path: &Path) -> Result<Self, LogError> {
        let data = std::fs::read_to_string(path).map_err(|e| LogError::Config {
            path: path.to_path_buf(),
            message: format!("failed to read: {e}"),
        })?;
        Self::parse(path, &data)
    }

    /// Load the settings that belong to `exe_path`.
    ///
    /// A missing file yields defaults. A file that exists but is unreadable
    /// or malformed is an error so the caller can report it.
    pub fn discover(exe_path: &Path) -> Result<Self, LogError> {
        let path = config_path(exe_path);
        match std::fs::read_to_string(&path) {
            Ok(data) => Self::parse(&path, &data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(LogError::Config {
                path,
                message: format!("failed to read: {e}"),
            }),
        }
    }

    fn parse(path: &Path, data: &str) -> Result<Self, LogError> {
        toml::from_str(data).map_err(|e| LogError::Config {
            path: path.to_path_buf(),
            message: format!("parse error: {e}"),
        })
    }
}
