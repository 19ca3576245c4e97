//! Owner of the single writable log file handle.
//!
//! `LogFile` knows nothing about threads. It creates the target file under a
//! [`CreatePolicy`], appends raw bytes with one synchronous write per call,
//! and releases the handle when closed or dropped. Serialization of
//! concurrent writers is the job of [`crate::writer::Logger`].

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Suffix appended to the base path when the caller asks for one.
pub const DEFAULT_SUFFIX: &str = ".log";

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatePolicy {
    /// Always create, truncating the previous run's log.
    #[default]
    Truncate,
    /// Create only when the file is absent; an existing file is an error.
    CreateNew,
}

/// Build the target path by plain concatenation: `app.exe` + `.log` gives
/// `app.exe.log`. `None` uses `base` verbatim.
pub fn target_path(base: &Path, suffix: Option<&str>) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    if let Some(suffix) = suffix {
        name.push(suffix);
    }
    PathBuf::from(name)
}

/// An open, write-only, append-sequential log file.
#[derive(Debug)]
pub struct LogFile {
    file: File,
    path: PathBuf,
    written: u64,
}

impl LogFile {
    /// Create the log file at `base_path`, appending [`DEFAULT_SUFFIX`] when
    /// `append_suffix` is set.
    pub fn create(
        base_path: &Path,
        append_suffix: bool,
        policy: CreatePolicy,
    ) -> Result<Self, LogError> {
        Self::create_with_suffix(base_path, append_suffix.then_some(DEFAULT_SUFFIX), policy)
    }

    /// Create the log file at `base_path` + `suffix`.
    pub fn create_with_suffix(
        base_path: &Path,
        suffix: Option<&str>,
        policy: CreatePolicy,
    ) -> Result<Self, LogError> {
        let path = target_path(base_path, suffix);

        let mut options = OpenOptions::new();
        options.write(true);
        match policy {
            CreatePolicy::Truncate => options.create(true).truncate(true),
            CreatePolicy::CreateNew => options.create_new(true),
        };
        restrict_sharing(&mut options);

        match options.open(&path) {
            Ok(file) => Ok(Self {
                file,
                path,
                written: 0,
            }),
            Err(source) => Err(LogError::Create { path, source }),
        }
    }

    /// Path of the file on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total bytes the OS reported as written so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Append `bytes` with a single `write` call.
    ///
    /// A short write is reported through the returned count, not retried.
    /// Messages are bounded, so the OS writes them whole in practice.
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, LogError> {
        match self.file.write(bytes) {
            Ok(n) => {
                self.written += n as u64;
                Ok(n)
            }
            Err(source) => Err(LogError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Release the OS handle.
    pub fn close(self) {
        let Self { file, .. } = self;
        drop(file);
    }
}

/// Readers may tail the file while it is open, but no second writer may
/// open it.
#[cfg(windows)]
fn restrict_sharing(options: &mut OpenOptions) {
    use std::os::windows::fs::OpenOptionsExt;
    use windows_sys::Win32::Storage::FileSystem::FILE_SHARE_READ;

    options.share_mode(FILE_SHARE_READ);
}

#[cfg(not(windows))]
fn restrict_sharing(_options: &mut OpenOptions) {}
