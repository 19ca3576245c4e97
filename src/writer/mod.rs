//! Serialized writer over the shared log file handle.
//!
//! [`Logger`] owns the handle state behind one `parking_lot::Mutex`. A log
//! call holds that lock across rendering and the whole line-group write, so
//! groups from concurrent threads never interleave. Their order in the file
//! is the order in which the threads acquired the lock.
//!
//! File format, one group per call:
//!
//! ```text
//! \n<file>|<line>|<message>
//! ```
//!
//! Neither `|` nor newlines inside a message are escaped.

mod render;

pub use render::{BoundedBuf, MESSAGE_CAPACITY, render};

use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::config::LogConfig;
use crate::error::LogError;
use crate::fatal::{self, FatalHandler, Terminate};
use crate::log_file::LogFile;

/// Separator between the fields of a line-group.
pub const SEPARATOR: &[u8] = b"|";

/// Caller-supplied source tags, already rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation<'a> {
    pub file: &'a str,
    pub line: &'a str,
}

impl<'a> SourceLocation<'a> {
    pub const fn new(file: &'a str, line: &'a str) -> Self {
        Self { file, line }
    }
}

/// Lifecycle of the handle owned by a [`Logger`].
#[derive(Debug, Default)]
pub enum HandleState {
    /// Nothing opened yet.
    #[default]
    Uninitialized,
    /// File open and writable.
    Open(LogFile),
    /// Handle released; logging is a contract violation.
    Closed,
}

impl HandleState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// The log file handle plus the lock that serializes its writers.
pub struct Logger {
    state: Mutex<HandleState>,
    config: LogConfig,
    fatal: Box<dyn FatalHandler>,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Logger");
        // Formatting happens under the lock when a logger logs itself.
        match self.state.try_lock() {
            Some(state) => s.field("state", &*state),
            None => s.field("state", &format_args!("<locked>")),
        };
        s.field("config", &self.config).finish_non_exhaustive()
    }
}

impl Logger {
    /// Create an unopened logger that terminates the process on fatal errors.
    pub fn new(config: LogConfig) -> Self {
        Self::with_fatal_handler(config, Terminate)
    }

    /// Create an unopened logger with a custom fatal policy.
    pub fn with_fatal_handler(config: LogConfig, handler: impl FatalHandler + 'static) -> Self {
        Self::with_boxed_handler(config, Box::new(handler))
    }

    pub(crate) fn with_boxed_handler(config: LogConfig, fatal: Box<dyn FatalHandler>) -> Self {
        Self {
            state: Mutex::new(HandleState::Uninitialized),
            config,
            fatal,
        }
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// True while a handle is held.
    pub fn is_open(&self) -> bool {
        self.state.lock().is_open()
    }

    /// Path of the open log file, if any.
    pub fn path(&self) -> Option<PathBuf> {
        match &*self.state.lock() {
            HandleState::Open(file) => Some(file.path().to_path_buf()),
            HandleState::Uninitialized | HandleState::Closed => None,
        }
    }

    /// Open the log file derived from `base_path` and the configured suffix.
    ///
    /// Valid from `Uninitialized` or `Closed`. Returns the file's path.
    pub fn try_open(&self, base_path: &Path) -> Result<PathBuf, LogError> {
        self.open_when(base_path, |state| {
            if state.is_open() {
                Err(LogError::AlreadyOpen)
            } else {
                Ok(())
            }
        })
    }

    /// Open only a logger that has never held a handle. Once opened, the
    /// logger counts as started even after it closes.
    pub(crate) fn try_open_first(&self, base_path: &Path) -> Result<PathBuf, LogError> {
        self.open_when(base_path, |state| match state {
            HandleState::Uninitialized => Ok(()),
            HandleState::Open(_) | HandleState::Closed => Err(LogError::AlreadyStarted),
        })
    }

    fn open_when(
        &self,
        base_path: &Path,
        check: impl FnOnce(&HandleState) -> Result<(), LogError>,
    ) -> Result<PathBuf, LogError> {
        let path = {
            let mut state = self.state.lock();
            check(&state)?;
            let file = LogFile::create_with_suffix(
                base_path,
                self.config.effective_suffix(),
                self.config.policy,
            )?;
            let path = file.path().to_path_buf();
            *state = HandleState::Open(file);
            path
        };
        log::debug!("opened {}", path.display());
        Ok(path)
    }

    /// Like [`Logger::try_open`], but any failure is fatal.
    pub fn open(&self, base_path: &Path) -> PathBuf {
        match self.try_open(base_path) {
            Ok(path) => path,
            Err(e) => self.fatal.fatal(&e),
        }
    }

    /// Release the handle. Returns whether one was held; closing an unopened
    /// or already closed logger does nothing.
    pub fn close(&self) -> bool {
        let previous = {
            let mut state = self.state.lock();
            match std::mem::take(&mut *state) {
                HandleState::Open(file) => {
                    *state = HandleState::Closed;
                    Some(file)
                }
                other => {
                    *state = other;
                    None
                }
            }
        };
        match previous {
            Some(file) => {
                let path = file.path().to_path_buf();
                let bytes = file.bytes_written();
                file.close();
                log::debug!("closed {} after {bytes} bytes", path.display());
                true
            }
            None => false,
        }
    }

    /// Write one line-group, reporting failures instead of escalating them.
    pub fn try_log(
        &self,
        location: SourceLocation<'_>,
        args: fmt::Arguments<'_>,
    ) -> Result<(), LogError> {
        let message = {
            let mut state = self.state.lock();
            let HandleState::Open(file) = &mut *state else {
                return Err(LogError::NotOpen);
            };
            let message = render(args, self.config.effective_message_capacity())?;
            write_line_group(file, location, &message)?;
            message
        };
        if self.config.modal {
            fatal::show_message(&message);
        }
        Ok(())
    }

    /// Write one line-group. Any failure is fatal.
    pub fn log(&self, location: SourceLocation<'_>, args: fmt::Arguments<'_>) {
        if let Err(e) = self.try_log(location, args) {
            self.fatal.fatal(&e);
        }
    }

    /// Escalate `err` through this logger's fatal policy.
    pub fn fail(&self, err: &LogError) -> ! {
        self.fatal.fatal(err)
    }
}

/// Newline, file tag, separator, line tag, separator, message: six appends.
fn write_line_group(
    file: &mut LogFile,
    location: SourceLocation<'_>,
    message: &str,
) -> Result<(), LogError> {
    let fragments: [&[u8]; 6] = [
        b"\n",
        location.file.as_bytes(),
        SEPARATOR,
        location.line.as_bytes(),
        SEPARATOR,
        message.as_bytes(),
    ];
    for fragment in fragments {
        file.write(fragment)?;
    }
    Ok(())
}

/// Log through an explicit [`Logger`], tagging the call site.
///
/// ```no_run
/// # let logger = exelog::Logger::new(exelog::LogConfig::default());
/// exelog::exelog_to!(logger, "value={}", 42);
/// ```
#[macro_export]
macro_rules! exelog_to {
    ($logger:expr, $($arg:tt)+) => {
        $logger.log(
            $crate::SourceLocation::new(file!(), concat!(line!())),
            format_args!($($arg)+),
        )
    };
}
