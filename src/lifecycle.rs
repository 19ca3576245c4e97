//! Process-wide startup and shutdown of the log file.
//!
//! The host guarantees that the file is created before the first log call
//! and closed after the last one, exactly once each. Two ways to meet that:
//!
//! - keep the [`LogGuard`] returned by [`startup`] alive in `main`; dropping
//!   it closes the file;
//! - or call [`shutdown`] explicitly near the end of `main`.
//!
//! Doing both is harmless: the second close is a no-op.

use std::path::Path;
use std::sync::OnceLock;

use crate::config::LogConfig;
use crate::error::LogError;
use crate::fatal::{FatalHandler, Terminate};
use crate::writer::{Logger, SourceLocation};

/// Holder of the one logger a process may start.
#[derive(Debug)]
pub(crate) struct Process {
    logger: OnceLock<Logger>,
}

static PROCESS: Process = Process::new();

impl Process {
    pub(crate) const fn new() -> Self {
        Self {
            logger: OnceLock::new(),
        }
    }

    pub(crate) fn get(&self) -> Option<&Logger> {
        self.logger.get()
    }

    /// Build the logger from the settings beside `exe_path` and open its
    /// file. A settings problem is not fatal: defaults are used and the
    /// problem becomes the first line-group.
    pub(crate) fn try_startup(
        &'static self,
        exe_path: &Path,
        fatal: Box<dyn FatalHandler>,
    ) -> Result<LogGuard, LogError> {
        let (config, problem) = match LogConfig::discover(exe_path) {
            Ok(config) => (config, None),
            Err(e) => (LogConfig::default(), Some(e)),
        };

        // A logger left unopened by a failed create is reused, keeping the
        // settings it was built with.
        let logger = self
            .logger
            .get_or_init(|| Logger::with_boxed_handler(config, fatal));
        logger.try_open_first(exe_path)?;

        if let Some(problem) = problem {
            if let Err(e) = logger.try_log(
                SourceLocation::new(file!(), concat!(line!())),
                format_args!("{problem}; using defaults"),
            ) {
                logger.close();
                return Err(e);
            }
        }
        Ok(LogGuard { process: self })
    }

    pub(crate) fn shutdown(&self) -> bool {
        self.logger.get().is_some_and(Logger::close)
    }
}

/// Closes the process log file when dropped.
#[must_use = "dropping the guard closes the log file immediately"]
#[derive(Debug)]
pub struct LogGuard {
    process: &'static Process,
}

impl LogGuard {
    /// The logger this guard keeps open.
    pub fn logger(&self) -> Option<&'static Logger> {
        self.process.get()
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        self.process.shutdown();
    }
}

/// Create the process log file at `exe_path` plus the configured suffix.
pub fn try_startup(exe_path: &Path) -> Result<LogGuard, LogError> {
    PROCESS.try_startup(exe_path, Box::new(Terminate))
}

/// [`try_startup`] with a custom fatal policy for the process logger.
pub fn try_startup_with(
    exe_path: &Path,
    handler: impl FatalHandler + 'static,
) -> Result<LogGuard, LogError> {
    PROCESS.try_startup(exe_path, Box::new(handler))
}

/// Create the process log file at `exe_path`. Any failure is fatal.
pub fn startup(exe_path: &Path) -> LogGuard {
    match try_startup(exe_path) {
        Ok(guard) => guard,
        Err(e) => die(&e),
    }
}

/// Create the process log file beside the running executable.
pub fn startup_current_exe() -> LogGuard {
    match std::env::current_exe() {
        Ok(exe) => startup(&exe),
        Err(e) => die(&LogError::CurrentExe(e)),
    }
}

/// Close the process log file. Returns whether a handle was released.
pub fn shutdown() -> bool {
    PROCESS.shutdown()
}

/// The process logger, once [`startup`] has run.
pub fn global() -> Option<&'static Logger> {
    PROCESS.get()
}

/// Entry point behind [`exelog!`](crate::exelog). Logging before startup is
/// fatal.
#[doc(hidden)]
pub fn log_global(location: SourceLocation<'_>, args: std::fmt::Arguments<'_>) {
    match PROCESS.get() {
        Some(logger) => logger.log(location, args),
        None => die(&LogError::NotOpen),
    }
}

/// Escalate through the started logger's policy, or terminate when there is
/// no logger yet.
fn die(err: &LogError) -> ! {
    match PROCESS.get() {
        Some(logger) => logger.fail(err),
        None => Terminate.fatal(err),
    }
}

/// Log through the process logger, tagging the call site.
///
/// ```no_run
/// let _guard = exelog::startup_current_exe();
/// exelog::exelog!("value={}", 42);
/// ```
#[macro_export]
macro_rules! exelog {
    ($($arg:tt)+) => {
        $crate::lifecycle::log_global(
            $crate::SourceLocation::new(file!(), concat!(line!())),
            format_args!($($arg)+),
        )
    };
}
