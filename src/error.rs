//! Error taxonomy for the log file and its writer.
//!
//! Every variant is fatal once it reaches the fire-and-forget surface
//! (`Logger::log`, `startup`); the fallible `try_*` layer returns them so
//! hosts and tests can observe what went wrong.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while creating, writing, or configuring the log file.
#[derive(Debug, Error)]
pub enum LogError {
    /// The target file could not be created or opened.
    #[error("cannot create log file {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },
    /// The OS rejected an append.
    #[error("cannot write log file {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    /// A `Display` impl inside the message arguments reported an error.
    #[error("message formatting failed")]
    Format(#[from] fmt::Error),
    /// Logging was attempted before the file was opened or after it closed.
    #[error("log file is not open")]
    NotOpen,
    /// `open` was called on a logger that already holds a handle.
    #[error("log file is already open")]
    AlreadyOpen,
    /// The process-wide logger was started a second time.
    #[error("process log file was already started")]
    AlreadyStarted,
    /// The running executable's path could not be determined.
    #[error("cannot resolve executable path: {0}")]
    CurrentExe(#[source] io::Error),
    /// The settings file exists but could not be read or parsed.
    #[error("config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}
