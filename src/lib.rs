//! Last-resort log file for console-less GUI processes.
//!
//! A windowed process with no console and no debugger attached still needs
//! somewhere to leave a trail. `exelog` creates `<executable>.log` beside the
//! executable at startup, appends one line-group per call from any number of
//! threads, and closes the file at exit.
//!
//! ```no_run
//! let _guard = exelog::startup_current_exe();
//! exelog::exelog!("STARTING");
//! ```
//!
//! Every failure inside the logger is fatal: the error is shown in a modal
//! dialog and the process exits. The `try_*` functions return the error
//! instead.

pub mod bridge;
pub mod config;
pub mod error;
pub mod fatal;
pub mod lifecycle;
pub mod log_file;
pub mod writer;

pub use config::{LogConfig, config_path};
pub use error::LogError;
pub use fatal::{FatalHandler, PanicOnFatal, Terminate};
pub use lifecycle::{
    LogGuard, global, shutdown, startup, startup_current_exe, try_startup, try_startup_with,
};
pub use log_file::{CreatePolicy, LogFile};
pub use writer::{HandleState, Logger, SourceLocation};
