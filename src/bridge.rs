//! Route `log` crate records into the log file.
//!
//! Each record becomes an ordinary line-group: the record's source file and
//! line are the location tags, its formatted arguments the message. Levels
//! are not written. Records emitted by this crate are ignored, since they
//! are produced while the writer is changing state.

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::writer::{Logger, SourceLocation};

/// A [`log::Log`] implementation that writes through a [`Logger`].
#[derive(Debug, Clone, Copy)]
pub struct LogBridge<'a> {
    logger: &'a Logger,
}

impl<'a> LogBridge<'a> {
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }
}

impl log::Log for LogBridge<'_> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let target = metadata.target();
        let own = target
            .strip_prefix(env!("CARGO_CRATE_NAME"))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"));
        !own
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let file = record.file().unwrap_or_else(|| record.target());
        let line = record.line().map(|l| l.to_string()).unwrap_or_default();
        self.logger
            .log(SourceLocation::new(file, &line), *record.args());
    }

    fn flush(&self) {}
}

/// Make `logger` the global `log` backend.
///
/// Fails if another backend is already installed.
pub fn install(logger: &'static Logger) -> Result<(), SetLoggerError> {
    log::set_logger(Box::leak(Box::new(LogBridge::new(logger))))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use log::{Level, Log, Metadata, Record};

    use super::LogBridge;
    use crate::config::LogConfig;
    use crate::fatal::PanicOnFatal;
    use crate::writer::Logger;

    #[test]
    fn record_becomes_line_group() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = Logger::with_fatal_handler(LogConfig::default(), PanicOnFatal);
        let path = logger.try_open(&dir.path().join("app.exe")).expect("open");
        let bridge = LogBridge::new(&logger);

        bridge.log(
            &Record::builder()
                .args(format_args!("disk {}", "full"))
                .level(Level::Warn)
                .target("host")
                .file(Some("host.rs"))
                .line(Some(7))
                .build(),
        );
        logger.close();

        assert_eq!(fs::read_to_string(path).expect("read"), "\nhost.rs|7|disk full");
    }

    #[test]
    fn missing_location_falls_back_to_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logger = Logger::with_fatal_handler(LogConfig::default(), PanicOnFatal);
        let path = logger.try_open(&dir.path().join("app.exe")).expect("open");

        LogBridge::new(&logger).log(
            &Record::builder()
                .args(format_args!("plain"))
                .target("host::net")
                .build(),
        );
        logger.close();

        assert_eq!(fs::read_to_string(path).expect("read"), "\nhost::net||plain");
    }

    #[test]
    fn own_records_are_filtered() {
        let logger = Logger::with_fatal_handler(LogConfig::default(), PanicOnFatal);
        let bridge = LogBridge::new(&logger);

        let own = Metadata::builder().target("exelog::writer").build();
        let host = Metadata::builder().target("viewer::ui").build();
        let lookalike = Metadata::builder().target("exelog_demo").build();
        assert!(!bridge.enabled(&own));
        assert!(bridge.enabled(&host));
        assert!(bridge.enabled(&lookalike));

        // Filtered before reaching the unopened logger, so no fatal error.
        bridge.log(
            &Record::builder()
                .args(format_args!("opened"))
                .target("exelog::writer")
                .build(),
        );
    }
}
