use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::{Emitter, Line, Logger, Style};

/// Channel and style a `log` record is written with.
fn route(level: Level) -> (&'static str, Style) {
    match level {
        Level::Error => ("", Style::Shout),
        Level::Warn => ("", Style::Warn),
        Level::Info => ("", Style::Notice),
        Level::Debug => ("debug", Style::Say),
        Level::Trace => ("trace", Style::Say),
    }
}

/// Routes the `log` macros to a [`Logger`]. Debug and trace records land on
/// the `debug` and `trace` channels, which must be enabled to be seen.
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        let (channel, _) = route(metadata.level());
        !self.is_quiet() && self.is_enabled(channel)
    }

    fn log(&self, record: &Record) {
        let (channel, style) = route(record.level());
        self.emit(Line::new(channel, style, record.args()));
    }

    fn flush(&self) {}
}

impl Logger {
    /// Installs a clone of this logger as the global `log` backend.
    pub fn init_global(&self, level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(level);
        Ok(())
    }
}

#[test]
fn test_route() {
    assert_eq!(route(Level::Error), ("", Style::Shout));
    assert_eq!(route(Level::Info), ("", Style::Notice));
    assert_eq!(route(Level::Trace), ("trace", Style::Say));
}

#[test]
fn test_log_facade() {
    let (l, out) = crate::logger::test_logger();
    l.init_global(LevelFilter::Trace).unwrap();
    assert!(l.init_global(LevelFilter::Trace).is_err());
    log::info!("from log {}", 1);
    log::debug!("hidden");
    l.enable("debug");
    log::debug!("visible");
    assert_eq!(out.contents(), "[ts] from log 1\n[ts] visible\n");
}
