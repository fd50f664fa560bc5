use std::{fmt::Display, sync::Arc};

use crate::{Line, Style};

/// Anything lines can be logged to.
///
/// [`Logger`](crate::Logger) and [`Stream`](crate::Stream) write every line as
/// soon as it is emitted, [`Group`](crate::Group) buffers them until
/// [`Group::done`](crate::Group::done). Unnamed lines go to the default channel,
/// which is always enabled; lines sent to a named channel are dropped unless
/// the channel was enabled on the logger by the time they are flushed.
pub trait Emitter {
    fn emit(&self, line: Line);

    fn say(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new("", Style::Say, message));
    }

    fn notice(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new("", Style::Notice, message));
    }

    fn warn(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new("", Style::Warn, message));
    }

    fn shout(&self, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new("", Style::Shout, message));
    }

    fn say_as(&self, channel: &str, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new(channel, Style::Say, message));
    }

    fn notice_as(&self, channel: &str, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new(channel, Style::Notice, message));
    }

    fn warn_as(&self, channel: &str, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new(channel, Style::Warn, message));
    }

    fn shout_as(&self, channel: &str, message: impl Display)
    where
        Self: Sized,
    {
        self.emit(Line::new(channel, Style::Shout, message));
    }
}

impl<E: Emitter + ?Sized> Emitter for &E {
    fn emit(&self, line: Line) {
        (**self).emit(line)
    }
}

impl<E: Emitter + ?Sized> Emitter for Arc<E> {
    fn emit(&self, line: Line) {
        (**self).emit(line)
    }
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn emit(&self, line: Line) {
        (**self).emit(line)
    }
}

/// Logs a [`Style::Say`] line with `format!` syntax: `say!(log, "{n} files")`
/// or, on a named channel, `say!(log, as "debug"; "{n} files")`.
#[macro_export]
macro_rules! say {
    ($log:expr, as $channel:expr; $($arg:tt)+) => {
        $crate::Emitter::say_as(&$log, $channel, ::std::format_args!($($arg)+))
    };
    ($log:expr, $($arg:tt)+) => {
        $crate::Emitter::say(&$log, ::std::format_args!($($arg)+))
    };
}

/// Logs a [`Style::Notice`] line, see [`say!`].
#[macro_export]
macro_rules! notice {
    ($log:expr, as $channel:expr; $($arg:tt)+) => {
        $crate::Emitter::notice_as(&$log, $channel, ::std::format_args!($($arg)+))
    };
    ($log:expr, $($arg:tt)+) => {
        $crate::Emitter::notice(&$log, ::std::format_args!($($arg)+))
    };
}

/// Logs a [`Style::Warn`] line, see [`say!`].
#[macro_export]
macro_rules! warn {
    ($log:expr, as $channel:expr; $($arg:tt)+) => {
        $crate::Emitter::warn_as(&$log, $channel, ::std::format_args!($($arg)+))
    };
    ($log:expr, $($arg:tt)+) => {
        $crate::Emitter::warn(&$log, ::std::format_args!($($arg)+))
    };
}

/// Logs a [`Style::Shout`] line, see [`say!`].
#[macro_export]
macro_rules! shout {
    ($log:expr, as $channel:expr; $($arg:tt)+) => {
        $crate::Emitter::shout_as(&$log, $channel, ::std::format_args!($($arg)+))
    };
    ($log:expr, $($arg:tt)+) => {
        $crate::Emitter::shout(&$log, ::std::format_args!($($arg)+))
    };
}

#[cfg(test)]
#[derive(Default)]
struct Recorder(std::sync::Mutex<Vec<Line>>);

#[cfg(test)]
impl Emitter for Recorder {
    fn emit(&self, line: Line) {
        self.0.lock().unwrap().push(line);
    }
}

#[test]
fn test_provided_methods() {
    let recorder = Recorder::default();
    recorder.say("a");
    recorder.notice("b");
    recorder.warn_as("net", "c");
    recorder.shout_as("net", format_args!("{}", 4));
    let lines = recorder.0.lock().unwrap();
    let summary: Vec<_> = lines
        .iter()
        .map(|l| (l.channel(), l.style(), l.message()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("", Style::Say, "a"),
            ("", Style::Notice, "b"),
            ("net", Style::Warn, "c"),
            ("net", Style::Shout, "4"),
        ]
    );
}

#[test]
fn test_macros_through_shared_handles() {
    let recorder = Arc::new(Recorder::default());
    let shared: Arc<dyn Emitter> = recorder.clone();
    let n = 2;
    crate::say!(shared, "{n} files");
    crate::warn!(shared, as "fs"; "{} left", n + 1);
    crate::notice!(&shared, "plain");
    crate::shout!(recorder, as "fs"; "boom");
    let lines = recorder.0.lock().unwrap();
    let summary: Vec<_> = lines
        .iter()
        .map(|l| (l.channel(), l.style(), l.message()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("", Style::Say, "2 files"),
            ("fs", Style::Warn, "3 left"),
            ("", Style::Notice, "plain"),
            ("fs", Style::Shout, "boom"),
        ]
    );
}
