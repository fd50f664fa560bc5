//! # termlog
//! Leveled, colorized and timestamped logging for interactive command-line programs.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! termlog = "0.1.0"
//! ```
//!
//! ```rust
//! use termlog::{Emitter, Logger};
//!
//! let log = Logger::new();
//! log.say("Hello, world!");
//! log.warn(format_args!("{} files skipped", 3));
//! termlog::shout!(log, "{} errors", 1);
//! ```
//!
//! ## Channels
//! Lines logged with the `*_as` methods belong to a named channel and are dropped
//! until the channel is enabled. Unnamed lines are always shown.
//!
//! ```rust
//! use termlog::{Emitter, MemoryWriter, logger_config};
//!
//! let out = MemoryWriter::new();
//! let log = logger_config()
//!     .with_time_format("[ts] ")
//!     .no_color()
//!     .with_output(out.clone())
//!     .build();
//! log.enable("on");
//! log.say("say");
//! log.say_as("off", "x");
//! log.say_as("on", "on-say");
//! assert_eq!(out.contents(), "[ts] say\n[ts] on-say\n");
//! ```
//!
//! ## Groups
//! A group collects lines and writes them as one block when done. Concurrent
//! writers never end up in the middle of it.
//!
//! ```rust
//! use termlog::{Emitter, MemoryWriter, logger_config};
//!
//! let out = MemoryWriter::new();
//! let log = logger_config()
//!     .with_time_format("[ts] ")
//!     .no_color()
//!     .with_output(out.clone())
//!     .build();
//! let group = log.group();
//! group.say("a");
//! log.say("direct");
//! group.notice("b");
//! group.done();
//! assert_eq!(out.contents(), "[ts] direct\n[ts] a\n  b\n");
//! ```
//!
//! ## Configuration
//! Loggers built without explicit settings read `TERMLOG_TIME_FORMAT`,
//! `TERMLOG_CHANNELS` and `TERMLOG_COLOR` (`auto`, `always`, `never`).

mod bridge;
mod config;
pub mod context;
mod emitter;
mod group;
mod line;
mod log_writer;
mod logger;
mod palette;
mod render;
mod stream;

pub use colored::Color;
pub use config::{ConfigBuilder, TERMLOG_ENV, TermlogEnv, logger_config};
pub use context::{from_context, scope};
pub use emitter::Emitter;
pub use group::Group;
pub use line::{Line, ParseStyleError, Style};
pub use log_writer::{MemoryWriter, set_output};
pub use logger::Logger;
pub use palette::{Paint, Palette};
pub use render::{DEFAULT_TIME_FORMAT, INDENT};
pub use stream::Stream;

#[test]
fn test_global_output() {
    let out = MemoryWriter::new();
    set_output(out.clone());
    let log = logger_config().with_time_format("[ts] ").no_color().build();
    log.say("to the global sink");
    let group = log.group();
    group.say("a");
    group.say("b");
    group.done();
    set_output(std::io::stdout());
    log.say("back on stdout");
    assert_eq!(out.contents(), "[ts] to the global sink\n[ts] a\n  b\n");
}
