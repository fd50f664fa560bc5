use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use uuid::Uuid;

use crate::{
    Emitter, Group, Line, Palette, Stream, config::logger_config, line::Origin,
    log_writer::Output, palette::force_colors, render::{Layout, Renderer},
};

/// Everything the flush path reads or writes, guarded by one lock.
#[derive(Debug)]
struct State {
    channels: HashSet<String>,
    quiet: bool,
    color: bool,
    output: Output,
    /// Stream that wrote the previous batch, if any.
    last_stream: Option<Uuid>,
}

#[derive(Debug)]
struct Shared {
    renderer: Renderer,
    state: Mutex<State>,
}

/// Top-level logger. Lines are written as soon as they are emitted.
///
/// Cloning is cheap and clones share channels, quiet flag and output.
#[derive(Debug, Clone)]
pub struct Logger {
    shared: Arc<Shared>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Logger with the default palette and time format writing to the process-wide
    /// output. Colors are on when `colored` would color stdout, which needs a
    /// terminal and no `NO_COLOR`.
    pub fn new() -> Self {
        logger_config().build()
    }

    pub(crate) fn from_parts(
        renderer: Renderer,
        channels: HashSet<String>,
        quiet: bool,
        color: bool,
        output: Output,
    ) -> Self {
        if color {
            force_colors();
        }
        Self {
            shared: Arc::new(Shared {
                renderer,
                state: Mutex::new(State {
                    channels,
                    quiet,
                    color,
                    output,
                    last_stream: None,
                }),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Enables a channel. Applies to every later flush, including groups created before.
    pub fn enable(&self, channel: &str) {
        let mut state = self.state();
        if !state.channels.contains(channel) {
            state.channels.insert(channel.into());
        }
    }

    pub fn is_enabled(&self, channel: &str) -> bool {
        self.state().channels.contains(channel)
    }

    /// Silences the logger. Groups and streams created earlier keep their own flag.
    pub fn quiet(&self) {
        self.state().quiet = true;
    }

    pub fn is_quiet(&self) -> bool {
        self.state().quiet
    }

    /// Turns colored output on or off. Turning it on forces escape codes even
    /// when the output is not a terminal.
    pub fn color(&self, yes: bool) {
        if yes {
            force_colors();
        }
        self.state().color = yes;
    }

    pub fn is_color(&self) -> bool {
        self.state().color
    }

    pub fn palette(&self) -> &Palette {
        self.shared.renderer.palette()
    }

    pub fn time_format(&self) -> &str {
        self.shared.renderer.time_format()
    }

    /// Starts a group whose lines are written together on [`Group::done`].
    pub fn group(&self) -> Group {
        Group::new(self.clone(), self.is_quiet())
    }

    /// Starts a stream of lines written under `header`.
    pub fn stream(&self, header: &str) -> Stream {
        Stream::new(self.clone(), header, self.is_quiet())
    }

    /// Writes a batch on behalf of a group or stream carrying its own quiet flag.
    pub(crate) fn output(&self, quiet: bool, lines: &[Line], origin: Origin<'_>) {
        if quiet || lines.is_empty() {
            return;
        }
        let mut state = self.state();
        self.write_locked(&mut state, lines, origin);
    }

    /// Writes a stream header on its own.
    pub(crate) fn output_header(&self, quiet: bool, id: Uuid, header: &str) {
        if quiet {
            return;
        }
        let mut state = self.state();
        let text = self.shared.renderer.header(header, state.color);
        state.output.write_batch(&text);
        state.last_stream = Some(id);
    }

    fn write_locked(&self, state: &mut State, lines: &[Line], origin: Origin<'_>) {
        let layout = match origin {
            Origin::Direct => Layout::Batch,
            Origin::Stream { id, header } => Layout::Stream {
                header: (state.last_stream != Some(id)).then_some(header),
            },
        };
        let channels = &state.channels;
        let surviving = lines.iter().filter(|line| channels.contains(line.channel()));
        let Some(text) = self.shared.renderer.render(surviving, layout, state.color) else {
            return;
        };
        state.output.write_batch(&text);
        state.last_stream = match origin {
            Origin::Direct => None,
            Origin::Stream { id, .. } => Some(id),
        };
    }
}

impl Emitter for Logger {
    fn emit(&self, line: Line) {
        let mut state = self.state();
        if state.quiet {
            return;
        }
        self.write_locked(&mut state, std::slice::from_ref(&line), Origin::Direct);
    }
}

#[cfg(test)]
pub(crate) fn test_logger() -> (Logger, crate::MemoryWriter) {
    let writer = crate::MemoryWriter::new();
    let logger = logger_config()
        .with_time_format("[ts] ")
        .no_color()
        .with_output(writer.clone())
        .build();
    (logger, writer)
}

#[test]
fn test_basic() {
    let (l, out) = test_logger();
    l.enable("on");
    l.say("say");
    l.notice("notice");
    l.warn("warn");
    l.shout("shout");

    // Not enabled
    l.say_as("off", "off");
    l.say_as("on", "on - say");
    l.notice_as("on", "on - notice");
    l.warn_as("on", "on - warn");
    l.shout_as("on", "on - shout");

    assert_eq!(
        out.contents(),
        "[ts] say\n[ts] notice\n[ts] warn\n[ts] shout\n\
         [ts] on - say\n[ts] on - notice\n[ts] on - warn\n[ts] on - shout\n"
    );
}

#[test]
fn test_enable_is_idempotent() {
    let (l, out) = test_logger();
    l.enable("net");
    l.enable("net");
    l.say_as("net", "once");
    assert_eq!(out.contents(), "[ts] once\n");
}

#[test]
fn test_quiet_logger() {
    let (l, out) = test_logger();
    l.say("before");
    l.quiet();
    l.say("after");
    l.shout_as("", "after");
    assert!(l.is_quiet());
    assert_eq!(out.contents(), "[ts] before\n");
}

#[test]
fn test_clones_share_state() {
    let (l, out) = test_logger();
    let other = l.clone();
    other.enable("net");
    l.say_as("net", "shared");
    assert_eq!(out.contents(), "[ts] shared\n");
}

#[test]
fn test_forced_color() {
    let out = crate::MemoryWriter::new();
    let l = logger_config()
        .with_time_format("[ts] ")
        .with_color(true)
        .with_output(out.clone())
        .build();
    assert!(l.is_color());
    l.notice("x");
    let contents = out.take();
    // cyan timestamp, blue notice
    assert!(contents.starts_with("\x1b[36m[ts] \x1b[0m"));
    assert!(contents.contains("\x1b[34mx\x1b[0m"));
    assert!(contents.ends_with('\n'));
    let expected = format!(
        "{}{}\n",
        l.palette().timestamp.paint("[ts] "),
        l.palette().notice.paint("x")
    );
    assert_eq!(contents, expected);

    let (plain, plain_out) = test_logger();
    plain.color(true);
    plain.shout("y");
    assert!(plain_out.contents().contains("\x1b[31my\x1b[0m"));
    plain.color(false);
    plain.shout("z");
    assert!(plain_out.contents().ends_with("[ts] z\n"));
}

#[test]
fn test_color_toggle() {
    let (l, out) = test_logger();
    l.color(true);
    assert!(l.is_color());
    l.color(false);
    l.notice("plain");
    assert_eq!(out.contents(), "[ts] plain\n");
}

#[test]
fn test_concurrent_direct_lines_are_whole() {
    let (l, out) = test_logger();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let l = l.clone();
            std::thread::spawn(move || {
                for j in 0..50 {
                    crate::say!(l, "thread {i} line {j}");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let contents = out.contents();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 400);
    assert!(lines.iter().all(|line| line.starts_with("[ts] thread ")));
}
