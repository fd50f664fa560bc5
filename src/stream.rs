use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use crate::{Emitter, Line, Logger, line::Origin};

/// Lines written immediately but kept visually under a header.
///
/// The header is repeated, timestamped, whenever something else wrote to the
/// logger since this stream's last line. The stream's own lines are indented.
#[derive(Debug)]
pub struct Stream {
    logger: Logger,
    id: Uuid,
    header: String,
    quiet: AtomicBool,
}

impl Stream {
    pub(crate) fn new(logger: Logger, header: &str, quiet: bool) -> Self {
        Self {
            logger,
            id: Uuid::new_v4(),
            header: header.into(),
            quiet: AtomicBool::new(quiet),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn header_text(&self) -> &str {
        &self.header
    }

    /// Writes the header right away.
    pub fn header(&self) {
        self.logger.output_header(self.is_quiet(), self.id, &self.header);
    }

    /// Silences this stream only.
    pub fn quiet(&self) {
        self.quiet.store(true, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }
}

impl Emitter for Stream {
    fn emit(&self, line: Line) {
        self.logger.output(
            self.is_quiet(),
            std::slice::from_ref(&line),
            Origin::Stream {
                id: self.id,
                header: &self.header,
            },
        );
    }
}

#[cfg(test)]
use crate::logger::test_logger;

#[test]
fn test_stream_header_once() {
    let (l, out) = test_logger();
    let s = l.stream("build");
    s.say("compiling");
    s.notice("linking");
    assert_eq!(out.contents(), "[ts] build\n  compiling\n  linking\n");
}

#[test]
fn test_stream_header_repeated_after_other_output() {
    let (l, out) = test_logger();
    let a = l.stream("a");
    let b = l.stream("b");
    a.say("a1");
    b.say("b1");
    a.say("a2");
    l.say("direct");
    a.say("a3");
    assert_eq!(
        out.contents(),
        "[ts] a\n  a1\n[ts] b\n  b1\n[ts] a\n  a2\n[ts] direct\n[ts] a\n  a3\n"
    );
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_stream_lines_stay_indented_after_header_repeat() {
    let (l, out) = test_logger();
    let s = l.stream("sync");
    s.say("one");
    l.warn("direct");
    s.say("two");
    s.shout("three");
    s.notice("four");
    assert_eq!(
        out.contents(),
        "[ts] sync\n  one\n[ts] direct\n[ts] sync\n  two\n  three\n  four\n"
    );
}

#[test]
fn test_stream_explicit_header() {
    let (l, out) = test_logger();
    let s = l.stream("deploy");
    s.header();
    s.say("step");
    assert_eq!(s.header_text(), "deploy");
    assert_eq!(out.contents(), "[ts] deploy\n  step\n");
}

#[test]
fn test_stream_filtering_and_quiet() {
    let (l, out) = test_logger();
    let s = l.stream("s");
    s.say_as("off", "hidden");
    assert_eq!(out.contents(), "");
    l.enable("on");
    s.say_as("on", "shown");
    s.quiet();
    s.say("dropped");
    s.header();
    assert_eq!(out.contents(), "[ts] s\n  shown\n");
}
