use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use crate::{Emitter, Line, Logger, Palette, line::Origin};

/// A collected group of lines, written as one uninterrupted block on [`Group::done`].
///
/// Channels are checked when the group is flushed, not when lines are added,
/// so enabling a channel on the logger in between makes its lines show up.
#[derive(Debug)]
pub struct Group {
    logger: Logger,
    lines: Mutex<Vec<Line>>,
    quiet: AtomicBool,
}

impl Group {
    pub(crate) fn new(logger: Logger, quiet: bool) -> Self {
        Self {
            logger,
            lines: Mutex::new(Vec::new()),
            quiet: AtomicBool::new(quiet),
        }
    }

    /// Discards everything this group collects.
    pub fn quiet(&self) {
        self.quiet.store(true, Ordering::Relaxed);
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet.load(Ordering::Relaxed)
    }

    pub fn palette(&self) -> &Palette {
        self.logger.palette()
    }

    /// Number of lines waiting for [`Group::done`].
    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes the collected lines. The first surviving line is timestamped and
    /// the rest are indented below it. The buffer is drained, so calling `done`
    /// again only writes lines added since.
    pub fn done(&self) {
        let lines = {
            let mut buffer = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *buffer)
        };
        self.logger.output(self.is_quiet(), &lines, Origin::Direct);
    }
}

impl Emitter for Group {
    fn emit(&self, line: Line) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }
}

#[cfg(test)]
use crate::logger::test_logger;

#[test]
fn test_group() {
    let (l, out) = test_logger();
    l.enable("on");

    let g1 = l.group();
    let g2 = l.group();
    let g3 = l.group();

    // Groups can be silenced
    let g4 = l.group();
    g4.quiet();
    g4.say("quiet");
    g4.done();

    // Groups can be empty
    let g5 = l.group();
    g5.done();

    g1.say("g1 - say");
    g2.say("g2 - say");
    g3.say_as("on", "on - g3 - say");
    g3.say_as("off", "off");
    g1.notice("g1 - notice");
    g2.notice("g2 - notice");
    g3.notice_as("on", "on - g3 - notice");
    g1.warn("g1 - warn");
    g2.warn("g2 - warn");
    g3.warn_as("on", "on - g3 - warn");
    g1.shout("g1 - shout");
    g2.shout("g2 - shout");
    g3.shout_as("on", "on - g3 - shout");
    assert_eq!(out.contents(), "");

    g1.done();
    g2.done();
    g3.done();

    assert_eq!(
        out.contents(),
        "[ts] g1 - say\n  g1 - notice\n  g1 - warn\n  g1 - shout\n\
         [ts] g2 - say\n  g2 - notice\n  g2 - warn\n  g2 - shout\n\
         [ts] on - g3 - say\n  on - g3 - notice\n  on - g3 - warn\n  on - g3 - shout\n"
    );
}

#[test]
fn test_group_not_interleaved_with_direct_lines() {
    let (l, out) = test_logger();
    let g = l.group();
    g.say("a");
    l.say("direct");
    g.notice("b");
    g.done();
    assert_eq!(out.contents(), "[ts] direct\n[ts] a\n  b\n");
}

#[test]
fn test_channel_checked_at_flush() {
    let (l, out) = test_logger();
    let g = l.group();
    g.say_as("debug", "late");
    l.enable("debug");
    g.done();
    assert_eq!(out.contents(), "[ts] late\n");
}

#[test]
fn test_filtered_lines_do_not_take_the_timestamp() {
    let (l, out) = test_logger();
    let g = l.group();
    g.say_as("off", "hidden");
    g.say("visible");
    g.warn("second");
    g.done();
    let only_hidden = l.group();
    only_hidden.say_as("off", "hidden");
    only_hidden.done();
    assert_eq!(out.contents(), "[ts] visible\n  second\n");
}

#[test]
fn test_done_twice_does_not_repeat() {
    let (l, out) = test_logger();
    let g = l.group();
    g.say("once");
    assert_eq!(g.len(), 1);
    g.done();
    assert!(g.is_empty());
    g.done();
    g.say("later");
    g.done();
    assert_eq!(out.contents(), "[ts] once\n[ts] later\n");
}

#[test]
fn test_quiet_snapshot() {
    let (l, out) = test_logger();
    let before = l.group();
    l.quiet();
    let after = l.group();
    assert!(!before.is_quiet());
    assert_eq!(before.palette(), l.palette());
    assert!(after.is_quiet());
    before.say("kept");
    after.say("dropped");
    before.done();
    after.done();
    l.say("dropped too");
    assert_eq!(out.contents(), "[ts] kept\n");
}

#[test]
fn test_quiet_after_lines() {
    let (l, out) = test_logger();
    let g = l.group();
    g.say("one");
    g.quiet();
    g.say("two");
    g.done();
    assert_eq!(out.contents(), "");
}

#[test]
fn test_concurrent_groups_stay_contiguous() {
    let (l, out) = test_logger();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let l = l.clone();
            std::thread::spawn(move || {
                for _ in 0..20 {
                    let g = l.group();
                    for j in 0..5 {
                        crate::say!(g, "group {i} line {j}");
                        l.say("direct");
                    }
                    g.done();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    let contents = out.contents();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 8 * 20 * 10);
    let mut index = 0;
    while index < lines.len() {
        if lines[index] == "[ts] direct" {
            index += 1;
            continue;
        }
        let head = lines[index]
            .strip_prefix("[ts] ")
            .expect("group must start with a timestamp");
        let group = head.trim_end_matches(" line 0");
        assert!(head.ends_with(" line 0"));
        for j in 1..5 {
            assert_eq!(lines[index + j], format!("  {group} line {j}"));
        }
        index += 5;
    }
}

#[test]
fn test_group_shared_between_threads() {
    let (l, out) = test_logger();
    let g = std::sync::Arc::new(l.group());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let g = g.clone();
            std::thread::spawn(move || crate::say!(g, "worker {i}"))
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    g.done();
    let contents = out.contents();
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("[ts] worker "));
    assert!(lines[1..].iter().all(|line| line.starts_with("  worker ")));
}
