use std::fmt::Write;

use chrono::Local;

use crate::{Line, Palette, Style};

/// chrono rendering of `HH:MM:SS: `.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S: ";
/// Prefix of every line of a batch but the first.
pub const INDENT: &str = "  ";

/// How the rows of a batch are prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Layout<'a> {
    /// First row timestamped, the rest indented.
    Batch,
    /// Every row indented, below the header when it has to be repeated.
    Stream { header: Option<&'a str> },
}

/// Turns batches of lines into the final text written to the output.
#[derive(Debug, Clone)]
pub(crate) struct Renderer {
    palette: Palette,
    time_format: String,
}

impl Renderer {
    pub(crate) fn new(palette: Palette, time_format: String) -> Self {
        Self {
            palette,
            time_format,
        }
    }

    pub(crate) fn palette(&self) -> &Palette {
        &self.palette
    }

    pub(crate) fn time_format(&self) -> &str {
        &self.time_format
    }

    /// Renders the surviving lines of a batch. Returns `None` when there is
    /// nothing to write, in which case a pending header is not written either.
    pub(crate) fn render<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a Line>,
        layout: Layout<'_>,
        color: bool,
    ) -> Option<String> {
        let mut out = String::new();
        let mut stamped = match layout {
            Layout::Batch => true,
            Layout::Stream { header } => {
                if let Some(header) = header {
                    self.push_row(&mut out, true, Style::Say, header, color);
                }
                false
            }
        };
        let mut any = false;
        for line in lines {
            self.push_row(&mut out, stamped, line.style(), line.message(), color);
            stamped = false;
            any = true;
        }
        any.then_some(out)
    }

    /// A lone timestamped header row.
    pub(crate) fn header(&self, header: &str, color: bool) -> String {
        let mut out = String::new();
        self.push_row(&mut out, true, Style::Say, header, color);
        out
    }

    fn push_row(&self, out: &mut String, stamped: bool, style: Style, text: &str, color: bool) {
        if stamped {
            let ts = self.timestamp();
            if color {
                out.push_str(&self.palette.timestamp.paint(&ts));
            } else {
                out.push_str(&ts);
            }
        } else {
            out.push_str(INDENT);
        }
        if color {
            out.push_str(&self.palette.get(style).paint(text));
        } else {
            out.push_str(text);
        }
        out.push('\n');
    }

    fn timestamp(&self) -> String {
        let mut ts = String::new();
        // chrono reports an invalid format specifier as a fmt error
        if write!(ts, "{}", Local::now().format(&self.time_format)).is_err() {
            ts.clear();
        }
        ts
    }
}

#[cfg(test)]
fn renderer(time_format: &str) -> Renderer {
    Renderer::new(Palette::default(), time_format.into())
}

#[test]
fn test_render_batch_layout() {
    let lines = [
        Line::new("", Style::Say, "a"),
        Line::new("", Style::Notice, "b"),
        Line::new("", Style::Shout, "c"),
    ];
    let out = renderer("[ts] ").render(&lines, Layout::Batch, false).unwrap();
    assert_eq!(out, "[ts] a\n  b\n  c\n");
}

#[test]
fn test_render_with_header() {
    let lines = [Line::new("", Style::Warn, "x")];
    let out = renderer("[ts] ")
        .render(&lines, Layout::Stream { header: Some("build") }, false)
        .unwrap();
    assert_eq!(out, "[ts] build\n  x\n");
    let lines = [Line::new("", Style::Say, "y"), Line::new("", Style::Say, "z")];
    let out = renderer("[ts] ")
        .render(&lines, Layout::Stream { header: None }, false)
        .unwrap();
    assert_eq!(out, "  y\n  z\n");
}

#[test]
fn test_render_empty_batch() {
    let empty: Vec<Line> = Vec::new();
    assert_eq!(renderer("[ts] ").render(&empty, Layout::Batch, false), None);
    let layout = Layout::Stream {
        header: Some("header"),
    };
    assert_eq!(renderer("[ts] ").render(&empty, layout, false), None);
}

#[test]
fn test_default_time_format_shape() {
    let out = renderer(DEFAULT_TIME_FORMAT)
        .render(&[Line::new("", Style::Say, "hi")], Layout::Batch, false)
        .unwrap();
    let bytes = out.as_bytes();
    assert_eq!(out.len(), "HH:MM:SS: hi\n".len());
    assert!(bytes[..2].iter().all(u8::is_ascii_digit));
    assert_eq!(bytes[2], b':');
    assert!(bytes[3..5].iter().all(u8::is_ascii_digit));
    assert_eq!(bytes[5], b':');
    assert!(bytes[6..8].iter().all(u8::is_ascii_digit));
    assert!(out.ends_with(": hi\n"));
}

#[test]
fn test_invalid_time_format_does_not_panic() {
    let out = renderer("%Q ")
        .render(&[Line::new("", Style::Say, "hi")], Layout::Batch, false)
        .unwrap();
    assert_eq!(out, "hi\n");
}
