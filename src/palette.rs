use colored::{Color, Colorize};

use crate::Style;

/// Makes `colored` emit escape codes even when stdout is not a terminal.
///
/// `colored` keeps this switch process-wide. Loggers with colors off never
/// paint, so they are not affected.
pub(crate) fn force_colors() {
    colored::control::set_override(true);
}

/// Color descriptor for one palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Paint {
    color: Option<Color>,
    bold: bool,
}

impl Paint {
    /// Terminal default foreground.
    pub const fn plain() -> Self {
        Self {
            color: None,
            bold: false,
        }
    }

    pub const fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            bold: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Applies the paint to `text`.
    pub fn paint(&self, text: &str) -> String {
        if self.color.is_none() && !self.bold {
            return text.to_string();
        }
        let mut painted = text.normal();
        if let Some(color) = self.color {
            painted = painted.color(color);
        }
        if self.bold {
            painted = painted.bold();
        }
        painted.to_string()
    }
}

/// Colors used for each part of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub timestamp: Paint,
    pub say: Paint,
    pub notice: Paint,
    pub warn: Paint,
    pub shout: Paint,
}

impl Palette {
    pub fn get(&self, style: Style) -> &Paint {
        match style {
            Style::Say => &self.say,
            Style::Notice => &self.notice,
            Style::Warn => &self.warn,
            Style::Shout => &self.shout,
        }
    }
}

impl Default for Palette {
    /// Say: terminal default, Notice: blue, Warn: yellow, Shout: red, Timestamp: cyan.
    fn default() -> Self {
        Self {
            timestamp: Paint::fg(Color::Cyan),
            say: Paint::plain(),
            notice: Paint::fg(Color::Blue),
            warn: Paint::fg(Color::Yellow),
            shout: Paint::fg(Color::Red),
        }
    }
}

#[test]
fn test_plain_paint_is_untouched() {
    assert_eq!(Paint::plain().paint("hello"), "hello");
    assert_eq!(Palette::default().get(Style::Say).paint("hello"), "hello");
}

#[test]
fn test_forced_paint_emits_escape_codes() {
    force_colors();
    let painted = Paint::fg(Color::Red).bold().paint("boom");
    assert!(painted.starts_with("\x1b["));
    assert!(painted.contains("boom"));
    assert!(painted.ends_with("\x1b[0m"));
}
