use std::{fmt, str::FromStr};

use uuid::Uuid;

/// Severity of a line. Purely cosmetic: it selects the palette entry, it never filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Say,
    Notice,
    Warn,
    Shout,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Style::Say => "say",
            Style::Notice => "notice",
            Style::Warn => "warn",
            Style::Shout => "shout",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown style name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStyleError(String);

impl fmt::Display for ParseStyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log style \"{}\"", self.0)
    }
}

impl std::error::Error for ParseStyleError {}

impl FromStr for Style {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "say" => Ok(Style::Say),
            "notice" => Ok(Style::Notice),
            "warn" => Ok(Style::Warn),
            "shout" => Ok(Style::Shout),
            _ => Err(ParseStyleError(s.into())),
        }
    }
}

/// A single unit of output: the channel it belongs to, its style and the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    channel: String,
    style: Style,
    message: String,
}

impl Line {
    pub fn new(channel: &str, style: Style, message: impl fmt::Display) -> Self {
        Self {
            channel: channel.into(),
            style,
            message: message.to_string(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Identifies who produced a batch, so streams know when to repeat their header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin<'a> {
    Direct,
    Stream { id: Uuid, header: &'a str },
}

#[test]
fn test_style_from_str() {
    assert_eq!("say".parse::<Style>().unwrap(), Style::Say);
    assert_eq!(" Notice ".parse::<Style>().unwrap(), Style::Notice);
    assert_eq!("WARN".parse::<Style>().unwrap(), Style::Warn);
    assert_eq!("shout".parse::<Style>().unwrap(), Style::Shout);
    let err = "yell".parse::<Style>().unwrap_err();
    assert_eq!(err.to_string(), "unknown log style \"yell\"");
}

#[test]
fn test_line_renders_message_eagerly() {
    let n = 3;
    let line = Line::new("net", Style::Warn, format_args!("{n} retries"));
    assert_eq!(line.channel(), "net");
    assert_eq!(line.style(), Style::Warn);
    assert_eq!(line.message(), "3 retries");
    assert_eq!(line.style().to_string(), "warn");
}
