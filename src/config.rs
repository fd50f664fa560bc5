use std::{io::Write, sync::LazyLock};

use colored::control::ShouldColorize;
use derive_from_env::FromEnv;

use crate::{
    Logger, Palette,
    log_writer::Output,
    render::{DEFAULT_TIME_FORMAT, Renderer},
};

/// Defaults read from `TERMLOG_*` environment variables.
#[derive(FromEnv)]
#[from_env(prefix = "TERMLOG")]
#[allow(non_snake_case)]
pub struct TermlogEnv {
    /// chrono format of the timestamp prefix.
    #[from_env(default = "%H:%M:%S: ")]
    pub TIME_FORMAT: String,
    /// Comma separated channels enabled on every new logger.
    #[from_env(default = "")]
    pub CHANNELS: String,
    /// `auto`, `always` or `never`.
    #[from_env(default = "auto")]
    pub COLOR: String,
}

impl Default for TermlogEnv {
    fn default() -> Self {
        Self {
            TIME_FORMAT: DEFAULT_TIME_FORMAT.into(),
            CHANNELS: String::new(),
            COLOR: "auto".into(),
        }
    }
}

impl TermlogEnv {
    fn channels(&self) -> impl Iterator<Item = &str> {
        self.CHANNELS
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    fn color(&self) -> bool {
        match self.COLOR.trim().to_ascii_lowercase().as_str() {
            "always" | "on" | "true" => true,
            "never" | "off" | "false" => false,
            _ => ShouldColorize::from_env().should_colorize(),
        }
    }
}

pub static TERMLOG_ENV: LazyLock<TermlogEnv> =
    LazyLock::new(|| TermlogEnv::from_env().unwrap_or_default());

/// Builder for configuring a [`Logger`].
#[derive(Default)]
pub struct ConfigBuilder {
    palette: Palette,
    time_format: Option<String>,
    color: Option<bool>,
    output: Option<Box<dyn Write + Send>>,
    channels: Vec<String>,
    quiet: bool,
}

impl ConfigBuilder {
    /// Builds the logger. Values not set on the builder come from [`TERMLOG_ENV`].
    pub fn build(self) -> Logger {
        let Self {
            palette,
            time_format,
            color,
            output,
            channels,
            quiet,
        } = self;
        let env = &*TERMLOG_ENV;
        let time_format = time_format.unwrap_or_else(|| env.TIME_FORMAT.clone());
        let color = color.unwrap_or_else(|| env.color());
        let output = output.map_or(Output::Global, Output::Owned);
        let channels = env
            .channels()
            .map(String::from)
            .chain(channels)
            .chain([String::new()])
            .collect();
        Logger::from_parts(
            Renderer::new(palette, time_format),
            channels,
            quiet,
            color,
            output,
        )
    }

    /// Sets the palette.
    pub fn with_palette(self, palette: Palette) -> Self {
        Self { palette, ..self }
    }
    /// Sets the chrono format of the timestamp prefix.
    pub fn with_time_format(self, time_format: &str) -> Self {
        Self {
            time_format: Some(time_format.into()),
            ..self
        }
    }
    /// Forces colored output on or off instead of detecting a terminal.
    /// Forcing it on switches `colored` to always emit escape codes, process-wide.
    pub fn with_color(self, yes: bool) -> Self {
        Self {
            color: Some(yes),
            ..self
        }
    }
    /// Disables colored output
    pub fn no_color(self) -> Self {
        self.with_color(false)
    }
    /// Writes to `writer` instead of the process-wide output.
    pub fn with_output<W: Write + Send + 'static>(self, writer: W) -> Self {
        Self {
            output: Some(Box::new(writer)),
            ..self
        }
    }
    /// Enables a channel from the start.
    pub fn enable(mut self, channel: &str) -> Self {
        self.channels.push(channel.into());
        self
    }
    /// Maybe enables a channel
    pub fn maybe_enable(self, channel: Option<&str>) -> Self {
        match channel {
            Some(channel) => self.enable(channel),
            None => self,
        }
    }
    /// Builds a silenced logger.
    pub fn quiet(self) -> Self {
        Self {
            quiet: true,
            ..self
        }
    }
}

/// Returns a default ConfigBuilder for configuring a logger.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

#[test]
fn test_env_defaults() {
    let env = TermlogEnv::default();
    assert_eq!(env.TIME_FORMAT, DEFAULT_TIME_FORMAT);
    assert_eq!(env.channels().count(), 0);
}

#[test]
fn test_env_channels_and_color() {
    let env = TermlogEnv {
        CHANNELS: " net, ,debug ".into(),
        COLOR: "Never".into(),
        ..TermlogEnv::default()
    };
    assert_eq!(env.channels().collect::<Vec<_>>(), vec!["net", "debug"]);
    assert!(!env.color());
    let env = TermlogEnv {
        COLOR: "always".into(),
        ..TermlogEnv::default()
    };
    assert!(env.color());
}

#[test]
fn test_builder() {
    let logger = logger_config()
        .with_time_format("[ts] ")
        .no_color()
        .enable("net")
        .maybe_enable(Some("fs"))
        .maybe_enable(None)
        .with_output(crate::MemoryWriter::new())
        .build();
    assert!(logger.is_enabled(""));
    assert!(logger.is_enabled("net"));
    assert!(logger.is_enabled("fs"));
    assert!(!logger.is_enabled("debug"));
    assert!(!logger.is_quiet());
    assert!(!logger.is_color());
    assert_eq!(logger.time_format(), "[ts] ");
    assert!(logger_config().quiet().build().is_quiet());
}
