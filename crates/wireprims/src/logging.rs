//! Subscriber setup for the `tracing` events emitted by the codecs.
//!
//! The cursor and codec crates only emit events; nothing is printed until a
//! subscriber is installed. [`init_logging`] installs one on stderr that shows
//! `wireprims*` events at the configured level and everything else at `info`.

use std::str::FromStr;

use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding the codec event level (`trace`, `debug`, ...).
pub const LEVEL_ENV: &str = "WIREPRIMS_LOG";

/// Environment variable holding the output format (`text` or `json`).
pub const FORMAT_ENV: &str = "WIREPRIMS_LOG_FORMAT";

const CODEC_TARGET: &str = "wireprims";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// What to show and how.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Level applied to events from the wireprims crates.
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: LevelFilter::INFO,
        }
    }
}

impl LogConfig {
    /// Read [`LEVEL_ENV`] and [`FORMAT_ENV`]; unset or unparseable values keep the default.
    pub fn from_env() -> Self {
        let level = std::env::var(LEVEL_ENV).ok();
        let format = std::env::var(FORMAT_ENV).ok();
        Self::from_values(level.as_deref(), format.as_deref())
    }

    fn from_values(level: Option<&str>, format: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            format: format
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.format),
            level: level
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.level),
        }
    }

    fn targets(&self) -> Targets {
        Targets::new()
            .with_target(CODEC_TARGET, self.level)
            .with_default(LevelFilter::INFO)
    }
}

/// Install a global subscriber writing to stderr.
///
/// Returns false if a subscriber was already installed; the existing one is kept.
pub fn init_logging(config: LogConfig) -> bool {
    let registry = tracing_subscriber::registry().with(config.targets());
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false);

    let result = match config.format {
        LogFormat::Text => registry.with(layer).try_init(),
        LogFormat::Json => registry.with(layer.json()).try_init(),
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn parses_format_names() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("TEXT".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn values_override_defaults() {
        let config = LogConfig::from_values(Some("trace"), Some("json"));
        assert_eq!(config.level, LevelFilter::TRACE);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn bad_values_keep_defaults() {
        assert_eq!(
            LogConfig::from_values(Some("loud"), Some("xml")),
            LogConfig::default()
        );
        assert_eq!(LogConfig::from_values(None, None), LogConfig::default());
    }

    #[test]
    fn level_applies_to_codec_targets_only() {
        let config = LogConfig::from_values(Some("trace"), None);
        let targets = config.targets();
        assert!(targets.would_enable("wireprims_types::string", &Level::TRACE));
        assert!(targets.would_enable("wireprims_cursor::read", &Level::TRACE));
        assert!(!targets.would_enable("roundtrip", &Level::DEBUG));
        assert!(targets.would_enable("roundtrip", &Level::INFO));
    }

    #[test]
    fn second_install_is_refused() {
        init_logging(LogConfig::default());
        assert!(!init_logging(LogConfig::from_values(Some("debug"), Some("json"))));
    }
}
