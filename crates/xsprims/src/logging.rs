use clap::ValueEnum;
use tracing::level_filters::LevelFilter;

use crate::exit::CliResult;
use crate::settings::Settings;

/// Level used when neither `--log-level` nor `XSPRIMS_LOG_LEVEL` is given.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
/// Format used when neither `--log-format` nor `XSPRIMS_LOG_FORMAT` is given.
pub const DEFAULT_LOG_FORMAT: LogFormat = LogFormat::Text;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Ordered from least to most verbose.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }

    /// Debug and trace events come from several crates (handle open/close in
    /// the transport, stalls and short transfers in channel I/O), so the
    /// emitting crate is shown once the level reaches them.
    fn shows_target(self) -> bool {
        self >= LogLevel::Debug
    }
}

/// Logging choices resolved from the layered settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    pub level: LogLevel,
}

impl LogSettings {
    pub fn from_settings(settings: &Settings) -> CliResult<Self> {
        Ok(Self {
            format: settings.log_format()?,
            level: settings.log_level()?,
        })
    }
}

/// Install the stderr subscriber. Stdout is left to command output.
pub fn init_logging(log: LogSettings) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log.level.as_filter())
        .with_ansi(false)
        .with_target(log.level.shows_target());

    // A subscriber may already be installed (tests); keep it.
    let _ = match log.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FlagValues;

    #[test]
    fn targets_shown_only_when_debugging() {
        assert!(!LogLevel::Info.shows_target());
        assert!(!LogLevel::Error.shows_target());
        assert!(LogLevel::Debug.shows_target());
        assert!(LogLevel::Trace.shows_target());
    }

    #[test]
    fn resolves_defaults_from_settings() {
        let settings = Settings::from_layers(Vec::new(), &FlagValues::default()).unwrap();
        let log = LogSettings::from_settings(&settings).unwrap();
        assert_eq!(log.level, DEFAULT_LOG_LEVEL);
        assert_eq!(log.format, DEFAULT_LOG_FORMAT);
    }

    #[test]
    fn resolves_environment_values() {
        let env = vec![
            ("XSPRIMS_LOG_LEVEL".to_string(), "trace".to_string()),
            ("XSPRIMS_LOG_FORMAT".to_string(), "json".to_string()),
        ];
        let settings = Settings::from_layers(env, &FlagValues::default()).unwrap();
        let log = LogSettings::from_settings(&settings).unwrap();
        assert_eq!(log.level, LogLevel::Trace);
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.level.as_filter(), LevelFilter::TRACE);
    }
}
