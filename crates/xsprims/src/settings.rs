use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::ValueEnum;
use xsprims::merge;

use crate::exit::{CliError, CliResult, USAGE};
use crate::logging::{LogFormat, LogLevel, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL};

pub const LOG_LEVEL: &str = "log_level";
pub const LOG_FORMAT: &str = "log_format";
pub const ENDPOINT: &str = "endpoint";

/// Environment variables that feed settings, and the key each one sets.
pub const ENV_KEYS: &[(&str, &str)] = &[
    ("XSPRIMS_LOG_LEVEL", LOG_LEVEL),
    ("XSPRIMS_LOG_FORMAT", LOG_FORMAT),
    (xsprims::transport::PATH_ENV, ENDPOINT),
];

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct FlagValues {
    pub log_level: Option<LogLevel>,
    pub log_format: Option<LogFormat>,
}

/// Effective settings: defaults, then environment, then flags.
#[derive(Debug, Clone)]
pub struct Settings {
    values: BTreeMap<&'static str, String>,
}

impl Settings {
    pub fn resolve(flags: &FlagValues) -> CliResult<Self> {
        let env = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        Self::from_layers(env, flags)
    }

    pub(crate) fn from_layers<I>(env: I, flags: &FlagValues) -> CliResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let values = merge([defaults(), from_env(env), from_flags(flags)]);
        let settings = Self { values };
        settings.log_level()?;
        settings.log_format()?;
        Ok(settings)
    }

    pub fn log_level(&self) -> CliResult<LogLevel> {
        parse_enum(LOG_LEVEL, self.get(LOG_LEVEL))
    }

    pub fn log_format(&self) -> CliResult<LogFormat> {
        parse_enum(LOG_FORMAT, self.get(LOG_FORMAT))
    }

    /// Endpoint override, if one was configured.
    pub fn endpoint(&self) -> Option<PathBuf> {
        self.values.get(ENDPOINT).map(PathBuf::from)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

fn defaults() -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        (LOG_LEVEL, value_name(DEFAULT_LOG_LEVEL)),
        (LOG_FORMAT, value_name(DEFAULT_LOG_FORMAT)),
    ])
}

fn from_env<I>(env: I) -> BTreeMap<&'static str, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    env.into_iter()
        .filter(|(_, value)| !value.is_empty())
        .filter_map(|(name, value)| {
            ENV_KEYS
                .iter()
                .find(|(env_name, _)| *env_name == name)
                .map(|(_, key)| (*key, value))
        })
        .collect()
}

fn from_flags(flags: &FlagValues) -> BTreeMap<&'static str, String> {
    let mut out = BTreeMap::new();
    if let Some(level) = flags.log_level {
        out.insert(LOG_LEVEL, value_name(level));
    }
    if let Some(format) = flags.log_format {
        out.insert(LOG_FORMAT, value_name(format));
    }
    out
}

fn value_name<T: ValueEnum>(value: T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

fn parse_enum<T: ValueEnum>(key: &str, value: Option<&str>) -> CliResult<T> {
    let value = value.unwrap_or_default();
    T::from_str(value, true)
        .map_err(|_| CliError::new(USAGE, format!("invalid {key} setting: {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_without_env_or_flags() {
        let settings = Settings::from_layers(Vec::new(), &FlagValues::default()).unwrap();
        assert_eq!(settings.log_level().unwrap(), LogLevel::Info);
        assert_eq!(settings.log_format().unwrap(), LogFormat::Text);
        assert!(settings.endpoint().is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        let settings = Settings::from_layers(
            env(&[
                ("XSPRIMS_LOG_LEVEL", "debug"),
                ("XENSTORED_PATH", "/dev/xen/xenbus"),
                ("UNRELATED", "x"),
            ]),
            &FlagValues::default(),
        )
        .unwrap();
        assert_eq!(settings.log_level().unwrap(), LogLevel::Debug);
        assert_eq!(settings.endpoint(), Some(PathBuf::from("/dev/xen/xenbus")));
        assert!(settings.get("UNRELATED").is_none());
    }

    #[test]
    fn flags_override_env() {
        let flags = FlagValues {
            log_level: Some(LogLevel::Error),
            log_format: Some(LogFormat::Json),
        };
        let settings =
            Settings::from_layers(env(&[("XSPRIMS_LOG_LEVEL", "trace")]), &flags).unwrap();
        assert_eq!(settings.log_level().unwrap(), LogLevel::Error);
        assert_eq!(settings.log_format().unwrap(), LogFormat::Json);
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let settings =
            Settings::from_layers(env(&[("XENSTORED_PATH", "")]), &FlagValues::default()).unwrap();
        assert!(settings.endpoint().is_none());
    }

    #[test]
    fn invalid_env_level_is_usage_error() {
        let err = Settings::from_layers(
            env(&[("XSPRIMS_LOG_LEVEL", "loud")]),
            &FlagValues::default(),
        )
        .unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
