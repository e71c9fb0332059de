use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use log::LevelFilter;
use statusbot_engine::{EngineSettings, FatalConfigError};

use crate::logging::{LogDestination, LogSettings};

const POLL_INTERVAL_VAR: &str = "STATUSBOT_POLL_INTERVAL_SECS";
const ENDPOINT_VAR: &str = "STATUSBOT_ENDPOINT";
const TELEGRAM_API_VAR: &str = "STATUSBOT_TELEGRAM_API";
const LOG_FILE_VAR: &str = "STATUSBOT_LOG_FILE";
const LOG_LEVEL_VAR: &str = "STATUSBOT_LOG_LEVEL";
const LOG_DESTINATION_VAR: &str = "STATUSBOT_LOG_DESTINATION";

/// Everything except credentials, read once in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineSettings,
    pub log: LogSettings,
}

impl AppConfig {
    /// Optional settings; unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FatalConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let mut engine = EngineSettings::default();
        let mut log = LogSettings::default();

        if let Some(raw) = get(POLL_INTERVAL_VAR) {
            let secs = parse::<u64>(POLL_INTERVAL_VAR, &raw)?;
            if secs == 0 {
                return Err(invalid(POLL_INTERVAL_VAR, "must be at least 1 second"));
            }
            engine.poll_interval = Duration::from_secs(secs);
        }
        if let Some(endpoint) = get(ENDPOINT_VAR) {
            engine.endpoint = endpoint;
        }
        if let Some(api) = get(TELEGRAM_API_VAR) {
            engine.telegram_api = api;
        }
        if let Some(file) = get(LOG_FILE_VAR) {
            log.file = PathBuf::from(file);
        }
        if let Some(raw) = get(LOG_LEVEL_VAR) {
            log.level = parse::<LevelFilter>(LOG_LEVEL_VAR, &raw)?;
        }
        if let Some(raw) = get(LOG_DESTINATION_VAR) {
            log.destination = match raw.to_ascii_lowercase().as_str() {
                "file" => LogDestination::File,
                "terminal" => LogDestination::Terminal,
                "both" => LogDestination::Both,
                _ => return Err(invalid(LOG_DESTINATION_VAR, "expected file, terminal or both")),
            };
        }

        Ok(Self { engine, log })
    }
}

fn parse<T>(name: &'static str, raw: &str) -> Result<T, FatalConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|err| invalid(name, &format!("{raw:?}: {err}")))
}

fn invalid(name: &'static str, message: &str) -> FatalConfigError {
    FatalConfigError::InvalidSetting {
        name,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use statusbot_engine::{DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL, DEFAULT_TELEGRAM_API};

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, FatalConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.engine.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.engine.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.engine.telegram_api, DEFAULT_TELEGRAM_API);
        assert_eq!(config.log, LogSettings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            (POLL_INTERVAL_VAR, "30"),
            (ENDPOINT_VAR, "http://localhost:8080/statuses/"),
            (LOG_LEVEL_VAR, "warn"),
            (LOG_DESTINATION_VAR, "Terminal"),
            (LOG_FILE_VAR, "/tmp/bot.log"),
        ])
        .unwrap();
        assert_eq!(config.engine.poll_interval, Duration::from_secs(30));
        assert_eq!(config.engine.endpoint, "http://localhost:8080/statuses/");
        assert_eq!(config.log.level, LevelFilter::Warn);
        assert_eq!(config.log.destination, LogDestination::Terminal);
        assert_eq!(config.log.file, PathBuf::from("/tmp/bot.log"));
    }

    #[test]
    fn empty_values_keep_defaults() {
        let config = config_from(&[(POLL_INTERVAL_VAR, ""), (LOG_LEVEL_VAR, "")]).unwrap();
        assert_eq!(config.engine.poll_interval, DEFAULT_POLL_INTERVAL);
        assert_eq!(config.log.level, LevelFilter::Debug);
    }

    #[test]
    fn bad_interval_is_fatal() {
        for raw in ["ten", "-5", "0"] {
            let err = config_from(&[(POLL_INTERVAL_VAR, raw)]).unwrap_err();
            assert!(matches!(
                err,
                FatalConfigError::InvalidSetting { name: POLL_INTERVAL_VAR, .. }
            ));
        }
    }

    #[test]
    fn bad_log_settings_are_fatal() {
        assert!(config_from(&[(LOG_LEVEL_VAR, "loud")]).is_err());
        assert!(config_from(&[(LOG_DESTINATION_VAR, "syslog")]).is_err());
    }
}
