use std::fmt;
use std::time::Duration;

use engine_logging::{engine_critical, engine_debug, engine_info};
use thiserror::Error;

use crate::FetchSettings;

pub const API_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const NOTIFIER_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const DESTINATION_ID_VAR: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Problems that stop the process before the first poll.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FatalConfigError {
    #[error("required environment variable {0} is missing or empty")]
    MissingCredential(&'static str),
    #[error("invalid setting {name}: {message}")]
    InvalidSetting { name: &'static str, message: String },
    #[error("could not build HTTP client: {0}")]
    HttpClient(String),
}

/// Secrets loaded once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub notifier_token: String,
    pub destination_id: String,
}

impl Credentials {
    /// Read all three credentials through `lookup` (usually `std::env::var`).
    ///
    /// Unset and empty values are both missing. Every variable is checked and
    /// logged; the error names the first one that is missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FatalConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut first_missing = None;
        let mut read = |name: &'static str| -> String {
            engine_debug!("Checking environment variable {}", name);
            match lookup(name).filter(|value| !value.is_empty()) {
                Some(value) => {
                    engine_info!("Environment variable {} is present", name);
                    value
                }
                None => {
                    engine_critical!("Environment variable {} is missing", name);
                    first_missing.get_or_insert(name);
                    String::new()
                }
            }
        };

        let api_token = read(API_TOKEN_VAR);
        let notifier_token = read(NOTIFIER_TOKEN_VAR);
        let destination_id = read(DESTINATION_ID_VAR);

        match first_missing {
            Some(name) => Err(FatalConfigError::MissingCredential(name)),
            None => Ok(Self {
                api_token,
                notifier_token,
                destination_id,
            }),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"<redacted>")
            .field("notifier_token", &"<redacted>")
            .field("destination_id", &self.destination_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub endpoint: String,
    pub telegram_api: String,
    pub poll_interval: Duration,
    pub fetch: FetchSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api: DEFAULT_TELEGRAM_API.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            fetch: FetchSettings::default(),
        }
    }
}
