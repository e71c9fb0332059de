//! Statusbot engine: HTTP boundaries and the poll loop that drives the core state machine.
mod client;
mod config;
mod engine;
mod notify;

pub use client::{FetchSettings, ReqwestStatusClient, StatusClient};
pub use config::{
    Credentials, EngineSettings, FatalConfigError, API_TOKEN_VAR, DEFAULT_ENDPOINT,
    DEFAULT_POLL_INTERVAL, DEFAULT_TELEGRAM_API, DESTINATION_ID_VAR, NOTIFIER_TOKEN_VAR,
};
pub use engine::{bootstrap, system_clock, Clock, PollEngine};
pub use notify::{Notifier, NotifyError, TelegramNotifier};
pub use tokio_util::sync::CancellationToken;
