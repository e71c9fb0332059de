use thiserror::Error;

/// Everything that can go wrong inside one poll cycle.
///
/// None of these stop the poller. The engine turns them into an error report,
/// deduplicates it against the last sent message and sleeps until the next cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecoverableError {
    #[error("request to the status API failed: {0}")]
    Transport(String),
    #[error("status API returned HTTP {0}")]
    BadStatus(u16),
    #[error("status API response is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("status API response has no `{0}` field")]
    MissingField(&'static str),
    #[error("homework list is empty or the work has not been taken for review yet")]
    EmptyList,
    #[error("`homeworks` in the status API response is not a list")]
    WrongType,
    #[error("first homework entry is not an object")]
    WrongElementType,
    #[error("unknown homework status {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownStatus(Option<String>),
    #[error("homework record has no name")]
    MissingName,
}
