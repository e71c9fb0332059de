use crate::{HomeworkRecord, RecoverableError};

/// Review outcome reported by the status API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    /// Text sent to the chat for this verdict.
    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Turn a record into the status-change message.
///
/// The status is checked before the name, so a record missing both reports
/// the unknown status.
pub fn map_status(record: &HomeworkRecord) -> Result<String, RecoverableError> {
    let verdict = record
        .status
        .as_deref()
        .and_then(Verdict::from_code)
        .ok_or_else(|| RecoverableError::UnknownStatus(record.status.clone()))?;
    let name = record.name.as_deref().ok_or(RecoverableError::MissingName)?;
    Ok(format!(
        "Changed review status for \"{name}\". {}",
        verdict.text()
    ))
}
