use serde_json::{Map, Value};

use crate::RecoverableError;

/// Key of the record list in the status API envelope.
pub const HOMEWORKS_FIELD: &str = "homeworks";

const NAME_FIELD: &str = "homework_name";
const STATUS_FIELD: &str = "status";

/// Shape of a decoded status API body, resolved once at the decode boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The regular `{"homeworks": [...], ...}` object.
    Envelope(Map<String, Value>),
    /// Older responses wrapped the envelope in an array.
    Legacy(Vec<Value>),
    /// Any other JSON value.
    Other(Value),
}

impl Payload {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Payload::Envelope(map),
            Value::Array(items) => Payload::Legacy(items),
            other => Payload::Other(other),
        }
    }

    /// Decode a raw response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RecoverableError> {
        serde_json::from_slice::<Value>(bytes)
            .map(Self::from_value)
            .map_err(|err| RecoverableError::MalformedBody(err.to_string()))
    }

    fn envelope(&self) -> Option<&Map<String, Value>> {
        match self {
            Payload::Envelope(map) => Some(map),
            Payload::Legacy(items) => items.first().and_then(Value::as_object),
            Payload::Other(_) => None,
        }
    }
}

/// One homework entry as reported by the status API.
///
/// Fields the API left out stay `None`; it is up to [`crate::map_status`] to
/// decide whether that is an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HomeworkRecord {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl HomeworkRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: Some(status.into()),
        }
    }

    /// Build a record from one element of the `homeworks` list.
    ///
    /// An element that is itself a list stands for its first element.
    /// Anything that is not an object yields a record with no fields set.
    pub fn from_value(value: &Value) -> Self {
        let value = match value {
            Value::Array(items) => match items.first() {
                Some(first) => first,
                None => return Self::default(),
            },
            other => other,
        };
        match value.as_object() {
            Some(fields) => Self {
                name: field_text(fields, NAME_FIELD),
                status: field_text(fields, STATUS_FIELD),
            },
            None => Self::default(),
        }
    }
}

fn field_text(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Check the payload shape and return the homework records in API order.
///
/// Only the first record is checked in depth; later entries are converted
/// as-is.
pub fn validate(payload: &Payload) -> Result<Vec<HomeworkRecord>, RecoverableError> {
    let envelope = payload
        .envelope()
        .ok_or(RecoverableError::MissingField(HOMEWORKS_FIELD))?;
    let homeworks = envelope
        .get(HOMEWORKS_FIELD)
        .ok_or(RecoverableError::MissingField(HOMEWORKS_FIELD))?;
    let items = homeworks.as_array().ok_or(RecoverableError::WrongType)?;
    let first = items.first().ok_or(RecoverableError::EmptyList)?;
    if !first.is_object() {
        return Err(RecoverableError::WrongElementType);
    }
    Ok(items.iter().map(HomeworkRecord::from_value).collect())
}
