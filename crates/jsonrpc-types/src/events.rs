use serde::{Deserialize, Serialize};

/// Prefix of NEP-297 event log lines.
pub const EVENT_JSON_PREFIX: &str = "EVENT_JSON:";

#[derive(Debug, thiserror::Error)]
pub enum EventParseError {
    #[error("log line does not start with {}", EVENT_JSON_PREFIX)]
    MissingPrefix,
    #[error("invalid event json: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// A structured event emitted by a contract.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct EventLog {
    pub standard: String,
    pub version: String,
    pub event: String,
    #[serde(default)]
    pub data: Vec<EventData>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct EventData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub token_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EventLog {
    pub fn from_log_line(line: &str) -> Result<Self, EventParseError> {
        let json = line
            .strip_prefix(EVENT_JSON_PREFIX)
            .ok_or(EventParseError::MissingPrefix)?;
        Ok(serde_json::from_str(json)?)
    }
}
