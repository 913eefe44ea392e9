use crate::error::VaultError;
use crate::vault::record::{Direction, NewMessage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message captured by the browser extension.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub text: String,
    pub timestamp: String,
    pub message_type: Direction,
    pub prisoner_name: String,
}

impl SaveRequest {
    pub fn parse(payload: &[u8]) -> Result<Self, VaultError> {
        serde_json::from_slice(payload).map_err(|err| VaultError::MalformedRequest(err.to_string()))
    }

    pub fn to_message(&self) -> Result<NewMessage, VaultError> {
        let timestamp = DateTime::parse_from_rfc3339(self.timestamp.trim())
            .map_err(|err| {
                VaultError::MalformedRequest(format!(
                    "timestamp `{}` is not RFC 3339: {err}",
                    self.timestamp
                ))
            })?
            .with_timezone(&Utc);
        Ok(NewMessage {
            subject: self.prisoner_name.clone(),
            direction: self.message_type,
            timestamp,
            body: self.text.clone(),
        })
    }
}

/// Longest echoed field kept when a response would overflow its frame.
pub const ECHO_LIMIT_CHARS: usize = 256;

fn clip(value: &str, limit: usize) -> String {
    value.chars().take(limit).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Saved,
    Exists,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub status: SaveStatus,
    pub timestamp: String,
    pub message_type: String,
    pub prisoner_name: String,
    pub file_path: String,
    pub error: String,
}

impl SaveResponse {
    pub fn for_request(request: &SaveRequest, status: SaveStatus, file_path: String) -> Self {
        Self {
            status,
            timestamp: request.timestamp.clone(),
            message_type: request.message_type.to_string(),
            prisoner_name: request.prisoner_name.clone(),
            file_path,
            error: String::new(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.status = SaveStatus::Error;
        self.error = error.into();
        self
    }

    /// Error response for a payload that never became a typed request.
    /// Echoes whichever identifying fields are readable strings.
    pub fn rejected(payload: &[u8], error: &VaultError) -> Self {
        let raw: Value = serde_json::from_slice(payload).unwrap_or(Value::Null);
        let field = |name: &str| {
            raw.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            status: SaveStatus::Error,
            timestamp: field("timestamp"),
            message_type: field("messageType"),
            prisoner_name: field("prisonerName"),
            file_path: String::new(),
            error: error.to_string(),
        }
    }

    /// Same response with every echoed string cut short enough to fit in
    /// one outbound frame.
    pub fn clipped(&self) -> Self {
        Self {
            status: self.status,
            timestamp: clip(&self.timestamp, ECHO_LIMIT_CHARS),
            message_type: clip(&self.message_type, ECHO_LIMIT_CHARS),
            prisoner_name: clip(&self.prisoner_name, ECHO_LIMIT_CHARS),
            file_path: clip(&self.file_path, ECHO_LIMIT_CHARS),
            error: clip(&self.error, ECHO_LIMIT_CHARS * 4),
        }
    }
}
