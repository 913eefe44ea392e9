use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Received => "received",
        }
    }

    /// Directory names are matched exactly; `Sent/` is not a direction folder.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "sent" => Some(Self::Sent),
            "received" => Some(Self::Received),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message about to be written to the archive.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub subject: String,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    pub body: String,
}

/// A message loaded back from the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRecord {
    pub subject: String,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    pub body: String,
    pub path: PathBuf,
}
