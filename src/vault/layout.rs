//! Mapping between messages and their place in the archive tree.
//!
//! A message lives at
//! `<root>/<subject>/<sent|received>/<YYYY>/<MM>/<YYYY-MM-DD_HH-MM-SS>_<hash>.txt`
//! where every date field is taken from the UTC timestamp and `<hash>` is the
//! first twelve hex characters of the SHA-256 of the body.

use crate::error::VaultError;
use crate::vault::record::NewMessage;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
pub const HASH_SUFFIX_LEN: usize = 12;
pub const MESSAGE_EXT: &str = "txt";
pub const UNKNOWN_SUBJECT: &str = "Unknown";

const STAMP_LEN: usize = "YYYY-MM-DD_HH-MM-SS".len();

/// Filename parts recovered from an archived message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredName {
    pub timestamp: DateTime<Utc>,
    pub hash_suffix: Option<String>,
}

pub fn sanitize_subject(raw: &str) -> String {
    let kept: String = raw.chars().filter(|c| c.is_alphanumeric()).collect();
    if kept.is_empty() {
        UNKNOWN_SUBJECT.to_string()
    } else {
        kept
    }
}

pub fn content_hash_suffix(body: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(body.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_SUFFIX_LEN].to_string()
}

pub fn encode_file_name(timestamp: &DateTime<Utc>, hash_suffix: &str) -> String {
    format!(
        "{}_{hash_suffix}.{MESSAGE_EXT}",
        timestamp.format(FILE_STAMP_FORMAT)
    )
}

/// Directory holding the message, relative to the archive root.
pub fn relative_dir(message: &NewMessage) -> PathBuf {
    let ts = &message.timestamp;
    PathBuf::from(sanitize_subject(&message.subject))
        .join(message.direction.as_str())
        .join(format!("{:04}", ts.year()))
        .join(format!("{:02}", ts.month()))
}

pub fn message_path(root: &Path, message: &NewMessage) -> PathBuf {
    let file_name = encode_file_name(&message.timestamp, &content_hash_suffix(&message.body));
    root.join(relative_dir(message)).join(file_name)
}

/// Parse the leading `YYYY-MM-DD_HH-MM-SS` of an archived filename as UTC.
///
/// Accepts either the bare stem or the full `.txt` name. Anything after the
/// stamp other than a `_<hash>` suffix is tolerated and ignored.
pub fn decode_file_name(name: &str) -> Result<StoredName, VaultError> {
    let stem = name.strip_suffix(".txt").unwrap_or(name);
    let stamp = stem
        .get(..STAMP_LEN)
        .ok_or_else(|| VaultError::MalformedFilename(name.to_string()))?;
    if !stamp.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 | 13 | 16 => b == b'-',
        10 => b == b'_',
        _ => b.is_ascii_digit(),
    }) {
        return Err(VaultError::MalformedFilename(name.to_string()));
    }
    let naive = NaiveDateTime::parse_from_str(stamp, FILE_STAMP_FORMAT)
        .map_err(|err| VaultError::MalformedFilename(format!("{name}: {err}")))?;

    let hash_suffix = stem[STAMP_LEN..]
        .strip_prefix('_')
        .filter(|rest| !rest.is_empty())
        .map(ToOwned::to_owned);

    Ok(StoredName {
        timestamp: naive.and_utc(),
        hash_suffix,
    })
}
