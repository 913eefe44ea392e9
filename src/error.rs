use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("malformed message filename: {0}")]
    MalformedFilename(String),
    #[error("frame of {len} bytes exceeds the {limit} byte limit")]
    FrameTooLarge { len: usize, limit: usize },
    #[error("stream ended inside a frame: expected {expected} bytes, got {got}")]
    TruncatedFrame { expected: usize, got: usize },
}
