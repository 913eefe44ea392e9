use crate::native::protocol::{SaveRequest, SaveResponse, SaveStatus};
use crate::vault::store::{AppendStatus, Vault};
use tracing::{debug, error, info};

/// Turn one frame payload into exactly one response. Never fails.
pub fn handle_payload(vault: &Vault, payload: &[u8]) -> SaveResponse {
    let request = match SaveRequest::parse(payload) {
        Ok(request) => request,
        Err(err) => {
            error!(%err, "rejecting request");
            return SaveResponse::rejected(payload, &err);
        }
    };
    debug!(
        timestamp = %request.timestamp,
        message_type = %request.message_type,
        prisoner_name = %request.prisoner_name,
        bytes = request.text.len(),
        "received message"
    );
    handle_request(vault, &request)
}

pub fn handle_request(vault: &Vault, request: &SaveRequest) -> SaveResponse {
    let message = match request.to_message() {
        Ok(message) => message,
        Err(err) => {
            error!(%err, "rejecting request");
            return SaveResponse::for_request(request, SaveStatus::Error, String::new())
                .with_error(err.to_string());
        }
    };

    let path = vault.path_for(&message);
    let file_path = path.display().to_string();
    match vault.append(&message) {
        Ok(outcome) => {
            let status = match outcome.status {
                AppendStatus::Saved => {
                    info!(path = %outcome.path.display(), "saved message");
                    SaveStatus::Saved
                }
                AppendStatus::Exists => {
                    info!(path = %outcome.path.display(), "message already archived");
                    SaveStatus::Exists
                }
            };
            SaveResponse::for_request(request, status, outcome.path.display().to_string())
        }
        Err(err) => {
            error!(path = %file_path, err = %format!("{err:#}"), "failed to save message");
            SaveResponse::for_request(request, SaveStatus::Error, file_path)
                .with_error(format!("{err:#}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const JANE: &[u8] = br#"{"text":"hello","timestamp":"2024-03-05T10:15:00Z","messageType":"sent","prisonerName":"Jane Doe"}"#;

    #[test]
    fn first_write_saves_second_reports_exists() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let expected = tmp
            .path()
            .join("JaneDoe/sent/2024/03/2024-03-05_10-15-00_2cf24dba5fb0.txt");

        let first = handle_payload(&vault, JANE);
        assert_eq!(first.status, SaveStatus::Saved);
        assert_eq!(PathBuf::from(&first.file_path), expected);
        assert_eq!(first.timestamp, "2024-03-05T10:15:00Z");
        assert_eq!(first.message_type, "sent");
        assert_eq!(first.prisoner_name, "Jane Doe");
        assert!(first.error.is_empty());
        assert_eq!(fs::read_to_string(&expected).expect("read"), "hello");

        let second = handle_payload(&vault, JANE);
        assert_eq!(second.status, SaveStatus::Exists);
        assert_eq!(second.file_path, first.file_path);
        assert!(second.error.is_empty());
    }

    #[test]
    fn write_failure_becomes_error_response() {
        let tmp = tempdir().expect("tempdir");
        let blocker = tmp.path().join("vault");
        fs::write(&blocker, "occupied").expect("write blocker");
        let vault = Vault::new(&blocker);

        let response = handle_payload(&vault, JANE);
        assert_eq!(response.status, SaveStatus::Error);
        assert!(!response.error.is_empty());
        assert!(response.file_path.ends_with("2024-03-05_10-15-00_2cf24dba5fb0.txt"));
        assert_eq!(response.prisoner_name, "Jane Doe");
    }

    #[test]
    fn malformed_json_becomes_error_response() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let response = handle_payload(&vault, b"{not json");
        assert_eq!(response.status, SaveStatus::Error);
        assert!(response.error.starts_with("malformed request"));
    }

    #[test]
    fn bad_timestamp_echoes_request_fields() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let payload = br#"{"text":"x","timestamp":"soon","messageType":"received","prisonerName":"J"}"#;
        let response = handle_payload(&vault, payload);
        assert_eq!(response.status, SaveStatus::Error);
        assert_eq!(response.timestamp, "soon");
        assert_eq!(response.message_type, "received");
        assert!(response.file_path.is_empty());
    }
}
