use crate::native::dispatch::handle_payload;
use crate::native::framing::{MAX_OUTBOUND_FRAME, read_frame, write_frame};
use crate::native::protocol::SaveStatus;
use crate::vault::store::Vault;
use anyhow::{Context, Result};
use std::io::{Read, Write};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    pub requests: usize,
    pub saved: usize,
    pub exists: usize,
    pub errors: usize,
}

/// Answer framed requests one at a time until the input closes.
///
/// Inbound framing faults and a closed output end the loop with an error;
/// every request is answered, with echoed fields clipped when the full
/// response would overflow its frame.
pub fn serve(vault: &Vault, mut input: impl Read, mut output: impl Write) -> Result<ServeSummary> {
    let mut summary = ServeSummary::default();
    while let Some(payload) = read_frame(&mut input)? {
        summary.requests += 1;
        let response = handle_payload(vault, &payload);
        match response.status {
            SaveStatus::Saved => summary.saved += 1,
            SaveStatus::Exists => summary.exists += 1,
            SaveStatus::Error => summary.errors += 1,
        }
        let mut encoded = serde_json::to_vec(&response).context("failed to encode response")?;
        if encoded.len() > MAX_OUTBOUND_FRAME {
            warn!(
                bytes = encoded.len(),
                limit = MAX_OUTBOUND_FRAME,
                "response too large for one frame; clipping echoed fields"
            );
            encoded = serde_json::to_vec(&response.clipped())
                .context("failed to encode clipped response")?;
        }
        write_frame(&mut output, &encoded)?;
    }

    info!(
        requests = summary.requests,
        saved = summary.saved,
        exists = summary.exists,
        errors = summary.errors,
        "input closed; native host stopping"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::protocol::{ECHO_LIMIT_CHARS, SaveResponse};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn frame(payload: &[u8]) -> Vec<u8> {
        // Inbound frames are not subject to the outbound size limit enforced by `write_frame`.
        let mut out: Vec<u8> = (payload.len() as u32).to_le_bytes().to_vec();
        out.extend_from_slice(payload);
        out
    }

    fn responses(mut wire: &[u8]) -> Vec<SaveResponse> {
        let mut out = Vec::new();
        while let Some(payload) = read_frame(&mut wire).expect("read response") {
            out.push(serde_json::from_slice(&payload).expect("decode response"));
        }
        out
    }

    #[test]
    fn closed_input_produces_no_output() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let mut output: Vec<u8> = Vec::new();

        let summary = serve(&vault, Cursor::new(Vec::<u8>::new()), &mut output).expect("serve");
        assert_eq!(summary, ServeSummary::default());
        assert!(output.is_empty());
    }

    #[test]
    fn answers_each_request_in_order() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let request = br#"{"text":"hello","timestamp":"2024-03-05T10:15:00Z","messageType":"sent","prisonerName":"Jane Doe"}"#;

        let mut wire = frame(request);
        wire.extend(frame(b"[]"));
        wire.extend(frame(request));

        let mut output: Vec<u8> = Vec::new();
        let summary = serve(&vault, Cursor::new(wire), &mut output).expect("serve");
        assert_eq!(
            summary,
            ServeSummary {
                requests: 3,
                saved: 1,
                exists: 1,
                errors: 1
            }
        );

        let got: Vec<SaveStatus> = responses(&output).iter().map(|r| r.status).collect();
        assert_eq!(got, vec![SaveStatus::Saved, SaveStatus::Error, SaveStatus::Exists]);
    }

    #[test]
    fn oversized_echo_is_clipped_and_later_requests_are_answered() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let huge_name = "a".repeat(MAX_OUTBOUND_FRAME + 1_000);
        let malformed = serde_json::json!({
            "messageType": "sent",
            "prisonerName": huge_name,
        });
        let unsavable = serde_json::json!({
            "text": "x",
            "timestamp": "2024-03-05T10:15:00Z",
            "messageType": "sent",
            "prisonerName": huge_name,
        });
        let valid = br#"{"text":"hello","timestamp":"2024-03-05T10:15:00Z","messageType":"sent","prisonerName":"Jane Doe"}"#;

        let mut wire = frame(malformed.to_string().as_bytes());
        wire.extend(frame(unsavable.to_string().as_bytes()));
        wire.extend(frame(valid));

        let mut output: Vec<u8> = Vec::new();
        let summary = serve(&vault, Cursor::new(wire), &mut output).expect("serve");
        assert_eq!(summary.requests, 3);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.saved, 1);

        let got = responses(&output);
        assert_eq!(got.len(), 3);
        assert_eq!(got[0].status, SaveStatus::Error);
        assert_eq!(got[0].prisoner_name.len(), ECHO_LIMIT_CHARS);
        assert_eq!(got[1].status, SaveStatus::Error);
        assert!(got[1].file_path.chars().count() <= ECHO_LIMIT_CHARS);
        assert!(!got[1].error.is_empty());
        assert_eq!(got[2].status, SaveStatus::Saved);
        assert_eq!(got[2].prisoner_name, "Jane Doe");
    }

    #[test]
    fn truncated_frame_stops_the_loop_with_an_error() {
        let tmp = tempdir().expect("tempdir");
        let vault = Vault::new(tmp.path());
        let mut wire = frame(br#"{"text":"a"}"#);
        wire.extend([50u8, 0, 0, 0, b'{']);

        let mut output: Vec<u8> = Vec::new();
        assert!(serve(&vault, Cursor::new(wire), &mut output).is_err());
        assert_eq!(responses(&output).len(), 1);
    }
}
