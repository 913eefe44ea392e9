//! Browser native-messaging framing: a 4-byte little-endian length followed
//! by that many bytes of UTF-8 JSON.

use crate::error::VaultError;
use anyhow::{Context, Result};
use std::io::{ErrorKind, Read, Write};

pub const LENGTH_PREFIX_BYTES: usize = 4;
/// Largest frame the browser will send to a host.
pub const MAX_INBOUND_FRAME: usize = 64 * 1024 * 1024;
/// Largest frame the browser accepts from a host.
pub const MAX_OUTBOUND_FRAME: usize = 1024 * 1024;

/// Fill `buf`, returning how many bytes arrived before end of stream.
fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err).context("failed to read from native messaging stream"),
        }
    }
    Ok(filled)
}

/// Read one frame payload. `Ok(None)` means the stream closed cleanly
/// before a new frame started.
pub fn read_frame(reader: &mut impl Read) -> Result<Option<Vec<u8>>> {
    let mut prefix = [0u8; LENGTH_PREFIX_BYTES];
    let got = read_full(reader, &mut prefix)?;
    if got == 0 {
        return Ok(None);
    }
    if got < LENGTH_PREFIX_BYTES {
        return Err(VaultError::TruncatedFrame {
            expected: LENGTH_PREFIX_BYTES,
            got,
        }
        .into());
    }

    let len = u32::from_le_bytes(prefix) as usize;
    if len > MAX_INBOUND_FRAME {
        return Err(VaultError::FrameTooLarge {
            len,
            limit: MAX_INBOUND_FRAME,
        }
        .into());
    }

    let mut payload = vec![0u8; len];
    let got = read_full(reader, &mut payload)?;
    if got < len {
        return Err(VaultError::TruncatedFrame { expected: len, got }.into());
    }
    Ok(Some(payload))
}

pub fn write_frame(writer: &mut impl Write, payload: &[u8]) -> Result<()> {
    if payload.len() > MAX_OUTBOUND_FRAME {
        return Err(VaultError::FrameTooLarge {
            len: payload.len(),
            limit: MAX_OUTBOUND_FRAME,
        }
        .into());
    }
    let len = u32::try_from(payload.len()).context("frame length does not fit in u32")?;
    writer
        .write_all(&len.to_le_bytes())
        .context("failed to write frame length")?;
    writer
        .write_all(payload)
        .context("failed to write frame payload")?;
    writer.flush().context("failed to flush native messaging stream")?;
    Ok(())
}
