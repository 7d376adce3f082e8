use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::byte_order::ByteOrder;
use crate::error::{FrameError, InvalidFrame, Result};

/// Frame header: a single u32 payload length.
pub const HEADER_SIZE: usize = 4;

/// Default maximum payload size: 64 MiB, the browser-to-host limit.
pub const DEFAULT_MAX_PAYLOAD: usize = 64 * 1024 * 1024;

/// How a blocking reader fills the header and payload buffers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadMode {
    /// Keep reading until the declared number of bytes has arrived.
    #[default]
    Exact,
    /// Issue exactly one `read` for the header and one for the payload.
    /// A short count is an error even if more data would follow.
    Single,
}

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Header byte order. Default: native.
    pub byte_order: ByteOrder,
    /// Maximum payload size in bytes. Default: 64 MiB.
    pub max_payload_size: usize,
    /// Read strategy for blocking readers. Default: exact.
    pub read_mode: ReadMode,
}

impl FrameConfig {
    pub fn with_byte_order(byte_order: ByteOrder) -> Self {
        Self {
            byte_order,
            ..Self::default()
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Native,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            read_mode: ReadMode::Exact,
        }
    }
}

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────────────┬──────────────────┐
/// │ Length (4B, u32)     │ Payload          │
/// │ configured order     │ (Length bytes)   │
/// └──────────────────────┴──────────────────┘
/// ```
pub fn encode_frame(order: ByteOrder, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.is_empty() {
        return Err(FrameError::InvalidFrame(InvalidFrame::ZeroLength));
    }
    let len = u32::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: u32::MAX as usize,
    })?;
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_slice(&order.encode_len(len));
    dst.put_slice(payload);
    Ok(())
}

/// Decode a frame payload from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer.
pub fn decode_frame(
    src: &mut BytesMut,
    order: ByteOrder,
    max_payload: usize,
) -> Result<Option<Bytes>> {
    if src.len() < HEADER_SIZE {
        return Ok(None);
    }

    let mut header = [0u8; HEADER_SIZE];
    header.copy_from_slice(&src[..HEADER_SIZE]);
    let payload_len = check_len(order.decode_len(header), max_payload)?;

    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None);
    }

    src.advance(HEADER_SIZE);
    Ok(Some(src.split_to(payload_len).freeze()))
}

/// Validate a decoded header against the zero-length and size rules.
pub(crate) fn check_len(len: u32, max_payload: usize) -> Result<usize> {
    let len = len as usize;
    if len == 0 {
        tracing::debug!("rejecting zero-length frame header");
        return Err(FrameError::InvalidFrame(InvalidFrame::ZeroLength));
    }
    if len > max_payload {
        tracing::debug!(size = len, max = max_payload, "rejecting oversized frame");
        return Err(FrameError::PayloadTooLarge {
            size: len,
            max: max_payload,
        });
    }
    Ok(len)
}
