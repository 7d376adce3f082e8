use bytes::Bytes;

/// Why a frame header was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidFrame {
    /// No header bytes were available (the peer closed the stream).
    MissingHeader,
    /// The header declared a zero-length payload.
    ZeroLength,
}

impl std::fmt::Display for InvalidFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidFrame::MissingHeader => f.write_str("no header bytes available"),
            InvalidFrame::ZeroLength => f.write_str("zero-length payload"),
        }
    }
}

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The header was absent or declared an empty payload.
    #[error("invalid frame: {0}")]
    InvalidFrame(InvalidFrame),

    /// The stream ended before the declared number of bytes arrived.
    #[error("short read ({actual} of {expected} bytes)")]
    ShortRead { expected: usize, actual: usize },

    /// The payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The value could not be serialized to JSON.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The payload did not deserialize into the requested type.
    #[error("decode error: {source}: {}", .payload.escape_ascii())]
    Decode {
        #[source]
        source: serde_json::Error,
        payload: Bytes,
    },
}

impl FrameError {
    /// True when the peer closed the stream cleanly between frames.
    pub fn is_closed(&self) -> bool {
        matches!(self, FrameError::InvalidFrame(InvalidFrame::MissingHeader))
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
