//! Byte-order policy for the 4-byte length header.
//!
//! Both ends of a connection must agree on the order out-of-band; nothing on
//! the wire identifies it. Browsers use the host machine's native order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Header byte order, fixed for the lifetime of a channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    Big,
    Little,
    /// Whatever the running machine uses.
    #[default]
    Native,
}

/// The concrete order `ByteOrder::Native` stands for on this target.
pub const NATIVE_ENDIAN: ByteOrder = if cfg!(target_endian = "big") {
    ByteOrder::Big
} else {
    ByteOrder::Little
};

impl ByteOrder {
    /// Resolve `Native` to `Big` or `Little`.
    pub const fn resolve(self) -> ByteOrder {
        match self {
            ByteOrder::Native => NATIVE_ENDIAN,
            other => other,
        }
    }

    /// Encode a payload length as a header.
    pub fn encode_len(self, len: u32) -> [u8; 4] {
        match self {
            ByteOrder::Big => len.to_be_bytes(),
            ByteOrder::Little => len.to_le_bytes(),
            ByteOrder::Native => len.to_ne_bytes(),
        }
    }

    /// Decode a header into a payload length.
    pub fn decode_len(self, header: [u8; 4]) -> u32 {
        match self {
            ByteOrder::Big => u32::from_be_bytes(header),
            ByteOrder::Little => u32::from_le_bytes(header),
            ByteOrder::Native => u32::from_ne_bytes(header),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ByteOrder::Big => "big",
            ByteOrder::Little => "little",
            ByteOrder::Native => "native",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown byte-order name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown byte order '{0}' (expected big, little or native)")]
pub struct ParseByteOrderError(String);

impl FromStr for ByteOrder {
    type Err = ParseByteOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "big" | "be" | "big-endian" => Ok(ByteOrder::Big),
            "little" | "le" | "little-endian" => Ok(ByteOrder::Little),
            "native" | "ne" => Ok(ByteOrder::Native),
            _ => Err(ParseByteOrderError(s.to_string())),
        }
    }
}
