//! Length-prefixed JSON framing for browser native-messaging hosts.
//!
//! Every message on the wire is:
//! - A 4-byte unsigned payload length, in a byte order both ends agree on
//! - Exactly that many bytes of JSON payload
//!
//! There is no magic number, version byte or checksum, and zero-length
//! frames are invalid. Browsers use the host machine's native byte order.
//!
//! ```
//! use std::io::Cursor;
//! use nativemsg::{ByteOrder, Channel};
//!
//! let mut wire = Vec::new();
//! Channel::send_only(&mut wire, ByteOrder::Little)
//!     .send(&serde_json::json!({ "Text": "native messaging host" }))
//!     .unwrap();
//!
//! let mut host = Channel::receive_only(Cursor::new(wire), ByteOrder::Little);
//! let msg: serde_json::Value = host.recv().unwrap();
//! assert_eq!(msg["Text"], "native messaging host");
//! ```

#[cfg(feature = "async")]
pub mod async_codec;
pub mod byte_order;
pub mod channel;
pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

#[cfg(feature = "async")]
pub use async_codec::{framed, NativeCodec};
pub use byte_order::{ByteOrder, ParseByteOrderError, NATIVE_ENDIAN};
pub use channel::Channel;
pub use codec::{
    decode_frame, encode_frame, FrameConfig, ReadMode, DEFAULT_MAX_PAYLOAD, HEADER_SIZE,
};
pub use error::{FrameError, InvalidFrame, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
