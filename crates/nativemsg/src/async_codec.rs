//! `tokio_util::codec` integration for async hosts.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{Decoder, Encoder, Framed};

use crate::codec::{decode_frame, encode_frame, FrameConfig, HEADER_SIZE};
use crate::error::{FrameError, Result};

/// Length-prefixed frame codec for `Framed`, `FramedRead` and `FramedWrite`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCodec {
    config: FrameConfig,
}

impl NativeCodec {
    pub fn new(config: FrameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl Decoder for NativeCodec {
    type Item = Bytes;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        decode_frame(src, self.config.byte_order, self.config.max_payload_size)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Bytes>> {
        match self.decode(src)? {
            Some(frame) => Ok(Some(frame)),
            None if src.is_empty() => Ok(None),
            None => {
                let (expected, actual) = if src.len() < HEADER_SIZE {
                    (HEADER_SIZE, src.len())
                } else {
                    let mut header = [0u8; HEADER_SIZE];
                    header.copy_from_slice(&src[..HEADER_SIZE]);
                    let len = self.config.byte_order.decode_len(header) as usize;
                    (len, src.len() - HEADER_SIZE)
                };
                src.clear();
                Err(FrameError::ShortRead { expected, actual })
            }
        }
    }
}

impl Encoder<Bytes> for NativeCodec {
    type Error = FrameError;

    fn encode(&mut self, item: Bytes, dst: &mut BytesMut) -> Result<()> {
        <Self as Encoder<&[u8]>>::encode(self, item.as_ref(), dst)
    }
}

impl Encoder<&[u8]> for NativeCodec {
    type Error = FrameError;

    fn encode(&mut self, item: &[u8], dst: &mut BytesMut) -> Result<()> {
        if item.len() > self.config.max_payload_size {
            return Err(FrameError::PayloadTooLarge {
                size: item.len(),
                max: self.config.max_payload_size,
            });
        }
        encode_frame(self.config.byte_order, item, dst)
    }
}

/// Wrap an async stream in a framed transport.
pub fn framed<T: AsyncRead + AsyncWrite>(io: T, config: FrameConfig) -> Framed<T, NativeCodec> {
    Framed::new(io, NativeCodec::new(config))
}
