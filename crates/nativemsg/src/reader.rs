use std::io::{ErrorKind, Read};

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::byte_order::ByteOrder;
use crate::codec::{check_len, FrameConfig, ReadMode, HEADER_SIZE};
use crate::error::{FrameError, InvalidFrame, Result};

/// Reads length-prefixed frames from any `Read` stream.
///
/// Holds no buffered data between calls, so the inner stream can be taken
/// back with [`into_inner`](Self::into_inner) at any frame boundary.
pub struct FrameReader<T> {
    inner: T,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader using the given header byte order.
    pub fn new(inner: T, order: ByteOrder) -> Self {
        Self::with_config(inner, FrameConfig::with_byte_order(order))
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self { inner, config }
    }

    /// Read the next frame payload (blocking).
    ///
    /// Returns `InvalidFrame(MissingHeader)` when the stream is at EOF, and
    /// `ShortRead` when it ends partway through a frame.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        let mut header = [0u8; HEADER_SIZE];
        let read = self.fill(&mut header)?;
        if read == 0 {
            return Err(FrameError::InvalidFrame(InvalidFrame::MissingHeader));
        }
        if read < HEADER_SIZE {
            tracing::debug!(read, "stream ended inside frame header");
            return Err(FrameError::ShortRead {
                expected: HEADER_SIZE,
                actual: read,
            });
        }

        let len = check_len(
            self.config.byte_order.decode_len(header),
            self.config.max_payload_size,
        )?;

        let mut payload = vec![0u8; len];
        let read = self.fill(&mut payload)?;
        if read < len {
            tracing::debug!(expected = len, read, "stream ended inside frame payload");
            return Err(FrameError::ShortRead {
                expected: len,
                actual: read,
            });
        }

        tracing::trace!(size = len, order = %self.config.byte_order, "read frame");
        Ok(Bytes::from(payload))
    }

    /// Read a frame and deserialize its JSON payload.
    pub fn recv<V: DeserializeOwned>(&mut self) -> Result<V> {
        let payload = self.read_frame()?;
        serde_json::from_slice(&payload).map_err(|source| FrameError::Decode { source, payload })
    }

    /// Read a frame and deserialize its JSON payload into `target`.
    ///
    /// `target` is left untouched on error.
    pub fn recv_into<V: DeserializeOwned>(&mut self, target: &mut V) -> Result<()> {
        *target = self.recv()?;
        Ok(())
    }

    /// Fill `buf` according to the configured read mode, returning how many
    /// bytes arrived before EOF.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut filled = 0usize;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    filled += n;
                    if self.config.read_mode == ReadMode::Single {
                        break;
                    }
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        Ok(filled)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum payload size for subsequent frame decoding.
    pub fn set_max_payload_size(&mut self, max_payload_size: usize) {
        self.config.max_payload_size = max_payload_size;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}
