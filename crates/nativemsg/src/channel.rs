//! A framed channel over a read stream and a write stream.

use std::io::{self, Read, Write};

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::byte_order::ByteOrder;
use crate::codec::FrameConfig;
use crate::error::Result;
use crate::reader::FrameReader;
use crate::writer::FrameWriter;

/// Reads and writes JSON frames over a pair of streams.
///
/// The two directions are independent: a channel may be split into its
/// reader and writer halves and driven from separate threads, but each half
/// must have a single owner. Frames are not sequenced or correlated.
pub struct Channel<R, W> {
    reader: FrameReader<R>,
    writer: FrameWriter<W>,
}

impl<R: Read, W: Write> Channel<R, W> {
    /// Create a channel with explicit configuration.
    pub fn with_config(reader: R, writer: W, config: FrameConfig) -> Self {
        Self {
            reader: FrameReader::with_config(reader, config),
            writer: FrameWriter::with_config(writer, config),
        }
    }

    /// Create a channel using the given header byte order.
    pub fn new(reader: R, writer: W, order: ByteOrder) -> Self {
        Self::with_config(reader, writer, FrameConfig::with_byte_order(order))
    }

    /// Create a channel using the machine's native byte order.
    pub fn native(reader: R, writer: W) -> Self {
        Self::new(reader, writer, ByteOrder::Native)
    }

    /// Read the next raw frame payload.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        self.reader.read_frame()
    }

    /// Write `payload` as one frame, returning bytes written including the header.
    pub fn write_frame(&mut self, payload: &[u8]) -> Result<usize> {
        self.writer.write_frame(payload)
    }

    /// Serialize `value` as JSON and write it as one frame.
    pub fn send<V: Serialize + ?Sized>(&mut self, value: &V) -> Result<usize> {
        self.writer.send(value)
    }

    /// Read one frame and deserialize it.
    pub fn recv<V: DeserializeOwned>(&mut self) -> Result<V> {
        self.reader.recv()
    }

    /// Read one frame and deserialize it into `target`.
    pub fn recv_into<V: DeserializeOwned>(&mut self, target: &mut V) -> Result<()> {
        self.reader.recv_into(target)
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.reader.config().byte_order
    }

    pub fn config(&self) -> &FrameConfig {
        self.reader.config()
    }

    pub fn reader_mut(&mut self) -> &mut FrameReader<R> {
        &mut self.reader
    }

    pub fn writer_mut(&mut self) -> &mut FrameWriter<W> {
        &mut self.writer
    }

    /// Split into independently owned reader and writer halves.
    pub fn into_split(self) -> (FrameReader<R>, FrameWriter<W>) {
        (self.reader, self.writer)
    }
}

impl Channel<io::Stdin, io::Stdout> {
    /// Channel over the process's stdin and stdout, as used by browser
    /// native-messaging hosts.
    ///
    /// Nothing else may write to stdout while the channel is in use.
    pub fn stdio(order: ByteOrder) -> Self {
        Self::new(io::stdin(), io::stdout(), order)
    }
}

impl<R: Read> Channel<R, io::Sink> {
    /// Channel that only receives. Writes are discarded.
    pub fn receive_only(reader: R, order: ByteOrder) -> Self {
        Self::new(reader, io::sink(), order)
    }
}

impl<W: Write> Channel<io::Empty, W> {
    /// Channel that only sends. Reads see an immediately closed stream.
    pub fn send_only(writer: W, order: ByteOrder) -> Self {
        Self::new(io::empty(), writer, order)
    }
}
