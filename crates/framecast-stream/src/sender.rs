use std::io::Write;
use std::path::PathBuf;

use bytes::Bytes;
use framecast_codec::{FrameConfig, FrameWriter};
use tracing::debug;

use crate::cancel::CancelToken;
use crate::error::Result;
use crate::pacer::Pacer;

/// Supplies the payload for each tick of a streaming loop.
pub trait PayloadSource {
    /// The next payload to send, or `Ok(None)` to end the stream.
    fn next_payload(&mut self) -> std::io::Result<Option<Bytes>>;
}

/// Re-sends one fixed payload every tick.
pub struct StaticPayload {
    payload: Bytes,
}

impl StaticPayload {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl PayloadSource for StaticPayload {
    fn next_payload(&mut self) -> std::io::Result<Option<Bytes>> {
        Ok(Some(self.payload.clone()))
    }
}

/// Re-reads a file every tick, so refreshed content is picked up.
pub struct FilePayload {
    path: PathBuf,
}

impl FilePayload {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayloadSource for FilePayload {
    fn next_payload(&mut self) -> std::io::Result<Option<Bytes>> {
        let data = std::fs::read(&self.path)?;
        Ok(Some(Bytes::from(data)))
    }
}

/// Counters for a completed streaming run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames fully written to the wire.
    pub frames_sent: u64,
    /// Payload bytes written, excluding frame headers.
    pub bytes_sent: u64,
}

/// Sends framed payloads over a connected stream.
///
/// One connection, one direction: the sender owns the write half for the
/// whole session.
pub struct StreamSender<T> {
    writer: FrameWriter<T>,
}

impl<T: Write> StreamSender<T> {
    /// Create a sender with default frame configuration.
    pub fn new(inner: T) -> Self {
        Self {
            writer: FrameWriter::new(inner),
        }
    }

    /// Create a sender with explicit frame configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            writer: FrameWriter::with_config(inner, config),
        }
    }

    pub(crate) fn from_writer(writer: FrameWriter<T>) -> Self {
        Self { writer }
    }

    /// Send one payload as one complete frame.
    pub fn send_frame(&mut self, payload: &[u8]) -> Result<()> {
        self.writer.send(payload)?;
        Ok(())
    }

    /// Stream payloads at a fixed cadence until cancelled or the source ends.
    ///
    /// Cancellation is checked between frames only. Any frame error ends the
    /// run; the frame it interrupted is discarded, not retried.
    pub fn run<S: PayloadSource>(
        &mut self,
        source: &mut S,
        pacer: &mut Pacer,
        cancel: &CancelToken,
    ) -> Result<StreamStats> {
        let mut stats = StreamStats::default();

        while !cancel.is_cancelled() {
            let payload = match source.next_payload()? {
                Some(payload) => payload,
                None => break,
            };

            self.send_frame(&payload)?;
            stats.frames_sent += 1;
            stats.bytes_sent += payload.len() as u64;

            pacer.pause();
        }

        debug!(
            frames = stats.frames_sent,
            bytes = stats.bytes_sent,
            "stream run finished"
        );
        Ok(stats)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        self.writer.get_ref()
    }

    /// Consume the sender and return the inner stream.
    pub fn into_inner(self) -> T {
        self.writer.into_inner()
    }
}
