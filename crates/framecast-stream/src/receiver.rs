use std::io::Read;
use std::time::{Duration, Instant};

use framecast_codec::{Frame, FrameConfig, FrameReader};
use tracing::info;

use crate::cancel::CancelToken;
use crate::error::Result;

const THROUGHPUT_LOG_INTERVAL: Duration = Duration::from_secs(1);

/// Counters for a completed receiving session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiverStats {
    /// Complete frames delivered to the sink.
    pub frames_received: u64,
    /// Payload bytes delivered, excluding frame headers.
    pub bytes_received: u64,
}

/// Receives framed payloads from a connected stream.
///
/// The session is fatal-on-error: any framing error discards the frame it
/// interrupted and ends the session. There is no resynchronization marker in
/// the wire format, so trust cannot be recovered mid-stream.
pub struct StreamReceiver<T> {
    reader: FrameReader<T>,
}

impl<T: Read> StreamReceiver<T> {
    /// Create a receiver with default frame configuration.
    pub fn new(inner: T) -> Self {
        Self {
            reader: FrameReader::new(inner),
        }
    }

    /// Create a receiver with explicit frame configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            reader: FrameReader::with_config(inner, config),
        }
    }

    pub(crate) fn from_reader(reader: FrameReader<T>) -> Self {
        Self { reader }
    }

    /// Receive the next complete frame.
    ///
    /// `Ok(None)` means the sender closed the stream cleanly on a frame
    /// boundary.
    pub fn recv_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.reader.next_frame()?)
    }

    /// Drive the session loop, delivering each frame to `sink`.
    ///
    /// Runs until the stream ends, an error occurs, or cancellation is
    /// observed between frames. Logs a throughput line roughly once per
    /// second.
    pub fn run<F: FnMut(Frame)>(
        &mut self,
        cancel: &CancelToken,
        mut sink: F,
    ) -> Result<ReceiverStats> {
        let mut stats = ReceiverStats::default();
        let mut window_start = Instant::now();
        let mut window_frames = 0u64;

        while !cancel.is_cancelled() {
            let frame = match self.recv_frame()? {
                Some(frame) => frame,
                None => break,
            };

            stats.frames_received += 1;
            stats.bytes_received += frame.len() as u64;
            window_frames += 1;

            sink(frame);

            let elapsed = window_start.elapsed();
            if elapsed >= THROUGHPUT_LOG_INTERVAL {
                let fps = window_frames as f64 / elapsed.as_secs_f64();
                info!(fps, "receiving");
                window_start = Instant::now();
                window_frames = 0;
            }
        }

        Ok(stats)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        self.reader.get_ref()
    }

    /// Consume the receiver and return the inner stream.
    pub fn into_inner(self) -> T {
        self.reader.into_inner()
    }
}
