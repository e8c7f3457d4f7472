use std::io::{ErrorKind, Read};

use bytes::BytesMut;
use framecast_transport::WireStream;

use crate::codec::{decode_frame, Frame, FrameConfig};
use crate::error::{FrameError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 16 * 1024;
const READ_CHUNK_SIZE: usize = 16 * 1024;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally — callers always get complete frames, no
/// matter how the underlying source splits its reads.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Ok(None)` when the stream ends cleanly on a frame boundary.
    /// Returns `Err(FrameError::IncompleteStream)` when the stream ends after
    /// a partial header or partial payload.
    pub fn next_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf, self.config.max_payload_size)? {
                return Ok(Some(frame));
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(FrameError::IncompleteStream);
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Read the next complete frame, requiring one to be present.
    ///
    /// Any end-of-stream, clean or not, is `Err(FrameError::IncompleteStream)`.
    pub fn read_frame(&mut self) -> Result<Frame> {
        self.next_frame()?.ok_or(FrameError::IncompleteStream)
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

impl FrameReader<WireStream> {
    /// Create a frame reader for a [`WireStream`], applying the read timeout
    /// from config to the socket.
    pub fn with_config_wire(inner: WireStream, config: FrameConfig) -> Result<Self> {
        inner
            .set_read_timeout(config.read_timeout)
            .map_err(transport_to_frame_error)?;
        Ok(Self::with_config(inner, config))
    }
}

fn transport_to_frame_error(err: framecast_transport::TransportError) -> FrameError {
    match err {
        framecast_transport::TransportError::Io(io)
        | framecast_transport::TransportError::Accept(io) => FrameError::Io(io),
        framecast_transport::TransportError::Bind { source, .. }
        | framecast_transport::TransportError::Connect { source, .. }
        | framecast_transport::TransportError::AddrInvalid { source, .. } => FrameError::Io(source),
    }
}
