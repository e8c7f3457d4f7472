use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: payload length as little-endian u64.
pub const HEADER_SIZE: usize = 8;

/// Default maximum payload size: 4 MiB (sized for ~1080p JPEG frames).
pub const DEFAULT_MAX_PAYLOAD: usize = 4 * 1024 * 1024;

/// One length-prefixed unit of payload data on the wire.
#[derive(Debug, Clone)]
pub struct Frame {
    /// The payload. Opaque binary content; the codec never looks inside.
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the payload is empty. An empty frame is valid on the wire.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// The total wire size of this frame (header + payload).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }
}

/// Encode a payload into the wire format.
///
/// Wire format:
/// ```text
/// +--------------------+------------------+
/// | Length (8B LE u64) | Payload          |
/// |                    | (Length bytes)   |
/// +--------------------+------------------+
/// ```
///
/// The length is always computed from the actual payload. Encoding cannot
/// fail; an empty payload encodes as eight zero bytes.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u64_le(payload.len() as u64);
    dst.put_slice(payload);
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. A declared length
/// over `max_payload` fails with [`FrameError::FrameTooLarge`]; the buffer is
/// left untouched so the caller can tear the connection down.
pub fn decode_frame(src: &mut BytesMut, max_payload: usize) -> Result<Option<Frame>> {
    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let length = u64::from_le_bytes(src[0..HEADER_SIZE].try_into().unwrap());

    if length > max_payload as u64 {
        return Err(FrameError::FrameTooLarge {
            size: length,
            max: max_payload as u64,
        });
    }

    let payload_len = length as usize;
    let total = HEADER_SIZE + payload_len;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(payload_len).freeze();

    Ok(Some(Frame { payload }))
}

/// Configuration for the frame codec.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default: 4 MiB.
    pub max_payload_size: usize,
    /// Read timeout applied to the underlying socket.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout applied to the underlying socket.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            read_timeout: None,
            write_timeout: None,
        }
    }
}
