use std::fmt;
use std::io::{ErrorKind, Read, Write};
use std::str::FromStr;

use uuid::Uuid;

use crate::error::{Result, StreamError};

/// Wire length of the preamble: a hyphenated ASCII UUID.
pub const PREAMBLE_LEN: usize = 36;

/// Identifier labeling one inbound stream, carried in the preamble.
///
/// Sent exactly once, immediately after connecting and before the first
/// frame. Not length-prefixed; receivers that expect it read exactly
/// [`PREAMBLE_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(Uuid);

impl StreamId {
    /// Generate a fresh random stream id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The wire representation: 36 ASCII bytes, hyphenated lowercase.
    pub fn to_wire(&self) -> [u8; PREAMBLE_LEN] {
        let mut buf = [0u8; PREAMBLE_LEN];
        self.0.hyphenated().encode_lower(&mut buf);
        buf
    }
}

impl FromStr for StreamId {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(StreamId)
            .map_err(|e| StreamError::InvalidPreamble(format!("not a valid stream id: {e}")))
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Write the one-time preamble to a stream.
pub fn write_preamble<W: Write>(writer: &mut W, id: &StreamId) -> Result<()> {
    writer.write_all(&id.to_wire())?;
    writer.flush()?;
    Ok(())
}

/// Read and validate the one-time preamble from a stream.
///
/// Reads exactly [`PREAMBLE_LEN`] bytes. A stream that ends early or whose
/// bytes do not parse as a stream id fails with
/// [`StreamError::InvalidPreamble`]; no frame data has been consumed at that
/// point, but the connection cannot be trusted and should be closed.
pub fn read_preamble<R: Read>(reader: &mut R) -> Result<StreamId> {
    let mut buf = [0u8; PREAMBLE_LEN];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            StreamError::InvalidPreamble("stream ended before a complete preamble".to_string())
        } else {
            StreamError::Io(e)
        }
    })?;

    let text = std::str::from_utf8(&buf)
        .map_err(|_| StreamError::InvalidPreamble("preamble is not ASCII".to_string()))?;
    text.parse()
}
