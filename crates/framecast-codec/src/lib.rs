//! Length-prefixed frame codec for framecast streams.
//!
//! This is the core value-add layer of framecast. Every payload is framed as:
//! - An 8-byte little-endian u64 payload length
//! - The payload bytes, opaque to the codec
//!
//! No separators, no checksums, no type tags. Partial reads are handled
//! internally; callers always see complete frames.

pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use codec::{decode_frame, encode_frame, Frame, FrameConfig, DEFAULT_MAX_PAYLOAD, HEADER_SIZE};
pub use error::{FrameError, Result};
pub use reader::FrameReader;
pub use writer::FrameWriter;
