//! Framed image streaming over persistent TCP connections.
//!
//! framecast delivers discrete binary payloads (typically JPEG images) over an
//! ordered byte stream with explicit length framing: each frame is an 8-byte
//! little-endian length followed by the payload, repeated indefinitely.
//!
//! # Crate Structure
//!
//! - [`transport`] — TCP connection establishment and socket options
//! - [`codec`] — Length-prefixed frame encoding/decoding
//! - [`stream`] — Paced sender and receiver sessions, preamble, cancellation

/// Re-export transport types.
pub mod transport {
    pub use framecast_transport::*;
}

/// Re-export codec types.
pub mod codec {
    pub use framecast_codec::*;
}

/// Re-export stream session types.
pub mod stream {
    pub use framecast_stream::*;
}
