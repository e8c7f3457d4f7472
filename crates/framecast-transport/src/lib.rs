//! TCP transport layer for framecast streams.
//!
//! Provides connection establishment (bind/accept/connect) and the connected
//! [`WireStream`] type that everything else builds on. The transport owns
//! socket concerns only: address resolution, timeouts, `TCP_NODELAY`,
//! shutdown. It knows nothing about framing.

pub mod error;
pub mod stream;
pub mod tcp;

pub use error::{Result, TransportError};
pub use stream::WireStream;
pub use tcp::TcpSocket;
