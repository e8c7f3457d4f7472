//! Paced sender and receiver sessions for framecast streams.
//!
//! This is the "just works" layer. Connect to a receiver, stream payloads at
//! a fixed cadence with cooperative cancellation, or bind a listener and
//! consume inbound frame streams — each optionally labeled by a one-time
//! stream-id preamble sent before the first frame.

pub mod cancel;
pub mod connector;
pub mod error;
pub mod listener;
pub mod pacer;
pub mod preamble;
pub mod receiver;
pub mod sender;

pub use cancel::CancelToken;
pub use connector::{connect, connect_with_config, ConnectConfig};
pub use error::{Result, StreamError};
pub use listener::{Inbound, ListenerConfig, StreamListener};
pub use pacer::Pacer;
pub use preamble::{read_preamble, write_preamble, StreamId, PREAMBLE_LEN};
pub use receiver::{ReceiverStats, StreamReceiver};
pub use sender::{FilePayload, PayloadSource, StaticPayload, StreamSender, StreamStats};
