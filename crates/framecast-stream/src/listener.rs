use std::net::SocketAddr;

use framecast_codec::{FrameConfig, FrameReader};
use framecast_transport::{TcpSocket, WireStream};
use tracing::{debug, warn};

use crate::error::Result;
use crate::preamble::{read_preamble, StreamId};
use crate::receiver::StreamReceiver;

/// Configuration for inbound stream sessions.
#[derive(Debug, Clone, Default)]
pub struct ListenerConfig {
    /// Require a stream-id preamble before the first frame.
    ///
    /// When set, a connection whose first 36 bytes do not parse as a stream
    /// id is rejected before any frame is read.
    pub expect_preamble: bool,
    /// Frame codec configuration (max size, read timeout).
    pub frame: FrameConfig,
}

/// One accepted inbound stream, ready to receive frames.
pub struct Inbound {
    /// Stream id from the preamble, when the listener expects one.
    pub stream_id: Option<StreamId>,
    /// Address of the sending peer.
    pub peer_addr: SocketAddr,
    /// The receiving session for this connection.
    pub receiver: StreamReceiver<WireStream>,
}

/// Listens for and accepts inbound frame streams.
pub struct StreamListener {
    socket: TcpSocket,
    config: ListenerConfig,
}

impl StreamListener {
    /// Bind to a TCP address with default configuration.
    pub fn bind(addr: &str) -> Result<Self> {
        Ok(Self {
            socket: TcpSocket::bind(addr)?,
            config: ListenerConfig::default(),
        })
    }

    /// Override the listener configuration.
    pub fn with_config(mut self, config: ListenerConfig) -> Self {
        self.config = config;
        self
    }

    /// Accept the next inbound stream (blocking).
    ///
    /// Reads and validates the preamble when configured to expect one. A
    /// connection with a bad preamble is shut down and the error returned;
    /// the listener itself stays usable for the next accept.
    pub fn accept(&self) -> Result<Inbound> {
        let mut stream = self.socket.accept()?;
        let peer_addr = stream.peer_addr()?;

        let stream_id = if self.config.expect_preamble {
            match read_preamble(&mut stream) {
                Ok(id) => {
                    debug!(%peer_addr, stream_id = %id, "inbound stream identified");
                    Some(id)
                }
                Err(err) => {
                    warn!(%peer_addr, error = %err, "rejecting connection");
                    let _ = stream.shutdown();
                    return Err(err);
                }
            }
        } else {
            None
        };

        let reader = FrameReader::with_config_wire(stream, self.config.frame.clone())?;

        Ok(Inbound {
            stream_id,
            peer_addr,
            receiver: StreamReceiver::from_reader(reader),
        })
    }

    /// The address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.socket.local_addr()
    }
}
