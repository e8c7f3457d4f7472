use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::stream::WireStream;

/// TCP socket transport.
///
/// Provides bind/accept/connect over `std::net`. Addresses are given as
/// strings (`host:port`) and resolved eagerly so errors carry the original
/// address text.
pub struct TcpSocket {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl TcpSocket {
    /// Bind and listen on a TCP address.
    ///
    /// Binding to port 0 picks an ephemeral port; use [`TcpSocket::local_addr`]
    /// to discover it.
    pub fn bind(addr: &str) -> Result<Self> {
        let candidates = resolve(addr)?;
        let listener = TcpListener::bind(&candidates[..]).map_err(|e| TransportError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;
        let local_addr = listener.local_addr().map_err(|e| TransportError::Bind {
            addr: addr.to_string(),
            source: e,
        })?;

        info!(%local_addr, "listening on tcp socket");

        Ok(Self {
            listener,
            local_addr,
        })
    }

    /// Accept an incoming connection (blocking).
    pub fn accept(&self) -> Result<WireStream> {
        let (stream, peer_addr) = self.listener.accept().map_err(TransportError::Accept)?;
        debug!(%peer_addr, "accepted connection");
        Ok(WireStream::from_tcp(stream))
    }

    /// Connect to a listening TCP socket (blocking).
    pub fn connect(addr: &str) -> Result<WireStream> {
        let candidates = resolve(addr)?;
        let stream = TcpStream::connect(&candidates[..]).map_err(|e| TransportError::Connect {
            addr: addr.to_string(),
            source: e,
        })?;
        debug!(addr, "connected to tcp socket");
        Ok(WireStream::from_tcp(stream))
    }

    /// Connect with an upper bound on connection establishment time.
    ///
    /// Candidates are tried in resolution order until one connects or all fail.
    pub fn connect_timeout(addr: &str, timeout: Duration) -> Result<WireStream> {
        let candidates = resolve(addr)?;
        let mut last_err = None;
        for candidate in &candidates {
            match TcpStream::connect_timeout(candidate, timeout) {
                Ok(stream) => {
                    debug!(addr, %candidate, "connected to tcp socket");
                    return Ok(WireStream::from_tcp(stream));
                }
                Err(e) => last_err = Some(e),
            }
        }
        Err(TransportError::Connect {
            addr: addr.to_string(),
            source: last_err
                .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no address")),
        })
    }

    /// The address this socket is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        "tcp"
    }
}

fn resolve(addr: &str) -> Result<Vec<SocketAddr>> {
    let candidates: Vec<SocketAddr> = addr
        .to_socket_addrs()
        .map_err(|source| TransportError::AddrInvalid {
            addr: addr.to_string(),
            source,
        })?
        .collect();

    if candidates.is_empty() {
        return Err(TransportError::AddrInvalid {
            addr: addr.to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "address resolved to no candidates",
            ),
        });
    }

    Ok(candidates)
}
