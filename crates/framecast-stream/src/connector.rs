use framecast_codec::{FrameConfig, FrameWriter};
use framecast_transport::{TcpSocket, WireStream};
use tracing::debug;

use crate::error::Result;
use crate::preamble::{write_preamble, StreamId};
use crate::sender::StreamSender;

/// Configuration for outbound stream connections.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Optional stream id sent as a one-time preamble before the first frame.
    pub stream_id: Option<StreamId>,
    /// Frame codec configuration (max size, write timeout).
    pub frame: FrameConfig,
    /// Disable Nagle's algorithm on the connection. Default: true.
    pub nodelay: bool,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            stream_id: None,
            frame: FrameConfig::default(),
            nodelay: true,
        }
    }
}

/// Connect to a listening receiver with default configuration.
///
/// No preamble is sent; framing begins immediately.
pub fn connect(addr: &str) -> Result<StreamSender<WireStream>> {
    connect_with_config(addr, &ConnectConfig::default())
}

/// Connect with explicit configuration.
///
/// Transport failure is fatal and surfaced immediately. On success the
/// connection is held for the whole session; it closes on drop from any exit
/// path.
pub fn connect_with_config(addr: &str, config: &ConnectConfig) -> Result<StreamSender<WireStream>> {
    let stream = TcpSocket::connect(addr)?;
    stream.set_nodelay(config.nodelay)?;

    let mut writer = FrameWriter::with_config_wire(stream, config.frame.clone())?;

    if let Some(id) = &config.stream_id {
        write_preamble(writer.get_mut(), id)?;
        debug!(stream_id = %id, "sent preamble");
    }

    Ok(StreamSender::from_writer(writer))
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::TcpListener;

    use framecast_codec::FrameReader;

    use super::*;
    use crate::preamble::{read_preamble, PREAMBLE_LEN};

    #[test]
    fn connect_and_send_without_preamble() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let server = std::thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = FrameReader::new(stream);
            let frame = reader.read_frame().unwrap();
            assert_eq!(frame.payload.as_ref(), b"no-preamble");
        });

        let mut sender = connect(&addr).unwrap();
        sender.send_frame(b"no-preamble").unwrap();
        drop(sender);

        server.join().unwrap();
    }

    #[test]
    fn connect_sends_preamble_before_first_frame() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let id = StreamId::generate();

        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let received = read_preamble(&mut stream).unwrap();

            let mut reader = FrameReader::new(stream);
            let frame = reader.read_frame().unwrap();
            (received, frame.payload.to_vec())
        });

        let config = ConnectConfig {
            stream_id: Some(id),
            ..ConnectConfig::default()
        };
        let mut sender = connect_with_config(&addr, &config).unwrap();
        sender.send_frame(b"after-preamble").unwrap();
        drop(sender);

        let (received, payload) = server.join().unwrap();
        assert_eq!(received, id);
        assert_eq!(payload, b"after-preamble");
    }

    #[test]
    fn connect_failure_is_immediate() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let result = connect(&addr);
        assert!(matches!(
            result,
            Err(crate::error::StreamError::Transport(
                framecast_transport::TransportError::Connect { .. }
            ))
        ));
    }

    #[test]
    fn preamble_is_exactly_36_bytes_on_the_wire() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let server = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            stream.read_to_end(&mut buf).unwrap();
            buf
        });

        let config = ConnectConfig {
            stream_id: Some(StreamId::generate()),
            ..ConnectConfig::default()
        };
        let sender = connect_with_config(&addr, &config).unwrap();
        drop(sender);

        let wire = server.join().unwrap();
        assert_eq!(wire.len(), PREAMBLE_LEN);
    }
}
