/// Errors that can occur in stream sessions.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] framecast_transport::TransportError),

    /// Frame-level error.
    #[error("frame error: {0}")]
    Frame(#[from] framecast_codec::FrameError),

    /// The preamble was missing, truncated, or not a valid stream id.
    #[error("invalid preamble: {0}")]
    InvalidPreamble(String),

    /// An I/O error outside the framed portion of the session.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StreamError>;
