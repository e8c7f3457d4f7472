/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The declared payload length exceeds the configured maximum.
    ///
    /// Framing trust is lost once this occurs; the connection must be closed.
    #[error("frame too large ({size} bytes, max {max})")]
    FrameTooLarge { size: u64, max: u64 },

    /// The stream ended before a complete frame (header or payload) arrived.
    #[error("stream ended before a complete frame")]
    IncompleteStream,

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FrameError>;
