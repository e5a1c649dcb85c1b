//! Isolated-side failures.

use xfer::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A frame failed to encode or decode.
    Protocol(xfer::Error),
    /// The channel to the host failed.
    Transport(TransportError),
    /// The host sent a frame kind only the isolated side may send.
    UnexpectedFrame,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "Protocol error: {}", e),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::UnexpectedFrame => write!(f, "Received a mutation frame from the host"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(e) => Some(e),
            Self::Transport(e) => Some(e),
            Self::UnexpectedFrame => None,
        }
    }
}

impl From<xfer::Error> for Error {
    fn from(e: xfer::Error) -> Self {
        Self::Protocol(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
