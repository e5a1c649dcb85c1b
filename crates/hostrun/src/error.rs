//! Host-side failures.
//!
//! Everything here is fatal for the frame being processed: a framing error means
//! the isolated encoder and this dispatcher disagree about the wire, and the
//! stream cannot be trusted past that point.

use xfer::TransportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Frame or record decoding failed.
    Protocol(xfer::Error),
    /// The channel to the isolated context failed.
    Transport(TransportError),
    /// No executor is registered for the tag at `offset`.
    UnknownTag { tag: u16, offset: usize },
    /// An executor returned a cursor other than `offset + record_len`.
    CursorMismatch { tag: u16, offset: usize, expected: usize, returned: usize },
    /// An executor declared a record length of zero words.
    EmptyRecord(u16),
    /// Two executors were registered for the same tag.
    DuplicateExecutor(u16),
    /// The isolated context sent a frame kind only the host may send.
    UnexpectedFrame,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Protocol(e) => write!(f, "Protocol error: {}", e),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::UnknownTag { tag, offset } => {
                write!(f, "No executor for tag {} at word {}", tag, offset)
            }
            Self::CursorMismatch { tag, offset, expected, returned } => write!(
                f,
                "Executor for tag {} at word {} returned cursor {}, expected {}",
                tag, offset, returned, expected
            ),
            Self::EmptyRecord(tag) => write!(f, "Executor for tag {} declares an empty record", tag),
            Self::DuplicateExecutor(tag) => write!(f, "Executor for tag {} already registered", tag),
            Self::UnexpectedFrame => write!(f, "Received a notification frame from the isolated context"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol(e) => Some(e),
            Self::Transport(e) => Some(e),
            _ => None,
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
