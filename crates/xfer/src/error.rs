//! # Error Definitions
//!
//! Protocol failures shared by both sides of the transfer channel.
//!
//! Everything here is a framing or contract violation: the producer and the
//! consumer disagree about the wire. Permission denials and missing strings are
//! not errors and never show up in this enum.

use wordpack::Error as PackError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The underlying word codec failed (short buffer, bad UTF-16).
    Codec(PackError),
    /// The leading word of a frame names no known frame kind.
    UnknownFrame(u16),
    /// A notification carries a message type this side does not know.
    UnknownMessage(u16),
    /// A record starts with a tag this side does not know.
    UnknownMutation(u16),
    /// A record is shorter than the fixed layout of its tag.
    TruncatedRecord { tag: u16, start: usize, needed: usize, available: usize },
    /// A frame decoded cleanly but words were left over.
    TrailingWords(usize),
    /// The string table ran out of 16-bit indices.
    StringTableFull,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(e) => write!(f, "Codec error: {}", e),
            Self::UnknownFrame(kind) => write!(f, "Unknown frame kind: {}", kind),
            Self::UnknownMessage(kind) => write!(f, "Unknown message type: {}", kind),
            Self::UnknownMutation(tag) => write!(f, "Unknown mutation tag: {}", tag),
            Self::TruncatedRecord { tag, start, needed, available } => write!(
                f,
                "Record with tag {} at word {} needs {} words, {} available",
                tag, start, needed, available
            ),
            Self::TrailingWords(n) => write!(f, "{} trailing words after frame", n),
            Self::StringTableFull => write!(f, "String table exhausted its 16-bit index space"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PackError> for Error {
    fn from(e: PackError) -> Self { Self::Codec(e) }
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, Error>;
