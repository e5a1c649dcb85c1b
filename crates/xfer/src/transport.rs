//! # Transport Abstraction
//!
//! A minimal interface for moving frames across the context boundary.
//!
//! ## Philosophy
//!
//! - **Byte-Oriented**: The Transport knows nothing about records or frames.
//!   It moves opaque buffers.
//! - **Fire-and-Forget**: `send` never waits for the peer. There is no acknowledgment,
//!   retry or back-pressure; reliability is the channel's own business.
//! - **Ordered per channel**: Buffers sent 1, 2, 3 arrive 1, 2, 3. Nothing is promised
//!   relative to any other channel.

use std::fmt;

/// Errors that occur at the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer hung up; nothing more can be sent.
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Channel closed"),
        }
    }
}

impl std::error::Error for TransportError {}

pub type Result<T> = std::result::Result<T, TransportError>;

/// One end of an ordered, asynchronous message channel.
///
/// This trait is designed to be object-safe (`Arc<dyn Transport>`).
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Queues a payload for the peer and returns immediately.
    ///
    /// Callable from synchronous code such as host event listeners.
    fn send(&self, payload: Vec<u8>) -> Result<()>;

    /// Waits for the next payload from the peer.
    ///
    /// # invariants
    /// - Returns `Ok(None)` once the peer is gone and every queued payload was read.
    /// - Should not interpret the payload content.
    async fn recv(&self) -> Result<Option<Vec<u8>>>;
}
