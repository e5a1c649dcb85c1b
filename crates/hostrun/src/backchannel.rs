//! # Backchannel
//!
//! The reverse path: host code posts typed notifications to the isolated
//! context, which replays its own registered callbacks. Nothing executable ever
//! travels this way, only the message type.

use std::sync::Arc;

use tracing::debug;

use xfer::MessageType;
use xfer::Notification;
use xfer::Transport;

use crate::error::Result;

/// Cheap, cloneable handle for posting notifications from host listeners.
#[derive(Clone)]
pub struct Backchannel {
    transport: Arc<dyn Transport>,
}

impl Backchannel {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Posts a notification. Fire-and-forget: returns once the message is queued.
    ///
    /// # Errors
    /// `Error::Transport` if the isolated context is gone.
    pub fn post(&self, kind: MessageType) -> Result<()> {
        debug!(?kind, "posting notification");
        self.transport.send(Notification::new(kind).to_bytes())?;
        Ok(())
    }
}

impl std::fmt::Debug for Backchannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backchannel").finish_non_exhaustive()
    }
}
