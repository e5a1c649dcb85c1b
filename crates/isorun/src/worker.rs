//! # Worker
//!
//! Drives the isolated context. User code runs in synchronous turns; the end
//! of each turn is the only point where queued mutations leave the context.
//! Host notifications are handled between turns, each one its own turn.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use xfer::Frame;
use xfer::Transport;

use crate::error::Error;
use crate::error::Result;
use crate::window::Window;

pub struct Worker {
    window: Window,
    transport: Arc<dyn Transport>,
}

impl Worker {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            window: Window::new(Arc::clone(&transport)),
            transport,
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Runs `f` as one synchronous turn, then flushes its mutations.
    pub fn turn<R>(&mut self, f: impl FnOnce(&mut Window) -> R) -> Result<R> {
        let out = f(&mut self.window);
        self.window.document_mut().transfer_mut().flush()?;
        Ok(out)
    }

    /// Applies one message from the host and returns how many listeners ran.
    pub fn handle_message(&mut self, bytes: &[u8]) -> Result<usize> {
        let notification = match Frame::decode_bytes(bytes)? {
            Frame::Notification(n) => n,
            Frame::Mutations(_) => return Err(Error::UnexpectedFrame),
        };

        debug!(kind = ?notification.kind, "received notification");
        self.turn(|window| window.document_mut().listeners_mut().dispatch(&notification))
    }

    /// Waits for and applies the next host message.
    ///
    /// Returns `None` once the host hangs up.
    pub async fn pump_once(&mut self) -> Result<Option<usize>> {
        match self.transport.recv().await? {
            Some(bytes) => self.handle_message(&bytes).map(Some),
            None => Ok(None),
        }
    }

    /// Handles host messages until the channel closes.
    pub async fn run(mut self) -> Result<()> {
        self.window.document_mut().transfer_mut().flush()?;
        while self.pump_once().await?.is_some() {}
        debug!("backchannel closed");
        Ok(())
    }

    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run())
    }
}
