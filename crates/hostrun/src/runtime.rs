//! # Host Runtime
//!
//! The privileged end of one transfer channel. Pulls mutation frames off the
//! transport, keeps the host copy of the string table current, and replays
//! every record through the registry.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use xfer::Frame;
use xfer::StringTable;
use xfer::Transport;

use crate::error::Error;
use crate::error::Result;
use crate::registry::DispatchStats;
use crate::registry::Registry;

pub struct Host {
    registry: Registry,
    strings: StringTable,
    transport: Arc<dyn Transport>,
    frames: u64,
}

impl Host {
    pub(crate) fn new(registry: Registry, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            strings: StringTable::new(),
            transport,
            frames: 0,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The host copy of the string table.
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Number of mutation frames applied so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Decodes one transport message and applies it.
    ///
    /// Strings are appended before any record runs, so records may reference
    /// strings shipped in the same frame.
    pub fn handle_frame(&mut self, bytes: &[u8]) -> Result<DispatchStats> {
        let frame = match Frame::decode_bytes(bytes)? {
            Frame::Mutations(frame) => frame,
            Frame::Notification(_) => return Err(Error::UnexpectedFrame),
        };

        self.strings.extend(frame.strings)?;
        let stats = self.registry.dispatch_all(&frame.mutations, &self.strings)?;
        self.frames += 1;

        debug!(
            frame = self.frames,
            executed = stats.executed,
            suppressed = stats.suppressed,
            "applied mutation frame"
        );
        Ok(stats)
    }

    /// Pumps frames until the isolated context hangs up.
    ///
    /// Returns the first framing error; the stream is not trusted past it.
    pub async fn run(mut self) -> Result<()> {
        while let Some(bytes) = self.transport.recv().await? {
            self.handle_frame(&bytes)?;
        }
        debug!(frames = self.frames, "transfer channel closed");
        Ok(())
    }

    /// Runs the pump on the tokio runtime.
    pub fn spawn(self) -> JoinHandle<Result<()>> {
        tokio::spawn(self.run())
    }
}
