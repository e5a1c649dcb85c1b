//! The isolated context's object layer root.
//!
//! Owns the two channels every feature needs: the outbound mutation transfer
//! and the inbound notification listeners.

use std::sync::Arc;

use xfer::Transport;

use crate::listeners::GlobalListeners;
use crate::transfer::MutationTransfer;

#[derive(Debug)]
pub struct Document {
    transfer: MutationTransfer,
    listeners: GlobalListeners,
}

impl Document {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transfer: MutationTransfer::new(transport),
            listeners: GlobalListeners::new(),
        }
    }

    pub fn transfer(&self) -> &MutationTransfer {
        &self.transfer
    }

    pub fn transfer_mut(&mut self) -> &mut MutationTransfer {
        &mut self.transfer
    }

    pub fn listeners(&self) -> &GlobalListeners {
        &self.listeners
    }

    pub fn listeners_mut(&mut self) -> &mut GlobalListeners {
        &mut self.listeners
    }
}
