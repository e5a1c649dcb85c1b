//! # Window
//!
//! The isolated side's window object. Currently carries the navigation guard.
//!
//! ## Navigation Guard
//!
//! Two pieces of state: the registered handler and the prevent flag. The host
//! only ever sees them together, as one `WindowOnBeforeUnload` record.
//!
//! - Setting a handler always sends the full record.
//! - Changing the flag sends the full record only while a handler is set, and
//!   only if the value actually changed.
//! - Clearing the handler drops the local backchannel listener and withdraws
//!   any guard records still pending from this turn. If the host holds a
//!   listener from an earlier turn, a removal record is sent so the host
//!   clears it too.
//!
//! The host therefore only ever sees the net state of a turn.

use std::sync::Arc;

use tracing::debug;
use tracing::trace;

use xfer::MessageType;
use xfer::MutationType;
use xfer::NavigationPolicy;
use xfer::Notification;
use xfer::OnBeforeUnloadRecord;
use xfer::Transport;

use crate::document::Document;
use crate::event::BEFORE_UNLOAD;
use crate::event::Event;
use crate::handles::ListenerId;

/// A user callback for the navigation guard.
pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Observable state of the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeforeUnloadState {
    /// No handler; the flag is kept for when one is set.
    NoHandler { prevent: bool },
    HandlerSet { prevent: bool },
}

struct Registration {
    handler: Handler,
    listener: ListenerId,
}

#[derive(Default)]
struct BeforeUnloadGuard {
    registration: Option<Registration>,
    prevent: bool,
    /// Whether the host holds a listener once every queued record applies.
    remote: bool,
    /// `remote` as of the last flush, before this turn's records.
    remote_flushed: bool,
}

#[derive(Debug)]
pub struct Window {
    document: Document,
    guard: BeforeUnloadGuard,
}

impl Window {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            document: Document::new(transport),
            guard: BeforeUnloadGuard::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn on_before_unload(&self) -> Option<&Handler> {
        self.guard.registration.as_ref().map(|r| &r.handler)
    }

    pub fn on_before_unload_prevent_navigation(&self) -> bool {
        self.guard.prevent
    }

    pub fn before_unload_state(&self) -> BeforeUnloadState {
        let prevent = self.guard.prevent;
        match self.guard.registration {
            Some(_) => BeforeUnloadState::HandlerSet { prevent },
            None => BeforeUnloadState::NoHandler { prevent },
        }
    }

    /// Registers `handler`, replacing any previous one. `None` clears it.
    pub fn set_on_before_unload(&mut self, handler: Option<Handler>) {
        if let Some(old) = self.guard.registration.take() {
            self.document.listeners_mut().remove(old.listener);
        }

        let Some(handler) = handler else {
            self.clear_guard();
            return;
        };

        let replay = Arc::clone(&handler);
        let listener = self.document.listeners_mut().add(Box::new(move |n: &Notification| {
            if n.kind == MessageType::ExecOnBeforeUnload {
                replay(&Event::new(BEFORE_UNLOAD));
            }
        }));
        self.guard.registration = Some(Registration { handler, listener });
        self.send_guard();
    }

    /// Sets whether the host should ask before leaving.
    pub fn set_on_before_unload_prevent_navigation(&mut self, prevent: bool) {
        let changed = self.guard.prevent != prevent;
        self.guard.prevent = prevent;

        if !changed {
            trace!(prevent, "prevent flag unchanged");
        } else if self.guard.registration.is_none() {
            trace!(prevent, "prevent flag stored until a handler is set");
        } else {
            self.send_guard();
        }
    }

    fn send_guard(&mut self) {
        let policy = NavigationPolicy::from_flag(self.guard.prevent);
        debug!(?policy, "sending before-unload guard");
        self.queue(OnBeforeUnloadRecord::new(policy));
    }

    fn clear_guard(&mut self) {
        let retracted = self.document.transfer_mut().retract(MutationType::WindowOnBeforeUnload);
        if retracted > 0 {
            self.guard.remote = self.guard.remote_flushed;
        }
        debug!(retracted, remote = self.guard.remote, "before-unload handler cleared");
        if self.guard.remote {
            self.queue(OnBeforeUnloadRecord::Remove);
        }
    }

    fn queue(&mut self, record: OnBeforeUnloadRecord) {
        let transfer = self.document.transfer_mut();
        if !transfer.has_pending(MutationType::WindowOnBeforeUnload) {
            self.guard.remote_flushed = self.guard.remote;
        }
        transfer.transfer(&record.to_words());
        self.guard.remote = record.policy().is_some();
    }
}

impl std::fmt::Debug for BeforeUnloadGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BeforeUnloadGuard")
            .field("listener", &self.registration.as_ref().map(|r| r.listener))
            .field("prevent", &self.prevent)
            .field("remote", &self.remote)
            .finish()
    }
}
