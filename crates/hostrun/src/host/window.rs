//! # In-memory host window
//!
//! A `HostWindow` that keeps its listener slot in memory and lets the embedder
//! fire the navigation-confirmation point by hand. Useful for tests and for
//! embedders without a real windowing system.

use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use crate::host::BeforeUnloadEvent;
use crate::host::HostWindow;
use crate::host::NativeListener;

#[derive(Default)]
pub struct InMemoryWindow {
    on_before_unload: Mutex<Option<NativeListener>>,
    installs: AtomicUsize,
}

impl InMemoryWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a before-unload listener is currently installed.
    pub fn has_listener(&self) -> bool {
        self.slot().is_some()
    }

    /// How many times a listener was installed, replacements included.
    pub fn installs(&self) -> usize {
        self.installs.load(Ordering::Relaxed)
    }

    /// Fires the navigation-confirmation point and returns the event after
    /// every listener ran.
    pub fn fire_before_unload(&self) -> BeforeUnloadEvent {
        let mut event = BeforeUnloadEvent::new();
        // Run outside the lock: a listener may reinstall itself.
        let listener = self.slot().clone();
        if let Some(listener) = listener {
            listener(&mut event);
        }
        event
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<NativeListener>> {
        self.on_before_unload.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostWindow for InMemoryWindow {
    fn set_on_before_unload(&self, listener: Option<NativeListener>) {
        if listener.is_some() {
            self.installs.fetch_add(1, Ordering::Relaxed);
        }
        *self.slot() = listener;
    }
}
