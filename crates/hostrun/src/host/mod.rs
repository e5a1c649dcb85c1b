//! # Host objects
//!
//! The privileged object layer executors act upon. The host's own event system
//! owns native listeners; executors only ever install or clear them.

pub mod window;

pub use window::InMemoryWindow;

use std::sync::Arc;

/// A listener registered with the host's navigation-confirmation point.
pub type NativeListener = Arc<dyn Fn(&mut BeforeUnloadEvent) + Send + Sync>;

/// The host window primitives the navigation guard needs.
pub trait HostWindow: Send + Sync + 'static {
    /// Replaces the window's before-unload listener. `None` clears it.
    fn set_on_before_unload(&self, listener: Option<NativeListener>);
}

/// The host-native event raised when the page is about to be left.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeforeUnloadEvent {
    default_prevented: bool,
    confirmation_requested: bool,
}

impl BeforeUnloadEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// The host's navigation-suppression primitive.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Sets whatever value the platform needs to show its confirmation prompt.
    pub fn request_confirmation(&mut self) {
        self.confirmation_requested = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn confirmation_requested(&self) -> bool {
        self.confirmation_requested
    }
}
