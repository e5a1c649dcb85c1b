//! Events handed to isolated-side callbacks.
//!
//! A replayed event is inert. The host already decided what to do from the
//! transported state before the notification was even posted, so nothing a
//! callback does to the event travels back.

/// Event type name for the navigation guard.
pub const BEFORE_UNLOAD: &str = "beforeunload";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: &'static str,
}

impl Event {
    pub fn new(kind: &'static str) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &str {
        self.kind
    }

    pub fn bubbles(&self) -> bool {
        false
    }

    pub fn cancelable(&self) -> bool {
        false
    }

    /// No effect: the event is not cancelable.
    pub fn prevent_default(&self) {}

    pub fn default_prevented(&self) -> bool {
        false
    }
}
