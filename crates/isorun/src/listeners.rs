//! # Global Listeners
//!
//! Internal subscribers for backchannel notifications. This is the isolated
//! side's half of the event backchannel: host listeners post a message type,
//! and whatever was registered here for that type runs.

use xfer::Notification;

use crate::handles::ListenerId;

/// A subscriber for host notifications.
pub type Listener = Box<dyn FnMut(&Notification) + Send>;

#[derive(Default)]
pub struct GlobalListeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl GlobalListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hands `notification` to every listener in registration order and
    /// returns how many ran.
    pub fn dispatch(&mut self, notification: &Notification) -> usize {
        for (_, listener) in self.entries.iter_mut() {
            listener(notification);
        }
        self.entries.len()
    }
}

impl std::fmt::Debug for GlobalListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ids: Vec<_> = self.entries.iter().map(|(id, _)| id.0).collect();
        f.debug_struct("GlobalListeners").field("ids", &ids).finish()
    }
}
