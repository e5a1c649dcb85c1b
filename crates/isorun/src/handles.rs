//! Type-safe handles for isolated-side resources.

/// Handle to a listener registered with `GlobalListeners`.
///
/// Ids are never reused, so a stale handle can only ever miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);
