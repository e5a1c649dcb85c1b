//! # isorun
//!
//! The isolated side of the mutation transfer protocol.
//!
//! ## Architecture
//!
//! User code runs inside a `Worker` and touches plain objects such as the
//! `Window`. Setters that need a host effect queue fixed-layout records on the
//! `MutationTransfer`; the worker flushes them as one frame at the end of each
//! turn. The host answers through notifications, which replay callbacks that
//! were registered locally. No code or callable ever crosses the boundary.
//!
//! ## Core Concepts
//!
//! - **Worker**: Turn loop and notification pump
//! - **Window**: Feature state machines, currently the navigation guard
//! - **Document**: Owns the outbound transfer and the inbound listeners
//! - **MutationTransfer**: Per-turn record batching and string interning

pub mod document;
pub mod error;
pub mod event;
pub mod handles;
pub mod listeners;
pub mod transfer;
pub mod window;
pub mod worker;

pub use document::Document;
pub use error::Error;
pub use error::Result;
pub use event::Event;
pub use handles::ListenerId;
pub use listeners::GlobalListeners;
pub use listeners::Listener;
pub use transfer::MutationTransfer;
pub use window::BeforeUnloadState;
pub use window::Handler;
pub use window::Window;
pub use worker::Worker;

#[cfg(test)]
mod tests;
