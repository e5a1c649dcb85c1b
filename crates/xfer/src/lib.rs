//! # Xfer
//!
//! The mutation transfer protocol shared by the isolated context and the host.
//!
//! ## Architecture
//!
//! The isolated side encodes state changes as fixed-layout records in a word
//! buffer (`mutation`), references strings by index (`strings`), and ships both
//! inside one `MutationFrame` per turn (`frame`) over a `Transport`. The host
//! answers with payload-free `Notification` frames on the same channel.

pub mod channel;
pub mod error;
pub mod frame;
pub mod mutation;
pub mod strings;
pub mod transport;

pub use channel::ChannelTransport;
pub use error::Error;
pub use error::Result;
pub use frame::Frame;
pub use frame::MessageType;
pub use frame::MutationFrame;
pub use frame::Notification;
pub use mutation::MutationType;
pub use mutation::NavigationPolicy;
pub use mutation::OnBeforeUnloadIndex;
pub use mutation::OnBeforeUnloadRecord;
pub use mutation::record_slice;
pub use strings::StringTable;
pub use transport::Transport;
pub use transport::TransportError;
