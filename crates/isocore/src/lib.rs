//! # isocore
//!
//! Runs untrusted page logic in an isolated context while the host keeps the
//! real objects. The two sides share no memory; they talk over one ordered
//! channel.
//!
//! - [`isorun`]: the isolated side, where user code queues mutations
//! - [`hostrun`]: the host side, which gates and applies them
//! - [`xfer`]: the protocol both sides speak
//! - [`wordpack`]: the 16-bit word codec underneath
//!
//! ## Wiring
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use isocore::hostrun::HostBuilder;
//! use isocore::hostrun::host::InMemoryWindow;
//! use isocore::isorun::Event;
//! use isocore::isorun::Worker;
//! use isocore::xfer::ChannelTransport;
//! use isocore::xfer::MutationType;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (iso_end, host_end) = ChannelTransport::pair();
//! let window = Arc::new(InMemoryWindow::new());
//!
//! let host = HostBuilder::new(Arc::new(host_end), window.clone())
//!     .allow(MutationType::WindowOnBeforeUnload)
//!     .build()?;
//! let mut worker = Worker::new(Arc::new(iso_end));
//!
//! worker.turn(|w| {
//!     w.set_on_before_unload_prevent_navigation(true);
//!     w.set_on_before_unload(Some(Arc::new(|_: &Event| {})));
//! })?;
//!
//! host.spawn();
//! worker.spawn();
//! # Ok(())
//! # }
//! ```

pub use hostrun;
pub use isorun;
pub use wordpack;
pub use xfer;
