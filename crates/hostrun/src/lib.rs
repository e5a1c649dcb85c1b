//! # Hostrun
//!
//! The privileged side of the mutation transfer protocol: a permission-gated
//! dispatcher that replays records from an isolated context against host
//! objects, and the backchannel that reports host events back.

pub mod backchannel;
pub mod builder;
pub mod commands;
pub mod config;
pub mod error;
pub mod executor;
pub mod host;
pub mod registry;
pub mod runtime;

pub use backchannel::Backchannel;
pub use builder::HostBuilder;
pub use config::ExecutorConfig;
pub use error::Error;
pub use error::Result;
pub use executor::CommandExecutor;
pub use executor::Descriptor;
pub use executor::ExecutorContext;
pub use executor::Field;
pub use registry::DispatchStats;
pub use registry::Registry;
pub use runtime::Host;
