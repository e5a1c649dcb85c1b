//! Built-in executors, one module per mutation tag.

pub mod on_before_unload;

pub use on_before_unload::OnBeforeUnloadExecutor;
