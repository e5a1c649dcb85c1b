//! # Host Builder
//!
//! Provides a fluent API for assembling a `Host`: its channel, its window, the
//! executor allow-list and any executors beyond the built-in ones.

use std::sync::Arc;

use xfer::MutationType;
use xfer::Transport;

use crate::backchannel::Backchannel;
use crate::commands::OnBeforeUnloadExecutor;
use crate::config::ExecutorConfig;
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::executor::ExecutorContext;
use crate::executor::ExecutorFactory;
use crate::host::HostWindow;
use crate::registry::Registry;
use crate::runtime::Host;

pub struct HostBuilder {
    transport: Arc<dyn Transport>,
    window: Arc<dyn HostWindow>,
    config: ExecutorConfig,
    executors: Vec<(u16, ExecutorFactory)>,
}

impl HostBuilder {
    pub fn new(transport: Arc<dyn Transport>, window: Arc<dyn HostWindow>) -> Self {
        Self {
            transport,
            window,
            config: ExecutorConfig::new(),
            executors: Vec::new(),
        }
    }

    /// Permits records with `tag` to take effect.
    pub fn allow(mut self, tag: impl Into<u16>) -> Self {
        self.config = self.config.allow(tag);
        self
    }

    /// Replaces the allow-list wholesale.
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers an extra executor.
    pub fn register<F>(mut self, tag: impl Into<u16>, factory: F) -> Self
    where
        F: FnOnce(&ExecutorContext) -> Box<dyn CommandExecutor> + Send + 'static,
    {
        self.executors.push((tag.into(), Box::new(factory)));
        self
    }

    /// Freezes the configuration and builds every executor.
    ///
    /// # Errors
    /// `Error::DuplicateExecutor` if two executors claim one tag.
    pub fn build(self) -> Result<Host> {
        let ctx = ExecutorContext {
            window: self.window,
            backchannel: Backchannel::new(Arc::clone(&self.transport)),
            config: Arc::new(self.config),
        };

        let mut registry = Registry::new(ctx);
        registry.register(MutationType::WindowOnBeforeUnload, |ctx| {
            Box::new(OnBeforeUnloadExecutor::new(ctx))
        })?;
        for (tag, factory) in self.executors {
            registry.register(tag, factory)?;
        }

        Ok(Host::new(registry, self.transport))
    }
}
