//! # Executor Configuration
//!
//! The permission gate: which mutation tags may take effect on host objects.
//!
//! The allow-list is fixed once the host is built. It only decides whether an
//! executor's effect runs; the dispatcher steps over a denied record exactly as
//! it steps over a permitted one.

use std::collections::BTreeSet;

/// Allow-list of mutation tags, supplied once at host setup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutorConfig {
    executors_allowed: BTreeSet<u16>,
}

impl ExecutorConfig {
    /// An allow-list that denies everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an allow-list from tags.
    pub fn from_tags<T: Into<u16>>(tags: impl IntoIterator<Item = T>) -> Self {
        Self {
            executors_allowed: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Adds a tag to the allow-list.
    pub fn allow(mut self, tag: impl Into<u16>) -> Self {
        self.executors_allowed.insert(tag.into());
        self
    }

    pub fn allows(&self, tag: impl Into<u16>) -> bool {
        self.executors_allowed.contains(&tag.into())
    }

    /// Allowed tags in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = u16> + '_ {
        self.executors_allowed.iter().copied()
    }
}
