//! # Command Executor Registry
//!
//! Maps mutation tags to executors and walks a mutation buffer record by record.
//!
//! ## Invariants
//!
//! - **Framing first**: The cursor always advances by the tag's record length,
//!   whether the gate permits the effect or not. A denied record is invisible
//!   to the isolated side and harmless to every record after it.
//! - **Fatal framing errors**: An unknown tag or a short record aborts the walk.
//!   The tag set is a contract agreed out of band, not something to guess at.

use std::collections::HashMap;

use tracing::debug;
use tracing::trace;

use xfer::StringTable;

use crate::error::Error;
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::executor::Descriptor;
use crate::executor::ExecutorContext;

/// Outcome counters for one walk over a mutation buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Records whose effect was permitted.
    pub executed: usize,
    /// Records stepped over because the gate denied them.
    pub suppressed: usize,
}

impl DispatchStats {
    pub fn records(&self) -> usize {
        self.executed + self.suppressed
    }
}

pub struct Registry {
    ctx: ExecutorContext,
    executors: HashMap<u16, Box<dyn CommandExecutor>>,
}

impl Registry {
    pub fn new(ctx: ExecutorContext) -> Self {
        Self {
            ctx,
            executors: HashMap::new(),
        }
    }

    /// Builds an executor for `tag` from this registry's context.
    ///
    /// # Errors
    /// `Error::DuplicateExecutor` if `tag` already has one, `Error::EmptyRecord`
    /// if the executor's records would not even hold their tag.
    pub fn register<F>(&mut self, tag: impl Into<u16>, factory: F) -> Result<()>
    where
        F: FnOnce(&ExecutorContext) -> Box<dyn CommandExecutor>,
    {
        let tag = tag.into();
        if self.executors.contains_key(&tag) {
            return Err(Error::DuplicateExecutor(tag));
        }
        let executor = factory(&self.ctx);
        if executor.record_len() == 0 {
            return Err(Error::EmptyRecord(tag));
        }
        self.executors.insert(tag, executor);
        Ok(())
    }

    pub fn is_registered(&self, tag: impl Into<u16>) -> bool {
        self.executors.contains_key(&tag.into())
    }

    /// Resolves the executor for the record at `offset` and checks that the
    /// whole record is present.
    fn lookup(&self, words: &[u16], offset: usize) -> Result<(u16, &dyn CommandExecutor)> {
        let tag = xfer::record_slice(words, offset, 1)?[0];
        let executor = self
            .executors
            .get(&tag)
            .ok_or(Error::UnknownTag { tag, offset })?;
        xfer::record_slice(words, offset, executor.record_len())?;
        Ok((tag, executor.as_ref()))
    }

    fn step(&self, words: &[u16], offset: usize, strings: &StringTable) -> Result<(usize, bool)> {
        let (tag, executor) = self.lookup(words, offset)?;
        let allowed = self.ctx.config.allows(tag);

        if allowed {
            debug!(tag, offset, "executing record");
        } else {
            trace!(tag, offset, "record denied by executor config");
        }

        let next = executor.execute(words, offset, strings, allowed)?;
        let expected = offset + executor.record_len();
        if next != expected {
            return Err(Error::CursorMismatch { tag, offset, expected, returned: next });
        }
        Ok((next, allowed))
    }

    /// Applies the record at `offset` and returns the offset of the next one.
    pub fn dispatch(&self, words: &[u16], offset: usize, strings: &StringTable) -> Result<usize> {
        self.step(words, offset, strings).map(|(next, _)| next)
    }

    /// Applies every record in `words`, front to back.
    pub fn dispatch_all(&self, words: &[u16], strings: &StringTable) -> Result<DispatchStats> {
        let mut stats = DispatchStats::default();
        let mut offset = 0;
        while offset < words.len() {
            let (next, allowed) = self.step(words, offset, strings)?;
            if allowed {
                stats.executed += 1;
            } else {
                stats.suppressed += 1;
            }
            offset = next;
        }
        Ok(stats)
    }

    /// Describes the record at `offset` without applying it.
    pub fn print(&self, words: &[u16], offset: usize, strings: &StringTable) -> Result<Descriptor> {
        let (_, executor) = self.lookup(words, offset)?;
        Ok(executor.print(words, offset, strings)?)
    }
}
