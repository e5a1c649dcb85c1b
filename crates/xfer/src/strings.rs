//! # String Table
//!
//! Append-only interning table shared across the context boundary.
//!
//! The isolated side interns values and ships the new tail of the table with
//! every frame. The host appends those tails in order, so an index means the
//! same string on both sides for the lifetime of the channel.
//!
//! ## Invariants
//! - Indices are dense, start at 0 and are never reassigned.
//! - A host lookup for an index it has not received yet is `None`, not an error.

use std::collections::HashMap;

use crate::error::Error;
use crate::error::Result;

#[derive(Debug, Default, Clone)]
pub struct StringTable {
    values: Vec<String>,
    lookup: HashMap<String, u16>,
    /// Entries below this index have already been handed out by `take_unsent`.
    sent: usize,
}

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index for `value`, assigning the next free one if needed.
    ///
    /// # Errors
    /// Returns `Error::StringTableFull` once every 16-bit index is taken.
    pub fn intern(&mut self, value: &str) -> Result<u16> {
        if let Some(&idx) = self.lookup.get(value) {
            return Ok(idx);
        }
        let idx = u16::try_from(self.values.len()).map_err(|_| Error::StringTableFull)?;
        self.values.push(value.to_string());
        self.lookup.insert(value.to_string(), idx);
        Ok(idx)
    }

    pub fn has(&self, idx: u16) -> bool {
        (idx as usize) < self.values.len()
    }

    pub fn get(&self, idx: u16) -> Option<&str> {
        self.values.get(idx as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Strings interned since the previous call, in index order.
    pub fn take_unsent(&mut self) -> Vec<String> {
        let fresh = self.values[self.sent..].to_vec();
        self.sent = self.values.len();
        fresh
    }

    /// Appends a snapshot received from the other side.
    ///
    /// # Errors
    /// Returns `Error::StringTableFull` if the snapshot would overflow the index space.
    /// Nothing is appended in that case.
    pub fn extend(&mut self, snapshot: Vec<String>) -> Result<()> {
        if self.values.len() + snapshot.len() > u16::MAX as usize + 1 {
            return Err(Error::StringTableFull);
        }
        for value in snapshot {
            let idx = self.values.len() as u16;
            self.lookup.entry(value.clone()).or_insert(idx);
            self.values.push(value);
        }
        self.sent = self.values.len();
        Ok(())
    }
}
