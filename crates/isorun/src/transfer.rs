//! # Mutation Transfer
//!
//! Collects the records produced during one synchronous turn and ships them to
//! the host as a single frame.
//!
//! ## Invariants
//!
//! - **One frame per turn**: Records accumulate in `pending` until `flush`.
//!   Everything appended between two flushes travels together, in append order.
//! - **Strings first**: A frame carries every string interned since the last
//!   frame, so the host can resolve any index the frame's records use.
//! - **Retractable until flushed**: A feature may withdraw its own pending
//!   records (by tag) when a later write in the same turn cancels them.
//! - **Fire-and-forget**: A failed send is reported once and not retried.

use std::sync::Arc;

use tracing::debug;
use tracing::trace;
use wordpack::Encoder;

use xfer::MutationFrame;
use xfer::StringTable;
use xfer::Transport;

use crate::error::Result;

pub struct MutationTransfer {
    strings: StringTable,
    pending: Encoder,
    /// Tag and start offset of every pending record, in append order.
    spans: Vec<(u16, usize)>,
    frames: u64,
    transport: Arc<dyn Transport>,
}

impl MutationTransfer {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            strings: StringTable::new(),
            pending: Encoder::new(),
            spans: Vec::new(),
            frames: 0,
            transport,
        }
    }

    /// Queues one complete record for the next flush.
    pub fn transfer(&mut self, record: &[u16]) {
        let tag = record.first().copied().unwrap_or_default();
        trace!(tag, words = record.len(), "queued record");
        self.spans.push((tag, self.pending.len()));
        self.pending.words(record);
    }

    /// Whether a record with `tag` is waiting for the next flush.
    pub fn has_pending(&self, tag: impl Into<u16>) -> bool {
        let tag = tag.into();
        self.spans.iter().any(|(t, _)| *t == tag)
    }

    /// Drops every pending record with `tag`, keeping the others in order.
    ///
    /// Returns how many records were dropped.
    pub fn retract(&mut self, tag: impl Into<u16>) -> usize {
        let tag = tag.into();
        if !self.has_pending(tag) {
            return 0;
        }

        let words = std::mem::take(&mut self.pending).into_words();
        let spans = std::mem::take(&mut self.spans);
        let mut retracted = 0;
        for (i, &(t, start)) in spans.iter().enumerate() {
            if t == tag {
                retracted += 1;
                continue;
            }
            let end = spans.get(i + 1).map_or(words.len(), |&(_, next)| next);
            self.spans.push((t, self.pending.len()));
            self.pending.words(&words[start..end]);
        }

        trace!(tag, retracted, "retracted pending records");
        retracted
    }

    /// Returns the table index for `value`, interning it if it is new.
    pub fn intern(&mut self, value: &str) -> Result<u16> {
        Ok(self.strings.intern(value)?)
    }

    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// Words queued since the last flush.
    pub fn pending_words(&self) -> &[u16] {
        self.pending.as_words()
    }

    /// Records queued since the last flush.
    pub fn pending_records(&self) -> usize {
        self.spans.len()
    }

    /// Frames shipped so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Ships everything queued this turn as one frame.
    ///
    /// Returns `false` without sending when nothing is pending. The queue is
    /// emptied even if the send fails.
    pub fn flush(&mut self) -> Result<bool> {
        let strings = self.strings.take_unsent();
        if self.pending.is_empty() && strings.is_empty() {
            trace!("nothing to flush");
            return Ok(false);
        }

        let records = std::mem::take(&mut self.spans).len();
        let mutations = std::mem::take(&mut self.pending).into_words();
        let frame = MutationFrame::new(strings, mutations);
        let bytes = frame.to_bytes()?;
        self.transport.send(bytes)?;
        self.frames += 1;

        debug!(
            frame = self.frames,
            records,
            strings = frame.strings.len(),
            "shipped mutation frame"
        );
        Ok(true)
    }
}

impl std::fmt::Debug for MutationTransfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationTransfer")
            .field("pending_records", &self.spans.len())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
