//! # Mutation Records
//!
//! The catalogue of record tags and their fixed word layouts.
//!
//! A record is `[tag][field_0]..[field_n]`. Its length is a constant of the tag,
//! so a decoder can always step from one record to the next without looking at
//! the payload. Encoder and decoder share the `*Index` constants below.

use wordpack::Encoder;

use crate::error::Error;
use crate::error::Result;

/// Record tags known to this protocol.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationType {
    /// Install the "confirm before leaving" guard with a navigation policy.
    WindowOnBeforeUnload = 0x0F,
}

impl MutationType {
    pub const fn from_u16(w: u16) -> Option<Self> {
        match w {
            0x0F => Some(Self::WindowOnBeforeUnload),
            _ => None,
        }
    }

    /// Diagnostic name of the tag.
    pub const fn name(self) -> &'static str {
        match self {
            Self::WindowOnBeforeUnload => "WINDOW_ON_BEFORE_UNLOAD",
        }
    }

    /// Number of words in a record carrying this tag, tag included.
    pub const fn record_len(self) -> usize {
        match self {
            Self::WindowOnBeforeUnload => OnBeforeUnloadIndex::END,
        }
    }
}

impl From<MutationType> for u16 {
    fn from(t: MutationType) -> u16 { t as u16 }
}

/// Word offsets inside a `WindowOnBeforeUnload` record.
pub struct OnBeforeUnloadIndex;

impl OnBeforeUnloadIndex {
    pub const TYPE: usize = 0;
    pub const POLICY: usize = 1;
    pub const END: usize = 2;
}

/// Whether the host should ask the user before leaving.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationPolicy {
    #[default]
    Allow = 0,
    Prevent = 1,
}

impl NavigationPolicy {
    /// Any word other than `Prevent` reads as `Allow`, so an unrecognised
    /// policy never blocks navigation. Record decoding claims
    /// `OnBeforeUnloadRecord::REMOVE_WORD` before it gets here.
    pub const fn from_word(w: u16) -> Self {
        match w {
            1 => Self::Prevent,
            _ => Self::Allow,
        }
    }

    pub const fn from_flag(prevent: bool) -> Self {
        if prevent { Self::Prevent } else { Self::Allow }
    }

    pub const fn prevents(self) -> bool {
        matches!(self, Self::Prevent)
    }
}

/// A decoded `WindowOnBeforeUnload` record.
///
/// The policy slot doubles as the removal marker: `REMOVE_WORD` clears the
/// host listener, any other word installs one with that policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnBeforeUnloadRecord {
    Install(NavigationPolicy),
    Remove,
}

impl OnBeforeUnloadRecord {
    /// Policy-slot word that marks a removal.
    pub const REMOVE_WORD: u16 = 2;

    pub fn new(policy: NavigationPolicy) -> Self {
        Self::Install(policy)
    }

    /// The installed policy, `None` for a removal.
    pub fn policy(&self) -> Option<NavigationPolicy> {
        match self {
            Self::Install(policy) => Some(*policy),
            Self::Remove => None,
        }
    }

    fn policy_word(&self) -> u16 {
        match self {
            Self::Install(policy) => *policy as u16,
            Self::Remove => Self::REMOVE_WORD,
        }
    }

    /// Appends this record; returns the offset it was written at.
    pub fn encode(&self, enc: &mut Encoder) -> usize {
        let start = enc.len();
        enc.words(&self.to_words());
        start
    }

    /// The record as a standalone word array.
    pub fn to_words(&self) -> [u16; OnBeforeUnloadIndex::END] {
        [MutationType::WindowOnBeforeUnload as u16, self.policy_word()]
    }

    /// Decodes the record starting at `start`.
    ///
    /// # Errors
    /// `TruncatedRecord` if fewer than `END` words remain, `UnknownMutation`
    /// if the word at `start` is not this record's tag.
    pub fn decode(words: &[u16], start: usize) -> Result<Self> {
        let fields = record_slice(words, start, OnBeforeUnloadIndex::END)?;
        let tag = fields[OnBeforeUnloadIndex::TYPE];
        if tag != MutationType::WindowOnBeforeUnload as u16 {
            return Err(Error::UnknownMutation(tag));
        }
        Ok(match fields[OnBeforeUnloadIndex::POLICY] {
            Self::REMOVE_WORD => Self::Remove,
            word => Self::Install(NavigationPolicy::from_word(word)),
        })
    }
}

/// Borrows the `len` words of the record at `start`, or reports truncation.
pub fn record_slice(words: &[u16], start: usize, len: usize) -> Result<&[u16]> {
    let available = words.len().saturating_sub(start);
    if len > available || start > words.len() {
        let tag = words.get(start).copied().unwrap_or_default();
        return Err(Error::TruncatedRecord { tag, start, needed: len, available });
    }
    Ok(&words[start..start + len])
}
