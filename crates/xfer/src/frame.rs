//! # Protocol Frames
//!
//! Defines the envelope of one transport message in either direction.
//!
//! ## Wire Format
//! - `[kind: 1][string count: u32][strings..][mutations: block]` isolated -> host
//! - `[kind: 2][message type]` host -> isolated
//!
//! Frames are word streams serialized as little-endian bytes.
//!
//! ## Invariants
//! - **Panic Safety**: All decoding paths return `Result`, never panicking on unknown data.
//! - **Exactness**: A frame must consume every word of its message.

use wordpack::Decoder;
use wordpack::Encoder;

use crate::error::Error;
use crate::error::Result;

const FRAME_MUTATIONS: u16 = 1;
const FRAME_NOTIFICATION: u16 = 2;

/// Notification kinds the host can post back to the isolated context.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    /// The host's navigation-confirmation point fired; replay the guard callback.
    ExecOnBeforeUnload = 1,
}

impl MessageType {
    pub const fn from_u16(w: u16) -> Option<Self> {
        match w {
            1 => Some(Self::ExecOnBeforeUnload),
            _ => None,
        }
    }
}

/// A batch of mutation records plus the string table tail they may reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationFrame {
    pub strings: Vec<String>,
    pub mutations: Vec<u16>,
}

impl MutationFrame {
    pub fn new(strings: Vec<String>, mutations: Vec<u16>) -> Self {
        Self { strings, mutations }
    }

    pub fn encode(&self, enc: &mut Encoder) -> Result<()> {
        enc.word(FRAME_MUTATIONS);
        enc.u32(self.strings.len() as u32);
        for s in &self.strings {
            enc.str(s)?;
        }
        enc.block(&self.mutations)?;
        Ok(())
    }

    fn decode_body(dec: &mut Decoder) -> Result<Self> {
        let count = dec.u32()? as usize;
        // Each string costs at least its two header words.
        let mut strings = Vec::with_capacity(count.min(dec.remaining() / 2));
        for _ in 0..count {
            strings.push(dec.str()?);
        }
        let mutations = dec.block()?.to_vec();
        Ok(Self { strings, mutations })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut enc = Encoder::with_capacity(self.mutations.len() + 8);
        self.encode(&mut enc)?;
        Ok(enc.into_bytes())
    }
}

/// A backchannel message. Carries no payload beyond its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: MessageType,
}

impl Notification {
    pub fn new(kind: MessageType) -> Self {
        Self { kind }
    }

    pub fn encode(&self, enc: &mut Encoder) {
        enc.word(FRAME_NOTIFICATION);
        enc.word(self.kind as u16);
    }

    fn decode_body(dec: &mut Decoder) -> Result<Self> {
        let raw = dec.word()?;
        let kind = MessageType::from_u16(raw).ok_or(Error::UnknownMessage(raw))?;
        Ok(Self { kind })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut enc = Encoder::with_capacity(2);
        self.encode(&mut enc);
        enc.into_bytes()
    }
}

/// Any frame, as seen by a decoder that does not know the direction yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Mutations(MutationFrame),
    Notification(Notification),
}

impl Frame {
    /// Decodes exactly one frame from a transport message.
    pub fn decode_bytes(bytes: &[u8]) -> Result<Self> {
        let words = wordpack::words_from_bytes(bytes)?;
        Self::decode_words(&words)
    }

    pub fn decode_words(words: &[u16]) -> Result<Self> {
        let mut dec = Decoder::new(words);
        let frame = match dec.word()? {
            FRAME_MUTATIONS => Frame::Mutations(MutationFrame::decode_body(&mut dec)?),
            FRAME_NOTIFICATION => Frame::Notification(Notification::decode_body(&mut dec)?),
            other => return Err(Error::UnknownFrame(other)),
        };
        if !dec.is_empty() {
            return Err(Error::TrailingWords(dec.remaining()));
        }
        Ok(frame)
    }
}
