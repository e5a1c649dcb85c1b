//! # Wordpack
//!
//! A small, bounded codec for streams of unsigned 16-bit words.
//!
//! ## Philosophy
//!
//! - **Words, not bytes**: Every field is a `u16`. Wider values span several words,
//!   strings travel as UTF-16 code units. Fixed layouts can be addressed by word offset.
//! - **Bounded**: Decoders are zero-copy, bounds-checked views. A short buffer is an
//!   error, never a panic.
//! - **Schema-agnostic**: Wordpack knows nothing about records or frames. Layouts live
//!   in the protocol crates built on top of it.
//!
//! ## Format
//!
//! - **Word**: `[w]`
//! - **U32**: `[lo][hi]`
//! - **String**: `[len: u32][UTF-16 units: len]`
//! - **Block**: `[len: u32][words: len]`
//!
//! On the byte level each word is stored Little-Endian.


/// Wordpack encoding and decoding errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer ended before a read could complete.
    UnexpectedEnd { needed: usize, remaining: usize },
    /// A byte buffer cannot be split into whole words.
    OddByteLength(usize),
    /// String data is not valid UTF-16.
    InvalidUtf16,
    /// String or block length exceeds `u32::MAX`.
    BlobTooLarge(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnexpectedEnd { needed, remaining } => {
                write!(f, "Unexpected end of words: needed {}, {} remaining", needed, remaining)
            }
            Error::OddByteLength(len) => write!(f, "Byte length {} is not a whole number of words", len),
            Error::InvalidUtf16 => write!(f, "String is not valid UTF-16"),
            Error::BlobTooLarge(len) => write!(f, "Blob of {} units exceeds u32::MAX", len),
        }
    }
}

impl std::error::Error for Error {}

/// Specialized `Result` for Wordpack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Converts a little-endian byte buffer into words.
///
/// # Errors
/// Returns `Error::OddByteLength` if `bytes` has an odd length.
pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return Err(Error::OddByteLength(bytes.len()));
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect())
}

/// Converts words into a little-endian byte buffer.
pub fn words_to_bytes(words: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * 2);
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
    out
}

/// A growable, append-only word encoder.
///
/// Writes never fail except for blobs whose length header would overflow.
/// The encoder has no scopes: callers own the layout of what they append.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoder {
    buf: Vec<u16>,
}

impl Encoder {
    /// Creates a new, empty encoder.
    pub fn new() -> Self {
        Self { buf: Vec::with_capacity(64) }
    }

    /// Creates an encoder with room for `words` words.
    pub fn with_capacity(words: usize) -> Self {
        Self { buf: Vec::with_capacity(words) }
    }

    /// Number of words written so far. This is also the offset of the next write.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns a view of the words written so far.
    pub fn as_words(&self) -> &[u16] {
        &self.buf
    }

    /// Consumes the encoder and returns the words.
    pub fn into_words(self) -> Vec<u16> {
        self.buf
    }

    /// Consumes the encoder and returns the little-endian bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        words_to_bytes(&self.buf)
    }

    /// Drops everything written, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Appends one word.
    pub fn word(&mut self, v: u16) {
        self.buf.push(v);
    }

    /// Appends raw words without a length header.
    pub fn words(&mut self, v: &[u16]) {
        self.buf.extend_from_slice(v);
    }

    /// Appends a u32 as two words, low word first.
    pub fn u32(&mut self, v: u32) {
        self.buf.push(v as u16);
        self.buf.push((v >> 16) as u16);
    }

    /// Appends a string as a u32 unit count followed by its UTF-16 code units.
    pub fn str(&mut self, v: &str) -> Result<()> {
        let start = self.buf.len();
        self.u32(0); // Length placeholder
        self.buf.extend(v.encode_utf16());
        let units = self.buf.len() - start - 2;
        if units > u32::MAX as usize {
            self.buf.truncate(start);
            return Err(Error::BlobTooLarge(units));
        }
        let len = units as u32;
        self.buf[start] = len as u16;
        self.buf[start + 1] = (len >> 16) as u16;
        Ok(())
    }

    /// Appends a u32 word count followed by the words.
    pub fn block(&mut self, v: &[u16]) -> Result<()> {
        if v.len() > u32::MAX as usize {
            return Err(Error::BlobTooLarge(v.len()));
        }
        self.u32(v.len() as u32);
        self.buf.extend_from_slice(v);
        Ok(())
    }
}

/// A zero-copy, bounds-checked cursor over a word slice.
///
/// Reading advances the cursor. `pos()` always reports the offset of the next
/// unread word relative to the start of the slice.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    words: &'a [u16],
    pos: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder positioned at the first word.
    pub fn new(words: &'a [u16]) -> Self {
        Self { words, pos: 0 }
    }

    /// Creates a decoder positioned at `pos`.
    ///
    /// # Errors
    /// Returns `Error::UnexpectedEnd` if `pos` lies past the end of the slice.
    pub fn at(words: &'a [u16], pos: usize) -> Result<Self> {
        if pos > words.len() {
            return Err(Error::UnexpectedEnd { needed: pos, remaining: words.len() });
        }
        Ok(Self { words, pos })
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.words.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    fn need(&self, n: usize) -> Result<()> {
        let remaining = self.remaining();
        if n > remaining {
            Err(Error::UnexpectedEnd { needed: n, remaining })
        } else {
            Ok(())
        }
    }

    /// Reads the next word without advancing.
    pub fn peek(&self) -> Result<u16> {
        self.need(1)?;
        Ok(self.words[self.pos])
    }

    /// Reads one word.
    pub fn word(&mut self) -> Result<u16> {
        let w = self.peek()?;
        self.pos += 1;
        Ok(w)
    }

    /// Reads a u32 stored low word first.
    pub fn u32(&mut self) -> Result<u32> {
        self.need(2)?;
        let lo = self.words[self.pos] as u32;
        let hi = self.words[self.pos + 1] as u32;
        self.pos += 2;
        Ok(lo | (hi << 16))
    }

    /// Advances past `n` words.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.need(n)?;
        self.pos += n;
        Ok(())
    }

    fn read_words(&mut self, n: usize) -> Result<&'a [u16]> {
        self.need(n)?;
        let slice = &self.words[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads a length-prefixed UTF-16 string.
    ///
    /// The cursor does not move if the header or body is short.
    pub fn str(&mut self) -> Result<String> {
        let start = self.pos;
        let len = self.u32()? as usize;
        let units = match self.read_words(len) {
            Ok(units) => units,
            Err(e) => {
                self.pos = start;
                return Err(e);
            }
        };
        String::from_utf16(units).map_err(|_| Error::InvalidUtf16)
    }

    /// Reads a length-prefixed block of words.
    pub fn block(&mut self) -> Result<&'a [u16]> {
        let start = self.pos;
        let len = self.u32()? as usize;
        match self.read_words(len) {
            Ok(words) => Ok(words),
            Err(e) => {
                self.pos = start;
                Err(e)
            }
        }
    }
}
