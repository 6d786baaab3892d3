//! The buffer chain (§4.B): an append-only sequence of byte windows over
//! input that may arrive in pieces.
//!
//! A caller that doesn't have the whole input up front (a socket, a pipe,
//! a file read in chunks) appends one [`Buffer`] per chunk and keeps
//! retrying a lex attempt whenever the engine reports
//! [`ErrorCode::More`](utf8lex_util::ErrorCode::More). The chain never
//! rewrites or removes a buffer once appended — only the terminal one may
//! carry `is_eof`.
//!
//! Grounded on `faxc_lex::Cursor`'s "plain byte slice, no reallocation"
//! approach to source text, generalized to a sequence of such slices.

use unicode_segmentation::UnicodeSegmentation;
use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use crate::category::is_line_break_codepoint;
use crate::unit::Location;

/// The maximum number of buffers a chain may hold at once. Exists so a
/// misbehaving caller that never lets the engine catch up can't grow the
/// chain without bound.
pub const MAX_BUFFER_CHAIN_DEPTH: usize = 256;

/// An immutable window of bytes. Named to avoid colliding with
/// `std::string::String`; need not be valid UTF-8 on its own if a multi-byte
/// sequence straddles this buffer and the next.
#[derive(Debug, Clone)]
pub struct ByteString {
    bytes: std::sync::Arc<[u8]>,
}

impl ByteString {
    pub fn from_str(s: &str) -> Self {
        Self { bytes: std::sync::Arc::from(s.as_bytes()) }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: std::sync::Arc::from(bytes) }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Totals contributed by one fully-available buffer's content, computed
/// once at append time and never revised.
#[derive(Debug, Clone, Copy, Default)]
struct UnitTotals {
    chars: u64,
    graphemes: u64,
    lines: u64,
}

fn measure(s: &str) -> UnitTotals {
    let mut totals = UnitTotals::default();
    totals.chars = s.chars().count() as u64;
    for grapheme in s.graphemes(true) {
        totals.graphemes += 1;
        if grapheme.chars().any(is_line_break_codepoint) {
            totals.lines += 1;
        }
    }
    totals
}

/// One link in the chain: a byte window plus the cumulative [`Location`]
/// of its first byte within the whole stream.
pub struct Buffer {
    pub string: ByteString,
    pub location: Location,
    pub is_eof: bool,
}

impl Buffer {
    pub fn len(&self) -> usize {
        self.string.len()
    }
}

/// The append-only chain of [`Buffer`]s backing a lex [`State`](crate::state::State).
#[derive(Default)]
pub struct BufferChain {
    buffers: Vec<Buffer>,
    running: Location,
    /// Trailing bytes of the most recently appended buffer that form an
    /// incomplete UTF-8 sequence on their own, held back from `measure`
    /// until the next buffer's leading bytes complete them.
    pending: Vec<u8>,
    /// Index hint for `locate_byte`: lexing reads forward, so the buffer
    /// containing the previous lookup is almost always the next answer.
    last_located: std::cell::Cell<usize>,
}

impl BufferChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn has_eof(&self) -> bool {
        self.buffers.last().is_some_and(|b| b.is_eof)
    }

    /// Total bytes ever appended to this chain.
    pub fn total_bytes(&self) -> u64 {
        self.running.byte.start
    }

    /// Append one chunk of input. `is_eof` marks this as the final chunk;
    /// no further buffer may be appended afterwards.
    pub fn append(&mut self, string: ByteString, is_eof: bool) -> Result<()> {
        if self.has_eof() {
            return Err(Utf8LexError::new(
                ErrorCode::ChainInsert,
                "cannot append to a buffer chain after its EOF buffer",
            ));
        }
        if self.buffers.len() >= MAX_BUFFER_CHAIN_DEPTH {
            return Err(Utf8LexError::new(
                ErrorCode::ChainInsert,
                format!("buffer chain already holds the maximum of {MAX_BUFFER_CHAIN_DEPTH} buffers"),
            ));
        }

        let location = self.running;

        // A multi-byte sequence may straddle this buffer and the last one;
        // measure against the completed prefix, not each buffer in
        // isolation, and hold back any new incomplete trailing sequence.
        let mut combined = std::mem::take(&mut self.pending);
        combined.extend_from_slice(string.as_bytes());
        let (valid_len, rest) = match std::str::from_utf8(&combined) {
            Ok(_) => (combined.len(), &[][..]),
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                (valid_up_to, &combined[valid_up_to..])
            }
        };
        if is_eof && !rest.is_empty() {
            return Err(Utf8LexError::new(ErrorCode::BadUtf8, "incomplete UTF-8 sequence at end of input"));
        }
        let valid = std::str::from_utf8(&combined[..valid_len]).expect("validated above");
        let totals = measure(valid);
        self.pending = rest.to_vec();

        self.running.byte.start += string.len() as u64;
        self.running.char.start += totals.chars;
        self.running.grapheme.start += totals.graphemes;
        self.running.line.start += totals.lines;

        self.buffers.push(Buffer { string, location, is_eof });
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Buffer> {
        self.buffers.get(index)
    }

    /// Find the buffer containing absolute byte offset `offset`, and the
    /// offset into that buffer's own bytes. Errors if `offset` lies past
    /// every buffer currently in the chain (the caller should treat that
    /// as `MORE`, not as a `locate_byte` failure).
    pub fn locate_byte(&self, offset: u64) -> Option<(usize, usize)> {
        let hint = self.last_located.get().min(self.buffers.len().saturating_sub(1));
        let search_from = if self.buffers.get(hint).is_some_and(|b| b.location.byte.start <= offset) {
            hint
        } else {
            0
        };

        for (i, buffer) in self.buffers.iter().enumerate().skip(search_from) {
            let start = buffer.location.byte.start;
            let end = start + buffer.len() as u64;
            if offset >= start && offset < end {
                self.last_located.set(i);
                return Some((i, (offset - start) as usize));
            }
            if offset == end && buffer.is_eof {
                self.last_located.set(i);
                return Some((i, buffer.len()));
            }
        }
        None
    }
}
