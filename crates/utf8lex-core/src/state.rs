//! Lexer state: a [`BufferChain`] plus the [`Location`] cursor of the next
//! token to be produced.
//!
//! `faxc_lex::Cursor` bundles a source slice with a position/line/column;
//! `State` generalizes that to the buffer-chain model so a lex attempt can
//! span input that arrived in more than one piece.

use utf8lex_util::Result;

use crate::buffer::{BufferChain, ByteString};
use crate::unit::Location;

/// Everything the engine needs across calls to `lex`: the buffered input
/// seen so far and where the next token starts.
pub struct State {
    chain: BufferChain,
    cursor: Location,
}

impl State {
    pub fn new() -> Self {
        Self { chain: BufferChain::new(), cursor: Location::init() }
    }

    pub fn append(&mut self, string: ByteString, is_eof: bool) -> Result<()> {
        self.chain.append(string, is_eof)
    }

    pub fn chain(&self) -> &BufferChain {
        &self.chain
    }

    pub fn cursor(&self) -> &Location {
        &self.cursor
    }

    /// Absolute byte offset of the next token's first byte.
    pub fn byte_offset(&self) -> u64 {
        self.cursor.byte.start
    }

    pub fn has_eof(&self) -> bool {
        self.chain.has_eof()
    }

    /// Commit a matched token's [`Location`] (already accumulated from
    /// `self.cursor` by the engine) and roll the cursor forward past it.
    /// Returns the token's own location (pre-advance); `self.cursor()`
    /// reflects the next token's starting position afterwards.
    pub(crate) fn commit(&mut self, token_location: Location) -> Location {
        let mut next_cursor = token_location;
        next_cursor.finalize_token();
        self.cursor = next_cursor;
        token_location
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
