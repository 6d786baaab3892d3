//! Four-unit location accounting.
//!
//! Every position in a lexed stream is tracked in four parallel units at
//! once: bytes, Unicode scalar values ("chars"), extended grapheme clusters
//! ("graphemes"), and lines. A [`Location`] bundles one running count per
//! unit so that a [`Buffer`](crate::buffer::Buffer), a [`State`](crate::state::State)
//! cursor, and a lexed token can all be described the same way, and so a
//! caller can report "line 12, grapheme 340" without re-deriving it from
//! byte offsets after the fact.
//!
//! Generalizes the line/column bookkeeping in `faxc_lex::Cursor` (which
//! tracks two units, line and column) to the four units this crate needs.

use std::fmt;

/// The four units a [`Location`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Byte,
    Char,
    Grapheme,
    Line,
}

impl Unit {
    pub const ALL: [Unit; 4] = [Unit::Byte, Unit::Char, Unit::Grapheme, Unit::Line];

    pub const fn name(self) -> &'static str {
        match self {
            Unit::Byte => "byte",
            Unit::Char => "char",
            Unit::Grapheme => "grapheme",
            Unit::Line => "line",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One unit's running position: where the current token starts in this
/// unit, how long it is so far, an optional post-token reset, and a cheap
/// running hash of the content consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitLocation {
    pub start: u64,
    pub length: u64,
    /// Overrides `start + length` as the next token's start, when set.
    /// Used by the line unit after a line-breaking grapheme: the next
    /// line starts at column/grapheme-on-line zero, not at `start + 1`.
    pub after: Option<u64>,
    pub hash: u64,
}

impl UnitLocation {
    pub fn end(&self) -> u64 {
        self.start + self.length
    }

    fn next_start(&self) -> u64 {
        self.after.unwrap_or_else(|| self.end())
    }

    /// Roll this unit forward past the just-completed token: the next
    /// token's `start` becomes this token's `next_start`, and the
    /// per-token fields (`length`, `after`, `hash`) reset to zero.
    fn finalize_token(&mut self) {
        self.start = self.next_start();
        self.length = 0;
        self.after = None;
        self.hash = 0;
    }
}

/// The four-unit position tracked across a [`Buffer`](crate::buffer::Buffer)
/// chain, a [`State`](crate::state::State) cursor, and every lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub byte: UnitLocation,
    pub char: UnitLocation,
    pub grapheme: UnitLocation,
    pub line: UnitLocation,
}

impl Location {
    pub fn init() -> Self {
        Self::default()
    }

    pub fn unit(&self, u: Unit) -> &UnitLocation {
        match u {
            Unit::Byte => &self.byte,
            Unit::Char => &self.char,
            Unit::Grapheme => &self.grapheme,
            Unit::Line => &self.line,
        }
    }

    pub fn unit_mut(&mut self, u: Unit) -> &mut UnitLocation {
        match u {
            Unit::Byte => &mut self.byte,
            Unit::Char => &mut self.char,
            Unit::Grapheme => &mut self.grapheme,
            Unit::Line => &mut self.line,
        }
    }

    /// Extend the current (in-progress) token by one grapheme cluster.
    ///
    /// `bytes` and `codepoints` are the cluster's raw bytes and decoded
    /// scalar values; `is_line_break` marks clusters that end a line (a
    /// bare `\n`, a bare `\r`, a `\r\n` pair, or one of the Unicode line/
    /// paragraph separators).
    pub fn accumulate(&mut self, bytes: &[u8], codepoints: &[char], is_line_break: bool) {
        self.byte.length += bytes.len() as u64;
        for &b in bytes {
            self.byte.hash = self.byte.hash.wrapping_add(b as u64);
        }

        self.char.length += codepoints.len() as u64;
        for &c in codepoints {
            self.char.hash = self.char.hash.wrapping_add(c as u64);
        }

        self.grapheme.length += 1;
        self.grapheme.hash = self
            .grapheme
            .hash
            .wrapping_add(codepoints.iter().map(|&c| c as u64).sum::<u64>());

        if is_line_break {
            self.line.length += 1;
            self.line.hash = self.line.hash.wrapping_add(1);
            // The grapheme and char counts on the *next* line restart at
            // zero rather than continuing from this line's tally.
            self.char.after = Some(0);
            self.grapheme.after = Some(0);
        }
    }

    /// Roll every unit forward past a just-committed token.
    pub fn finalize_token(&mut self) {
        self.byte.finalize_token();
        self.char.finalize_token();
        self.grapheme.finalize_token();
        self.line.finalize_token();
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte {}, char {}, grapheme {}, line {}",
            self.byte.start, self.char.start, self.grapheme.start, self.line.start
        )
    }
}
