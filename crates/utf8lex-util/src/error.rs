//! The stable error taxonomy shared by every utf8lex crate.
//!
//! `ErrorCode` reproduces the numeric order the specification calls out as
//! part of the contract: tests and logs may depend on `ErrorCode as i32`,
//! so variants must only ever be appended, never reordered or removed.

use std::fmt;

/// Stable, order-significant error/flow codes.
///
/// `Ok`, `Eof`, `More` and `NoMatch` are flow signals, not errors — they
/// are returned by matchers and the lex engine as part of normal control
/// flow (see `utf8lex_core::engine::LexOutcome`) and never wrapped in
/// [`Utf8LexError`]. Every other variant is a genuine error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    Ok = 0,
    Eof,
    More,
    NoMatch,
    NullPointer,
    ChainInsert,
    Cat,
    PatternType,
    EmptyLiteral,
    Regex,
    Unit,
    InfiniteLoop,
    BadLength,
    BadOffset,
    BadStart,
    BadMin,
    BadMax,
    BadRegex,
    BadUtf8,
    BadError,
    BadAfter,
    BadHash,
    NotFound,
    State,
}

impl ErrorCode {
    /// `true` for the four flow signals (`Ok`, `Eof`, `More`, `NoMatch`).
    pub const fn is_flow_signal(self) -> bool {
        matches!(self, ErrorCode::Ok | ErrorCode::Eof | ErrorCode::More | ErrorCode::NoMatch)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCode::Ok => "OK",
            ErrorCode::Eof => "EOF",
            ErrorCode::More => "MORE",
            ErrorCode::NoMatch => "NO_MATCH",
            ErrorCode::NullPointer => "NULL_POINTER",
            ErrorCode::ChainInsert => "CHAIN_INSERT",
            ErrorCode::Cat => "CAT",
            ErrorCode::PatternType => "PATTERN_TYPE",
            ErrorCode::EmptyLiteral => "EMPTY_LITERAL",
            ErrorCode::Regex => "REGEX",
            ErrorCode::Unit => "UNIT",
            ErrorCode::InfiniteLoop => "INFINITE_LOOP",
            ErrorCode::BadLength => "BAD_LENGTH",
            ErrorCode::BadOffset => "BAD_OFFSET",
            ErrorCode::BadStart => "BAD_START",
            ErrorCode::BadMin => "BAD_MIN",
            ErrorCode::BadMax => "BAD_MAX",
            ErrorCode::BadRegex => "BAD_REGEX",
            ErrorCode::BadUtf8 => "BAD_UTF8",
            ErrorCode::BadError => "BAD_ERROR",
            ErrorCode::BadAfter => "BAD_AFTER",
            ErrorCode::BadHash => "BAD_HASH",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::State => "STATE",
        };
        f.write_str(name)
    }
}

/// A location snapshot cheap enough to attach to every error.
///
/// Mirrors the four counting units of `utf8lex_core::unit::Location`
/// without depending on that crate (which depends on this one), so a
/// `Utf8LexError` can always carry "where in the stream this happened".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorLocation {
    pub byte: u64,
    pub char: u64,
    pub grapheme: u64,
    pub line: u64,
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "byte {}, char {}, grapheme {}, line {}",
            self.byte, self.char, self.grapheme, self.line
        )
    }
}

/// The error type returned by every fallible utf8lex API.
///
/// Carries the [`ErrorCode`] (for stable programmatic matching) alongside
/// a human-readable message and, where available, the stream location the
/// error was raised at.
#[derive(Debug, thiserror::Error)]
#[error("{code}: {message}{}", location.map(|l| format!(" ({l})")).unwrap_or_default())]
pub struct Utf8LexError {
    pub code: ErrorCode,
    pub message: String,
    pub location: Option<ErrorLocation>,
}

impl Utf8LexError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        debug_assert!(
            !code.is_flow_signal(),
            "flow signals must not be wrapped in Utf8LexError: {code}"
        );
        Self { code, message: message.into(), location: None }
    }

    pub fn with_location(mut self, location: ErrorLocation) -> Self {
        self.location = Some(location);
        self
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Utf8LexError>;

/// Shorthand for constructing an [`Utf8LexError`] and returning it as `Err`.
#[macro_export]
macro_rules! bail {
    ($code:expr, $($arg:tt)*) => {
        return Err($crate::error::Utf8LexError::new($code, format!($($arg)*)))
    };
}
