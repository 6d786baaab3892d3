//! utf8lex-core — a Unicode-aware, rule-driven lexical analyzer engine.
//!
//! The engine reads input as a chain of byte buffers (§4.B `buffer`), walks
//! it one extended grapheme cluster at a time (§4.C `reader`) classified by
//! Unicode General Category (§4.C `category`), matches named pattern
//! definitions against the current cursor (§4.D-F `definition`), and
//! arbitrates every rule in a `RuleList` (§4.G `rule`) to emit the next
//! `Token` (§4.H `engine`). `printable` (§4.I) renders arbitrary bytes for
//! diagnostics.
//!
//! Grounded on `faxc_lex`'s lexer shape (a cursor over source text,
//! dispatch-then-advance), generalized from a single in-memory `&str` to a
//! buffer chain that may still be growing, and from a fixed token enum to a
//! caller-supplied `RuleList`.

pub mod buffer;
pub mod category;
pub mod definition;
pub mod engine;
pub mod printable;
pub mod reader;
pub mod rule;
pub mod state;
pub mod unit;

#[cfg(test)]
mod edge_cases;

pub use buffer::{Buffer, BufferChain, ByteString, MAX_BUFFER_CHAIN_DEPTH};
pub use category::Category;
pub use definition::{
    ClassCat, DefId, Definition, DefinitionSet, Literal, MatchContext, MatchOutcome, MatchSpan,
    Multi, MultiKind, Reference, ReferenceTarget, RegexDef,
};
pub use engine::{lex, LexOutcome, Token};
pub use reader::{read_grapheme, GraphemeRead, ReadOutcome};
pub use rule::{Rule, RuleId, RuleList};
pub use state::State;
pub use unit::{Location, Unit, UnitLocation};
