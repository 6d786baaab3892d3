//! utf8lex-util — shared foundations for the utf8lex workspace.
//!
//! Two small, dependency-light pieces used by every other crate in this
//! workspace:
//!
//! - [`index_vec`]: typed-index vectors (`IndexVec<I, T>`), so rule and
//!   definition ids are never accidentally mixed with raw `usize`s or with
//!   each other.
//! - [`error`]: the stable [`error::ErrorCode`] enumeration and the
//!   [`error::Utf8LexError`] type every fallible API in this workspace
//!   returns.
//!
//! Nothing here knows about lexing; `utf8lex-core` builds the engine on
//! top of these.

pub mod error;
pub mod index_vec;

pub use error::{ErrorCode, ErrorLocation, Result, Utf8LexError};
pub use index_vec::{define_idx, Idx, IndexVec};
