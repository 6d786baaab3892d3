//! The lex engine (§4.H): arbitrate every rule at the current cursor and
//! commit the winner.
//!
//! Grounded on `faxc_lex::lexer::core`'s "dispatch then advance" shape
//! (there: a fixed `match` over token kinds; here: a loop over a runtime
//! `RuleList`), instrumented with `tracing` the way the sibling `faxt` CLI
//! instruments its commands — `faxc_lex` itself doesn't log, but nothing
//! in this workspace should lex silently when a caller turns on
//! `RUST_LOG=utf8lex_core=debug`.

use tracing::{debug, trace};

use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use crate::definition::{DefinitionSet, MatchContext, MatchOutcome};
use crate::rule::{RuleId, RuleList};
use crate::state::State;
use crate::unit::Location;

/// A successfully lexed token: which rule matched, its location (relative
/// deltas folded onto the session cursor), and the byte range it spans.
#[derive(Debug, Clone)]
pub struct Token {
    pub rule_id: RuleId,
    pub location: Location,
    pub byte_start: u64,
    pub byte_end: u64,
}

/// What one call to [`lex`] can report.
#[derive(Debug, Clone)]
pub enum LexOutcome {
    Token(Token),
    /// No rule matched at all and the buffer chain is exhausted with EOF.
    Eof,
    /// At least one candidate needs more input than is currently
    /// buffered, and none fully matched; no bytes were consumed.
    More,
    /// Every rule returned `NoMatch`, and the chain is not at EOF.
    NoMatch,
}

/// Attempt to produce the next [`Token`] from `state` against `rules`,
/// resolved against `defs`.
///
/// Pure with respect to `rules`/`defs` (read-only); the only mutation is
/// `state`'s cursor, advanced exactly past a committed token.
pub fn lex(state: &mut State, rules: &RuleList, defs: &DefinitionSet) -> Result<LexOutcome> {
    if !defs.is_resolved() {
        return Err(Utf8LexError::new(ErrorCode::State, "definition set must be resolved before lexing"));
    }

    let cursor = *state.cursor();
    let offset = cursor.byte.start;
    trace!(offset, "attempting lex at cursor");

    let mut best: Option<(RuleId, crate::definition::MatchSpan)> = None;
    let mut saw_more = false;

    for rule in rules.iter() {
        let ctx = MatchContext { chain: state.chain(), start_offset: offset, defs };
        let outcome = defs.get(rule.definition).try_match(&ctx)?;
        match outcome {
            MatchOutcome::Matched(span) => {
                let better = match &best {
                    None => true,
                    Some((best_id, best_span)) => {
                        span.bytes > best_span.bytes || (span.bytes == best_span.bytes && rule.id.0 < best_id.0)
                    }
                };
                if better {
                    best = Some((rule.id, span));
                }
            }
            MatchOutcome::More => saw_more = true,
            MatchOutcome::NoMatch => {}
        }
    }

    // A pending `More` candidate might still grow past the current best
    // matched length once more input arrives (§8 S6), so any `More` beats
    // committing early, full stop — the caller retries after appending.
    if saw_more {
        return Ok(LexOutcome::More);
    }

    if let Some((rule_id, span)) = best {
        let mut token_location = cursor;
        fold_match_into_cursor(&mut token_location, &span.location);
        let byte_start = cursor.byte.start;
        let byte_end = byte_start + span.bytes as u64;
        let this_token = state.commit(token_location);
        debug!(rule_id = rule_id.0, byte_start, byte_end, "committed token");
        return Ok(LexOutcome::Token(Token { rule_id, location: this_token, byte_start, byte_end }));
    }

    if state.has_eof() && offset >= state.chain().total_bytes() {
        return Ok(LexOutcome::Eof);
    }

    Ok(LexOutcome::NoMatch)
}

/// Apply a match's relative `Location` contribution onto the running
/// session cursor (which already holds `start`/`after` state from prior
/// tokens); this mirrors `Location::accumulate`'s bookkeeping but folds an
/// already-summed span instead of one grapheme at a time.
fn fold_match_into_cursor(cursor: &mut Location, span_location: &Location) {
    cursor.byte.length = span_location.byte.length;
    cursor.byte.hash = span_location.byte.hash;
    cursor.char.length = span_location.char.length;
    cursor.char.hash = span_location.char.hash;
    cursor.grapheme.length = span_location.grapheme.length;
    cursor.grapheme.hash = span_location.grapheme.hash;
    cursor.line.length = span_location.line.length;
    cursor.line.hash = span_location.line.hash;
    if span_location.char.after.is_some() {
        cursor.char.after = Some(0);
        cursor.grapheme.after = Some(0);
    }
}
