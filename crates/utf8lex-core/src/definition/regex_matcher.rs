//! `RegexDef`: an anchored regex match recomputed through the grapheme
//! reader for counter consistency (§4.E).
//!
//! Grounded on `freddiehaddad-oxidized`'s use of the `regex` crate for
//! UTF-8-mode pattern matching; `faxc_lex` has no regex dependency at all,
//! so this is the one place this crate reaches outside the teacher's own
//! stack (documented in `DESIGN.md`).

use regex::Regex;
use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use super::{MatchContext, MatchOutcome, MatchSpan};
use crate::reader::{read_grapheme, ReadOutcome};
use crate::unit::Location;

/// Upper bound on how far the lookahead window grows while chasing a
/// match whose extent we can't yet decide; stops pathological patterns
/// from growing the window without bound against a huge buffered chain.
const MAX_REGEX_WINDOW: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct RegexDef {
    source: String,
    regex: Regex,
}

impl RegexDef {
    /// Compiles `pattern` anchored to the start of the match (`\A`), so a
    /// successful match is always "matches starting exactly here", not
    /// "matches somewhere in the remaining input".
    pub fn new(pattern: &str) -> Result<Self> {
        let anchored = format!(r"\A(?:{pattern})");
        let regex = Regex::new(&anchored)
            .map_err(|e| Utf8LexError::new(ErrorCode::BadRegex, format!("invalid regex {pattern:?}: {e}")))?;
        Ok(Self { source: pattern.to_string(), regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn try_match(&self, ctx: &MatchContext) -> Result<MatchOutcome> {
        // Pull a lookahead window large enough for the engine to decide,
        // growing it until either the chain is exhausted (MORE, unless
        // EOF) or a match no longer extends by adding more bytes.
        let mut window_len = 256usize;
        loop {
            let (window, capped_by_window, chain_exhausted) = collect_window(ctx, window_len);
            let text = match std::str::from_utf8(&window) {
                Ok(s) => s,
                Err(e) => std::str::from_utf8(&window[..e.valid_up_to()]).unwrap(),
            };

            match self.regex.find(text) {
                Some(m) if m.start() == 0 => {
                    if m.end() == window.len() && capped_by_window && window_len < MAX_REGEX_WINDOW {
                        // The chain has more bytes than this window; a
                        // bigger window might extend a greedy match.
                        window_len *= 2;
                        continue;
                    }
                    if m.end() == window.len() && chain_exhausted {
                        // The match reaches exactly as far as the chain
                        // currently goes, and the chain isn't at EOF; it
                        // could still grow once more input is appended.
                        return Ok(MatchOutcome::More);
                    }
                    return self.recount(ctx, m.end());
                }
                _ => {
                    if capped_by_window && window_len < MAX_REGEX_WINDOW {
                        window_len *= 2;
                        continue;
                    }
                    if chain_exhausted {
                        return Ok(MatchOutcome::More);
                    }
                    return Ok(MatchOutcome::NoMatch);
                }
            }
        }
    }

    /// Re-derive the grapheme-accurate `Location` for a byte-length match
    /// by re-reading it through component C, per §4.E's consistency rule.
    fn recount(&self, ctx: &MatchContext, byte_len: usize) -> Result<MatchOutcome> {
        let mut location = Location::init();
        let mut offset = ctx.start_offset;
        let end = ctx.start_offset + byte_len as u64;
        while offset < end {
            match read_grapheme(ctx.chain, offset)? {
                ReadOutcome::Ok(g) => {
                    let bytes = {
                        let mut buf = Vec::new();
                        for c in &g.codepoints {
                            let mut tmp = [0u8; 4];
                            buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
                        }
                        buf
                    };
                    location.accumulate(&bytes, &g.codepoints, g.is_line_break);
                    offset += g.bytes as u64;
                }
                ReadOutcome::More | ReadOutcome::Eof => {
                    return Err(Utf8LexError::new(
                        ErrorCode::BadLength,
                        "regex match length does not align with available grapheme boundaries",
                    ));
                }
            }
        }
        Ok(MatchOutcome::Matched(MatchSpan { bytes: byte_len, location }))
    }
}

/// Collect up to `max_bytes` from `ctx.start_offset` onward.
///
/// Returns `(bytes, capped_by_window, chain_exhausted)`: `capped_by_window`
/// is true when `max_bytes` was reached while the chain still had more
/// buffered content beyond it (growing the window would see more);
/// `chain_exhausted` is true when every currently-buffered byte was
/// collected and the chain is not yet at EOF (more input may still arrive).
fn collect_window(ctx: &MatchContext, max_bytes: usize) -> (Vec<u8>, bool, bool) {
    let mut out = Vec::with_capacity(max_bytes.min(4096));
    let mut offset = ctx.start_offset;
    loop {
        if out.len() >= max_bytes {
            return (out, true, false);
        }
        match ctx.chain.locate_byte(offset) {
            Some((idx, in_buf_offset)) => {
                let buffer = ctx.chain.get(idx).unwrap();
                let bytes = buffer.string.as_bytes();
                if in_buf_offset >= bytes.len() {
                    return (out, false, false);
                }
                let take = (bytes.len() - in_buf_offset).min(max_bytes - out.len());
                out.extend_from_slice(&bytes[in_buf_offset..in_buf_offset + take]);
                offset += take as u64;
            }
            None => return (out, false, !ctx.chain.has_eof()),
        }
    }
}
