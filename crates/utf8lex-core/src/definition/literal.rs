//! `Literal`: an exact UTF-8 string match (§4.E).

use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use super::{MatchContext, MatchOutcome, MatchSpan};
use crate::reader::{read_grapheme, ReadOutcome};
use crate::unit::Location;

#[derive(Debug, Clone)]
pub struct Literal {
    text: String,
}

impl Literal {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Utf8LexError::new(ErrorCode::EmptyLiteral, "a Literal definition cannot be empty"));
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn try_match(&self, ctx: &MatchContext) -> Result<MatchOutcome> {
        let mut location = Location::init();
        let mut offset = ctx.start_offset;
        let mut remaining = self.text.as_str();

        while !remaining.is_empty() {
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
                    if !remaining.as_bytes().starts_with(&bytes) {
                        return Ok(MatchOutcome::NoMatch);
                    }
                    location.accumulate(&bytes, &g.codepoints, g.is_line_break);
                    offset += g.bytes as u64;
                    remaining = &remaining[bytes.len()..];
                }
                ReadOutcome::More => return Ok(MatchOutcome::More),
                ReadOutcome::Eof => return Ok(MatchOutcome::NoMatch),
            }
        }

        Ok(MatchOutcome::Matched(MatchSpan { bytes: location.byte.length as usize, location }))
    }
}
