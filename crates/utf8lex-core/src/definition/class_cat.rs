//! `ClassCat`: a run of graphemes whose category mask intersects a fixed
//! mask, bounded by a grapheme count (§4.E).

use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use super::{MatchContext, MatchOutcome, MatchSpan};
use crate::category::Category;
use crate::reader::{read_grapheme, ReadOutcome};
use crate::unit::Location;

#[derive(Debug, Clone)]
pub struct ClassCat {
    mask: Category,
    min: usize,
    max: Option<usize>,
}

impl ClassCat {
    pub fn new(mask: Category, min: usize, max: Option<usize>) -> Self {
        Self { mask, min, max }
    }

    pub fn mask(&self) -> Category {
        self.mask
    }

    pub fn try_match(&self, ctx: &MatchContext) -> Result<MatchOutcome> {
        if let Some(max) = self.max {
            if max < self.min {
                return Err(Utf8LexError::new(ErrorCode::BadMax, "ClassCat max is smaller than min"));
            }
        }

        let mut location = Location::init();
        let mut offset = ctx.start_offset;
        let mut count = 0usize;

        loop {
            if self.max.is_some_and(|max| count >= max) {
                break;
            }
            match read_grapheme(ctx.chain, offset)? {
                ReadOutcome::Ok(g) => {
                    if !g.category.intersects(self.mask) {
                        break;
                    }
                    let bytes = {
                        let mut buf = Vec::with_capacity(g.codepoints.iter().map(|c| c.len_utf8()).sum());
                        for c in &g.codepoints {
                            let mut tmp = [0u8; 4];
                            buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
                        }
                        buf
                    };
                    location.accumulate(&bytes, &g.codepoints, g.is_line_break);
                    offset += g.bytes as u64;
                    count += 1;
                }
                ReadOutcome::More => {
                    if count >= self.min {
                        break;
                    }
                    return Ok(MatchOutcome::More);
                }
                ReadOutcome::Eof => break,
            }
        }

        if count < self.min {
            return Ok(MatchOutcome::NoMatch);
        }

        Ok(MatchOutcome::Matched(MatchSpan { bytes: location.byte.length as usize, location }))
    }
}
