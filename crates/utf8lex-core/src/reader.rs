//! The grapheme reader (§4.C): decodes one extended grapheme cluster at a
//! time from a [`BufferChain`], forward-only, across buffer boundaries.
//!
//! Grounded on `faxc_lex::Cursor::advance`'s ASCII-fast-path /
//! UTF-8-slow-path split, generalized from single codepoints to grapheme
//! clusters. `unicode-segmentation`'s `UnicodeSegmentation::graphemes` is
//! used for whole, already-available strings (see `buffer::measure`); a
//! single streaming cluster, which may need bytes the chain doesn't have
//! yet, is read here by hand against the category table (§4.D) so that a
//! `More` outcome can be produced mid-cluster without requiring the whole
//! remaining stream to be buffered up front.

use utf8lex_util::{ErrorCode, Result, Utf8LexError};

use crate::buffer::BufferChain;
use crate::category::{is_line_break_codepoint, Category};

/// One decoded extended grapheme cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphemeRead {
    pub bytes: usize,
    pub codepoints: Vec<char>,
    pub is_line_break: bool,
    pub first_codepoint: char,
    pub category: Category,
}

/// The result of attempting to read one grapheme cluster starting at an
/// absolute byte offset.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Ok(GraphemeRead),
    /// Not enough buffered input to decide the cluster boundary, and the
    /// chain isn't at EOF yet; the caller should append another buffer
    /// and retry from the same offset.
    More,
    /// The offset is at or past the end of a chain whose last buffer is
    /// marked `is_eof`.
    Eof,
}

/// Is `c` a "grapheme extender" at the level this crate supports: a
/// nonspacing/spacing/enclosing mark or a format character (§4.C). Regional
/// indicators and ZWJ are handled separately by [`read_grapheme`].
fn extends_cluster(c: char) -> bool {
    crate::category::category_of(c).intersects(Category::MARK | Category::CF)
}

const ZWJ: char = '\u{200D}';

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

/// Decode the codepoint starting at `buf[offset..]`, or report that more
/// bytes are needed / the sequence is invalid.
enum Decoded {
    Char(char, usize),
    NeedMore,
    Invalid,
}

fn decode_one(buf: &[u8]) -> Decoded {
    if buf.is_empty() {
        return Decoded::NeedMore;
    }
    let first = buf[0];
    let width = if first < 0x80 {
        1
    } else if first & 0xE0 == 0xC0 {
        2
    } else if first & 0xF0 == 0xE0 {
        3
    } else if first & 0xF8 == 0xF0 {
        4
    } else {
        return Decoded::Invalid;
    };
    if buf.len() < width {
        return Decoded::NeedMore;
    }
    match std::str::from_utf8(&buf[..width]) {
        Ok(s) => match s.chars().next() {
            Some(c) => Decoded::Char(c, width),
            None => Decoded::Invalid,
        },
        Err(_) => Decoded::Invalid,
    }
}

/// Read every available byte from `offset` onward, across as many buffers
/// as the chain currently holds, up to `max_bytes`. Used to assemble a
/// lookahead window for cluster-boundary decisions.
fn window(chain: &BufferChain, offset: u64, max_bytes: usize) -> (Vec<u8>, bool) {
    let mut out = Vec::with_capacity(max_bytes.min(64));
    let mut pos = offset;
    loop {
        if out.len() >= max_bytes {
            return (out, false);
        }
        match chain.locate_byte(pos) {
            Some((buf_idx, in_buf_offset)) => {
                let buffer = chain.get(buf_idx).unwrap();
                let bytes = buffer.string.as_bytes();
                if in_buf_offset >= bytes.len() {
                    // at the very end of an eof buffer
                    return (out, true);
                }
                let take = (bytes.len() - in_buf_offset).min(max_bytes - out.len());
                out.extend_from_slice(&bytes[in_buf_offset..in_buf_offset + take]);
                pos += take as u64;
            }
            None => return (out, chain.has_eof()),
        }
    }
}

/// Read one extended grapheme cluster starting at absolute byte offset
/// `offset` in `chain`.
pub fn read_grapheme(chain: &BufferChain, offset: u64) -> Result<ReadOutcome> {
    // Up to 4 bytes for the base codepoint, plus up to 16 more for any
    // combining/extension tail, is enough for every practical cluster;
    // regional-indicator pairs are exactly 2 codepoints of 4 bytes each.
    let (buf, reached_eof) = window(chain, offset, 24);

    let (first, first_width) = match decode_one(&buf) {
        Decoded::Char(c, w) => (c, w),
        Decoded::Invalid => {
            return Err(Utf8LexError::new(ErrorCode::BadUtf8, format!("invalid UTF-8 at byte offset {offset}")));
        }
        Decoded::NeedMore => {
            if buf.is_empty() && reached_eof {
                return Ok(ReadOutcome::Eof);
            }
            return Ok(ReadOutcome::More);
        }
    };

    // CRLF: always exactly one cluster, two bytes.
    if first == '\r' {
        match decode_one(&buf[first_width..]) {
            Decoded::Char('\n', w2) => {
                return Ok(ReadOutcome::Ok(GraphemeRead {
                    bytes: first_width + w2,
                    codepoints: vec!['\r', '\n'],
                    is_line_break: true,
                    first_codepoint: '\r',
                    category: crate::category::category_of('\r'),
                }));
            }
            Decoded::NeedMore if !reached_eof => return Ok(ReadOutcome::More),
            _ => {
                return Ok(ReadOutcome::Ok(GraphemeRead {
                    bytes: first_width,
                    codepoints: vec!['\r'],
                    is_line_break: true,
                    first_codepoint: '\r',
                    category: crate::category::category_of('\r'),
                }));
            }
        }
    }

    let mut codepoints = vec![first];
    let mut consumed = first_width;
    let is_line_break = is_line_break_codepoint(first);

    if is_regional_indicator(first) {
        match decode_one(&buf[consumed..]) {
            Decoded::Char(c, w) if is_regional_indicator(c) => {
                codepoints.push(c);
                consumed += w;
            }
            Decoded::NeedMore if !reached_eof => return Ok(ReadOutcome::More),
            _ => {}
        }
    } else if !is_line_break {
        loop {
            match decode_one(&buf[consumed..]) {
                Decoded::Char(c, w) if extends_cluster(c) || c == ZWJ => {
                    codepoints.push(c);
                    consumed += w;
                }
                Decoded::NeedMore if !reached_eof => return Ok(ReadOutcome::More),
                _ => break,
            }
        }
    }

    let category = crate::category::category_of(first);
    Ok(ReadOutcome::Ok(GraphemeRead {
        bytes: consumed,
        codepoints,
        is_line_break,
        first_codepoint: first,
        category,
    }))
}
