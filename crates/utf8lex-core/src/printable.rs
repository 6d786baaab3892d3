//! The printable/diagnostic formatter (§4.I): escape arbitrary bytes into
//! a bounded ASCII-safe string for error messages and logs.
//!
//! Grounded on `faxc_util`'s diagnostic-builder escaping style, adapted to
//! a bounded destination capacity instead of an unbounded `String`.

/// One escape's worth of output, so a caller can bound total length
/// without ever emitting half an escape sequence.
fn escape_one(byte: u8) -> &'static str {
    match byte {
        0x07 => r"\a",
        0x08 => r"\b",
        0x0C => r"\f",
        0x0A => r"\n",
        0x0D => r"\r",
        0x09 => r"\t",
        0x0B => r"\v",
        b'\\' => r"\\",
        b'"' => "\\\"",
        _ => "",
    }
}

fn hex_escape(byte: u8) -> String {
    format!("\\x{byte:02X}")
}

/// Render `bytes` as a printable, bounded-length string: the standard
/// `\a \b \f \n \r \t \v \\ \"` escapes, `\xHH` for every other
/// non-printable byte, and printable ASCII passed through unchanged.
///
/// Writes at most `capacity` bytes of output. Returns `(rendered, true)` if
/// every input byte was consumed, or `(rendered, false)` (§8 S7's `MORE`)
/// if `capacity` ran out first — `rendered` is always the longest valid
/// prefix that fits, never a truncated escape sequence.
pub fn escape_bounded(bytes: &[u8], capacity: usize) -> (String, bool) {
    let mut out = String::with_capacity(capacity.min(bytes.len() * 2));
    for &b in bytes {
        let piece = if b.is_ascii_graphic() || b == b' ' {
            if b == b'"' || b == b'\\' {
                escape_one(b).to_string()
            } else {
                (b as char).to_string()
            }
        } else {
            let named = escape_one(b);
            if named.is_empty() {
                hex_escape(b)
            } else {
                named.to_string()
            }
        };

        if out.len() + piece.len() > capacity {
            return (out, false);
        }
        out.push_str(&piece);
    }
    (out, true)
}
