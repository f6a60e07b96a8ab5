//! Decoders for PDF name and string lexemes, and the inverse encoders used
//! when writing content streams.
//!
//! All functions work on the raw token bytes the lexer reports: names
//! without the leading `/`, literal strings without the outer parentheses
//! (escapes intact), hex strings without the angle brackets. Error offsets
//! are relative to the input slice.

use crate::error::{LexError, Result};
use crate::lexer::is_whitespace;

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode a name lexeme, resolving `#NN` hex escapes.
///
/// Lenient: a `#` not followed by two hex digits is copied literally, the
/// way most viewers treat malformed names.
pub fn decode_name(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'#' {
            let hi = raw.get(i + 1).copied().and_then(hex_value);
            let lo = raw.get(i + 2).copied().and_then(hex_value);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
            tracing::debug!(offset = i, "malformed # escape in name, copied literally");
        }
        out.push(raw[i]);
        i += 1;
    }
    out
}

/// Strict variant of [`decode_name`]: a truncated `#` escape is
/// [`LexError::UnexpectedEof`], a non-hex digit in one is
/// [`LexError::InvalidHexDigit`].
pub fn decode_name_strict(raw: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'#' {
            if i + 2 >= raw.len() {
                return Err(LexError::UnexpectedEof(raw.len() as u64));
            }
            let hi = hex_value(raw[i + 1]).ok_or(LexError::InvalidHexDigit((i + 1) as u64))?;
            let lo = hex_value(raw[i + 2]).ok_or(LexError::InvalidHexDigit((i + 2) as u64))?;
            out.push((hi << 4) | lo);
            i += 3;
        } else {
            out.push(raw[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Encode logical name bytes into a name lexeme (without the leading `/`).
///
/// Bytes outside the printable regular range, delimiters and `#` itself are
/// written as `#NN` escapes; [`decode_name`] inverts the result exactly.
pub fn encode_name(bytes: &[u8]) -> Vec<u8> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        let needs_escape = !(0x21..=0x7E).contains(&b)
            || b == b'#'
            || matches!(
                b,
                b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
            );
        if needs_escape {
            out.push(b'#');
            out.push(HEX[(b >> 4) as usize]);
            out.push(HEX[(b & 0x0F) as usize]);
        } else {
            out.push(b);
        }
    }
    out
}

/// Decode the inner bytes of a literal string.
///
/// Handles the eight `\x` escapes, 1–3 digit octal escapes (modulo 256),
/// backslash line continuations (which produce nothing) and the
/// normalization of unescaped line ends to a single LF. A backslash before
/// any other byte yields that byte. Infallible: the lexer already
/// guaranteed balanced parentheses.
pub fn decode_literal_string(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b == b'\\' {
            i += 1;
            let Some(&esc) = raw.get(i) else {
                break; // dangling backslash at end of string
            };
            match esc {
                b'n' => out.push(b'\n'),
                b'r' => out.push(b'\r'),
                b't' => out.push(b'\t'),
                b'b' => out.push(0x08),
                b'f' => out.push(0x0C),
                b'(' | b')' | b'\\' => out.push(esc),
                b'0'..=b'7' => {
                    let mut value = u16::from(esc - b'0');
                    let mut digits = 1;
                    while digits < 3 {
                        match raw.get(i + 1) {
                            Some(&d @ b'0'..=b'7') => {
                                value = value * 8 + u16::from(d - b'0');
                                i += 1;
                                digits += 1;
                            }
                            _ => break,
                        }
                    }
                    out.push((value & 0xFF) as u8);
                }
                b'\r' => {
                    // Line continuation, swallows an optional LF
                    if raw.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                }
                b'\n' => {}
                _ => out.push(esc),
            }
            i += 1;
        } else if b == b'\r' {
            out.push(b'\n');
            if raw.get(i + 1) == Some(&b'\n') {
                i += 1;
            }
            i += 1;
        } else {
            out.push(b);
            i += 1;
        }
    }
    out
}

/// Encode logical bytes as literal-string content (without the outer
/// parentheses). Backslash, parentheses and the control escapes are written
/// in `\x` form so [`decode_literal_string`] inverts the result exactly.
pub fn encode_literal_string(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0C => out.extend_from_slice(b"\\f"),
            _ => out.push(b),
        }
    }
    out
}

/// Decode the inner bytes of a hex string.
///
/// Whitespace is skipped, pairs of hex digits become one byte with the most
/// significant nibble first, and a trailing lone digit is treated as if
/// followed by `0`. Any other byte is [`LexError::InvalidHexDigit`].
pub fn decode_hex_string(raw: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(raw.len() / 2);
    let mut pending: Option<u8> = None;
    for (i, &b) in raw.iter().enumerate() {
        if is_whitespace(b) {
            continue;
        }
        let nibble = hex_value(b).ok_or(LexError::InvalidHexDigit(i as u64))?;
        match pending.take() {
            Some(hi) => out.push((hi << 4) | nibble),
            None => pending = Some(nibble),
        }
    }
    if let Some(hi) = pending {
        out.push(hi << 4);
    }
    Ok(out)
}

/// Encode bytes as hex-string content (without the angle brackets).
pub fn encode_hex_string(bytes: &[u8]) -> Vec<u8> {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = Vec::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(HEX[(b >> 4) as usize]);
        out.push(HEX[(b & 0x0F) as usize]);
    }
    out
}
