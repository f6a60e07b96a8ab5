//! Numeric decoding for `Number` lexemes.
//!
//! The lexer hands out raw lexeme bytes; the functions here turn them into
//! values, including the historical producer tolerance for repeated signs.

use crate::error::{LexError, Result};

/// Decode a number lexeme into a value.
///
/// Leading `+` signs are ignored and leading `-` signs are counted. An
/// integer lexeme preceded by more than one minus decodes to 0 (Acrobat
/// treats such numbers as zero) while a real keeps a single minus, so
/// `--15` is 0 and `---116.23` is -116.23. A trailing or leading dot is
/// accepted (`70.` is 70, `.1` is 0.1).
///
/// Anything beyond that tolerance — interior signs, a second dot, or no
/// digits at all — is [`LexError::InvalidNumber`] with an offset relative
/// to the input slice. Writers never produce the tolerated forms; see
/// [`crate::writer::ContentWriter::write_float`].
pub fn decode_number(bytes: &[u8]) -> Result<f64> {
    let mut i = 0;
    let mut minuses = 0u32;
    while i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        if bytes[i] == b'-' {
            minuses += 1;
        }
        i += 1;
    }

    let rest = &bytes[i..];
    let mut digits = 0usize;
    let mut dots = 0usize;
    for (j, &b) in rest.iter().enumerate() {
        match b {
            b'0'..=b'9' => digits += 1,
            b'.' => {
                dots += 1;
                if dots > 1 {
                    return Err(LexError::InvalidNumber((i + j) as u64));
                }
            }
            _ => return Err(LexError::InvalidNumber((i + j) as u64)),
        }
    }
    if digits == 0 {
        return Err(LexError::InvalidNumber(i as u64));
    }

    let is_real = dots > 0;
    if !is_real && minuses > 1 {
        return Ok(0.0);
    }

    // rest is ASCII digits and at most one dot, always parseable
    let text = std::str::from_utf8(rest).map_err(|_| LexError::InvalidNumber(i as u64))?;
    let magnitude: f64 = text
        .parse()
        .map_err(|_| LexError::InvalidNumber(i as u64))?;

    Ok(if minuses > 0 { -magnitude } else { magnitude })
}

/// Decode a plain non-negative integer lexeme, the form object and
/// generation numbers take. No sign or dot tolerance.
pub fn decode_integer(bytes: &[u8]) -> Result<i64> {
    if bytes.is_empty() || !bytes.iter().all(|b| b.is_ascii_digit()) {
        return Err(LexError::InvalidNumber(0));
    }
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(LexError::InvalidNumber(0))
}
