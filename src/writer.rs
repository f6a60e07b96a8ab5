//! Content-stream byte output.
//!
//! A [`ContentWriter`] is the primitive sink content producers write
//! through: raw bytes, single spaces and deterministically formatted
//! numbers. Everything it emits is ISO-Latin-1 and lexes back to the same
//! logical value.

use crate::error::Result;
use std::io::Write;

/// Format a float the way content streams expect: fixed notation, at most
/// six fractional digits, trailing zeros trimmed, `-0` normalized to `0`.
/// Non-finite values format as `0`.
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.6}", value);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Map text to ISO-Latin-1 bytes the way legacy PDF writers do: each code
/// point is truncated to its low byte. Callers keep text in the `<= 0xFF`
/// range when they care about fidelity.
pub fn iso_bytes(text: &str) -> Vec<u8> {
    text.chars().map(|c| (c as u32 & 0xFF) as u8).collect()
}

/// Byte sink for content-stream output. Calls chain through `&mut Self`.
pub struct ContentWriter<W: Write> {
    inner: W,
}

impl<W: Write> ContentWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<&mut Self> {
        self.inner.write_all(bytes)?;
        Ok(self)
    }

    /// Emit a single space (0x20).
    pub fn write_space(&mut self) -> Result<&mut Self> {
        self.write_bytes(b" ")
    }

    pub fn write_integer(&mut self, value: i64) -> Result<&mut Self> {
        self.write_bytes(value.to_string().as_bytes())
    }

    pub fn write_float(&mut self, value: f64) -> Result<&mut Self> {
        self.write_bytes(format_float(value).as_bytes())
    }
}
