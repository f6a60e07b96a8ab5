//! Error types for the lexical core.
//!
//! Errors are plain values: each carries the kind of failure and the byte
//! offset at which it was detected. The lexer reports absolute offsets into
//! the underlying source; the standalone decoders in [`crate::strings`] and
//! [`crate::number`] receive bare slices and report offsets relative to them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input at offset {0}")]
    UnexpectedEof(u64),

    #[error("invalid hex digit at offset {0}")]
    InvalidHexDigit(u64),

    #[error("invalid character at offset {0}")]
    InvalidCharacter(u64),

    #[error("invalid number at offset {0}")]
    InvalidNumber(u64),

    #[error("malformed glyph preamble")]
    MalformedGlyphPreamble,
}

impl LexError {
    /// Byte offset at which the error was detected, when the kind carries one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            LexError::UnexpectedEof(off)
            | LexError::InvalidHexDigit(off)
            | LexError::InvalidCharacter(off)
            | LexError::InvalidNumber(off) => Some(*off),
            LexError::Io(_) | LexError::MalformedGlyphPreamble => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LexError>;
