//! PDF lexer.
//!
//! Tokenizes PDF syntax according to ISO 32000-1 Section 7.2. The lexer
//! walks a [`SourceReader`] and reports typed tokens as half-open byte
//! ranges into the source; it never copies or interprets object semantics.
//! Surrounding whitespace and the `/ ( ) < >` delimiters of names and
//! strings are excluded from the reported range.

use crate::error::{LexError, Result};
use crate::number::decode_integer;
use crate::source::{ByteSource, SourceReader};
use std::sync::Arc;

/// PDF whitespace class (ISO 32000-1, Table 1).
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, 0x00 | 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}

/// PDF delimiter class (ISO 32000-1, Table 2).
pub fn is_delimiter(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Regular characters are everything that is neither whitespace nor a
/// delimiter.
pub fn is_regular(b: u8) -> bool {
    !is_whitespace(b) && !is_delimiter(b)
}

/// Token kinds reported by the lexer.
///
/// `Obj`, `EndObj` and `Ref` are produced only by
/// [`Lexer::next_valid_token`], which fuses `Number Number marker`
/// sequences; [`Lexer::next_token`] reports the marker words as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    String,
    Name,
    Comment,
    Obj,
    EndObj,
    Ref,
    StartArray,
    EndArray,
    StartDic,
    EndDic,
    Stream,
    EndStream,
    Other,
    EndOfFile,
}

/// A token as a value: kind plus the raw-lexeme byte range.
///
/// Tokens are views into the source; the range is only meaningful while
/// the source is alive. For fused `Ref`/`Obj`/`EndObj` tokens the range
/// spans from the first number through the marker word.
#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u64,
    pub end: u64,
    pub is_hex: bool,
    pub obj_nr: i64,
    pub gen_nr: i64,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        if self.kind != other.kind || self.start != other.start || self.end != other.end {
            return false;
        }
        match self.kind {
            TokenKind::String => self.is_hex == other.is_hex,
            TokenKind::Ref | TokenKind::Obj | TokenKind::EndObj => {
                self.obj_nr == other.obj_nr && self.gen_nr == other.gen_nr
            }
            _ => true,
        }
    }
}

impl Eq for Token {}

/// Lexing configuration, mirroring the strict/lenient split used across
/// PDF readers: lenient recovers from producer damage, strict reports it.
#[derive(Debug, Clone, Copy)]
pub struct LexOptions {
    /// Reject bytes that cannot begin a token instead of recovering.
    pub strict: bool,
}

impl LexOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

impl Default for LexOptions {
    fn default() -> Self {
        Self::lenient()
    }
}

/// Tokenizer over a shared byte source.
///
/// Owns a cursor and the state of the most recent token; create one lexer
/// per concurrent consumer. Errors leave the position at the offending
/// byte and the lexer does not recover by itself — callers `seek` past the
/// damage if they want to continue.
pub struct Lexer {
    source: Arc<dyn ByteSource>,
    reader: SourceReader,
    options: LexOptions,
    kind: TokenKind,
    start: u64,
    end: u64,
    is_hex: bool,
    obj_nr: i64,
    gen_nr: i64,
}

impl Lexer {
    pub fn new(source: Arc<dyn ByteSource>) -> Self {
        Self::with_options(source, LexOptions::default())
    }

    pub fn with_options(source: Arc<dyn ByteSource>, options: LexOptions) -> Self {
        let reader = SourceReader::new(Arc::clone(&source));
        Self {
            source,
            reader,
            options,
            kind: TokenKind::EndOfFile,
            start: 0,
            end: 0,
            is_hex: false,
            obj_nr: 0,
            gen_nr: 0,
        }
    }

    /// Kind of the most recent token.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Start offset of the most recent token's raw lexeme.
    pub fn token_start(&self) -> u64 {
        self.start
    }

    /// End offset (exclusive) of the most recent token's raw lexeme.
    pub fn token_end(&self) -> u64 {
        self.end
    }

    /// Whether the most recent `String` token was hex-delimited.
    pub fn is_hex_string(&self) -> bool {
        self.is_hex
    }

    /// Object number of the most recent fused `Ref`/`Obj`/`EndObj` token.
    pub fn obj_nr(&self) -> i64 {
        self.obj_nr
    }

    /// Generation number of the most recent fused `Ref`/`Obj`/`EndObj` token.
    pub fn gen_nr(&self) -> i64 {
        self.gen_nr
    }

    /// The most recent token as a value.
    pub fn token(&self) -> Token {
        Token {
            kind: self.kind,
            start: self.start,
            end: self.end,
            is_hex: self.is_hex,
            obj_nr: self.obj_nr,
            gen_nr: self.gen_nr,
        }
    }

    /// Current reader position.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Move the cursor to an absolute offset. Any pending reference fusion
    /// context is abandoned with the old position.
    pub fn seek(&mut self, offset: u64) {
        self.reader.seek(offset);
    }

    /// Copy of the raw lexeme bytes `[start, end)`.
    pub fn byte_content(&self) -> Vec<u8> {
        self.bytes_of(self.start, self.end)
    }

    /// Compare the raw lexeme against `expected` without allocating.
    pub fn token_value_equals_to(&self, expected: &[u8]) -> bool {
        self.range_equals(self.start, self.end, expected)
    }

    /// Advance to the next lexical unit. Comments are reported as
    /// `Comment`; at the end of the source this keeps returning
    /// `EndOfFile`.
    pub fn next_token(&mut self) -> Result<TokenKind> {
        self.is_hex = false;

        // Skip inter-token whitespace
        let first = loop {
            match self.reader.read() {
                None => {
                    self.start = self.reader.position();
                    self.end = self.start;
                    self.kind = TokenKind::EndOfFile;
                    return Ok(self.kind);
                }
                Some(b) if is_whitespace(b) => continue,
                Some(b) => break b,
            }
        };
        let token_start = self.reader.position() - 1;

        match first {
            b'%' => self.read_comment(),
            b'/' => self.read_name(),
            b'(' => self.read_literal_string(),
            b'<' => self.read_angle_bracket(token_start),
            b'>' => {
                if self.reader.peek() == Some(b'>') {
                    self.reader.read();
                    self.set_token(TokenKind::EndDic, token_start, token_start + 2)
                } else if self.options.strict {
                    self.reader.back();
                    Err(LexError::InvalidCharacter(token_start))
                } else {
                    tracing::warn!(offset = token_start, "stray '>' outside dictionary");
                    self.set_token(TokenKind::Other, token_start, token_start + 1)
                }
            }
            b'[' => self.set_token(TokenKind::StartArray, token_start, token_start + 1),
            b']' => self.set_token(TokenKind::EndArray, token_start, token_start + 1),
            // Braces delimit PostScript calculator functions; pass them
            // through as one-byte tokens so that content stays tokenizable.
            b'{' | b'}' => self.set_token(TokenKind::Other, token_start, token_start + 1),
            b'0'..=b'9' | b'+' | b'-' | b'.' => self.read_number(token_start),
            _ => self.read_other(token_start),
        }
    }

    /// Like [`next_token`](Self::next_token), but skips comments and fuses
    /// `Number Number {R|obj|endobj}` into a single `Ref`, `Obj` or
    /// `EndObj` token carrying the object and generation numbers.
    ///
    /// The fusion looks ahead with seek-based backtracking: when the
    /// pattern does not complete, the cursor rewinds to just past the
    /// first number and that number is reported alone.
    pub fn next_valid_token(&mut self) -> Result<TokenKind> {
        let mut level = 0u8;
        let mut n1 = (0u64, 0u64);
        let mut n2 = (0u64, 0u64);
        let mut resume = 0u64;

        loop {
            let kind = self.next_token()?;
            if kind == TokenKind::Comment {
                continue;
            }
            match level {
                0 => {
                    if kind != TokenKind::Number {
                        return Ok(kind);
                    }
                    resume = self.reader.position();
                    n1 = (self.start, self.end);
                    level = 1;
                }
                1 => {
                    if kind != TokenKind::Number {
                        return self.resume_as_number(resume, n1);
                    }
                    n2 = (self.start, self.end);
                    level = 2;
                }
                _ => {
                    if kind == TokenKind::Other {
                        let fused = if self.token_value_equals_to(b"R") {
                            Some(TokenKind::Ref)
                        } else if self.token_value_equals_to(b"obj") {
                            Some(TokenKind::Obj)
                        } else if self.token_value_equals_to(b"endobj") {
                            Some(TokenKind::EndObj)
                        } else {
                            None
                        };
                        if let Some(fused) = fused {
                            let obj = decode_integer(&self.bytes_of(n1.0, n1.1));
                            let gen = decode_integer(&self.bytes_of(n2.0, n2.1));
                            if let (Ok(obj), Ok(gen)) = (obj, gen) {
                                self.kind = fused;
                                self.obj_nr = obj;
                                self.gen_nr = gen;
                                self.start = n1.0;
                                return Ok(fused);
                            }
                        }
                    }
                    return self.resume_as_number(resume, n1);
                }
            }
        }
    }

    fn resume_as_number(&mut self, resume: u64, n1: (u64, u64)) -> Result<TokenKind> {
        self.reader.seek(resume);
        self.kind = TokenKind::Number;
        self.start = n1.0;
        self.end = n1.1;
        self.is_hex = false;
        Ok(TokenKind::Number)
    }

    fn set_token(&mut self, kind: TokenKind, start: u64, end: u64) -> Result<TokenKind> {
        self.kind = kind;
        self.start = start;
        self.end = end;
        Ok(kind)
    }

    fn read_comment(&mut self) -> Result<TokenKind> {
        let start = self.reader.position();
        let end = loop {
            match self.reader.read() {
                None => break self.reader.position(),
                Some(b'\r') | Some(b'\n') => break self.reader.position() - 1,
                Some(_) => {}
            }
        };
        self.set_token(TokenKind::Comment, start, end)
    }

    fn read_name(&mut self) -> Result<TokenKind> {
        let start = self.reader.position();
        let end = self.read_regular_run();
        self.set_token(TokenKind::Name, start, end)
    }

    fn read_literal_string(&mut self) -> Result<TokenKind> {
        let start = self.reader.position();
        let mut depth = 1u32;
        loop {
            match self.reader.read() {
                None => return Err(LexError::UnexpectedEof(self.reader.position())),
                Some(b'\\') => {
                    if self.reader.read().is_none() {
                        return Err(LexError::UnexpectedEof(self.reader.position()));
                    }
                }
                Some(b'(') => depth += 1,
                Some(b')') => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => {}
            }
        }
        self.is_hex = false;
        self.set_token(TokenKind::String, start, self.reader.position() - 1)
    }

    fn read_angle_bracket(&mut self, token_start: u64) -> Result<TokenKind> {
        if self.reader.peek() == Some(b'<') {
            self.reader.read();
            return self.set_token(TokenKind::StartDic, token_start, token_start + 2);
        }

        let start = self.reader.position();
        loop {
            match self.reader.read() {
                None => return Err(LexError::UnexpectedEof(self.reader.position())),
                Some(b'>') => break,
                Some(b) if b.is_ascii_hexdigit() || is_whitespace(b) => {}
                Some(_) => {
                    self.reader.back();
                    return Err(LexError::InvalidHexDigit(self.reader.position()));
                }
            }
        }
        self.is_hex = true;
        self.set_token(TokenKind::String, start, self.reader.position() - 1)
    }

    fn read_number(&mut self, token_start: u64) -> Result<TokenKind> {
        // Signs only count in the leading run, so `--15` stays one lexeme
        // while `-70.1--0.2` splits at the second sign run.
        let mut in_sign_run = matches!(self.source.get(token_start), Some(b'+') | Some(b'-'));
        loop {
            match self.reader.read() {
                None => break,
                Some(b'+') | Some(b'-') if in_sign_run => {}
                Some(b'0'..=b'9') | Some(b'.') => in_sign_run = false,
                Some(_) => {
                    self.reader.back();
                    break;
                }
            }
        }
        self.set_token(TokenKind::Number, token_start, self.reader.position())
    }

    fn read_other(&mut self, token_start: u64) -> Result<TokenKind> {
        let end = self.read_regular_run();
        let kind = if self.range_equals(token_start, end, b"stream") {
            TokenKind::Stream
        } else if self.range_equals(token_start, end, b"endstream") {
            TokenKind::EndStream
        } else {
            TokenKind::Other
        };
        self.set_token(kind, token_start, end)
    }

    /// Consume the current run of regular bytes, leaving the cursor on the
    /// terminating delimiter (if any) and returning the end offset.
    fn read_regular_run(&mut self) -> u64 {
        loop {
            match self.reader.read() {
                None => return self.reader.position(),
                Some(b) if is_regular(b) => {}
                Some(_) => {
                    self.reader.back();
                    return self.reader.position();
                }
            }
        }
    }

    fn bytes_of(&self, start: u64, end: u64) -> Vec<u8> {
        let len = (end - start) as usize;
        let mut buf = vec![0u8; len];
        let read = self.source.read_range(start, &mut buf);
        buf.truncate(read);
        buf
    }

    fn range_equals(&self, start: u64, end: u64, expected: &[u8]) -> bool {
        if end - start != expected.len() as u64 {
            return false;
        }
        expected
            .iter()
            .enumerate()
            .all(|(i, &b)| self.source.get(start + i as u64) == Some(b))
    }
}
