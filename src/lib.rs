//! # pdflex
//!
//! The lexical core of a PDF toolkit: a position-aware tokenizer over raw
//! PDF bytes, the decoders for PDF's two delicate literal forms (names and
//! strings), and the producer-side primitives writers use (numeric
//! formatting and the Type 3 glyph metric preamble).
//!
//! PDF is not parseable forward-only — cross-reference tables, stream
//! lengths and object repair all require jumping around the file — so the
//! tokenizer works over a random-access [`ByteSource`] rather than a
//! forward stream. Tokens are reported as typed byte ranges into the
//! source; decoding a name or string is a separate, on-demand step.
//!
//! ## Quick start
//!
//! ```rust
//! use pdflex::{source, Lexer, TokenKind};
//!
//! # fn main() -> pdflex::Result<()> {
//! let src = source::from_bytes(b"/Root 46 0 R".to_vec());
//! let mut lexer = Lexer::new(src);
//!
//! assert_eq!(lexer.next_valid_token()?, TokenKind::Name);
//! assert_eq!(lexer.byte_content(), b"Root");
//!
//! assert_eq!(lexer.next_valid_token()?, TokenKind::Ref);
//! assert_eq!(lexer.obj_nr(), 46);
//! assert_eq!(lexer.gen_nr(), 0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`source`] — random-access byte sources (in-memory, memory-mapped
//!   file) and the positioned reader
//! - [`lexer`] — the tokenizer, token kinds and lexing options
//! - [`strings`] — name/string decoders and the inverse encoders
//! - [`encoding`] — PDFDocEncoding / UTF-16BE text conversion
//! - [`number`] — tolerant numeric decoding for `Number` lexemes
//! - [`writer`] — content-stream sink with deterministic number formatting
//! - [`glyph`] — Type 3 glyph metric preamble writer and parser

pub mod encoding;
pub mod error;
pub mod glyph;
pub mod lexer;
pub mod number;
pub mod source;
pub mod strings;
pub mod writer;

pub use error::{LexError, Result};
pub use glyph::{parse_glyph_preamble, parse_glyph_preamble_strict, write_glyph_preamble, GlyphMetrics};
pub use lexer::{LexOptions, Lexer, Token, TokenKind};
pub use source::{from_bytes, from_file, ByteSource, MemorySource, SourceReader};
pub use writer::ContentWriter;
