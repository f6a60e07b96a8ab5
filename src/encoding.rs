//! Text decoding for PDF string bytes.
//!
//! Decoded string bytes become Unicode text one of two ways: a `FE FF` BOM
//! selects UTF-16BE, anything else goes through the process-wide
//! PDFDocEncoding table. The table is a Latin-1 identity base with the PDF
//! accent code points at 0x18–0x1F; the 0x80–0x9F block stays identity so
//! text round-trips byte for byte with documents written by legacy
//! producers.

use lazy_static::lazy_static;

lazy_static! {
    /// Byte-to-char table for PDFDocEncoding.
    static ref PDF_DOC_ENCODING: [char; 256] = {
        let mut table = ['\0'; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = char::from_u32(i as u32).unwrap();
        }
        table[0x18] = '\u{02D8}'; // breve
        table[0x19] = '\u{02C7}'; // caron
        table[0x1A] = '\u{02C6}'; // circumflex
        table[0x1B] = '\u{02D9}'; // dot accent
        table[0x1C] = '\u{02DD}'; // double acute
        table[0x1D] = '\u{02DB}'; // ogonek
        table[0x1E] = '\u{02DA}'; // ring
        table[0x1F] = '\u{02DC}'; // small tilde
        table
    };
}

/// Convert decoded string bytes to text.
///
/// Bytes starting with the `FE FF` BOM are UTF-16BE (the BOM is dropped,
/// ill-formed units become U+FFFD, a dangling trailing byte too); all other
/// byte sequences decode through PDFDocEncoding.
pub fn bytes_to_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        decode_utf16_be(&bytes[2..])
    } else {
        bytes.iter().map(|&b| PDF_DOC_ENCODING[b as usize]).collect()
    }
}

fn decode_utf16_be(bytes: &[u8]) -> String {
    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    if bytes.len() % 2 != 0 {
        units.push(char::REPLACEMENT_CHARACTER as u16);
    }
    char::decode_utf16(units)
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}
