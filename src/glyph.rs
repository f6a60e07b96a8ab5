//! Type 3 glyph metric preambles.
//!
//! A Type 3 glyph description is a small content stream that must start
//! with a metric operator: `wx wy d0` for colored glyphs or
//! `wx wy llx lly urx ury d1` for uncolored ones (`wy` is always 0). The
//! writer emits that preamble through a [`ContentWriter`]; the parser
//! recovers the metrics when an existing glyph stream is reopened.

use crate::error::{LexError, Result};
use crate::writer::ContentWriter;
use std::io::Write;

const D0: &[u8] = b"d0\n";
const D1: &[u8] = b"d1\n";

/// Metrics carried by a glyph preamble. The bounding box fields are
/// meaningful only when `is_color` is false; a colored glyph (`d0`)
/// carries just the advance.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    pub wx: f64,
    pub llx: f64,
    pub lly: f64,
    pub urx: f64,
    pub ury: f64,
    pub is_color: bool,
}

/// Write the metric preamble for `metrics` to the front of a glyph
/// content stream.
pub fn write_glyph_preamble<W: Write>(
    out: &mut ContentWriter<W>,
    metrics: &GlyphMetrics,
) -> Result<()> {
    if metrics.is_color {
        out.write_float(metrics.wx)?
            .write_space()?
            .write_float(0.0)? // wy
            .write_space()?
            .write_bytes(D0)?;
    } else {
        out.write_float(metrics.wx)?
            .write_space()?
            .write_float(0.0)? // wy
            .write_space()?
            .write_float(metrics.llx)?
            .write_space()?
            .write_float(metrics.lly)?
            .write_space()?
            .write_float(metrics.urx)?
            .write_space()?
            .write_float(metrics.ury)?
            .write_space()?
            .write_bytes(D1)?;
    }
    Ok(())
}

/// Recover metrics from the bytes of an existing glyph stream.
///
/// Lenient: when the stream contains a recognizable `d0`/`d1` preamble
/// with the right number of operands, `metrics` is updated; any other
/// shape leaves it untouched. Partial or rewritten glyph streams are
/// common in existing documents, so nothing is reported.
pub fn parse_glyph_preamble(bytes: &[u8], metrics: &mut GlyphMetrics) {
    if let Some(pos) = find(bytes, D0) {
        if let Some(fields) = number_fields(&bytes[..pos]) {
            if fields.len() == 2 {
                metrics.is_color = true;
                metrics.wx = fields[0];
                return;
            }
        }
        tracing::debug!("unrecognized d0 preamble shape, keeping existing metrics");
    } else if let Some(pos) = find(bytes, D1) {
        if let Some(fields) = number_fields(&bytes[..pos]) {
            if fields.len() == 6 {
                metrics.is_color = false;
                metrics.wx = fields[0];
                // fields[1] is wy, always zero
                metrics.llx = fields[2];
                metrics.lly = fields[3];
                metrics.urx = fields[4];
                metrics.ury = fields[5];
                return;
            }
        }
        tracing::debug!("unrecognized d1 preamble shape, keeping existing metrics");
    }
}

/// Strict variant of [`parse_glyph_preamble`]: the stream must begin with
/// a well-formed preamble, otherwise [`LexError::MalformedGlyphPreamble`].
pub fn parse_glyph_preamble_strict(bytes: &[u8]) -> Result<GlyphMetrics> {
    let mut metrics = GlyphMetrics::default();
    if let Some(pos) = find(bytes, D0) {
        let fields = number_fields(&bytes[..pos]).ok_or(LexError::MalformedGlyphPreamble)?;
        if fields.len() != 2 {
            return Err(LexError::MalformedGlyphPreamble);
        }
        metrics.is_color = true;
        metrics.wx = fields[0];
    } else if let Some(pos) = find(bytes, D1) {
        let fields = number_fields(&bytes[..pos]).ok_or(LexError::MalformedGlyphPreamble)?;
        if fields.len() != 6 {
            return Err(LexError::MalformedGlyphPreamble);
        }
        metrics.wx = fields[0];
        metrics.llx = fields[2];
        metrics.lly = fields[3];
        metrics.urx = fields[4];
        metrics.ury = fields[5];
    } else {
        return Err(LexError::MalformedGlyphPreamble);
    }
    Ok(metrics)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Split the bytes before the operator on whitespace and parse every
/// field as a number; `None` when any field fails to parse.
fn number_fields(bytes: &[u8]) -> Option<Vec<f64>> {
    let text = std::str::from_utf8(bytes).ok()?;
    text.split_ascii_whitespace()
        .map(|field| field.parse::<f64>().ok())
        .collect()
}
