// src/font/mod.rs

//! Compiled font descriptors and loading.
//!
//! A [`Font`] is an immutable descriptor over a glyph data blob: monochrome
//! bitmap rows packed MSB-first into 1/2/4-byte big-endian words, or 8-bit
//! alpha coverage bytes, one per pixel. Fonts are shared read-only through
//! `Arc` and never mutated after load.
//!
//! Lookup goes through [`load_font`]: embedded fonts by name first, then the
//! path as given, then under `fonts/`.

mod builtin;
mod disk;

pub use builtin::{default_font, lookup_builtin, DEFAULT_FONT_NAME};
pub use disk::load_disk_font;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

/// Element size of the packed bitmap words in a font's data blob.
///
/// Legacy descriptors that left this unset meant 16-bit words, so that is
/// the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WordWidth {
    /// 8-bit words (ROM console fonts).
    One,
    /// 16-bit words.
    #[default]
    Two,
    /// 32-bit words (glyphs wider than 16 pixels).
    Four,
}

impl WordWidth {
    /// Word size in bytes.
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            WordWidth::One => 1,
            WordWidth::Two => 2,
            WordWidth::Four => 4,
        }
    }

    /// Word size in bits.
    #[inline]
    pub fn bits(self) -> u32 {
        (self.bytes() as u32) << 3
    }
}

/// Per-glyph byte offsets into the data blob, for proportional fonts whose
/// glyphs occupy variable-size storage. Element width follows the table the
/// font was compiled with.
#[derive(Debug, Clone)]
pub enum OffsetTable {
    Width8(Vec<u8>),
    Width16(Vec<u16>),
    Width32(Vec<u32>),
}

impl OffsetTable {
    /// Byte offset of a glyph's data. Indices past the table read as 0
    /// rather than faulting, so a malformed table degrades to drawing the
    /// first glyph's data.
    pub fn byte_offset(&self, index: usize) -> usize {
        match self {
            OffsetTable::Width8(t) => t.get(index).copied().unwrap_or(0) as usize,
            OffsetTable::Width16(t) => t.get(index).copied().unwrap_or(0) as usize,
            OffsetTable::Width32(t) => t.get(index).copied().unwrap_or(0) as usize,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            OffsetTable::Width8(t) => t.len(),
            OffsetTable::Width16(t) => t.len(),
            OffsetTable::Width32(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One interval of a sparse charcode range table: codepoints
/// `first..=last` map to consecutive glyph indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRange {
    pub first: u16,
    pub last: u16,
}

/// An immutable compiled font.
#[derive(Debug, Clone)]
pub struct Font {
    /// Font name, used for registry lookup and diagnostics.
    pub name: String,
    /// Widest glyph in pixels; fixed-width fonts use this for every glyph.
    pub maxwidth: i32,
    /// Glyph height in pixels.
    pub height: i32,
    /// Baseline height. Descriptor metadata only; the compositor renders
    /// from the cell top.
    pub ascent: i32,
    /// First codepoint covered when no range table is present.
    pub firstchar: u32,
    /// Number of glyphs.
    pub size: usize,
    /// Bits per pixel of glyph storage: 1 = monochrome bitmap, 8 = alpha.
    pub bpp: u8,
    /// Word size of the packed bitmap rows.
    pub word_width: WordWidth,
    /// Glyph data blob.
    pub bits: Vec<u8>,
    /// Per-glyph byte offsets into `bits`, or None for uniform stride.
    pub offsets: Option<OffsetTable>,
    /// Per-glyph advance widths, or None for fixed width.
    pub widths: Option<Vec<u8>>,
    /// Sparse charcode ranges ordered by glyph index, or None for the
    /// direct `codepoint - firstchar` mapping.
    pub range: Option<Vec<GlyphRange>>,
    /// Glyph index drawn for codepoints the font does not cover.
    pub default_glyph: usize,
}

impl Font {
    /// Resolves a codepoint to a glyph index.
    ///
    /// With a range table, the first interval containing the codepoint
    /// wins and maps it to that interval's contiguous index block. Without
    /// one, the index is `codepoint - firstchar`. Any miss or out-of-range
    /// result falls back to the default glyph, and the returned index is
    /// always `< size` (for a non-empty font).
    pub fn glyph_index(&self, codepoint: u32) -> usize {
        let index = if let Some(ranges) = &self.range {
            let mut offset = 0usize;
            let mut found = None;
            for r in ranges {
                let (first, last) = (u32::from(r.first), u32::from(r.last));
                if codepoint >= first && codepoint <= last {
                    found = Some((codepoint - first) as usize + offset);
                    break;
                }
                offset += (last - first) as usize + 1;
                if offset >= self.size {
                    break;
                }
            }
            found.unwrap_or(self.default_glyph)
        } else if codepoint < self.firstchar {
            self.default_glyph
        } else {
            (codepoint - self.firstchar) as usize
        };

        if index < self.size {
            index
        } else {
            self.default_glyph.min(self.size.saturating_sub(1))
        }
    }

    /// Byte offset of a glyph's data in the blob.
    pub fn glyph_start(&self, index: usize) -> usize {
        match &self.offsets {
            Some(table) => table.byte_offset(index),
            None => index * self.word_width.bytes() * self.height as usize,
        }
    }

    /// Advance width of a glyph in pixels.
    pub fn glyph_width(&self, index: usize) -> i32 {
        match &self.widths {
            Some(widths) => widths
                .get(index)
                .copied()
                .map(i32::from)
                .unwrap_or(self.maxwidth),
            None => self.maxwidth,
        }
    }
}

/// Loads a font by name or path.
///
/// `None` resolves to the embedded default font. Otherwise the name is
/// tried against the embedded table, then as an on-disk path verbatim,
/// then under `fonts/`.
pub fn load_font(name: Option<&str>) -> anyhow::Result<Arc<Font>> {
    let Some(name) = name else {
        return Ok(default_font());
    };

    if let Some(font) = lookup_builtin(name) {
        return Ok(font);
    }

    if let Ok(font) = load_disk_font(Path::new(name)) {
        return Ok(Arc::new(font));
    }
    let fallback = Path::new("fonts").join(name);
    load_disk_font(&fallback)
        .map(Arc::new)
        .with_context(|| format!("font '{}' is neither embedded nor on disk", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn direct_font() -> Font {
        Font {
            name: "direct".to_string(),
            maxwidth: 8,
            height: 4,
            ascent: 3,
            firstchar: 32,
            size: 10,
            bpp: 1,
            word_width: WordWidth::One,
            bits: vec![0; 40],
            offsets: None,
            widths: None,
            range: None,
            default_glyph: 9,
        }
    }

    #[test]
    fn direct_mapping_and_default_fallback() {
        let font = direct_font();
        assert_eq!(font.glyph_index(32), 0);
        assert_eq!(font.glyph_index(41), 9);
        // Below firstchar and past the last glyph both miss.
        assert_eq!(font.glyph_index(31), 9);
        assert_eq!(font.glyph_index(0), 9);
        assert_eq!(font.glyph_index(42), 9);
        assert_eq!(font.glyph_index(u32::MAX), 9);
    }

    #[test]
    fn resolved_index_is_always_in_range() {
        let mut font = direct_font();
        // A descriptor whose default glyph is itself out of range still
        // resolves to something addressable.
        font.default_glyph = 99;
        for c in [0, 31, 32, 41, 42, 1000] {
            assert!(font.glyph_index(c) < font.size, "codepoint {}", c);
        }
    }

    #[test]
    fn range_table_maps_intervals_to_contiguous_indices() {
        let mut font = direct_font();
        font.range = Some(vec![
            GlyphRange { first: 100, last: 103 },
            GlyphRange { first: 200, last: 205 },
        ]);
        assert_eq!(font.glyph_index(100), 0);
        assert_eq!(font.glyph_index(103), 3);
        assert_eq!(font.glyph_index(200), 4);
        assert_eq!(font.glyph_index(205), 9);
        // Gaps and out-of-table codepoints fall back.
        assert_eq!(font.glyph_index(104), 9);
        assert_eq!(font.glyph_index(150), 9);
        assert_eq!(font.glyph_index(1), 9);
    }

    #[test]
    fn glyph_start_uses_uniform_stride_without_offsets() {
        let font = direct_font();
        assert_eq!(font.glyph_start(0), 0);
        assert_eq!(font.glyph_start(3), 3 * 4);
        let mut wide = direct_font();
        wide.word_width = WordWidth::Two;
        assert_eq!(wide.glyph_start(3), 3 * 2 * 4);
    }

    #[test]
    fn glyph_start_prefers_offset_table() {
        let mut font = direct_font();
        font.offsets = Some(OffsetTable::Width16(vec![0, 7, 19]));
        assert_eq!(font.glyph_start(1), 7);
        assert_eq!(font.glyph_start(2), 19);
        // Past the table reads as offset 0.
        assert_eq!(font.glyph_start(5), 0);
    }

    #[test]
    fn offset_table_widths_index_alike() {
        let t8 = OffsetTable::Width8(vec![0, 16, 32]);
        let t16 = OffsetTable::Width16(vec![0, 16, 32]);
        let t32 = OffsetTable::Width32(vec![0, 16, 32]);
        for t in [&t8, &t16, &t32] {
            assert_eq!(t.byte_offset(1), 16);
            assert_eq!(t.byte_offset(2), 32);
            assert_eq!(t.len(), 3);
            assert!(!t.is_empty());
        }
    }

    #[test]
    fn glyph_width_falls_back_to_maxwidth() {
        let mut font = direct_font();
        assert_eq!(font.glyph_width(3), 8);
        font.widths = Some(vec![5, 6, 7]);
        assert_eq!(font.glyph_width(1), 6);
        // Width table shorter than the glyph count degrades to maxwidth.
        assert_eq!(font.glyph_width(7), 8);
    }

    #[test]
    fn word_width_default_is_sixteen_bit() {
        assert_eq!(WordWidth::default(), WordWidth::Two);
        assert_eq!(WordWidth::One.bits(), 8);
        assert_eq!(WordWidth::Two.bits(), 16);
        assert_eq!(WordWidth::Four.bits(), 32);
    }

    #[test]
    fn load_font_none_is_the_default() {
        let font = load_font(None).unwrap();
        assert_eq!(font.name, DEFAULT_FONT_NAME);
    }

    #[test]
    fn load_font_unknown_name_errors() {
        let err = load_font(Some("no-such-font.F16")).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("no-such-font"), "unexpected error: {}", msg);
    }
}
