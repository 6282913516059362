// src/font/disk.rs

//! Loader for on-disk ROM console fonts.
//!
//! These are headerless `*.F<height>` blobs (`VGA-ROM.F16`, `DOSJ-437.F19`):
//! 256 glyphs, 8 pixels wide, one packed byte per scanline, `height * 256`
//! bytes total. The glyph height comes from the filename suffix.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context};
use log::debug;

use super::{Font, WordWidth};

const DISK_FONT_WIDTH: i32 = 8;
const DISK_FONT_GLYPHS: usize = 256;
const DEFAULT_HEIGHT: i32 = 16;

/// Loads a ROM font blob. The returned font covers codepoints 0..256
/// directly with a fixed 8-pixel width.
pub fn load_disk_font(path: &Path) -> anyhow::Result<Font> {
    let height = height_from_name(path);
    let size = height as usize * DISK_FONT_GLYPHS;

    let mut data = fs::read(path)
        .with_context(|| format!("reading font file {}", path.display()))?;
    ensure!(
        data.len() >= size,
        "font file {} too short: {} bytes, expected {}",
        path.display(),
        data.len(),
        size
    );
    // Trailing bytes past the glyph table are ignored.
    data.truncate(size);

    debug!(
        "loaded disk font {} {}x{} ({} bytes)",
        path.display(),
        DISK_FONT_WIDTH,
        height,
        size
    );

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Font {
        name,
        maxwidth: DISK_FONT_WIDTH,
        height,
        ascent: 0,
        firstchar: 0,
        size: DISK_FONT_GLYPHS,
        bpp: 1,
        word_width: WordWidth::One,
        bits: data,
        offsets: None,
        widths: None,
        range: None,
        default_glyph: 0,
    })
}

/// Glyph height encoded in the `.F<nn>` filename suffix, defaulting to 16
/// when absent or unparseable.
fn height_from_name(path: &Path) -> i32 {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.strip_prefix('F'))
        .and_then(|digits| digits.parse::<i32>().ok())
        .filter(|&h| h > 0)
        .unwrap_or(DEFAULT_HEIGHT)
}
