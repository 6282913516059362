// src/rasterizer/mod.rs

//! Glyph rasterization onto a [`PixelSurface`].
//!
//! Two glyph storage formats are supported: packed monochrome bitmaps
//! (foreground/background per bit) and 8-bit alpha coverage maps blended
//! against the destination. Both paths can rotate by an arbitrary angle
//! through a fixed-point transform, with a two-sample oversampling loop
//! that closes the gaps rotation would otherwise leave in the output.
//!
//! Every knob that affects rendering (angle, oversampling step, the
//! rotated coverage correction) lives on [`RenderContext`], passed
//! explicitly into each draw call.

pub mod trig;

use log::trace;

use crate::color::Pixel;
use crate::config::RenderConfig;
use crate::font::{Font, WordWidth};
use crate::surface::PixelSurface;

use trig::{fast_cos, fast_sin};

/// How a glyph draw treats background pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawBg {
    /// Leave background pixels untouched.
    Transparent,
    /// Paint background pixels at the glyph's own width.
    Opaque,
    /// Paint background pixels and pad narrow glyphs to the font's max
    /// width, so fixed-width console cells stay uniform.
    OpaquePadded,
}

/// Per-draw rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Rotation angle in degrees. Zero selects the straight blit path.
    pub angle: i32,
    /// Sub-pixel offset (in 1/64 pixel units) of the second rotation
    /// sample.
    pub oversample: i32,
    /// Coverage that replaces full opacity on the first rotated sample.
    pub rotated_coverage: u8,
}

impl Default for RenderContext {
    fn default() -> Self {
        RenderContext {
            angle: 0,
            oversample: 24,
            rotated_coverage: 192,
        }
    }
}

impl From<&RenderConfig> for RenderContext {
    fn from(cfg: &RenderConfig) -> Self {
        RenderContext {
            angle: cfg.rotation_degrees,
            oversample: cfg.oversample,
            rotated_coverage: cfg.rotated_coverage,
        }
    }
}

/// Fixed-point rotation about the draw origin `(sx, sy)`.
///
/// Glyph coordinates and the table sine/cosine are both scaled by 64, so
/// the product carries 12 fraction bits; adding `1 << 11` rounds before
/// the shift back to pixel space.
struct Rotation {
    sin_a: i32,
    cos_a: i32,
    sx: i32,
    sy: i32,
    width: i32,
    height: i32,
}

impl Rotation {
    fn new(ctx: &RenderContext, surface: &PixelSurface, sx: i32, sy: i32) -> Self {
        Rotation {
            sin_a: fast_sin(ctx.angle),
            cos_a: fast_cos(ctx.angle),
            sx,
            sy,
            width: surface.width(),
            height: surface.height(),
        }
    }

    /// Maps a glyph pixel (with sub-sample offset `s`) to a destination
    /// pixel, or None when it lands outside the surface.
    #[inline]
    fn map(&self, gx: i32, gy: i32, s: i32) -> Option<(i32, i32)> {
        let fx = (gx << 6) + s;
        let fy = (gy << 6) + s;
        let dx = self.sx + ((self.cos_a * fx - self.sin_a * fy + (1 << 11)) >> 12);
        let dy = self.sy + ((self.sin_a * fx + self.cos_a * fy + (1 << 11)) >> 12);
        if dx < 0 || dx >= self.width || dy < 0 || dy >= self.height {
            None
        } else {
            Some((dx, dy))
        }
    }
}

/// Reads MSB-first bits out of packed big-endian words. Reads past the
/// end of the data yield zero bits, so a truncated blob draws blank
/// instead of panicking.
struct WordReader<'a> {
    data: &'a [u8],
    pos: usize,
    word_width: WordWidth,
    word: u32,
    bits_left: u32,
}

impl<'a> WordReader<'a> {
    fn new(data: &'a [u8], pos: usize, word_width: WordWidth) -> Self {
        WordReader {
            data,
            pos,
            word_width,
            word: 0,
            bits_left: 0,
        }
    }

    #[inline]
    fn next_bit(&mut self) -> bool {
        if self.bits_left == 0 {
            let mut word = 0u32;
            for _ in 0..self.word_width.bytes() {
                word = (word << 8) | u32::from(self.data.get(self.pos).copied().unwrap_or(0));
                self.pos += 1;
            }
            self.word = word;
            self.bits_left = self.word_width.bits();
        }
        let set = self.word & (1 << (self.word_width.bits() - 1)) != 0;
        self.word <<= 1;
        self.bits_left -= 1;
        set
    }

    /// Discards the rest of the current word; every glyph row starts on a
    /// fresh word.
    #[inline]
    fn end_row(&mut self) {
        self.bits_left = 0;
    }
}

/// Column where glyph data ends and background padding begins, plus the
/// total column count. Without padding both are the glyph width.
fn pad_bounds(font: &Font, width: i32, drawbg: DrawBg) -> (i32, i32) {
    if drawbg == DrawBg::OpaquePadded && width != font.maxwidth {
        (width, font.maxwidth)
    } else {
        (width, width)
    }
}

/// Draws one monochrome bitmap glyph and returns its advance width.
#[allow(clippy::too_many_arguments)]
pub fn draw_bitmap_glyph(
    surface: &mut PixelSurface,
    ctx: &RenderContext,
    font: &Font,
    codepoint: u32,
    sx: i32,
    sy: i32,
    xoff: i32,
    yoff: i32,
    fg: Pixel,
    bg: Pixel,
    drawbg: DrawBg,
) -> i32 {
    let index = font.glyph_index(codepoint);
    let start = font.glyph_start(index);
    let width = font.glyph_width(index);
    let (zero_x, max_x) = pad_bounds(font, width, drawbg);

    let rotation = (ctx.angle != 0).then(|| Rotation::new(ctx, surface, sx, sy));
    let sample_buf = [0, ctx.oversample];
    let samples = &sample_buf[..if ctx.oversample >= 1 { 2 } else { 1 }];
    let mut reader = WordReader::new(&font.bits, start, font.word_width);

    for y in 0..font.height {
        for x in 0..max_x {
            let set = if x < zero_x { reader.next_bit() } else { false };
            match &rotation {
                Some(rot) => {
                    for &s in samples {
                        if let Some((dx, dy)) = rot.map(x + xoff, y + yoff, s) {
                            if set {
                                surface.put(dx, dy, fg);
                            } else if drawbg != DrawBg::Transparent {
                                surface.put(dx, dy, bg);
                            }
                        }
                    }
                }
                None => {
                    if set {
                        surface.put(sx + x + xoff, sy + y + yoff, fg);
                    } else if drawbg != DrawBg::Transparent {
                        surface.put(sx + x + xoff, sy + y + yoff, bg);
                    }
                }
            }
        }
        reader.end_row();
    }
    width
}

/// Draws one alpha-coverage glyph and returns its advance width.
///
/// Full coverage writes the foreground directly; zero coverage writes the
/// background when requested; anything between blends the foreground over
/// the destination. On the rotated path a fully opaque sample is knocked
/// down to the context's correction coverage at the first sub-sample and
/// stays reduced for the second.
#[allow(clippy::too_many_arguments)]
pub fn draw_alpha_glyph(
    surface: &mut PixelSurface,
    ctx: &RenderContext,
    font: &Font,
    codepoint: u32,
    sx: i32,
    sy: i32,
    xoff: i32,
    yoff: i32,
    fg: Pixel,
    bg: Pixel,
    drawbg: DrawBg,
) -> i32 {
    let index = font.glyph_index(codepoint);
    let mut pos = font.glyph_start(index);
    let width = font.glyph_width(index);
    let (zero_x, max_x) = pad_bounds(font, width, drawbg);

    let rotation = (ctx.angle != 0).then(|| Rotation::new(ctx, surface, sx, sy));
    let sample_buf = [0, ctx.oversample];
    let samples = &sample_buf[..if ctx.oversample >= 1 { 2 } else { 1 }];

    for y in 0..font.height {
        for x in 0..max_x {
            let mut coverage = if x < zero_x {
                let byte = font.bits.get(pos).copied().unwrap_or(0);
                pos += 1;
                u32::from(byte)
            } else {
                0
            };
            match &rotation {
                Some(rot) => {
                    for &s in samples {
                        if let Some((dx, dy)) = rot.map(x + xoff, y + yoff, s) {
                            if s == 0 && coverage == 0xFF {
                                coverage = u32::from(ctx.rotated_coverage);
                            }
                            blend_coverage(surface, dx, dy, fg, bg, coverage, drawbg);
                        }
                    }
                }
                None => {
                    blend_coverage(
                        surface,
                        sx + x + xoff,
                        sy + y + yoff,
                        fg,
                        bg,
                        coverage,
                        drawbg,
                    );
                }
            }
        }
    }
    width
}

/// Writes one pixel of coverage `0..=255`: full coverage is the
/// foreground verbatim, partial coverage blends over the destination on
/// the red/blue channel pair and the green channel separately so the
/// products never cross a channel boundary.
fn blend_coverage(
    surface: &mut PixelSurface,
    x: i32,
    y: i32,
    fg: Pixel,
    bg: Pixel,
    coverage: u32,
    drawbg: DrawBg,
) {
    if coverage == 0xFF {
        surface.put(x, y, fg);
        return;
    }
    if drawbg != DrawBg::Transparent {
        surface.put(x, y, bg);
    }
    if coverage != 0 {
        let dst = surface.read(x, y);
        let srb = ((coverage * (fg & 0x00FF_00FF)) >> 8) & 0x00FF_00FF;
        let sg = ((coverage * (fg & 0x0000_FF00)) >> 8) & 0x0000_FF00;
        let da = 0xFF - coverage;
        let drb = (((dst & 0x00FF_00FF) * da >> 8) & 0x00FF_00FF) + srb;
        let dg = (((dst & 0x0000_FF00) * da >> 8) & 0x0000_FF00) + sg;
        surface.put(x, y, drb + dg);
    }
}

/// Draws one glyph, dispatching on the font's storage format. Returns the
/// advance width.
#[allow(clippy::too_many_arguments)]
pub fn draw_glyph(
    surface: &mut PixelSurface,
    ctx: &RenderContext,
    font: &Font,
    codepoint: u32,
    sx: i32,
    sy: i32,
    xoff: i32,
    yoff: i32,
    fg: Pixel,
    bg: Pixel,
    drawbg: DrawBg,
) -> i32 {
    if font.bpp == 8 {
        draw_alpha_glyph(
            surface, ctx, font, codepoint, sx, sy, xoff, yoff, fg, bg, drawbg,
        )
    } else {
        draw_bitmap_glyph(
            surface, ctx, font, codepoint, sx, sy, xoff, yoff, fg, bg, drawbg,
        )
    }
}

/// Draws a string, advancing the pen by each glyph's returned width.
/// Returns the total advance.
#[allow(clippy::too_many_arguments)]
pub fn draw_string(
    surface: &mut PixelSurface,
    ctx: &RenderContext,
    font: &Font,
    text: &str,
    sx: i32,
    sy: i32,
    xoff: i32,
    yoff: i32,
    fg: Pixel,
    bg: Pixel,
    drawbg: DrawBg,
) -> i32 {
    trace!(
        "draw_string {:?} at ({}, {}) pen {} font {}",
        text,
        sx,
        sy,
        xoff,
        font.name
    );
    let mut pen = xoff;
    for ch in text.chars() {
        pen += draw_glyph(
            surface, ctx, font, ch as u32, sx, sy, pen, yoff, fg, bg, drawbg,
        );
    }
    pen - xoff
}
