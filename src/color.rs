// src/color.rs

//! Packed pixel values, the two supported 32-bit byte orderings, and the
//! CGA attribute palette.
//!
//! A [`Pixel`] is always 32 bits with alpha in the top byte. The two
//! orderings differ only in where red and blue sit; [`PixelFormat::pack`]
//! produces a pixel in the surface's native encoding so the rasterizer can
//! write values without any per-pixel format dispatch.

use serde::{Deserialize, Serialize};

/// A packed 32-bit pixel value in a surface's native byte order.
pub type Pixel = u32;

/// The 32-bit pixel orderings a surface can carry.
///
/// In-register layouts (independent of host endianness):
/// `Argb8888` = `0xAARRGGBB`, `Abgr8888` = `0xAABBGGRR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PixelFormat {
    /// Alpha, red, green, blue (memory bytes B G R A on little-endian).
    #[default]
    Argb8888,
    /// Alpha, blue, green, red (memory bytes R G B A on little-endian).
    Abgr8888,
}

impl PixelFormat {
    /// Packs opaque RGB components into this format.
    #[inline]
    pub const fn pack(self, r: u8, g: u8, b: u8) -> Pixel {
        match self {
            PixelFormat::Argb8888 => {
                0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            }
            PixelFormat::Abgr8888 => {
                0xFF00_0000 | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
            }
        }
    }

    /// Extracts (r, g, b) from a pixel in this format.
    #[inline]
    pub const fn unpack(self, p: Pixel) -> (u8, u8, u8) {
        match self {
            PixelFormat::Argb8888 => ((p >> 16) as u8, (p >> 8) as u8, p as u8),
            PixelFormat::Abgr8888 => (p as u8, (p >> 8) as u8, (p >> 16) as u8),
        }
    }

    /// Bytes per pixel for this format. Both orderings are 32-bit.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        4
    }
}

/// CGA palette for 16 color attribute systems, as (r, g, b).
///
/// Indices 0-7 are the dim colors selectable as backgrounds; 8-15 are the
/// bright variants reached by the bold bit.
pub const CGA_PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00), // black
    (0x00, 0x00, 0xAA), // blue
    (0x00, 0xAA, 0x00), // green
    (0x00, 0xAA, 0xAA), // cyan
    (0xAA, 0x00, 0x00), // red
    (0xAA, 0x00, 0xAA), // magenta
    (0xAA, 0x55, 0x00), // brown
    (0xAA, 0xAA, 0xAA), // light gray
    (0x55, 0x55, 0x55), // gray
    (0x55, 0x55, 0xFF), // light blue
    (0x55, 0xFF, 0x55), // light green
    (0x55, 0xFF, 0xFF), // light cyan
    (0xFF, 0x55, 0x55), // light red
    (0xFF, 0x55, 0xFF), // light magenta
    (0xFF, 0xFF, 0x55), // yellow
    (0xFF, 0xFF, 0xFF), // white
];

/// Resolves an attribute byte to a (foreground, background) pixel pair.
///
/// Bits 0-3 select the foreground palette entry, bits 4-6 the background
/// (backgrounds cannot be bright), bit 7 is reserved.
pub fn color_from_attr(format: PixelFormat, attr: u8) -> (Pixel, Pixel) {
    let fg = (attr & 0x0F) as usize;
    let bg = ((attr & 0x70) >> 4) as usize;
    let (fr, fgreen, fb) = CGA_PALETTE[fg];
    let (br, bgreen, bb) = CGA_PALETTE[bg];
    (format.pack(fr, fgreen, fb), format.pack(br, bgreen, bb))
}
