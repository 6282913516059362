// src/console/mod.rs

//! Damage-tracked text console compositor.
//!
//! [`Console`] sits between a [`TermSource`] (the character grid) and a
//! [`DisplayBackend`] (the screen): it turns the source's damage rectangle
//! into glyph draws on a [`PixelSurface`] and tells the backend which pixel
//! rectangle changed. One frame walks Clean -> Dirty (damage accumulates) ->
//! `redraw` -> Clean.
//!
//! Glyphs are drawn with the console origin as the rotation pivot and the
//! cell position as the pen offset, so a rotated console rotates as a whole
//! block rather than spinning each glyph in place.

pub mod damage;

pub use damage::{DamageRegion, DamageTracker};

use std::sync::Arc;

use anyhow::Result;
use log::{debug, warn};

use crate::color::color_from_attr;
use crate::config::Config;
use crate::display::DisplayBackend;
use crate::font::{self, Font};
use crate::rasterizer::{draw_glyph, DrawBg, RenderContext};
use crate::surface::PixelSurface;
use crate::term::{PlainScreen, TermSource};

/// What `redraw` does after updating the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushMode {
    /// Update the surface only.
    Surface,
    /// Update the surface and present the damaged pixel rectangle.
    Present,
    /// Damage the whole grid before drawing, so every glyph is redrawn.
    /// Used after a rotation change. Does not present.
    FullRepaint,
}

/// A text console composited from a terminal source onto a pixel surface.
pub struct Console<T: TermSource> {
    source: T,
    font: Arc<Font>,
    ctx: RenderContext,
    default_attr: u8,
    char_width: i32,
    char_height: i32,
}

impl Console<PlainScreen> {
    /// Builds a console over a [`PlainScreen`] sized from the configuration.
    pub fn from_config(cfg: &Config) -> Self {
        let screen = PlainScreen::new(cfg.console.columns as usize, cfg.console.rows as usize);
        Console::new(screen, cfg)
    }
}

impl<T: TermSource> Console<T> {
    /// Builds a console over an existing terminal source.
    ///
    /// The configured font is resolved through the fallback chain; if it
    /// cannot be loaded the built-in default is used instead.
    pub fn new(source: T, cfg: &Config) -> Self {
        let font = match font::load_font(cfg.console.font.as_deref()) {
            Ok(font) => font,
            Err(err) => {
                warn!("configured font unavailable: {:#}; using builtin", err);
                font::default_font()
            }
        };
        Console {
            source,
            ctx: RenderContext::from(&cfg.render),
            default_attr: cfg.console.default_attr,
            char_width: font.maxwidth,
            char_height: font.height,
            font,
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }

    pub fn font(&self) -> &Arc<Font> {
        &self.font
    }

    /// Cell dimensions in pixels, from the current font.
    pub fn cell_size(&self) -> (i32, i32) {
        (self.char_width, self.char_height)
    }

    /// The pixel footprint of the whole grid.
    pub fn pixel_size(&self) -> (usize, usize) {
        let (cols, rows) = self.source.size();
        (
            cols * self.char_width as usize,
            rows * self.char_height as usize,
        )
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Hands raw bytes to the terminal source.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.source.feed(bytes);
    }

    /// Switches fonts through the fallback chain and adopts the new cell
    /// dimensions. A failed load keeps the current font; either way the
    /// console never ends up without one.
    pub fn load_font(&mut self, name: Option<&str>) {
        match font::load_font(name) {
            Ok(font) => {
                self.char_width = font.maxwidth;
                self.char_height = font.height;
                self.font = font;
                self.source.mark_all_dirty();
            }
            Err(err) => {
                warn!("font load failed: {:#}; keeping {}", err, self.font.name);
            }
        }
    }

    /// Sets the rotation angle for subsequent draws. The caller should
    /// follow with a [`FlushMode::FullRepaint`] redraw.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.ctx.angle = degrees;
    }

    /// Resizes the grid and clears the surface; the source's resize leaves
    /// the whole grid damaged for the next redraw.
    pub fn resize(&mut self, surface: &mut PixelSurface, cols: usize, rows: usize) {
        surface.clear();
        self.source.resize(cols, rows);
    }

    /// Redraws every damaged cell at `origin + cell * cell_size`, draws the
    /// cursor, optionally presents the damaged pixel rectangle, and leaves
    /// the source clean. A clean source is a no-op.
    pub fn redraw<B: DisplayBackend>(
        &mut self,
        surface: &mut PixelSurface,
        origin_x: i32,
        origin_y: i32,
        flush: FlushMode,
        backend: &mut B,
    ) -> Result<()> {
        if flush == FlushMode::FullRepaint {
            self.source.mark_all_dirty();
        }
        let damage = self.source.damage();
        if damage.is_empty() {
            return Ok(());
        }
        debug!(
            "redraw cells ({},{})..({},{}) flush {:?}",
            damage.x,
            damage.y,
            damage.right(),
            damage.bottom(),
            flush
        );

        for y in damage.y..damage.bottom() {
            for x in damage.x..damage.right() {
                let cell = self.source.cell(x, y);
                let attr = cell.attrs.to_attr_byte(self.default_attr);
                let (fg, bg) = color_from_attr(surface.format(), attr);
                draw_glyph(
                    surface,
                    &self.ctx,
                    &self.font,
                    cell.ch as u32,
                    origin_x,
                    origin_y,
                    x as i32 * self.char_width,
                    y as i32 * self.char_height,
                    fg,
                    bg,
                    DrawBg::OpaquePadded,
                );
            }
        }

        if self.source.cursor_visible() {
            let (cx, cy) = self.source.cursor();
            let (fg, bg) = color_from_attr(surface.format(), self.default_attr);
            draw_glyph(
                surface,
                &self.ctx,
                &self.font,
                '_' as u32,
                origin_x,
                origin_y,
                cx as i32 * self.char_width,
                cy as i32 * self.char_height,
                fg,
                bg,
                DrawBg::Transparent,
            );
        }

        if flush == FlushMode::Present {
            backend.present(
                surface,
                origin_x + damage.x as i32 * self.char_width,
                origin_y + damage.y as i32 * self.char_height,
                damage.width as i32 * self.char_width,
                damage.height as i32 * self.char_height,
            )?;
        }

        self.source.mark_clean();
        Ok(())
    }
}
