//! # Raster Console
//!
//! Software rasterization and text compositing: pixel surfaces with drawing
//! primitives, a bitmap/alpha glyph rasterizer with fixed-point rotation,
//! and a damage-tracked console compositor over pluggable terminal-source
//! and display-backend seams.

pub mod cell;
pub mod color;
pub mod config;
pub mod console;
pub mod display;
pub mod font;
pub mod rasterizer;
pub mod surface;
pub mod term;

// Re-export the surface and its color model
pub use color::{color_from_attr, Pixel, PixelFormat, CGA_PALETTE};
pub use surface::PixelSurface;

// Re-export the console stack
pub use cell::{Cell, CellAttrs, StyleFlags, ATTR_DEFAULT};
pub use config::{Config, ConsoleConfig, RenderConfig};
pub use console::{Console, DamageRegion, DamageTracker, FlushMode};
pub use display::{BackendEvent, DisplayBackend, HeadlessBackend, PresentedRect};
pub use term::{PlainScreen, TermSource};

// Re-export the glyph pipeline
pub use font::{default_font, load_font, Font};
pub use rasterizer::{draw_glyph, draw_string, DrawBg, RenderContext};
