// src/config.rs

//! Configuration structures for the rasterizer and console compositor.
//!
//! Deserializable from a JSON file; every field has a default so a partial
//! (or absent) file is valid. The render section feeds
//! `rasterizer::RenderContext`; configuration is data, the context is what
//! draw calls actually consume.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cell::ATTR_DEFAULT;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Glyph rendering settings.
    pub render: RenderConfig,
    /// Console compositor settings.
    pub console: ConsoleConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("failed to parse configuration JSON")
    }

    /// Loads a configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text)
    }
}

/// Glyph rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Rotation angle in degrees applied to glyph draws.
    pub rotation_degrees: i32,
    /// Sub-samples per source pixel when rotating. Values below 20 leave
    /// holes in diagonal rotated output.
    pub oversample: i32,
    /// Coverage substituted for fully-opaque alpha samples while rotating.
    pub rotated_coverage: u8,
    /// Upper bound on the flood-fill seed stack.
    pub flood_stack_capacity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            rotation_degrees: 0,
            oversample: 24,
            rotated_coverage: 192,
            flood_stack_capacity: 200,
        }
    }
}

/// Console compositor settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Grid width in cells.
    pub columns: u16,
    /// Grid height in cells.
    pub rows: u16,
    /// Attribute byte used for cells without explicit colors and for the
    /// cursor glyph.
    pub default_attr: u8,
    /// Font name resolved through the font fallback chain; None selects the
    /// built-in default font.
    pub font: Option<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            columns: 80,
            rows: 24,
            default_attr: ATTR_DEFAULT,
            font: None,
        }
    }
}
