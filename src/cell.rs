// src/cell.rs

//! Grid cell contents and the attribute-byte model shared with the terminal
//! state machine.
//!
//! A cell carries a codepoint plus [`CellAttrs`]: optional foreground and
//! background palette indices (None means "use the console default") and
//! style flags. The compositor folds these into a single attribute byte:
//! bits 0-3 foreground, bits 4-6 background, bit 7 reserved.

use bitflags::bitflags;

/// Default display attribute: magenta on cyan.
pub const ATTR_DEFAULT: u8 = 0x35;

bitflags! {
    /// Per-cell style flags reported by a terminal source.
    ///
    /// Only `BOLD` and `REVERSE` affect attribute composition; the rest are
    /// carried for sources that track them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 1 << 0;
        const DIM       = 1 << 1;
        const UNDERLINE = 1 << 2;
        const BLINK     = 1 << 3;
        const REVERSE   = 1 << 4;
        const HIDDEN    = 1 << 5;
    }
}

/// Visual attributes of one character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellAttrs {
    /// Foreground palette index 0-15, or None for the console default.
    pub fg: Option<u8>,
    /// Background palette index 0-7, or None for the console default.
    pub bg: Option<u8>,
    /// Style flags.
    pub flags: StyleFlags,
}

impl CellAttrs {
    /// Folds these attributes into an attribute byte, starting from the
    /// console's default attribute.
    ///
    /// Bold adds 8 to the whole byte, so a foreground already in the bright
    /// range carries into the background nibble; reverse swaps the nibbles.
    /// Both match the reference display adapter behavior.
    pub fn to_attr_byte(self, default_attr: u8) -> u8 {
        let mut attr = default_attr;
        if let Some(fg) = self.fg {
            attr = (attr & 0xF0) | (fg & 0x0F);
        }
        if let Some(bg) = self.bg {
            attr = (attr & 0x0F) | ((bg & 0x07) << 4);
        }
        if self.flags.contains(StyleFlags::BOLD) {
            attr = attr.wrapping_add(0x08);
        }
        if self.flags.contains(StyleFlags::REVERSE) {
            attr = ((attr >> 4) & 0x0F) | ((attr << 4) & 0xF0);
        }
        attr
    }
}

/// One character cell as reported by a terminal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The codepoint to render.
    pub ch: char,
    /// The cell's visual attributes.
    pub attrs: CellAttrs,
}

/// A blank cell: space with fully-default attributes.
pub const BLANK_CELL: Cell = Cell {
    ch: ' ',
    attrs: CellAttrs {
        fg: None,
        bg: None,
        flags: StyleFlags::empty(),
    },
};

impl Default for Cell {
    fn default() -> Self {
        BLANK_CELL
    }
}

impl Cell {
    /// Creates a cell with the given codepoint and attributes.
    pub fn new(ch: char, attrs: CellAttrs) -> Self {
        Self { ch, attrs }
    }
}
