// src/term.rs

//! The terminal-source seam between the compositor and whatever owns the
//! character grid.
//!
//! [`TermSource`] is the read side the compositor consumes: cell contents,
//! cursor state, and one accumulated damage rectangle. [`PlainScreen`] is
//! the in-crate implementation, a byte-fed grid with no escape-sequence
//! parsing; a full emulator can stand in behind the same trait.

use log::{debug, trace};

use crate::cell::{Cell, CellAttrs, BLANK_CELL};
use crate::console::damage::{DamageRegion, DamageTracker};

/// Tab stops sit at every multiple of this column count.
pub const TAB_INTERVAL: usize = 8;

/// Read/feed interface of a terminal state machine.
///
/// The compositor reads the grid and cursor, consumes the damage rectangle
/// with [`mark_clean`](TermSource::mark_clean), and forces full repaints
/// with [`mark_all_dirty`](TermSource::mark_all_dirty). Input bytes flow in
/// through [`feed`](TermSource::feed); the source decides what they mean.
pub trait TermSource {
    /// Grid dimensions as (columns, rows).
    fn size(&self) -> (usize, usize);

    /// The cell at a grid position. Out-of-grid positions read as blank.
    fn cell(&self, x: usize, y: usize) -> Cell;

    /// Cursor position as (column, row).
    fn cursor(&self) -> (usize, usize);

    /// Whether the cursor should be drawn.
    fn cursor_visible(&self) -> bool;

    /// Everything that changed since the last [`mark_clean`](TermSource::mark_clean).
    fn damage(&self) -> DamageRegion;

    /// Resets the damage rectangle to empty.
    fn mark_clean(&mut self);

    /// Marks the whole grid damaged.
    fn mark_all_dirty(&mut self);

    /// Feeds raw bytes into the state machine.
    fn feed(&mut self, bytes: &[u8]);

    /// Resizes the grid, preserving what fits.
    fn resize(&mut self, cols: usize, rows: usize);
}

/// A plain character grid with teletype byte semantics.
///
/// Printables advance the cursor and wrap immediately at the last column;
/// `\n` moves to column 0 of the next row, `\r` to column 0, `\b` one
/// column left (clamped), `\t` to the next tab stop (clamped to the last
/// column). NUL and BEL are ignored, as are the remaining control bytes.
/// Writing past the bottom row scrolls the grid up one row and clears the
/// new bottom row.
#[derive(Debug)]
pub struct PlainScreen {
    cols: usize,
    rows: usize,
    grid: Vec<Vec<Cell>>,
    cursor_x: usize,
    cursor_y: usize,
    cursor_on: bool,
    attrs: CellAttrs,
    damage: DamageTracker,
}

impl PlainScreen {
    /// Creates a blank screen. Dimensions are clamped to at least one cell;
    /// the new screen starts fully damaged so the first redraw paints it.
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let mut damage = DamageTracker::new(cols, rows);
        damage.mark_all();
        PlainScreen {
            cols,
            rows,
            grid: vec![vec![BLANK_CELL; cols]; rows],
            cursor_x: 0,
            cursor_y: 0,
            cursor_on: true,
            attrs: CellAttrs::default(),
            damage,
        }
    }

    /// Sets the attributes applied to subsequently written cells.
    pub fn set_attrs(&mut self, attrs: CellAttrs) {
        self.attrs = attrs;
    }

    /// Shows or hides the cursor. The cursor cell is marked damaged so the
    /// next redraw reflects the change.
    pub fn set_cursor_visible(&mut self, on: bool) {
        if self.cursor_on != on {
            self.cursor_on = on;
            self.damage.mark_cell(self.cursor_x, self.cursor_y);
        }
    }

    /// Moves the cursor, marking both the old and new cells damaged.
    fn set_cursor(&mut self, x: usize, y: usize) {
        self.damage.mark_cell(self.cursor_x, self.cursor_y);
        self.cursor_x = x;
        self.cursor_y = y;
        self.damage.mark_cell(x, y);
    }

    /// Shifts every row up by one and clears the bottom row. Scrolling
    /// invalidates the whole grid.
    fn scroll_up(&mut self) {
        trace!("scroll up, clearing row {}", self.rows - 1);
        self.grid.rotate_left(1);
        self.grid[self.rows - 1].fill(BLANK_CELL);
        self.damage.mark_all();
    }

    /// Column 0 of the next row, scrolling at the bottom.
    fn line_feed(&mut self) {
        if self.cursor_y + 1 >= self.rows {
            self.scroll_up();
            self.set_cursor(0, self.rows - 1);
        } else {
            self.set_cursor(0, self.cursor_y + 1);
        }
    }

    fn putchar(&mut self, byte: u8) {
        match byte {
            b'\n' => self.line_feed(),
            b'\r' => self.set_cursor(0, self.cursor_y),
            0x08 => self.set_cursor(self.cursor_x.saturating_sub(1), self.cursor_y),
            b'\t' => {
                let stop = (self.cursor_x / TAB_INTERVAL + 1) * TAB_INTERVAL;
                self.set_cursor(stop.min(self.cols - 1), self.cursor_y);
            }
            // NUL, BEL, and the rest of the control range do nothing.
            0x00..=0x1F | 0x7F => {}
            _ => {
                self.grid[self.cursor_y][self.cursor_x] = Cell::new(char::from(byte), self.attrs);
                self.damage.mark_cell(self.cursor_x, self.cursor_y);
                if self.cursor_x + 1 >= self.cols {
                    self.line_feed();
                } else {
                    self.set_cursor(self.cursor_x + 1, self.cursor_y);
                }
            }
        }
    }
}

impl TermSource for PlainScreen {
    fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn cell(&self, x: usize, y: usize) -> Cell {
        if x < self.cols && y < self.rows {
            self.grid[y][x]
        } else {
            BLANK_CELL
        }
    }

    fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_on
    }

    fn damage(&self) -> DamageRegion {
        self.damage.region()
    }

    fn mark_clean(&mut self) {
        self.damage.clear();
    }

    fn mark_all_dirty(&mut self) {
        self.damage.mark_all();
    }

    fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.putchar(byte);
        }
    }

    fn resize(&mut self, cols: usize, rows: usize) {
        let cols = cols.max(1);
        let rows = rows.max(1);
        if cols == self.cols && rows == self.rows {
            return;
        }
        debug!(
            "resize {}x{} -> {}x{}",
            self.cols, self.rows, cols, rows
        );
        let old_cols = self.cols;
        self.grid
            .resize_with(rows, || vec![BLANK_CELL; old_cols]);
        for row in self.grid.iter_mut() {
            row.resize(cols, BLANK_CELL);
        }
        self.cols = cols;
        self.rows = rows;
        self.cursor_x = self.cursor_x.min(cols - 1);
        self.cursor_y = self.cursor_y.min(rows - 1);
        self.damage.resize(cols, rows);
    }
}
