// src/console/damage.rs

//! Cell-level damage tracking for the console compositor.
//!
//! A terminal source accumulates everything that changed since the last
//! redraw into a single [`DamageRegion`], the bounding box of all touched
//! cells. One box over-approximates scattered edits, but redrawing a few
//! clean cells costs far less than bookkeeping per-cell flags.

/// A rectangle of damaged cells, end-exclusive on both axes.
///
/// `width == 0` or `height == 0` is the empty region; coordinates of an
/// empty region carry no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageRegion {
    /// Leftmost damaged column.
    pub x: usize,
    /// Topmost damaged row.
    pub y: usize,
    /// Damaged columns, counting from `x`.
    pub width: usize,
    /// Damaged rows, counting from `y`.
    pub height: usize,
}

impl DamageRegion {
    /// The empty region.
    pub const EMPTY: DamageRegion = DamageRegion {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// A region covering exactly one cell.
    pub fn cell(x: usize, y: usize) -> Self {
        DamageRegion {
            x,
            y,
            width: 1,
            height: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// One past the rightmost damaged column.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// One past the bottommost damaged row.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// The bounding box of both regions. Empty regions are identities.
    pub fn union(self, other: DamageRegion) -> DamageRegion {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        DamageRegion {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Accumulates damage for a cell grid of known dimensions.
#[derive(Debug, Clone)]
pub struct DamageTracker {
    cols: usize,
    rows: usize,
    region: DamageRegion,
}

impl DamageTracker {
    /// Creates a tracker for a `cols` by `rows` grid with no damage.
    pub fn new(cols: usize, rows: usize) -> Self {
        DamageTracker {
            cols,
            rows,
            region: DamageRegion::EMPTY,
        }
    }

    /// The accumulated damage.
    pub fn region(&self) -> DamageRegion {
        self.region
    }

    /// Marks one cell damaged. Cells outside the grid are ignored.
    pub fn mark_cell(&mut self, x: usize, y: usize) {
        if x < self.cols && y < self.rows {
            self.region = self.region.union(DamageRegion::cell(x, y));
        }
    }

    /// Merges a rectangle of cells into the damage. The rectangle is
    /// clipped to the grid; a rectangle entirely outside it is ignored.
    pub fn mark_rect(&mut self, x: usize, y: usize, width: usize, height: usize) {
        if x >= self.cols || y >= self.rows {
            return;
        }
        self.region = self.region.union(DamageRegion {
            x,
            y,
            width: width.min(self.cols - x),
            height: height.min(self.rows - y),
        });
    }

    /// Marks a full row damaged.
    pub fn mark_row(&mut self, y: usize) {
        if y < self.rows && self.cols > 0 {
            self.region = self.region.union(DamageRegion {
                x: 0,
                y,
                width: self.cols,
                height: 1,
            });
        }
    }

    /// Marks the whole grid damaged.
    pub fn mark_all(&mut self) {
        self.region = DamageRegion {
            x: 0,
            y: 0,
            width: self.cols,
            height: self.rows,
        };
    }

    /// Clears the accumulated damage.
    pub fn clear(&mut self) {
        self.region = DamageRegion::EMPTY;
    }

    /// Returns the accumulated damage and clears it.
    pub fn take(&mut self) -> DamageRegion {
        std::mem::replace(&mut self.region, DamageRegion::EMPTY)
    }

    /// Adopts new grid dimensions and marks everything damaged.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.mark_all();
    }
}
