// src/surface.rs

//! In-memory pixel surface and primitive drawing operations.
//!
//! A [`PixelSurface`] owns a `width * height` buffer of packed 32-bit
//! pixels plus the current foreground/background draw colors. Every
//! primitive clips per-pixel: coordinates outside the surface are skipped
//! on write and read as 0, never faulting. The blit operations additionally
//! clip their source rectangle (adjusting the destination symmetrically)
//! and handle same-buffer overlap by choosing a safe copy order.

use anyhow::ensure;
use log::trace;

use crate::color::{Pixel, PixelFormat};

/// Default seed-stack bound for [`PixelSurface::flood_fill`].
pub const FLOOD_STACK_CAPACITY: usize = 200;

/// An owned rectangular pixel buffer with fixed format and stride.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    format: PixelFormat,
    width: i32,
    height: i32,
    pitch: usize,
    pixels: Vec<Pixel>,
    fg: Pixel,
    bg: Pixel,
}

impl PixelSurface {
    /// Creates a surface of the given dimensions, cleared to the default
    /// background (blue) with the default foreground (white).
    pub fn new(format: PixelFormat, width: usize, height: usize) -> anyhow::Result<Self> {
        ensure!(
            width > 0 && height > 0,
            "surface dimensions must be positive, got {}x{}",
            width,
            height
        );
        ensure!(
            width <= i32::MAX as usize && height <= i32::MAX as usize,
            "surface dimensions {}x{} out of range",
            width,
            height
        );
        let mut surface = PixelSurface {
            format,
            width: width as i32,
            height: height as i32,
            pitch: width * format.bytes_per_pixel(),
            pixels: vec![0; width * height],
            fg: format.pack(0xFF, 0xFF, 0xFF),
            bg: format.pack(0x00, 0x00, 0xFF),
        };
        surface.clear();
        Ok(surface)
    }

    /// Surface width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Surface height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The pixel byte ordering this surface carries.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Row stride in bytes.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Read access to the pixel buffer, row-major.
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Current foreground draw color.
    #[inline]
    pub fn fg(&self) -> Pixel {
        self.fg
    }

    /// Current background draw color.
    #[inline]
    pub fn bg(&self) -> Pixel {
        self.bg
    }

    /// Sets the foreground draw color.
    #[inline]
    pub fn set_fg(&mut self, color: Pixel) {
        self.fg = color;
    }

    /// Sets the background draw color.
    #[inline]
    pub fn set_bg(&mut self, color: Pixel) {
        self.bg = color;
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Writes one pixel in the foreground color. Out-of-bounds is a no-op.
    #[inline]
    pub fn point(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = self.fg;
        }
    }

    /// Writes one pixel in an explicit color. Out-of-bounds is a no-op.
    #[inline]
    pub fn put(&mut self, x: i32, y: i32, color: Pixel) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Reads one pixel. Out-of-bounds reads as 0.
    #[inline]
    pub fn read(&self, x: i32, y: i32) -> Pixel {
        match self.index(x, y) {
            Some(i) => self.pixels[i],
            None => 0,
        }
    }

    /// Draws a horizontal line inclusive of `x1` and `x2`, clipped.
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32) {
        if y < 0 || y >= self.height {
            return;
        }
        let mut x = x1.max(0);
        // Bounds re-checked each step so a mid-span clip just stops early.
        while x <= x2 {
            if x >= self.width {
                return;
            }
            let i = y as usize * self.width as usize + x as usize;
            self.pixels[i] = self.fg;
            x += 1;
        }
    }

    /// Draws a vertical line inclusive of `y1` and `y2`, clipped.
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32) {
        if x < 0 || x >= self.width {
            return;
        }
        let mut y = y1.max(0);
        while y <= y2 {
            if y >= self.height {
                return;
            }
            let i = y as usize * self.width as usize + x as usize;
            self.pixels[i] = self.fg;
            y += 1;
        }
    }

    /// Draws a rectangle outline inclusive of both corners, clipped.
    /// Coordinates are normalized, so corner order does not matter.
    pub fn rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let xmin = x1.min(x2);
        let xmax = x1.max(x2);
        let ymin = y1.min(y2);
        let ymax = y1.max(y2);

        self.hline(xmin, xmax, ymin);
        self.hline(xmin, xmax, ymax);
        self.vline(xmin, ymin + 1, ymax - 1);
        self.vline(xmax, ymin + 1, ymax - 1);
    }

    /// Draws a filled rectangle inclusive of both corners, clipped.
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let xmin = x1.min(x2);
        let xmax = x1.max(x2);
        let mut y = y1.min(y2);
        let ymax = y1.max(y2);

        while y <= ymax {
            self.hline(xmin, xmax, y);
            y += 1;
        }
    }

    /// Fills the whole surface with the background color. The foreground
    /// draw color is left unchanged.
    pub fn clear(&mut self) {
        let bg = self.bg;
        self.pixels.fill(bg);
    }

    /// Draws a line with Bresenham's algorithm, visiting every pixel of the
    /// 8-connected path including both endpoints.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);

        while x != x2 || y != y2 {
            self.point(x, y);

            let e2 = err << 1;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
        self.point(x2, y2);
    }

    /// Draws a circle outline with the midpoint algorithm.
    pub fn circle(&mut self, x0: i32, y0: i32, r: i32) {
        let mut x = -r;
        let mut y = 0;
        let mut err = 2 - 2 * r;

        while -x >= y {
            self.point(x0 + x, y0 + y);
            self.point(x0 - x, y0 + y);
            self.point(x0 + x, y0 - y);
            self.point(x0 - x, y0 - y);

            self.point(x0 - y, y0 + x);
            self.point(x0 + y, y0 + x);
            self.point(x0 - y, y0 - x);
            self.point(x0 + y, y0 - x);

            let d = err;
            if d <= y {
                y += 1;
                err += y * 2 + 1;
            }
            if d > x || err > y {
                x += 1;
                err += x * 2 + 1;
            }
        }
    }

    /// Draws a filled circle as horizontal spans. Radius 1 or less
    /// degenerates to a single point.
    pub fn fill_circle(&mut self, x0: i32, y0: i32, r: i32) {
        if r <= 1 {
            self.point(x0, y0);
            return;
        }
        let mut x = -r;
        let mut y = 0;
        let mut err = 2 - 2 * r;

        loop {
            self.hline(x0 + x, x0 - x, y0 + y);
            if y > 0 {
                self.hline(x0 + x, x0 - x, y0 - y);
            }

            let d = err;
            if d <= y {
                y += 1;
                err += y * 2 + 1;
            }
            if d > x || err > y {
                x += 1;
                err += x * 2 + 1;
            }
            if x >= 0 {
                break;
            }
        }
    }

    /// Strokes a line by stamping a filled circle of radius `r` at every
    /// Bresenham step. Not antialiased.
    pub fn thick_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, r: i32) {
        let dx = (x2 - x1).abs();
        let dy = (y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x1, y1);

        while x != x2 || y != y2 {
            self.fill_circle(x, y, r);

            let e2 = err << 1;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
        self.fill_circle(x2, y2, r);
    }

    /// Scanline flood fill from `(x, y)` with the foreground color, using
    /// the default seed-stack bound.
    pub fn flood_fill(&mut self, x: i32, y: i32) {
        self.flood_fill_bounded(x, y, FLOOD_STACK_CAPACITY);
    }

    /// Scanline flood fill with an explicit seed-stack bound.
    ///
    /// Fills the 4-connected region of pixels matching the seed's color.
    /// Each popped seed is expanded to its full horizontal run; at most one
    /// new seed is pushed per contiguous matching run directly above and
    /// below. Seeds past `capacity` are dropped, degrading the fill rather
    /// than growing memory.
    pub fn flood_fill_bounded(&mut self, x: i32, y: i32, capacity: usize) {
        let org = self.read(x, y);
        if self.fg == org {
            return;
        }

        let mut stack: Vec<(i32, i32)> = Vec::with_capacity(capacity);
        push_seed(&mut stack, capacity, x, y);

        while let Some((sx, sy)) = stack.pop() {
            // Find the leftmost pixel of this run.
            let mut lx = sx;
            while lx >= 0 && self.read(lx, sy) == org {
                lx -= 1;
            }
            lx += 1;

            let mut seeded_up = false;
            let mut seeded_down = false;

            while lx < self.width && self.read(lx, sy) == org {
                self.point(lx, sy);

                if !seeded_up && sy > 0 && self.read(lx, sy - 1) == org {
                    push_seed(&mut stack, capacity, lx, sy - 1);
                    seeded_up = true;
                } else if seeded_up && self.read(lx, sy - 1) != org {
                    // Run above ended; the next match is a new run.
                    seeded_up = false;
                }

                if !seeded_down && sy + 1 < self.height && self.read(lx, sy + 1) == org {
                    push_seed(&mut stack, capacity, lx, sy + 1);
                    seeded_down = true;
                } else if seeded_down && self.read(lx, sy + 1) != org {
                    seeded_down = false;
                }

                lx += 1;
            }
        }
    }

    /// Copies a rectangle from another surface. The source rectangle is
    /// clipped to the source bounds first (moving the destination origin
    /// symmetrically), then to the destination bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn blit_from(
        &mut self,
        dst_x: i32,
        dst_y: i32,
        width: i32,
        height: i32,
        src: &PixelSurface,
        src_x: i32,
        src_y: i32,
    ) {
        let Some(r) = clip_blit(
            self.width,
            self.height,
            src.width,
            src.height,
            dst_x,
            dst_y,
            width,
            height,
            src_x,
            src_y,
        ) else {
            return;
        };

        let w = r.width as usize;
        for row in 0..r.height {
            let s = (r.src_y + row) as usize * src.width as usize + r.src_x as usize;
            let d = (r.dst_y + row) as usize * self.width as usize + r.dst_x as usize;
            self.pixels[d..d + w].copy_from_slice(&src.pixels[s..s + w]);
        }
    }

    /// Copies a rectangle within this surface, handling any overlap.
    ///
    /// Rows are walked bottom-up when the copy moves downward so source
    /// rows are read before they are overwritten; horizontal overlap within
    /// a row is covered by the memmove semantics of `copy_within`.
    pub fn blit_within(
        &mut self,
        dst_x: i32,
        dst_y: i32,
        width: i32,
        height: i32,
        src_x: i32,
        src_y: i32,
    ) {
        let Some(r) = clip_blit(
            self.width,
            self.height,
            self.width,
            self.height,
            dst_x,
            dst_y,
            width,
            height,
            src_x,
            src_y,
        ) else {
            return;
        };

        if r.src_y < r.dst_y {
            for row in (0..r.height).rev() {
                self.copy_row(&r, row);
            }
        } else {
            for row in 0..r.height {
                self.copy_row(&r, row);
            }
        }
    }

    fn copy_row(&mut self, r: &BlitRect, row: i32) {
        let w = r.width as usize;
        let s = (r.src_y + row) as usize * self.width as usize + r.src_x as usize;
        let d = (r.dst_y + row) as usize * self.width as usize + r.dst_x as usize;
        self.pixels.copy_within(s..s + w, d);
    }
}

/// A fully clipped blit rectangle. Width and height are positive and both
/// rectangles lie inside their surfaces.
#[derive(Debug, Clone, Copy)]
struct BlitRect {
    dst_x: i32,
    dst_y: i32,
    src_x: i32,
    src_y: i32,
    width: i32,
    height: i32,
}

#[allow(clippy::too_many_arguments)]
fn clip_blit(
    dst_w: i32,
    dst_h: i32,
    src_w: i32,
    src_h: i32,
    mut dst_x: i32,
    mut dst_y: i32,
    mut width: i32,
    mut height: i32,
    mut src_x: i32,
    mut src_y: i32,
) -> Option<BlitRect> {
    // Clip to the source surface, shifting the destination to match.
    if src_x < 0 {
        width += src_x;
        dst_x -= src_x;
        src_x = 0;
    }
    if src_y < 0 {
        height += src_y;
        dst_y -= src_y;
        src_y = 0;
    }
    if src_x + width > src_w {
        width = src_w - src_x;
    }
    if src_y + height > src_h {
        height = src_h - src_y;
    }

    // Clip to the destination surface, shifting the source to match.
    let x1 = dst_x.max(0);
    let y1 = dst_y.max(0);
    let x2 = (dst_x + width).min(dst_w);
    let y2 = (dst_y + height).min(dst_h);
    if x2 - x1 <= 0 || y2 - y1 <= 0 {
        return None;
    }
    src_x += x1 - dst_x;
    src_y += y1 - dst_y;

    Some(BlitRect {
        dst_x: x1,
        dst_y: y1,
        src_x,
        src_y,
        width: x2 - x1,
        height: y2 - y1,
    })
}

fn push_seed(stack: &mut Vec<(i32, i32)>, capacity: usize, x: i32, y: i32) {
    if stack.len() < capacity {
        stack.push((x, y));
    } else {
        trace!("flood fill seed stack full, dropping seed ({}, {})", x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn surface(w: usize, h: usize) -> PixelSurface {
        PixelSurface::new(PixelFormat::Argb8888, w, h).unwrap()
    }

    fn count_fg(s: &PixelSurface) -> usize {
        s.pixels().iter().filter(|&&p| p == s.fg()).count()
    }

    #[test]
    fn new_clears_to_background() {
        let s = surface(4, 3);
        assert_eq!(s.pixels().len(), 12);
        assert_eq!(s.pixels().len() * 4, s.height() as usize * s.pitch());
        assert!(s.pixels().iter().all(|&p| p == s.bg()));
        assert_eq!(s.fg(), 0xFFFF_FFFF);
        assert_eq!(s.bg(), 0xFF00_00FF);
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(PixelSurface::new(PixelFormat::Argb8888, 0, 5).is_err());
        assert!(PixelSurface::new(PixelFormat::Abgr8888, 5, 0).is_err());
    }

    #[test]
    fn point_and_read_out_of_bounds_are_safe() {
        // Contract: writes outside the surface are dropped, reads return 0,
        // and in-bounds pixels are untouched.
        let mut s = surface(4, 4);
        let before = s.pixels().to_vec();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            s.point(x, y);
            assert_eq!(s.read(x, y), 0);
        }
        assert_eq!(s.pixels(), &before[..]);
    }

    #[test]
    fn point_writes_foreground() {
        let mut s = surface(4, 4);
        s.point(2, 1);
        assert_eq!(s.read(2, 1), s.fg());
    }

    #[test]
    fn put_writes_explicit_color() {
        let mut s = surface(4, 4);
        s.put(1, 1, 0xFF12_3456);
        assert_eq!(s.read(1, 1), 0xFF12_3456);
    }

    #[test]
    fn hline_fills_inclusive_range() {
        let mut s = surface(8, 3);
        s.hline(2, 5, 1);
        for x in 0..8 {
            let expect = (2..=5).contains(&x);
            assert_eq!(s.read(x, 1) == s.fg(), expect, "x={}", x);
        }
    }

    #[test]
    fn hline_clips_both_ends() {
        let mut s = surface(8, 3);
        s.hline(-5, 2, 0);
        s.hline(6, 20, 2);
        assert_eq!(count_fg(&s), 3 + 2);
        assert_eq!(s.read(0, 0), s.fg());
        assert_eq!(s.read(2, 0), s.fg());
        assert_eq!(s.read(7, 2), s.fg());
    }

    #[test]
    fn hline_off_surface_is_noop() {
        let mut s = surface(8, 3);
        let before = s.pixels().to_vec();
        s.hline(0, 7, -1);
        s.hline(0, 7, 3);
        s.hline(8, 20, 1);
        assert_eq!(s.pixels(), &before[..]);
    }

    #[test]
    fn vline_fills_inclusive_range_and_clips() {
        let mut s = surface(3, 8);
        s.vline(1, 2, 5);
        s.vline(2, 6, 20);
        for y in 0..8 {
            assert_eq!(s.read(1, y) == s.fg(), (2..=5).contains(&y), "y={}", y);
        }
        assert_eq!(s.read(2, 7), s.fg());
        assert_eq!(s.read(2, 5), s.bg());
    }

    #[test]
    fn rect_draws_outline_only() {
        let mut s = surface(8, 8);
        s.rect(1, 1, 5, 4);
        // Corners and edges.
        assert_eq!(s.read(1, 1), s.fg());
        assert_eq!(s.read(5, 4), s.fg());
        assert_eq!(s.read(3, 1), s.fg());
        assert_eq!(s.read(1, 3), s.fg());
        // Interior untouched.
        assert_eq!(s.read(3, 3), s.bg());
        assert_eq!(count_fg(&s), 2 * 5 + 2 * 2);
    }

    #[test]
    fn fill_rect_normalizes_corners() {
        let mut a = surface(8, 8);
        let mut b = surface(8, 8);
        a.fill_rect(5, 4, 2, 1);
        b.fill_rect(2, 1, 5, 4);
        assert_eq!(a.pixels(), b.pixels());
        assert_eq!(count_fg(&a), 4 * 4);
    }

    #[test]
    fn clear_restores_background_and_keeps_fg() {
        let mut s = surface(6, 6);
        s.set_bg(0xFF10_2030);
        s.fill_rect(0, 0, 5, 5);
        s.clear();
        assert!(s.pixels().iter().all(|&p| p == 0xFF10_2030));
        assert_eq!(s.fg(), 0xFFFF_FFFF);
    }

    #[test]
    fn line_visits_major_axis_plus_one_pixels() {
        // Contract: a Bresenham line changes exactly max(|dx|,|dy|)+1
        // pixels and both endpoints are among them.
        let cases = [
            (0, 0, 7, 3),
            (7, 3, 0, 0),
            (0, 0, 3, 7),
            (2, 2, 2, 6),
            (1, 5, 6, 5),
            (0, 0, 6, 6),
            (3, 3, 3, 3),
        ];
        for (x1, y1, x2, y2) in cases {
            let mut s = surface(10, 10);
            s.line(x1, y1, x2, y2);
            let expected = (x2 - x1).abs().max((y2 - y1).abs()) as usize + 1;
            assert_eq!(count_fg(&s), expected, "line ({x1},{y1})-({x2},{y2})");
            assert_eq!(s.read(x1, y1), s.fg());
            assert_eq!(s.read(x2, y2), s.fg());
        }
    }

    #[test]
    fn line_clips_silently() {
        let mut s = surface(4, 4);
        s.line(-3, -3, 6, 6);
        // Only the on-surface diagonal portion lands.
        for i in 0..4 {
            assert_eq!(s.read(i, i), s.fg());
        }
        assert_eq!(count_fg(&s), 4);
    }

    #[test]
    fn circle_hits_cardinal_extremes() {
        let mut s = surface(16, 16);
        s.circle(8, 8, 3);
        assert_eq!(s.read(11, 8), s.fg());
        assert_eq!(s.read(5, 8), s.fg());
        assert_eq!(s.read(8, 11), s.fg());
        assert_eq!(s.read(8, 5), s.fg());
        // Center stays empty.
        assert_eq!(s.read(8, 8), s.bg());
    }

    #[test]
    fn circle_is_symmetric() {
        let s = {
            let mut s = surface(17, 17);
            s.circle(8, 8, 5);
            s
        };
        for y in 0..17 {
            for x in 0..17 {
                let p = s.read(x, y);
                assert_eq!(p, s.read(16 - x, y), "x mirror at ({x},{y})");
                assert_eq!(p, s.read(x, 16 - y), "y mirror at ({x},{y})");
            }
        }
    }

    #[test]
    fn fill_circle_radius_one_is_a_point() {
        for r in [0, 1] {
            let mut s = surface(8, 8);
            s.fill_circle(4, 4, r);
            assert_eq!(count_fg(&s), 1, "r={}", r);
            assert_eq!(s.read(4, 4), s.fg());
        }
    }

    #[test]
    fn fill_circle_spans() {
        let mut s = surface(16, 16);
        s.fill_circle(8, 8, 3);
        // Widest span on the center row, narrowing towards the poles.
        for x in 5..=11 {
            assert_eq!(s.read(x, 8), s.fg(), "center row x={}", x);
        }
        for x in 7..=9 {
            assert_eq!(s.read(x, 5), s.fg());
            assert_eq!(s.read(x, 11), s.fg());
        }
        assert_eq!(s.read(4, 8), s.bg());
        assert_eq!(count_fg(&s), 37);
    }

    #[test]
    fn thick_line_covers_endpoints_with_disks() {
        let mut s = surface(20, 20);
        s.thick_line(4, 4, 14, 4, 2);
        assert_eq!(s.read(4, 4), s.fg());
        assert_eq!(s.read(14, 4), s.fg());
        // Disk radius reaches above and below the path.
        assert_eq!(s.read(9, 2), s.fg());
        assert_eq!(s.read(9, 6), s.fg());
    }

    #[test]
    fn flood_fill_same_color_is_noop() {
        // Contract: filling with the color already present changes nothing.
        let mut s = surface(8, 8);
        let fg = s.fg();
        s.set_bg(fg);
        s.clear();
        let before = s.pixels().to_vec();
        s.flood_fill(4, 4);
        assert_eq!(s.pixels(), &before[..]);
    }

    #[test]
    fn flood_fill_stays_inside_border() {
        // Contract: the fill changes exactly the connected region inside
        // the border and nothing else.
        let mut s = surface(12, 12);
        let border = 0xFF00_FF00;
        let fill = 0xFFAA_5500;
        s.set_fg(border);
        s.rect(2, 2, 9, 9);
        s.set_fg(fill);
        s.flood_fill(5, 5);

        for y in 0..12 {
            for x in 0..12 {
                let p = s.read(x, y);
                let inside = (3..=8).contains(&x) && (3..=8).contains(&y);
                let on_border = !inside
                    && (2..=9).contains(&x)
                    && (2..=9).contains(&y)
                    && (x == 2 || x == 9 || y == 2 || y == 9);
                if inside {
                    assert_eq!(p, fill, "inside ({x},{y})");
                } else if on_border {
                    assert_eq!(p, border, "border ({x},{y})");
                } else {
                    assert_eq!(p, s.bg(), "outside ({x},{y})");
                }
            }
        }
    }

    #[test]
    fn flood_fill_follows_connected_run() {
        // An L-shaped region fills across the bend.
        let mut s = surface(8, 8);
        let region = 0xFF11_1111;
        s.set_fg(region);
        s.fill_rect(0, 0, 5, 1);
        s.fill_rect(4, 0, 5, 5);
        s.set_fg(0xFF77_7777);
        s.flood_fill(0, 0);
        assert_eq!(s.read(5, 5), 0xFF77_7777);
        assert_eq!(s.read(0, 1), 0xFF77_7777);
        assert_eq!(s.read(0, 2), s.bg());
    }

    #[test]
    fn flood_fill_bounded_degrades_without_corruption() {
        // A saturated seed stack drops seeds; the fill stays inside the
        // region and at least the seed's own run is completed.
        let mut s = surface(16, 16);
        let before_bg = s.bg();
        s.flood_fill_bounded(8, 8, 1);
        let fg = s.fg();
        for x in 0..16 {
            assert_eq!(s.read(x, 8), fg, "seed run x={}", x);
        }
        // Untouched pixels keep their original color.
        assert!(s
            .pixels()
            .iter()
            .all(|&p| p == fg || p == before_bg));
    }

    #[test]
    fn blit_from_copies_rectangle() {
        let mut src = surface(8, 8);
        src.set_fg(0xFFAB_CDEF);
        src.fill_rect(1, 1, 4, 4);
        let mut dst = surface(8, 8);
        dst.blit_from(3, 2, 4, 4, &src, 1, 1);
        assert_eq!(dst.read(3, 2), 0xFFAB_CDEF);
        assert_eq!(dst.read(6, 5), 0xFFAB_CDEF);
        assert_eq!(dst.read(2, 2), dst.bg());
    }

    #[test]
    fn blit_from_clips_negative_source() {
        // A negative source origin shrinks the copy and shifts the
        // destination by the same amount.
        let mut src = surface(4, 4);
        src.set_fg(0xFF12_3123);
        src.fill_rect(0, 0, 3, 3);
        let mut dst = surface(8, 8);
        dst.blit_from(2, 2, 4, 4, &src, -2, -2);
        assert_eq!(dst.read(4, 4), 0xFF12_3123);
        assert_eq!(dst.read(5, 5), 0xFF12_3123);
        assert_eq!(dst.read(3, 3), dst.bg());
        assert_eq!(dst.read(2, 2), dst.bg());
    }

    #[test]
    fn blit_from_clips_oversized_request() {
        let src = surface(4, 4);
        let mut dst = surface(4, 4);
        // Larger than either surface and hanging off the destination edge.
        dst.blit_from(2, 2, 100, 100, &src, 0, 0);
        assert_eq!(dst.read(3, 3), src.bg());
        // No panic and nothing outside the surface written is implied by
        // reaching this point with the buffer intact.
        assert_eq!(dst.pixels().len(), 16);
    }

    #[test]
    fn blit_within_overlap_matches_reference_copy() {
        // Contract: overlapping same-surface blits behave like memmove.
        // Verified against a non-overlapping copy of a duplicated buffer.
        for (dx, dy) in [(3, 0), (0, 3), (3, 3), (-2, 0), (0, -2), (-2, -2)] {
            let mut s = surface(20, 20);
            for y in 0..10 {
                for x in 0..10 {
                    s.put(x + 5, y + 5, 0xFF00_0000 | ((y * 10 + x) as u32));
                }
            }
            let reference = {
                let src = s.clone();
                let mut r = s.clone();
                r.blit_from(5 + dx, 5 + dy, 10, 10, &src, 5, 5);
                r
            };
            s.blit_within(5 + dx, 5 + dy, 10, 10, 5, 5);
            assert_eq!(s.pixels(), reference.pixels(), "shift ({dx},{dy})");
        }
    }

    #[test]
    fn blit_within_pure_shift_preserves_values() {
        let mut s = surface(20, 10);
        for y in 0..10 {
            for x in 0..10 {
                s.put(x, y, 0xFF00_0000 | ((y * 16 + x) as u32));
            }
        }
        s.blit_within(3, 0, 10, 10, 0, 0);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(
                    s.read(x + 3, y),
                    0xFF00_0000 | ((y * 16 + x) as u32),
                    "shifted pixel ({x},{y})"
                );
            }
        }
    }
}
