// src/rasterizer/trig.rs

//! Fixed-point trigonometry for glyph rotation.
//!
//! Sine values are scaled by 64 and tabulated per degree over the first
//! half turn; the second half is the negation. Good enough for rotating
//! glyph cells, with no floating point anywhere on the path.

/// Per-degree sine scaled by 64, covering 0..180 degrees.
#[rustfmt::skip]
const SIN_TABLE: [i32; 180] = [
     0,  1,  2,  3,  4,  5,  6,  7,  8, 10, 11, 12, 13, 14, 15, // 0
    16, 17, 18, 19, 20, 21, 22, 23, 25, 26, 27, 28, 29, 30, 31, // 15
    31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 41, 42, 43, 44, // 30
    45, 46, 46, 47, 48, 49, 49, 50, 51, 51, 52, 53, 53, 54, 54, // 45
    55, 55, 56, 57, 57, 58, 58, 58, 59, 59, 60, 60, 60, 61, 61, // 60
    61, 62, 62, 62, 62, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63, // 75
    64, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63, 62, 62, 62, 62, // 90
    61, 61, 61, 60, 60, 60, 59, 59, 58, 58, 58, 57, 57, 56, 55, // 105
    55, 54, 54, 53, 53, 52, 51, 51, 50, 49, 49, 48, 47, 46, 46, // 120
    45, 44, 43, 42, 41, 41, 40, 39, 38, 37, 36, 35, 34, 33, 32, // 135
    31, 31, 30, 29, 28, 27, 26, 25, 23, 22, 21, 20, 19, 18, 17, // 150
    16, 15, 14, 13, 12, 11, 10,  8,  7,  6,  5,  4,  3,  2,  1, // 165
];

/// Sine of an angle in degrees, scaled by 64.
///
/// Accepts any `i32` angle; the value is reduced to `[0, 360)` before
/// lookup, with angles of 180 degrees or more negating the table entry.
pub fn fast_sin(angle: i32) -> i32 {
    let angle = angle.rem_euclid(360);
    if angle >= 180 {
        -SIN_TABLE[(angle - 180) as usize]
    } else {
        SIN_TABLE[angle as usize]
    }
}

/// Cosine of an angle in degrees, scaled by 64.
pub fn fast_cos(angle: i32) -> i32 {
    fast_sin(angle.rem_euclid(360) + 90)
}
