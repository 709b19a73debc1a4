//! Per-pixel edits and two-image combination operators.
//!
//! The free functions are pure. [`Transform`] and [`Combine`] name them so a
//! caller can pick an edit at runtime and hand it to
//! [`Bitmap::transform_image`](crate::Bitmap::transform_image) or
//! [`combine_bitmaps`](crate::combine_bitmaps).

use crate::color::{hsv_to_rgb, rgb_to_hsv};
use crate::pixel::{BLACK, Pixel, WHITE, gray, gray_value};

/// A single-image pixel edit, with its strength where it takes one.
///
/// Levels are conventionally in `-100..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Transform {
    Negative,
    Grayscale,
    BlackAndWhite,
    Brightness(i32),
    Saturation(i32),
    Contrast(i32),
}

impl Transform {
    pub fn apply(self, p: Pixel) -> Pixel {
        match self {
            Transform::Negative => negative(p),
            Transform::Grayscale => grayscale(p),
            Transform::BlackAndWhite => black_and_white(p),
            Transform::Brightness(level) => brightness(p, level),
            Transform::Saturation(level) => saturation(p, level),
            Transform::Contrast(level) => contrast(p, level),
        }
    }
}

/// A per-pixel operator over two equally sized images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Combine {
    Add,
    Subtract,
    Multiply,
}

impl Combine {
    pub fn apply(self, a: Pixel, b: Pixel) -> Pixel {
        match self {
            Combine::Add => add(a, b),
            Combine::Subtract => subtract(a, b),
            Combine::Multiply => multiply(a, b),
        }
    }
}

/// Invert every channel. Self-inverse.
pub fn negative(p: Pixel) -> Pixel {
    Pixel::new(255 - p.r, 255 - p.g, 255 - p.b)
}

/// Replace every channel with the floored channel mean.
pub fn grayscale(p: Pixel) -> Pixel {
    gray(gray_value(p))
}

/// Threshold on luminance `0.3r + 0.587g + 0.114b`: white above 127, black
/// otherwise.
pub fn black_and_white(p: Pixel) -> Pixel {
    let luminance = (0.3 * f64::from(p.r) + 0.587 * f64::from(p.g) + 0.114 * f64::from(p.b)) as i32;
    if luminance > 127 { WHITE } else { BLACK }
}

/// Shift the HSV value channel by `level`, clamped to `[0, 255]`.
pub fn brightness(p: Pixel, level: i32) -> Pixel {
    let mut hsv = rgb_to_hsv(p);
    hsv.value = (hsv.value + level as f32).clamp(0.0, 255.0);
    hsv_to_rgb(hsv)
}

/// Shift the HSV saturation by `level / 100`, clamped to `[0, 1]`.
///
/// Gray pixels carry no hue and are returned as-is.
pub fn saturation(p: Pixel, level: i32) -> Pixel {
    if p.r == p.g && p.g == p.b {
        return p;
    }
    let mut hsv = rgb_to_hsv(p);
    hsv.saturation = (hsv.saturation + level as f32 / 100.0).clamp(0.0, 1.0);
    hsv_to_rgb(hsv)
}

/// Not implemented yet; returns the pixel unchanged.
pub fn contrast(p: Pixel, _level: i32) -> Pixel {
    p
}

/// Per-channel mean, rounded down.
pub fn add(a: Pixel, b: Pixel) -> Pixel {
    let avg = |x: u8, y: u8| ((u16::from(x) + u16::from(y)) / 2) as u8;
    Pixel::new(avg(a.r, b.r), avg(a.g, b.g), avg(a.b, b.b))
}

/// Per-channel `a - b`, floored at zero.
pub fn subtract(a: Pixel, b: Pixel) -> Pixel {
    Pixel::new(
        a.r.saturating_sub(b.r),
        a.g.saturating_sub(b.g),
        a.b.saturating_sub(b.b),
    )
}

/// Per-channel normalized product, `(a/255) * (b/255) * 255`.
pub fn multiply(a: Pixel, b: Pixel) -> Pixel {
    let mul = |x: u8, y: u8| ((f64::from(x) / 255.0) * (f64::from(y) / 255.0) * 255.0) as u8;
    Pixel::new(mul(a.r, b.r), mul(a.g, b.g), mul(a.b, b.b))
}
