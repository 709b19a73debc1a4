//! RGB <-> HSV conversion used by the brightness and saturation edits.

use crate::pixel::Pixel;

/// A color in the HSV model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub hue: f32,
    /// Saturation, `[0, 1]`.
    pub saturation: f32,
    /// Value (brightness) on the 8-bit scale, `[0, 255]`.
    pub value: f32,
}

/// Convert an RGB pixel to HSV.
///
/// Hue comes from the sector of the largest channel (red 0°, green 120°,
/// blue 240°), offset by the difference of the other two over the chroma.
pub fn rgb_to_hsv(p: Pixel) -> Hsv {
    let r = f32::from(p.r);
    let g = f32::from(p.g);
    let b = f32::from(p.b);

    let max = p.r.max(p.g).max(p.b);
    let min = p.r.min(p.g).min(p.b);
    let chroma = f32::from(max - min);

    let hue = if max == min {
        0.0
    } else if max == p.r {
        60.0 * ((g - b) / chroma)
    } else if max == p.g {
        60.0 * ((b - r) / chroma) + 120.0
    } else {
        60.0 * ((r - g) / chroma) + 240.0
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    let saturation = if max == 0 { 0.0 } else { chroma / f32::from(max) };

    Hsv {
        hue,
        saturation,
        value: f32::from(max),
    }
}

/// Convert HSV back to an RGB pixel, rounding each channel to the nearest
/// 8-bit value.
pub fn hsv_to_rgb(hsv: Hsv) -> Pixel {
    let chroma = hsv.value * hsv.saturation;
    let h_prime = (hsv.hue / 60.0).rem_euclid(6.0);
    let x = chroma * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = hsv.value - chroma;

    let (r, g, b) = match h_prime {
        h if h < 1.0 => (chroma, x, 0.0),
        h if h < 2.0 => (x, chroma, 0.0),
        h if h < 3.0 => (0.0, chroma, x),
        h if h < 4.0 => (0.0, x, chroma),
        h if h < 5.0 => (x, 0.0, chroma),
        h if h < 6.0 => (chroma, 0.0, x),
        // NaN hue
        _ => (0.0, 0.0, 0.0),
    };

    Pixel {
        r: to_channel(r + m),
        g: to_channel(g + m),
        b: to_channel(b + m),
    }
}

fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
