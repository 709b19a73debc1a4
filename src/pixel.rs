/// One RGB pixel, 8 bits per channel.
///
/// Plain value type; equality is channel-wise.
pub type Pixel = rgb::RGB8;

/// Pure black, `(0, 0, 0)`.
pub const BLACK: Pixel = Pixel { r: 0, g: 0, b: 0 };

/// Pure white, `(255, 255, 255)`. Default fill for new bitmaps.
pub const WHITE: Pixel = Pixel {
    r: 255,
    g: 255,
    b: 255,
};

/// Integer mean of the three channels, rounded down.
pub fn gray_value(p: Pixel) -> u8 {
    ((u16::from(p.r) + u16::from(p.g) + u16::from(p.b)) / 3) as u8
}

/// A gray pixel with every channel set to `v`.
pub const fn gray(v: u8) -> Pixel {
    Pixel { r: v, g: v, b: v }
}

/// Bytes one pixel occupies in memory.
pub const PIXEL_SIZE: usize = core::mem::size_of::<Pixel>();
