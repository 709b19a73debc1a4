use crate::error::BitmapError;

/// Hard ceiling on `width * height` for any allocated grid.
pub const MAX_PIXELS: u64 = 100_000_000;

/// Resource limits for bitmap allocation and decoding.
///
/// All fields default to `None`, which leaves only [`MAX_PIXELS`] in force.
/// Limits can tighten that bound but never lift it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
}

impl Limits {
    /// Effective pixel bound after applying the hard ceiling.
    pub fn pixel_bound(&self) -> u64 {
        self.max_pixels.map_or(MAX_PIXELS, |px| px.min(MAX_PIXELS))
    }

    /// Check dimensions against limits.
    ///
    /// Zero dimensions fail with [`BitmapError::BadDimensions`]; anything over a
    /// limit fails with [`BitmapError::TooLarge`].
    pub(crate) fn check(&self, width: u64, height: u64) -> Result<(), BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::BadDimensions { width, height });
        }
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(BitmapError::too_large(width, height));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(BitmapError::too_large(width, height));
            }
        }
        let pixels = width
            .checked_mul(height)
            .ok_or(BitmapError::too_large(width, height))?;
        if pixels > self.pixel_bound() {
            return Err(BitmapError::too_large(width, height));
        }
        Ok(())
    }
}
