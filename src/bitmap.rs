//! The editable pixel buffer and its single undo slot.

use std::io::{Read, Write};

use imgref::{ImgRef, ImgVec};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{PIXEL_SIZE, Pixel, WHITE};
use crate::pnm::{self, PnmFormat};
use crate::progress::{Progress, ProgressTicker};
use crate::transform::{Combine, Transform};

/// A grid captured before a mutation, restorable by
/// [`Bitmap::undo_last_change`].
///
/// Owns its pixels outright; nothing in the live grid aliases it.
#[derive(Clone, Debug)]
pub struct SavedState {
    grid: ImgVec<Pixel>,
}

impl SavedState {
    pub fn width(&self) -> u32 {
        self.grid.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.grid.height() as u32
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        offset(&self.grid, x, y).map(|i| self.grid.buf()[i])
    }

    fn mem_usage(&self) -> usize {
        mem_usage(&self.grid)
    }
}

/// An RGB image with one level of undo.
///
/// A bitmap is either *closed* (no grid, 0x0) or *open* with a grid of at
/// least 1x1 and at most [`MAX_PIXELS`](crate::MAX_PIXELS) pixels. Every
/// mutating operation first copies the current grid into the undo slot,
/// replacing whatever was there.
#[derive(Clone, Debug, Default)]
pub struct Bitmap {
    grid: Option<ImgVec<Pixel>>,
    undo: Option<SavedState>,
    limits: Limits,
}

impl Bitmap {
    /// Allocate a `width` x `height` bitmap filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Pixel) -> Result<Self, BitmapError> {
        let mut bitmap = Self::default();
        bitmap.create_blank(width, height, fill)?;
        Ok(bitmap)
    }

    /// Allocate a bitmap filled with white.
    pub fn blank(width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::new(width, height, WHITE)
    }

    /// A closed bitmap that enforces `limits` on every allocation.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Replace the limits used for future allocations and decodes.
    pub fn set_limits(&mut self, limits: Limits) {
        self.limits = limits;
    }

    pub fn width(&self) -> u32 {
        self.grid.as_ref().map_or(0, |g| g.width() as u32)
    }

    pub fn height(&self) -> u32 {
        self.grid.as_ref().map_or(0, |g| g.height() as u32)
    }

    pub fn has_open_bitmap(&self) -> bool {
        self.grid.is_some()
    }

    /// Pixel at `(x, y)`.
    pub fn pixel_at(&self, x: u32, y: u32) -> Result<Pixel, BitmapError> {
        let grid = self.grid.as_ref().ok_or(BitmapError::NoBitmapOpen)?;
        let i = offset(grid, x, y).ok_or(BitmapError::OutOfBounds { x, y })?;
        Ok(grid.buf()[i])
    }

    /// Write one pixel. Returns `false` when closed or out of bounds.
    ///
    /// Snapshots the whole grid first unless `skip_snapshot` is set, which
    /// makes per-pixel writes O(n) each. Bulk writers should skip it.
    pub fn set_pixel_at(&mut self, x: u32, y: u32, pixel: Pixel, skip_snapshot: bool) -> bool {
        let Some(i) = self.grid.as_ref().and_then(|g| offset(g, x, y)) else {
            return false;
        };
        if !skip_snapshot {
            self.commit_pre_change();
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.buf_mut()[i] = pixel;
        }
        true
    }

    /// Reset to a `width` x `height` grid of `fill`, discarding undo history.
    ///
    /// Reuses the existing buffer when the dimensions are unchanged. The reset
    /// itself can never be undone.
    pub fn create_blank(&mut self, width: u32, height: u32, fill: Pixel) -> Result<(), BitmapError> {
        self.limits.check(u64::from(width), u64::from(height))?;

        if self.width() == width && self.height() == height && self.has_open_bitmap() {
            self.fill_with_color(fill, true);
        } else {
            let (w, h) = (width as usize, height as usize);
            self.grid = Some(ImgVec::new(vec![fill; w * h], w, h));
        }
        self.clear_undo_history();
        Ok(())
    }

    /// Overwrite every pixel with `fill`. No-op when closed.
    pub fn fill_with_color(&mut self, fill: Pixel, skip_snapshot: bool) {
        if !self.has_open_bitmap() {
            return;
        }
        if !skip_snapshot {
            self.commit_pre_change();
        }
        if let Some(grid) = self.grid.as_mut() {
            grid.buf_mut().fill(fill);
        }
    }

    /// Free the grid and the undo slot. Idempotent.
    pub fn close_bitmap(&mut self) {
        self.grid = None;
        self.undo = None;
    }

    /// Replace the image with one decoded from a PNM stream (P1-P6).
    ///
    /// Undo history is cleared before decoding starts. If decoding fails the
    /// previous image stays as it was.
    pub fn open_from_stream<R: Read>(
        &mut self,
        reader: R,
        mut progress: impl Progress,
    ) -> Result<(), BitmapError> {
        self.clear_undo_history();
        pnm::load_to_bitmap(self, reader, &mut progress)
    }

    /// Write the image to `writer`. Only [`PnmFormat::PpmAscii`] is supported.
    pub fn save_to_stream<W: Write>(
        &self,
        writer: W,
        format: PnmFormat,
        mut progress: impl Progress,
    ) -> Result<(), BitmapError> {
        pnm::save_bitmap_to(self, writer, format, &mut progress)
    }

    /// Apply `transform` to every pixel. No-op when closed.
    pub fn transform_image(&mut self, transform: Transform, progress: impl Progress) {
        log::debug!("applying {transform:?}");
        self.map_pixels(|p| transform.apply(p), progress);
    }

    /// Rewrite every pixel as `f(pixel)`, in row-major order. No-op when
    /// closed.
    pub fn map_pixels<F: FnMut(Pixel) -> Pixel>(&mut self, mut f: F, mut progress: impl Progress) {
        if !self.has_open_bitmap() {
            return;
        }
        self.commit_pre_change();

        let Some(grid) = self.grid.as_mut() else {
            return;
        };
        let mut ticker = ProgressTicker::start(&mut progress, grid.buf().len() as u64);
        for (i, p) in grid.buf_mut().iter_mut().enumerate() {
            ticker.tick(i as u64);
            *p = f(*p);
        }
        ticker.finish();
    }

    /// Restore the grid captured before the last mutation. No-op when there
    /// is nothing to undo.
    pub fn undo_last_change(&mut self) {
        if let Some(saved) = self.undo.take() {
            log::debug!("undo to {}x{}", saved.width(), saved.height());
            self.grid = Some(saved.grid);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// The undo slot, if a mutation has been recorded.
    pub fn saved_state(&self) -> Option<&SavedState> {
        self.undo.as_ref()
    }

    /// Bytes held by the live grid.
    pub fn bitmap_mem_usage(&self) -> usize {
        self.grid.as_ref().map_or(0, mem_usage)
    }

    /// Bytes held by the undo slot.
    pub fn undo_mem_usage(&self) -> usize {
        self.undo.as_ref().map_or(0, SavedState::mem_usage)
    }

    pub fn total_mem_usage(&self) -> usize {
        self.bitmap_mem_usage() + self.undo_mem_usage()
    }

    /// Borrowed view of the grid for rendering.
    pub fn as_imgref(&self) -> Option<ImgRef<'_, Pixel>> {
        self.grid.as_ref().map(|g| g.as_ref())
    }

    /// Row-major iterator over every pixel. Empty when closed.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.grid.iter().flat_map(|g| g.buf().iter().copied())
    }

    /// Packed `RGBRGB...` bytes, row-major. Empty when closed.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels().flat_map(|p| [p.r, p.g, p.b]).collect()
    }

    fn commit_pre_change(&mut self) {
        if let Some(grid) = &self.grid {
            log::trace!("snapshot {}x{}", grid.width(), grid.height());
            self.undo = Some(SavedState { grid: grid.clone() });
        }
    }

    fn clear_undo_history(&mut self) {
        self.undo = None;
    }
}

/// Combine two equally sized bitmaps pixel by pixel with `op`.
pub fn combine_bitmaps(
    a: &Bitmap,
    b: &Bitmap,
    op: Combine,
    progress: impl Progress,
) -> Result<Bitmap, BitmapError> {
    log::debug!("combining with {op:?}");
    combine_bitmaps_with(a, b, |x, y| op.apply(x, y), progress)
}

/// Combine two equally sized bitmaps pixel by pixel with an arbitrary
/// function. The result is a new bitmap with no undo history.
pub fn combine_bitmaps_with<F: FnMut(Pixel, Pixel) -> Pixel>(
    a: &Bitmap,
    b: &Bitmap,
    mut f: F,
    mut progress: impl Progress,
) -> Result<Bitmap, BitmapError> {
    let (Some(ga), Some(gb)) = (a.grid.as_ref(), b.grid.as_ref()) else {
        return Err(BitmapError::NoBitmapOpen);
    };
    if a.width() != b.width() || a.height() != b.height() {
        return Err(BitmapError::SizeMismatch {
            width: a.width(),
            height: a.height(),
            other_width: b.width(),
            other_height: b.height(),
        });
    }

    let total = ga.buf().len();
    let mut out = Vec::with_capacity(total);
    let mut ticker = ProgressTicker::start(&mut progress, total as u64);
    for (i, (&pa, &pb)) in ga.buf().iter().zip(gb.buf().iter()).enumerate() {
        ticker.tick(i as u64);
        out.push(f(pa, pb));
    }
    ticker.finish();

    Ok(Bitmap {
        grid: Some(ImgVec::new(out, ga.width(), ga.height())),
        undo: None,
        limits: a.limits,
    })
}

fn offset(grid: &ImgVec<Pixel>, x: u32, y: u32) -> Option<usize> {
    let (x, y) = (x as usize, y as usize);
    (x < grid.width() && y < grid.height()).then(|| y * grid.stride() + x)
}

fn mem_usage(grid: &ImgVec<Pixel>) -> usize {
    grid.width() * grid.height() * PIXEL_SIZE
}
