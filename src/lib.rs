//! # zenpnm-edit
//!
//! Portable Anymap (PBM/PGM/PPM) codec with an editable, undoable pixel
//! buffer.
//!
//! ## Supported Formats
//!
//! Decoding reads all six sub-formats:
//! - **P1** / **P4** — bilevel, ASCII / one raw byte per pixel, maxvalue 1
//! - **P2** / **P5** — 8-bit grayscale, ASCII / raw, maxvalue 255
//! - **P3** / **P6** — 8-bit RGB, ASCII / raw, maxvalue 255
//!
//! Encoding writes **P3** only.
//!
//! ## Editing
//!
//! A [`Bitmap`] holds the decoded grid and one undo slot. Every edit
//! ([`Bitmap::transform_image`], [`Bitmap::set_pixel_at`],
//! [`Bitmap::fill_with_color`]) snapshots the grid first, and
//! [`Bitmap::undo_last_change`] restores that snapshot. Only the most recent
//! edit can be undone.
//!
//! ## Non-Goals
//!
//! - maxvalues other than 255 (or 1 for bilevel)
//! - binary output
//! - multi-level undo, resizing, cropping
//!
//! ## Usage
//!
//! ```
//! use zenpnm_edit::{Bitmap, NoProgress, PnmFormat, Transform};
//!
//! let data: &[u8] = b"P3\n2 1\n255\n255 0 0 0 255 0\n";
//! let mut bitmap = Bitmap::default();
//! bitmap.open_from_stream(data, NoProgress)?;
//!
//! bitmap.transform_image(Transform::Negative, |pct: u8| println!("{pct}%"));
//! assert_eq!(bitmap.pixel_at(0, 0)?, zenpnm_edit::Pixel::new(0, 255, 255));
//! bitmap.undo_last_change();
//!
//! let mut out = Vec::new();
//! bitmap.save_to_stream(&mut out, PnmFormat::PpmAscii, NoProgress)?;
//! # Ok::<(), zenpnm_edit::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod bitmap;
pub mod color;
mod error;
mod info;
mod limits;
mod pixel;
pub mod pnm;
mod progress;
pub mod transform;

// Re-exports
pub use bitmap::{Bitmap, SavedState, combine_bitmaps, combine_bitmaps_with};
pub use error::BitmapError;
pub use info::ImageInfo;
pub use limits::{Limits, MAX_PIXELS};
pub use pixel::{BLACK, PIXEL_SIZE, Pixel, WHITE, gray, gray_value};
pub use pnm::PnmFormat;
pub use progress::{NoProgress, PROGRESS_INTERVAL, Progress};
pub use transform::{Combine, Transform};
