//! Portable Anymap family: P1-P3 (ASCII) and P4-P6 (binary).
//!
//! All six sub-formats decode into a [`Bitmap`]. Only P3 is written back out.

pub(crate) mod decode;
mod encode;

use core::fmt;
use std::io::{BufReader, Read, Write};

use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::progress::Progress;

pub use encode::WRITER_COMMENT;

/// Which PNM sub-format, by magic number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PnmFormat {
    /// P1 — ASCII bilevel (PBM).
    PbmAscii,
    /// P2 — ASCII grayscale (PGM).
    PgmAscii,
    /// P3 — ASCII RGB (PPM).
    PpmAscii,
    /// P4 — binary bilevel (PBM), one byte per pixel.
    PbmRaw,
    /// P5 — binary grayscale (PGM).
    PgmRaw,
    /// P6 — binary RGB (PPM).
    PpmRaw,
}

impl PnmFormat {
    pub fn magic(self) -> &'static str {
        match self {
            PnmFormat::PbmAscii => "P1",
            PnmFormat::PgmAscii => "P2",
            PnmFormat::PpmAscii => "P3",
            PnmFormat::PbmRaw => "P4",
            PnmFormat::PgmRaw => "P5",
            PnmFormat::PpmRaw => "P6",
        }
    }

    pub fn from_magic(magic: &str) -> Option<Self> {
        match magic {
            "P1" => Some(PnmFormat::PbmAscii),
            "P2" => Some(PnmFormat::PgmAscii),
            "P3" => Some(PnmFormat::PpmAscii),
            "P4" => Some(PnmFormat::PbmRaw),
            "P5" => Some(PnmFormat::PgmRaw),
            "P6" => Some(PnmFormat::PpmRaw),
            _ => None,
        }
    }

    /// Whether pixel data is raw bytes rather than ASCII decimal.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            PnmFormat::PbmRaw | PnmFormat::PgmRaw | PnmFormat::PpmRaw
        )
    }

    /// The only maxvalue this crate accepts for the format.
    pub fn max_value(self) -> u32 {
        match self {
            PnmFormat::PbmAscii | PnmFormat::PbmRaw => 1,
            _ => 255,
        }
    }

    /// Samples stored per pixel (1 for bilevel and gray, 3 for RGB).
    pub fn samples_per_pixel(self) -> usize {
        match self {
            PnmFormat::PpmAscii | PnmFormat::PpmRaw => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for PnmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.magic())
    }
}

/// Validated PNM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PnmHeader {
    pub format: PnmFormat,
    pub width: u32,
    pub height: u32,
    pub maxval: u32,
}

impl PnmHeader {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Decode a PNM stream into `bitmap`, replacing its image.
///
/// Pixels are decoded into a fresh buffer and committed only once the whole
/// payload has been read, so on failure `bitmap` keeps its previous image.
/// The new image has no undo state.
pub fn load_to_bitmap<R: Read>(
    bitmap: &mut Bitmap,
    reader: R,
    progress: &mut dyn Progress,
) -> Result<(), BitmapError> {
    let mut tokens = decode::TokenReader::new(BufReader::new(reader));
    let header = decode::read_header(&mut tokens, bitmap.limits())?;
    log::debug!(
        "decoding {} {}x{}",
        header.format,
        header.width,
        header.height
    );

    let mut staging = Bitmap::with_limits(*bitmap.limits());
    staging.create_blank(header.width, header.height, crate::pixel::WHITE)?;
    decode::decode_pixels(&mut tokens, &header, &mut staging, progress)?;

    *bitmap = staging;
    Ok(())
}

/// Encode `bitmap` to `writer` as `format`.
///
/// Only [`PnmFormat::PpmAscii`] (P3) output is supported; every other target
/// fails with [`BitmapError::UnsupportedFormat`].
pub fn save_bitmap_to<W: Write>(
    bitmap: &Bitmap,
    writer: W,
    format: PnmFormat,
    progress: &mut dyn Progress,
) -> Result<(), BitmapError> {
    encode::encode_pnm(bitmap, writer, format, progress)
}
