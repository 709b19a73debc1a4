//! Header-only probing of PNM streams.

use std::io::{BufReader, Read};

use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pnm::PnmFormat;
use crate::pnm::decode::{TokenReader, read_header};

/// Image metadata read from a PNM header, without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: PnmFormat,
    pub maxval: u32,
}

impl ImageInfo {
    /// Probe a PNM header from a stream.
    ///
    /// Applies the same validation as a full decode, so anything accepted here
    /// passes the header stage of [`Bitmap::open_from_stream`](crate::Bitmap::open_from_stream).
    pub fn read_from<R: Read>(reader: R) -> Result<Self, BitmapError> {
        Self::read_with_limits(reader, &Limits::default())
    }

    pub fn read_with_limits<R: Read>(reader: R, limits: &Limits) -> Result<Self, BitmapError> {
        let mut tokens = TokenReader::new(BufReader::new(reader));
        let header = read_header(&mut tokens, limits)?;
        Ok(ImageInfo {
            width: header.width,
            height: header.height,
            format: header.format,
            maxval: header.maxval,
        })
    }

    /// Same as [`ImageInfo::read_from`] over an in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        Self::read_from(data)
    }
}
