//! PNM encoder. Writes P3 only.

use std::io::{BufWriter, Write};

use super::PnmFormat;
use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::progress::{Progress, ProgressTicker};

/// Comment line written after the magic number of every encoded file.
pub const WRITER_COMMENT: &str = "# Created by zenpnm-edit";

pub(crate) fn encode_pnm<W: Write>(
    bitmap: &Bitmap,
    writer: W,
    format: PnmFormat,
    progress: &mut dyn Progress,
) -> Result<(), BitmapError> {
    if !bitmap.has_open_bitmap() {
        return Err(BitmapError::NoBitmapOpen);
    }

    if format != PnmFormat::PpmAscii {
        return Err(BitmapError::UnsupportedFormat(format!(
            "cannot encode {format}, only P3 output is supported"
        )));
    }

    let width = bitmap.width();
    let height = bitmap.height();
    bitmap
        .limits()
        .check(u64::from(width), u64::from(height))?;

    let mut out = BufWriter::new(writer);
    write!(out, "P3\n{WRITER_COMMENT}\n{width} {height}\n255\n")?;

    let total = u64::from(width) * u64::from(height);
    let mut ticker = ProgressTicker::start(progress, total);
    for (i, p) in bitmap.pixels().enumerate() {
        ticker.tick(i as u64);
        write!(out, "{}\n{}\n{}\n", p.r, p.g, p.b)?;
    }
    out.flush()?;
    ticker.finish();

    log::debug!("encoded {width}x{height} as {format}");
    Ok(())
}
