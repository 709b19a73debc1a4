use crate::pnm::PnmFormat;

/// Errors from bitmap editing and PNM decoding/encoding.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("width and height must be at least 1, got {width}x{height}")]
    BadDimensions { width: u64, height: u64 },

    #[error("dimensions too large: {width}x{height}")]
    TooLarge { width: u64, height: u64 },

    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported maxvalue {maxval} for {format}")]
    UnsupportedMaxvalue { format: PnmFormat, maxval: u64 },

    #[error("no bitmap is open")]
    NoBitmapOpen,

    #[error("bitmap sizes differ: {width}x{height} vs {other_width}x{other_height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        other_width: u32,
        other_height: u32,
    },

    #[error("stream is corrupt (end of stream reached: {eof})")]
    StreamCorrupt { eof: bool },

    #[error("pixel ({x}, {y}) is outside the bitmap")]
    OutOfBounds { x: u32, y: u32 },
}

impl BitmapError {
    /// Classify an I/O failure raised while reading or writing a stream.
    pub(crate) fn from_io(err: &std::io::Error) -> Self {
        use std::io::ErrorKind;
        let eof = matches!(err.kind(), ErrorKind::UnexpectedEof | ErrorKind::WriteZero);
        BitmapError::StreamCorrupt { eof }
    }

    pub(crate) fn too_large(width: impl Into<u64>, height: impl Into<u64>) -> Self {
        BitmapError::TooLarge {
            width: width.into(),
            height: height.into(),
        }
    }
}

impl From<std::io::Error> for BitmapError {
    fn from(err: std::io::Error) -> Self {
        BitmapError::from_io(&err)
    }
}
