//! PNM decoder: whitespace/comment-aware tokenizer, header parsing, and
//! per-format pixel decoding.

use std::io::{BufRead, ErrorKind};

use super::{PnmFormat, PnmHeader};
use crate::bitmap::Bitmap;
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::{BLACK, Pixel, WHITE, gray};
use crate::progress::{Progress, ProgressTicker};

const COMMENT: u8 = b'#';

/// Longest token accepted. Anything longer is not a PNM number or magic.
const MAX_TOKEN_LEN: usize = 32;

/// Reads whitespace-delimited tokens, skipping blank lines and `#` comments.
///
/// Shared between the header and the ASCII pixel payload. The whitespace byte
/// ending a token is consumed, which leaves the reader positioned on the
/// first payload byte for the binary formats.
pub(crate) struct TokenReader<R> {
    inner: R,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    fn peek(&mut self) -> Result<Option<u8>, BitmapError> {
        loop {
            match self.inner.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(BitmapError::from_io(&e)),
            }
        }
    }

    fn bump(&mut self) {
        self.inner.consume(1);
    }

    /// Skip whitespace and comment lines up to the start of the next token.
    fn skip_filler(&mut self) -> Result<(), BitmapError> {
        while let Some(b) = self.peek()? {
            if b.is_ascii_whitespace() {
                self.bump();
            } else if b == COMMENT {
                self.skip_comment()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Consume a `#` comment through its newline, if one starts here.
    fn skip_comment(&mut self) -> Result<(), BitmapError> {
        if self.peek()? != Some(COMMENT) {
            return Ok(());
        }
        while let Some(c) = self.peek()? {
            self.bump();
            if c == b'\n' {
                break;
            }
        }
        Ok(())
    }

    /// Next raw token. Fails with `StreamCorrupt { eof: true }` when the
    /// stream ends before one starts.
    pub fn next_token(&mut self) -> Result<Vec<u8>, BitmapError> {
        self.skip_filler()?;
        let mut token = Vec::new();
        while let Some(b) = self.peek()? {
            // a comment ends the token and is skipped by the next call
            if b == COMMENT {
                break;
            }
            self.bump();
            if b.is_ascii_whitespace() {
                break;
            }
            if token.len() == MAX_TOKEN_LEN {
                return Err(BitmapError::StreamCorrupt { eof: false });
            }
            token.push(b);
        }
        if token.is_empty() {
            return Err(BitmapError::StreamCorrupt { eof: true });
        }
        Ok(token)
    }

    /// Next token parsed as an unsigned decimal integer.
    pub fn next_u64(&mut self) -> Result<u64, BitmapError> {
        let token = self.next_token()?;
        token.iter().try_fold(0u64, |n, &b| {
            if !b.is_ascii_digit() {
                return Err(BitmapError::StreamCorrupt { eof: false });
            }
            n.checked_mul(10)
                .and_then(|n| n.checked_add(u64::from(b - b'0')))
                .ok_or(BitmapError::StreamCorrupt { eof: false })
        })
    }

    /// Next ASCII sample, rejecting values above `max`.
    fn next_sample(&mut self, max: u32) -> Result<u8, BitmapError> {
        let v = self.next_u64()?;
        if v > u64::from(max) {
            return Err(BitmapError::StreamCorrupt { eof: false });
        }
        Ok(v as u8)
    }

    /// Read exactly `len` raw bytes in one block.
    fn read_block(&mut self, len: usize) -> Result<Vec<u8>, BitmapError> {
        let mut block = vec![0u8; len];
        self.inner.read_exact(&mut block)?;
        Ok(block)
    }
}

/// Header fields as read, before validation.
#[derive(Debug)]
struct RawHeader {
    magic: String,
    width: u64,
    height: u64,
    maxval: u64,
}

impl RawHeader {
    fn read<R: BufRead>(tokens: &mut TokenReader<R>) -> Result<Self, BitmapError> {
        let magic = String::from_utf8_lossy(&tokens.next_token()?).into_owned();
        let (width, height, maxval) = match read_fields(tokens) {
            Ok(fields) => fields,
            // not a PNM stream at all; say so instead of reporting its bytes
            Err(_) if PnmFormat::from_magic(&magic).is_none() => {
                return Err(unknown_magic(&magic));
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            magic,
            width,
            height,
            maxval,
        })
    }

    /// Dimensions, then the pixel bound, then the magic, then the maxvalue.
    fn validate(self, limits: &Limits) -> Result<PnmHeader, BitmapError> {
        limits.check(self.width, self.height)?;

        let format = PnmFormat::from_magic(&self.magic).ok_or_else(|| unknown_magic(&self.magic))?;

        if self.maxval != u64::from(format.max_value()) {
            return Err(BitmapError::UnsupportedMaxvalue {
                format,
                maxval: self.maxval,
            });
        }

        // limits.check bounds both dimensions well below u32::MAX
        Ok(PnmHeader {
            format,
            width: self.width as u32,
            height: self.height as u32,
            maxval: format.max_value(),
        })
    }
}

fn read_fields<R: BufRead>(tokens: &mut TokenReader<R>) -> Result<(u64, u64, u64), BitmapError> {
    Ok((tokens.next_u64()?, tokens.next_u64()?, tokens.next_u64()?))
}

/// Read and validate the header, leaving `tokens` at the pixel payload.
pub(crate) fn read_header<R: BufRead>(
    tokens: &mut TokenReader<R>,
    limits: &Limits,
) -> Result<PnmHeader, BitmapError> {
    let header = RawHeader::read(tokens)?.validate(limits)?;
    if header.format.is_binary() {
        // `255# note\n` ends the maxvalue at the comment; the payload follows it
        tokens.skip_comment()?;
    }
    Ok(header)
}

/// Decode the pixel payload into `dest`, which must already be allocated at
/// the header's dimensions.
pub(crate) fn decode_pixels<R: BufRead>(
    tokens: &mut TokenReader<R>,
    header: &PnmHeader,
    dest: &mut Bitmap,
    progress: &mut dyn Progress,
) -> Result<(), BitmapError> {
    let total = header.pixel_count();
    let format = header.format;

    let block = if format.is_binary() {
        tokens.read_block(total * format.samples_per_pixel())?
    } else {
        Vec::new()
    };

    let mut ticker = ProgressTicker::start(progress, total as u64);
    let mut i = 0usize;
    for y in 0..header.height {
        for x in 0..header.width {
            ticker.tick(i as u64);
            let pixel = match format {
                PnmFormat::PbmAscii => bilevel(tokens.next_sample(header.maxval)?),
                PnmFormat::PgmAscii => gray(tokens.next_sample(header.maxval)?),
                PnmFormat::PpmAscii => {
                    let r = tokens.next_sample(header.maxval)?;
                    let g = tokens.next_sample(header.maxval)?;
                    let b = tokens.next_sample(header.maxval)?;
                    Pixel::new(r, g, b)
                }
                PnmFormat::PbmRaw => bilevel(block[i]),
                PnmFormat::PgmRaw => gray(block[i]),
                PnmFormat::PpmRaw => {
                    let off = i * 3;
                    Pixel::new(block[off], block[off + 1], block[off + 2])
                }
            };
            let written = dest.set_pixel_at(x, y, pixel, true);
            debug_assert!(written);
            i += 1;
        }
    }
    ticker.finish();

    log::debug!("decoded {total} pixels of {}", format);
    Ok(())
}

fn unknown_magic(magic: &str) -> BitmapError {
    BitmapError::UnsupportedFormat(format!("unrecognized magic {magic:?}"))
}

fn bilevel(v: u8) -> Pixel {
    if v == 1 { WHITE } else { BLACK }
}
