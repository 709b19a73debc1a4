use std::io::{self, ErrorKind, Read, Write};

use zenpnm_edit::*;

/// Yields `data`, then fails every read with `kind`.
struct FailingReader {
    data: &'static [u8],
    kind: ErrorKind,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(self.kind, "stream failed"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Accepts nothing: either errors with `kind`, or reports zero bytes written.
struct FailingWriter {
    kind: Option<ErrorKind>,
}

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        match self.kind {
            Some(kind) => Err(io::Error::new(kind, "sink failed")),
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn noise_bitmap(w: u32, h: u32, seed: u32) -> Bitmap {
    let mut bitmap = Bitmap::new(w, h, BLACK).unwrap();
    let mut state: u32 = seed;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    for y in 0..h {
        for x in 0..w {
            let v = next();
            let p = Pixel::new(v as u8, (v >> 8) as u8, (v >> 16) as u8);
            assert!(bitmap.set_pixel_at(x, y, p, true));
        }
    }
    bitmap
}

fn decode(data: &[u8]) -> Result<Bitmap, BitmapError> {
    let mut bitmap = Bitmap::default();
    bitmap.open_from_stream(data, NoProgress)?;
    Ok(bitmap)
}

fn encode(bitmap: &Bitmap) -> Vec<u8> {
    let mut out = Vec::new();
    bitmap
        .save_to_stream(&mut out, PnmFormat::PpmAscii, NoProgress)
        .unwrap();
    out
}

fn assert_same_pixels(a: &Bitmap, b: &Bitmap) {
    assert_eq!(a.width(), b.width());
    assert_eq!(a.height(), b.height());
    for y in 0..a.height() {
        for x in 0..a.width() {
            assert_eq!(
                a.pixel_at(x, y).unwrap(),
                b.pixel_at(x, y).unwrap(),
                "pixel mismatch at ({x}, {y})"
            );
        }
    }
}

// ── P3 roundtrips ────────────────────────────────────────────────────

#[test]
fn p3_roundtrip_various_sizes() {
    for (i, (w, h)) in [(1, 1), (1, 100), (100, 1), (7, 13), (64, 48), (100, 100)]
        .into_iter()
        .enumerate()
    {
        let original = noise_bitmap(w, h, 0xDEAD_BEEF ^ i as u32);
        let decoded = decode(&encode(&original)).unwrap();
        assert_same_pixels(&original, &decoded);
        assert!(!decoded.can_undo());
    }
}

#[test]
fn p3_output_layout() {
    let bitmap = Bitmap::new(2, 1, Pixel::new(1, 2, 3)).unwrap();
    let text = String::from_utf8(encode(&bitmap)).unwrap();
    let expected = format!("P3\n{WRITER}\n2 1\n255\n1\n2\n3\n1\n2\n3\n", WRITER = pnm::WRITER_COMMENT);
    assert_eq!(text, expected);
    assert!(pnm::WRITER_COMMENT.starts_with('#'));
}

#[test]
fn save_does_not_mutate() {
    let bitmap = noise_bitmap(5, 5, 7);
    let before = bitmap.to_rgb_bytes();
    let _ = encode(&bitmap);
    assert_eq!(bitmap.to_rgb_bytes(), before);
    assert!(!bitmap.can_undo());
}

// ── Decode scenarios per sub-format ──────────────────────────────────

#[test]
fn p3_two_pixel_scenario() {
    let bitmap = decode(b"P3\n2 1\n255\n255 0 0 0 255 0\n").unwrap();
    assert_eq!(bitmap.width(), 2);
    assert_eq!(bitmap.height(), 1);
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), Pixel::new(255, 0, 0));
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), Pixel::new(0, 255, 0));
}

#[test]
fn p6_single_pixel_scenario() {
    let bitmap = decode(b"P6\n1 1\n255\n\x10\x20\x30").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), Pixel::new(16, 32, 48));
}

#[test]
fn p1_ascii_bilevel() {
    let bitmap = decode(b"P1\n3 1\n1\n0 1 0\n").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), BLACK);
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), WHITE);
    assert_eq!(bitmap.pixel_at(2, 0).unwrap(), BLACK);
}

#[test]
fn p2_ascii_gray() {
    let bitmap = decode(b"P2\n2 2\n255\n0 64\n128 255\n").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), gray(0));
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), gray(64));
    assert_eq!(bitmap.pixel_at(0, 1).unwrap(), gray(128));
    assert_eq!(bitmap.pixel_at(1, 1).unwrap(), gray(255));
}

#[test]
fn p4_raw_bilevel_one_byte_per_pixel() {
    let bitmap = decode(b"P4\n4 1\n1\n\x01\x00\x02\x01").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), WHITE);
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), BLACK);
    assert_eq!(bitmap.pixel_at(2, 0).unwrap(), BLACK);
    assert_eq!(bitmap.pixel_at(3, 0).unwrap(), WHITE);
}

#[test]
fn p5_raw_gray() {
    let bitmap = decode(b"P5\n3 1\n255\n\x00\x80\xff").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), gray(0));
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), gray(128));
    assert_eq!(bitmap.pixel_at(2, 0).unwrap(), gray(255));
}

#[test]
fn p5_payload_starting_with_whitespace_byte() {
    // 0x0a and 0x20 are pixel values here, not separators
    let bitmap = decode(b"P5\n2 1\n255\n\x0a\x20").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), gray(10));
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), gray(32));
}

#[test]
fn comments_between_header_fields() {
    let data = b"P3\n# first\n\n# second\n2\n# w done\n1\n\n255\n255 0 0\n# mid-payload\n0 255 0\n";
    let bitmap = decode(data).unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), Pixel::new(255, 0, 0));
    assert_eq!(bitmap.pixel_at(1, 0).unwrap(), Pixel::new(0, 255, 0));
}

#[test]
fn comment_directly_after_a_number() {
    let b = decode(b"P3\n1 1#w\n255#max\n1 2#r\n3\n").unwrap();
    assert_eq!((b.width(), b.height()), (1, 1));
    assert_eq!(b.pixel_at(0, 0).unwrap(), Pixel::new(1, 2, 3));

    let b = decode(b"P5\n2 1\n255# note\n\x07\x23").unwrap();
    assert_eq!(b.pixel_at(0, 0).unwrap(), gray(7));
    assert_eq!(b.pixel_at(1, 0).unwrap(), gray(0x23));
}

#[test]
fn rows_are_decoded_top_to_bottom() {
    let bitmap = decode(b"P3\n1 2\n255\n1 2 3\n4 5 6\n").unwrap();
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), Pixel::new(1, 2, 3));
    assert_eq!(bitmap.pixel_at(0, 1).unwrap(), Pixel::new(4, 5, 6));
}

// ── Rejections ───────────────────────────────────────────────────────

#[test]
fn unknown_magic_is_unsupported_format() {
    let inputs: [&[u8]; 6] = [
        b"P7\n1 1\n255\n\x00",
        b"XY\n1 1\n255\n0 0 0\n",
        b"P0 1 1 255 0",
        b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR",
        b"GIF89a\x01\x00",
        b"BM",
    ];
    for data in inputs {
        match decode(data).unwrap_err() {
            BitmapError::UnsupportedFormat(_) => {}
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }
}

#[test]
fn p3_maxvalue_100_is_rejected() {
    assert_eq!(
        decode(b"P3\n1 1\n100\n1 2 3\n").unwrap_err(),
        BitmapError::UnsupportedMaxvalue {
            format: PnmFormat::PpmAscii,
            maxval: 100
        }
    );
}

#[test]
fn bilevel_requires_maxvalue_one() {
    assert!(matches!(
        decode(b"P4\n1 1\n255\n\x01").unwrap_err(),
        BitmapError::UnsupportedMaxvalue { .. }
    ));
}

#[test]
fn zero_dimensions_are_bad() {
    assert!(matches!(
        decode(b"P3\n0 1\n255\n").unwrap_err(),
        BitmapError::BadDimensions { .. }
    ));
    assert!(matches!(
        decode(b"P3\n1 0\n255\n").unwrap_err(),
        BitmapError::BadDimensions { .. }
    ));
}

#[test]
fn oversized_header_is_too_large() {
    assert!(matches!(
        decode(b"P6\n10001 10000\n255\n").unwrap_err(),
        BitmapError::TooLarge { .. }
    ));
    assert!(matches!(
        decode(b"P6\n4294967296 4294967296\n255\n").unwrap_err(),
        BitmapError::TooLarge { .. }
    ));
}

#[test]
fn truncated_payloads_report_eof() {
    let eof = BitmapError::StreamCorrupt { eof: true };
    assert_eq!(decode(b"P6\n2 1\n255\n\x01\x02\x03").unwrap_err(), eof);
    assert_eq!(decode(b"P3\n2 1\n255\n1 2 3 4").unwrap_err(), eof);
    assert_eq!(decode(b"P3\n2").unwrap_err(), eof);
    assert_eq!(decode(b"").unwrap_err(), eof);
}

#[test]
fn malformed_values_are_corrupt() {
    let corrupt = BitmapError::StreamCorrupt { eof: false };
    assert_eq!(decode(b"P3\nabc 1\n255\n").unwrap_err(), corrupt);
    assert_eq!(decode(b"P3\n1 1\n255\n1 2 x\n").unwrap_err(), corrupt);
    assert_eq!(decode(b"P2\n1 1\n255\n256\n").unwrap_err(), corrupt);
    assert_eq!(decode(b"P1\n1 1\n1\n2\n").unwrap_err(), corrupt);
}

#[test]
fn read_errors_are_classified() {
    let cases: [(&'static [u8], ErrorKind, bool); 4] = [
        (b"P6\n2 2\n255\n\x01\x02\x03", ErrorKind::Other, false),
        (b"P3\n2 1\n255\n1 2 3 4 ", ErrorKind::ConnectionReset, false),
        (b"P3\n2 ", ErrorKind::Other, false),
        (b"P6\n2 2\n255\n\x01", ErrorKind::UnexpectedEof, true),
    ];
    for (data, kind, eof) in cases {
        let mut bitmap = Bitmap::default();
        let err = bitmap
            .open_from_stream(FailingReader { data, kind }, NoProgress)
            .unwrap_err();
        assert_eq!(err, BitmapError::StreamCorrupt { eof }, "{kind:?}");
        assert!(!bitmap.has_open_bitmap());
    }
}

#[test]
fn write_errors_are_classified() {
    let bitmap = Bitmap::new(2, 2, WHITE).unwrap();
    let save = |kind| bitmap.save_to_stream(FailingWriter { kind }, PnmFormat::PpmAscii, NoProgress);

    assert_eq!(
        save(Some(ErrorKind::Other)).unwrap_err(),
        BitmapError::StreamCorrupt { eof: false }
    );
    assert_eq!(
        save(Some(ErrorKind::BrokenPipe)).unwrap_err(),
        BitmapError::StreamCorrupt { eof: false }
    );
    // a sink that takes zero bytes surfaces as WriteZero
    assert_eq!(save(None).unwrap_err(), BitmapError::StreamCorrupt { eof: true });
}

#[test]
fn failed_decode_keeps_previous_image() {
    let mut bitmap = Bitmap::new(3, 2, Pixel::new(9, 9, 9)).unwrap();
    bitmap.transform_image(Transform::Negative, NoProgress);
    assert!(bitmap.can_undo());

    let err = bitmap
        .open_from_stream(&b"P3\n2 1\n255\n1 2 3"[..], NoProgress)
        .unwrap_err();
    assert_eq!(err, BitmapError::StreamCorrupt { eof: true });
    assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
    assert_eq!(bitmap.pixel_at(2, 1).unwrap(), Pixel::new(246, 246, 246));
    // history is cleared before decoding begins
    assert!(!bitmap.can_undo());
}

#[test]
fn successful_decode_clears_undo() {
    let mut bitmap = Bitmap::new(2, 2, WHITE).unwrap();
    bitmap.fill_with_color(BLACK, false);
    assert!(bitmap.can_undo());
    bitmap
        .open_from_stream(&b"P5\n1 1\n255\n\x07"[..], NoProgress)
        .unwrap();
    assert!(!bitmap.can_undo());
    assert_eq!(bitmap.pixel_at(0, 0).unwrap(), gray(7));
}

#[test]
fn only_p3_can_be_written() {
    let bitmap = Bitmap::new(1, 1, WHITE).unwrap();
    for format in [
        PnmFormat::PbmAscii,
        PnmFormat::PgmAscii,
        PnmFormat::PbmRaw,
        PnmFormat::PgmRaw,
        PnmFormat::PpmRaw,
    ] {
        let mut out = Vec::new();
        match bitmap.save_to_stream(&mut out, format, NoProgress) {
            Err(BitmapError::UnsupportedFormat(_)) => {}
            other => panic!("expected UnsupportedFormat for {format}, got {other:?}"),
        }
    }
}

#[test]
fn saving_closed_bitmap_fails() {
    let mut out = Vec::new();
    assert_eq!(
        Bitmap::default()
            .save_to_stream(&mut out, PnmFormat::PpmAscii, NoProgress)
            .unwrap_err(),
        BitmapError::NoBitmapOpen
    );
    assert!(out.is_empty());
}

// ── Header probe ─────────────────────────────────────────────────────

#[test]
fn image_info_probe() {
    let info = ImageInfo::from_bytes(b"P6\n# c\n640 480\n255\n").unwrap();
    assert_eq!(info.width, 640);
    assert_eq!(info.height, 480);
    assert_eq!(info.format, PnmFormat::PpmRaw);
    assert_eq!(info.maxval, 255);
}

#[test]
fn limits_reject_large() {
    let limits = Limits {
        max_pixels: Some(1),
        ..Default::default()
    };
    let err = ImageInfo::read_with_limits(&b"P3\n1 2\n255\n"[..], &limits).unwrap_err();
    assert!(matches!(err, BitmapError::TooLarge { .. }));

    let mut bitmap = Bitmap::with_limits(limits);
    assert!(matches!(
        bitmap.open_from_stream(&b"P3\n1 2\n255\n0 0 0 0 0 0\n"[..], NoProgress),
        Err(BitmapError::TooLarge { .. })
    ));
    bitmap
        .open_from_stream(&b"P3\n1 1\n255\n0 0 0\n"[..], NoProgress)
        .unwrap();
    assert_eq!(bitmap.limits(), &limits);
}
