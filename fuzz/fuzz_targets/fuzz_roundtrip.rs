#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm_edit::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, writing P3 and decoding again must give identical pixels
    let mut decoded = Bitmap::with_limits(Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    });
    if decoded.open_from_stream(data, NoProgress).is_err() {
        return;
    }

    let mut encoded = Vec::new();
    decoded
        .save_to_stream(&mut encoded, PnmFormat::PpmAscii, NoProgress)
        .expect("open bitmap must encode as P3");

    let mut decoded2 = Bitmap::default();
    if decoded2.open_from_stream(&encoded[..], NoProgress).is_err() {
        panic!("re-encoded data failed to decode");
    }

    assert_eq!(decoded.width(), decoded2.width());
    assert_eq!(decoded.height(), decoded2.height());
    assert_eq!(decoded.to_rgb_bytes(), decoded2.to_rgb_bytes(), "roundtrip pixel mismatch");
});
