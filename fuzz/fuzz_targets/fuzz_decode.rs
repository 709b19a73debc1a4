#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpnm_edit::{Bitmap, ImageInfo, Limits, NoProgress};

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input
    let _ = ImageInfo::from_bytes(data);

    // Keep allocations small so the fuzzer explores parsing, not memory
    let mut bitmap = Bitmap::with_limits(Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    });
    let _ = bitmap.open_from_stream(data, NoProgress);
});
