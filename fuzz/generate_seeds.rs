#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // One seed per sub-format
    fs::write(format!("{dir}/p1_3x1.pbm"), b"P1\n3 1\n1\n0 1 0\n").unwrap();
    fs::write(format!("{dir}/p2_2x2.pgm"), b"P2\n2 2\n255\n0 64\n128 255\n").unwrap();
    fs::write(format!("{dir}/p3_2x1.ppm"), b"P3\n# seed\n2 1\n255\n255 0 0 0 255 0\n").unwrap();
    fs::write(format!("{dir}/p4_4x1.pbm"), b"P4\n4 1\n1\n\x01\x00\x00\x01").unwrap();
    fs::write(format!("{dir}/p5_3x2.pgm"), b"P5\n3 2\n255\n\x00\x40\x80\xc0\xff\x64").unwrap();
    fs::write(
        format!("{dir}/p6_2x2.ppm"),
        b"P6\n2 2\n255\n\xff\x00\x00\x00\xff\x00\x00\x00\xff\x80\x80\x80",
    )
    .unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_p6.bin"), b"P6").unwrap();
    fs::write(format!("{dir}/p3_short.bin"), b"P3\n2 1\n255\n1 2").unwrap();
    fs::write(format!("{dir}/comment_eof.bin"), b"P3\n# no newline").unwrap();
    fs::write(format!("{dir}/maxval_100.bin"), b"P3\n1 1\n100\n1 2 3\n").unwrap();

    println!("Generated seed corpus in {dir}/");
}
