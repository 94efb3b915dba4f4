#![no_main]
use libfuzzer_sys::fuzz_target;
use lz10_compression::{compress_to_vec, decompress_to_vec};

fuzz_target!(|data: &[u8]| {
    let compressed = compress_to_vec(data).expect("could not compress input data");
    let roundtripped = decompress_to_vec(&compressed).expect("could not decompress own output");
    assert!(roundtripped == data, "decompression result did not match the original input");
});
