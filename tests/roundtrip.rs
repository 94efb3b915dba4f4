use lz10_compression::{compress_to_vec, decompress_to_vec};
use rand::prelude::*;

fn roundtrip(data: &[u8]) {
    let compressed = compress_to_vec(data).unwrap();
    let decompressed = decompress_to_vec(&compressed).unwrap();
    assert_eq!(decompressed, data, "roundtrip failed for {} bytes", data.len());
}

#[test]
fn boundary_sizes() {
    for &len in &[0usize, 1, 2, 3, 4, 7, 8, 9, 17, 18, 19] {
        roundtrip(&vec![0xAB; len]);
    }
}

#[test]
fn window_crossing_sizes() {
    for &len in &[4095usize, 4096, 4097, 8192, 12345] {
        let data: Vec<u8> = (0..len).map(|i| (i / 7) as u8).collect();
        roundtrip(&data);
    }
}

#[test]
fn random_data() {
    let mut rng = StdRng::seed_from_u64(0x10);
    for &len in &[100usize, 1000, 20_000] {
        let mut data = vec![0u8; len];
        rng.fill(&mut data[..]);
        roundtrip(&data);
    }
}

#[test]
fn mixed_data() {
    // random chunks interleaved with compressible runs
    let mut rng = StdRng::seed_from_u64(0x11);
    let mut data = Vec::new();
    for _ in 0..50 {
        let mut noise = vec![0u8; rng.gen_range(0, 200)];
        rng.fill(&mut noise[..]);
        data.extend_from_slice(&noise);
        data.extend(std::iter::repeat(rng.gen::<u8>()).take(rng.gen_range(0, 200)));
    }
    roundtrip(&data);
}

#[test]
fn truncation_is_always_detected() {
    let data: Vec<u8> = (0..500).map(|i| (i % 100) as u8).collect();
    let compressed = compress_to_vec(&data).unwrap();

    for cut in 1..=4 {
        let truncated = &compressed[..compressed.len() - cut];
        assert!(
            decompress_to_vec(truncated).is_err(),
            "cutting {} bytes went unnoticed",
            cut
        );
    }
}
