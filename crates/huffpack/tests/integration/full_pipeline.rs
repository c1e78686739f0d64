//! End-to-end pipeline tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use huffpack::{
    assemble, average_code_length, balance, serialize_tree, CodeBook, Codec, Compressor,
    DecodeStrategy, Decompressor, FrequencyTable, HuffmanCodec, HuffmanConfig,
};

/// Fibonacci counts give the deepest possible Huffman tree.
fn fibonacci_data(symbols: u8) -> Vec<u8> {
    let (mut a, mut b) = (1usize, 1usize);
    let mut data = Vec::new();
    for symbol in 0..symbols {
        data.extend(std::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }
    data
}

#[test]
fn test_random_buffers_all_strategies() {
    let mut rng = StdRng::seed_from_u64(42);
    for size in [1usize, 2, 17, 256, 4096, 65_537] {
        let mut data = vec![0u8; size];
        rng.fill(&mut data[..]);

        for strategy in [DecodeStrategy::Indexed, DecodeStrategy::ImplicitPostorder] {
            let codec = HuffmanCodec::with_decode_strategy(strategy);
            assert!(codec.verify_roundtrip(&data).unwrap(), "size {}", size);
        }
    }
}

#[test]
fn test_full_alphabet() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 10).collect();
    let codec = HuffmanCodec::new();
    let compressed = codec.compress(&data).unwrap();
    assert_eq!(compressed[0], 255, "256 leaves need 255 descriptors");
    assert_eq!(codec.decompress(&compressed).unwrap(), data);
}

#[test]
fn test_deep_tree() {
    let data = fibonacci_data(25);
    let freq = FrequencyTable::from_bytes(&data);
    let book = CodeBook::from_tree(&assemble(&freq));
    assert_eq!(book.max_code_len(), 24);

    for strategy in [DecodeStrategy::Indexed, DecodeStrategy::ImplicitPostorder] {
        let codec = HuffmanCodec::with_decode_strategy(strategy);
        assert!(codec.verify_roundtrip(&data).unwrap());
    }
}

#[test]
fn test_skewed_text_compresses() {
    let text = "It was the best of times, it was the worst of times. ".repeat(200);
    let codec = HuffmanCodec::new();
    let ratio = codec.measure_ratio(text.as_bytes()).unwrap();
    assert!(ratio.is_effective());
    assert!(ratio.ratio() > 1.5, "ratio {}", ratio.ratio());
}

#[test]
fn test_balancing_never_hurts() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let alphabet = rng.gen_range(2..40u8);
        let data: Vec<u8> = (0..2000)
            .map(|_| {
                // Squaring skews the distribution towards small symbols.
                let x: f64 = rng.gen();
                ((x * x) * alphabet as f64) as u8
            })
            .collect();

        let freq = FrequencyTable::from_bytes(&data);
        let mut tree = assemble(&freq);
        let before = average_code_length(&CodeBook::from_tree(&tree), &freq);
        let shape = tree.clone();

        balance(&mut tree, &freq);

        let after = average_code_length(&CodeBook::from_tree(&tree), &freq);
        assert!(after <= before + 1e-12);
        assert!(tree.same_shape(&shape));
        assert_eq!(
            serialize_tree(&tree).unwrap().len(),
            serialize_tree(&shape).unwrap().len()
        );
    }
}

#[test]
fn test_unbalanced_config_matches_plain_huffman() {
    let data = b"configuration without the balancer";
    let plain = HuffmanCodec::with_config(HuffmanConfig::default().with_balancing(false));
    let balanced = HuffmanCodec::new();

    let (_, plain_stats) = plain.compress_with_stats(data).unwrap();
    let (_, balanced_stats) = balanced.compress_with_stats(data).unwrap();

    // A Huffman tree is already optimal, so relabeling cannot shorten it.
    assert_eq!(plain_stats.payload_bits, balanced_stats.payload_bits);
}
