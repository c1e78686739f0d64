//! Codec implementation for Huffman containers.

use huffpack_core::{Codec, CompressionStats, Compressor, Decompressor, Result};

use crate::compress::compress_with;
use crate::config::HuffmanConfig;
use crate::container::{MAX_NODE_COUNT, SIZE_FIELD_LEN};
use crate::decompress::decompress_with;
use crate::tree_codec::{DecodeStrategy, DESCRIPTOR_SIZE};

/// Huffman codec.
#[derive(Debug, Clone, Default)]
pub struct HuffmanCodec {
    config: HuffmanConfig,
}

impl HuffmanCodec {
    /// Create a new codec with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with configuration.
    pub fn with_config(config: HuffmanConfig) -> Self {
        Self { config }
    }

    /// Create with a decode strategy and otherwise default options.
    pub fn with_decode_strategy(strategy: DecodeStrategy) -> Self {
        Self::with_config(HuffmanConfig::default().with_decode_strategy(strategy))
    }

    /// Active configuration.
    pub fn config(&self) -> &HuffmanConfig {
        &self.config
    }

    /// Compress and return statistics for this call.
    pub fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        compress_with(input, &self.config)
    }
}

impl Compressor for HuffmanCodec {
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        compress_with(input, &self.config).map(|(bytes, _)| bytes)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        // A Huffman code never costs more than the fixed 8-bit code, so the
        // payload is at most the input length.
        1 + MAX_NODE_COUNT * DESCRIPTOR_SIZE + SIZE_FIELD_LEN + 1 + input_len
    }
}

impl Decompressor for HuffmanCodec {
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        decompress_with(input, self.config.decode_strategy)
    }
}

impl Codec for HuffmanCodec {
    fn new() -> Self {
        HuffmanCodec::new()
    }
}
