//! Buffer compression.

use std::time::Instant;

use huffpack_core::{CompressionStats, Error, Result};
use tracing::debug;

use crate::assembler::assemble;
use crate::balancer::balance;
use crate::bits::pack;
use crate::codebook::{average_code_length, CodeBook};
use crate::config::HuffmanConfig;
use crate::container::Container;
use crate::frequency::FrequencyTable;
use crate::tree_codec::serialize;

/// Largest input the 32-bit size field can describe.
pub const MAX_INPUT_SIZE: usize = u32::MAX as usize;

/// Compress `input` with the default configuration.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    compress_with(input, &HuffmanConfig::default()).map(|(bytes, _)| bytes)
}

/// Compress `input` and report statistics.
pub fn compress_with(input: &[u8], config: &HuffmanConfig) -> Result<(Vec<u8>, CompressionStats)> {
    let start = Instant::now();
    let original_size = u32::try_from(input.len()).map_err(|_| Error::InputTooLarge {
        len: input.len(),
        max: MAX_INPUT_SIZE,
    })?;

    let freq = FrequencyTable::from_bytes(input);
    let mut tree = assemble(&freq);
    if config.balance_tree {
        let swaps = balance(&mut tree, &freq);
        debug!(swaps, "balanced leaf symbols");
    }
    let internal_nodes = tree.number_internal_nodes();

    let book = CodeBook::from_tree(&tree);
    if config.verify_prefix_free && !book.is_prefix_free() {
        return Err(Error::InvalidTree(
            "generated codebook is not prefix-free".into(),
        ));
    }

    let node_table = serialize(&tree)?;
    let packed = pack(input, &book);
    let lone_symbol = tree
        .root()
        .filter(|_| tree.is_single_leaf())
        .and_then(|root| tree.symbol(root));

    let container = Container {
        node_table,
        original_size,
        lone_symbol,
        payload: packed.bytes,
    };
    let bytes = container.to_bytes()?;

    let stats = CompressionStats {
        original_size: input.len(),
        compressed_size: bytes.len(),
        payload_bits: packed.bit_len,
        internal_nodes,
        distinct_symbols: freq.len(),
        average_code_length: average_code_length(&book, &freq),
        time_us: start.elapsed().as_micros() as u64,
    };
    debug!(
        input_len = input.len(),
        distinct = stats.distinct_symbols,
        internal_nodes,
        payload_bits = stats.payload_bits,
        output_len = bytes.len(),
        "compressed buffer"
    );

    Ok((bytes, stats))
}
