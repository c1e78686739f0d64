//! Container decompression.

use huffpack_core::{Error, Result};
use tracing::debug;

use crate::bits::unpack;
use crate::codebook::CodeBook;
use crate::container::Container;
use crate::tree::HuffmanTree;
use crate::tree_codec::DecodeStrategy;

/// Decompress a container produced by [`compress`](crate::compress).
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    decompress_with(input, DecodeStrategy::Indexed)
}

/// Decompress rebuilding the tree with `strategy`.
pub fn decompress_with(input: &[u8], strategy: DecodeStrategy) -> Result<Vec<u8>> {
    let container = Container::from_bytes(input)?;
    let count = container.original_size as usize;
    debug!(
        node_count = container.node_count(),
        original_size = count,
        payload_len = container.payload.len(),
        strategy = strategy.decoder().name(),
        "parsed container header"
    );

    if count == 0 {
        return Ok(Vec::new());
    }

    let tree = rebuild_tree(&container, strategy)?;
    let book = CodeBook::from_tree(&tree);
    if book.len() != tree.leaf_count() {
        return Err(Error::decode("a symbol appears at more than one leaf"));
    }

    let available_bits = container.payload.len() as u64 * 8;
    let required_bits = count as u64 * book.min_code_len() as u64;
    if required_bits > available_bits {
        return Err(Error::decode(format!(
            "{count} symbols need at least {required_bits} bits, payload holds {available_bits}"
        )));
    }

    unpack(&container.payload, &book.inverse(), count)
}

fn rebuild_tree(container: &Container, strategy: DecodeStrategy) -> Result<HuffmanTree> {
    let Some(root_index) = container.node_table.root_index() else {
        return container
            .lone_symbol
            .map(HuffmanTree::single_leaf)
            .ok_or_else(|| Error::decode("no node table and no lone symbol"));
    };

    let tree = strategy.decode(&container.node_table, root_index)?;
    let used = tree.internal_count();
    if used != container.node_count() {
        return Err(Error::decode(format!(
            "tree uses {} of {} descriptors",
            used,
            container.node_count()
        )));
    }
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress;

    #[test]
    fn test_scenario_roundtrip() {
        let input = [65, 66, 67, 66];
        let packed = compress(&input).unwrap();
        assert_eq!(decompress(&packed).unwrap(), input);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(decompress(&[0, 0, 0, 0, 0]).unwrap().is_empty());

        let input = vec![7u8; 300];
        assert_eq!(decompress(&compress(&input).unwrap()).unwrap(), input);
    }

    #[test]
    fn test_implicit_strategy() {
        let input = b"decoding with postorder adjacency only";
        let packed = compress(input).unwrap();
        let out = decompress_with(&packed, DecodeStrategy::ImplicitPostorder).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn test_size_exceeds_payload() {
        let mut packed = compress(&[65, 66, 67, 66]).unwrap();
        // Declare 100 symbols for a one-byte payload.
        packed[9] = 100;
        assert!(matches!(decompress(&packed), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_stream_exhausted() {
        let mut packed = compress(&[65, 66, 67, 66]).unwrap();
        // Seven one-bit symbols fit in the 8 payload bits, but the codes use 6
        // bits for the real symbols and the 2 padding zeros decode as 66,
        // leaving the stream empty one symbol short.
        packed[9] = 7;
        assert!(matches!(
            decompress(&packed),
            Err(Error::CorruptStream { .. })
        ));
    }

    #[test]
    fn test_unreachable_descriptor_rejected() {
        // Root at index 1 is a leaf pair; descriptor 0 is never referenced.
        let bytes = [2, 0, 1, 0, 2, 0, 3, 0, 4, 1, 0, 0, 0, 0];
        assert!(matches!(decompress(&bytes), Err(Error::Decode { .. })));
    }

    #[test]
    fn test_zero_size_with_table_rejected() {
        let with_payload = [1, 0, 1, 0, 2, 0, 0, 0, 0, 0xAA];
        assert!(matches!(
            decompress(&with_payload),
            Err(Error::Decode { .. })
        ));

        // Self-referencing descriptor that would otherwise never be walked.
        let cyclic = [1, 1, 0, 0, 1, 0, 0, 0, 0];
        for strategy in [DecodeStrategy::Indexed, DecodeStrategy::ImplicitPostorder] {
            assert!(matches!(
                decompress_with(&cyclic, strategy),
                Err(Error::Decode { .. })
            ));
        }

        assert!(decompress(&[0, 0, 0, 0, 0, 0xAA]).is_err());
    }

    #[test]
    fn test_duplicate_leaf_rejected() {
        let bytes = [1, 0, 5, 0, 5, 1, 0, 0, 0, 0];
        assert!(matches!(decompress(&bytes), Err(Error::Decode { .. })));
    }
}
