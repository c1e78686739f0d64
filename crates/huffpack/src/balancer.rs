//! Shape-preserving leaf relabeling.
//!
//! The balancer keeps the tree topology and only moves symbols between
//! leaves. It pairs the most frequent unsettled symbol with the shallowest
//! unsettled leaf until every leaf is settled. The result never has a more
//! frequent symbol strictly deeper than a less frequent one.

use tracing::trace;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, NodeId};

#[derive(Debug)]
struct Slot {
    leaf: NodeId,
    depth: usize,
    symbol: u8,
    settled: bool,
}

/// Reassign leaf symbols of `tree` by frequency and depth.
///
/// Leaf selection: the shallowest unsettled leaf, ties broken by the smallest
/// frequency of the symbol it currently holds, then by the smallest symbol
/// value. Symbol selection: the highest frequency, ties broken by the smallest
/// symbol value. Symbols absent from `freq` count as zero.
///
/// Returns the number of label swaps performed.
pub fn balance(tree: &mut HuffmanTree, freq: &FrequencyTable) -> usize {
    let mut slots: Vec<Slot> = tree
        .leaves_with_depth()
        .into_iter()
        .filter_map(|(leaf, depth)| {
            tree.symbol(leaf).map(|symbol| Slot {
                leaf,
                depth,
                symbol,
                settled: false,
            })
        })
        .collect();

    let mut swaps = 0;
    loop {
        // Settled slots always hold settled symbols, so both picks come from
        // the unsettled slots.
        let Some(target) = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.settled)
            .min_by_key(|(_, s)| (s.depth, freq.get(s.symbol), s.symbol))
            .map(|(i, _)| i)
        else {
            break;
        };
        let Some(holder) = slots
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.settled)
            .max_by_key(|(_, s)| (freq.get(s.symbol), std::cmp::Reverse(s.symbol)))
            .map(|(i, _)| i)
        else {
            break;
        };

        if holder != target {
            let moved = slots[holder].symbol;
            let displaced = slots[target].symbol;
            trace!(
                symbol = moved,
                from_depth = slots[holder].depth,
                to_depth = slots[target].depth,
                displaced,
                "swapping leaf symbols"
            );
            slots[holder].symbol = displaced;
            slots[target].symbol = moved;
            swaps += 1;
        }
        slots[target].settled = true;
    }

    for slot in &slots {
        tree.set_symbol(slot.leaf, slot.symbol);
    }
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use crate::codebook::{average_code_length, CodeBook};

    /// (((a, b), c), d): depths 3, 3, 2, 1.
    fn caterpillar(symbols: [u8; 4]) -> HuffmanTree {
        let mut tree = HuffmanTree::new();
        let a = tree.push_leaf(symbols[0]);
        let b = tree.push_leaf(symbols[1]);
        let ab = tree.push_internal(a, b);
        let c = tree.push_leaf(symbols[2]);
        let abc = tree.push_internal(ab, c);
        let d = tree.push_leaf(symbols[3]);
        let root = tree.push_internal(abc, d);
        tree.set_root(root);
        tree
    }

    fn avg(tree: &HuffmanTree, freq: &FrequencyTable) -> f64 {
        average_code_length(&CodeBook::from_tree(tree), freq)
    }

    #[test]
    fn test_inverted_tree_is_fixed() {
        // Most frequent symbol sits deepest.
        let freq = FrequencyTable::from_counts([(1, 40), (2, 30), (3, 20), (4, 10)]);
        let mut tree = caterpillar([1, 2, 3, 4]);
        let before = avg(&tree, &freq);

        let swaps = balance(&mut tree, &freq);
        let after = avg(&tree, &freq);

        assert!(swaps > 0);
        assert!(after < before);
        // Both depth-3 leaves cost the same; the tie goes to the leftmost one
        // because it held the rarer symbol.
        assert_eq!(tree.leaf_symbols(), vec![3, 4, 2, 1]);
        assert!(tree.same_shape(&caterpillar([0; 4])));
    }

    #[test]
    fn test_huffman_tree_not_worsened() {
        let data = b"the quick brown fox jumps over the lazy dog again and again";
        let freq = FrequencyTable::from_bytes(data);
        let mut tree = assemble(&freq);
        let original = tree.clone();
        let before = avg(&tree, &freq);

        balance(&mut tree, &freq);

        assert!(avg(&tree, &freq) <= before + 1e-12);
        assert!(tree.same_shape(&original));
        assert_eq!(tree.leaf_count(), original.leaf_count());
    }

    #[test]
    fn test_symbols_preserved() {
        let freq = FrequencyTable::from_counts([(1, 5), (2, 5), (3, 5), (4, 5)]);
        let mut tree = caterpillar([4, 2, 3, 1]);
        balance(&mut tree, &freq);

        let mut symbols = tree.leaf_symbols();
        symbols.sort_unstable();
        assert_eq!(symbols, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_degenerate_trees_unchanged() {
        let freq = FrequencyTable::from_bytes(&[5, 5, 5]);
        let mut single = HuffmanTree::single_leaf(5);
        assert_eq!(balance(&mut single, &freq), 0);
        assert_eq!(single.leaf_symbols(), vec![5]);

        let mut empty = HuffmanTree::new();
        assert_eq!(balance(&mut empty, &FrequencyTable::default()), 0);
        assert!(empty.is_empty());
    }
}
