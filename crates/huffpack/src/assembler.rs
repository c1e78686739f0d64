//! Greedy Huffman tree assembly.
//!
//! Entries are kept in a min-heap keyed by `(weight, sequence)`. Leaves are
//! inserted in ascending symbol order with sequence numbers `0..n`, and every
//! merged node takes the next unused sequence number. Equal weights therefore
//! always resolve to the entry inserted first, which makes the tree a pure
//! function of the frequency table.
//!
//! The first entry extracted becomes the left child, the second the right.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, NodeId};

/// Heap key: weight first, insertion sequence as the tie-break.
type Entry = Reverse<(u64, u64, NodeId)>;

/// Build the Huffman tree for `freq`.
///
/// Returns the empty tree for an empty table and a single-leaf tree when only
/// one symbol is present.
pub fn assemble(freq: &FrequencyTable) -> HuffmanTree {
    let distinct = freq.len();
    let mut tree = HuffmanTree::with_capacity(distinct.saturating_mul(2));

    let mut heap: BinaryHeap<Entry> = BinaryHeap::with_capacity(distinct);
    let mut sequence = 0u64;
    for (symbol, count) in freq.iter() {
        let leaf = tree.push_leaf(symbol);
        heap.push(Reverse((count, sequence, leaf)));
        sequence += 1;
    }

    while let Some(Reverse((weight, _, first))) = heap.pop() {
        let Some(Reverse((other, _, second))) = heap.pop() else {
            tree.set_root(first);
            break;
        };
        let merged = tree.push_internal(first, second);
        heap.push(Reverse((weight.saturating_add(other), sequence, merged)));
        sequence += 1;
    }

    tree
}
