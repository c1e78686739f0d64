//! Symbol codes derived from a Huffman tree.
//!
//! A code is the root-to-leaf path of its symbol: `0` for a left edge, `1` for
//! a right edge, most significant (closest to the root) bit first.

use std::collections::HashMap;
use std::fmt;

use crate::frequency::{FrequencyTable, NUM_SYMBOLS};
use crate::tree::{HuffmanTree, Node};

/// Longest representable code.
///
/// A tree over 256 symbols has 255 internal nodes, so no path is longer.
pub const MAX_CODE_BITS: usize = 256;

const WORDS: usize = MAX_CODE_BITS / 64;

/// A bitstring of up to [`MAX_CODE_BITS`] bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Code {
    words: [u64; WORDS],
    len: u16,
}

impl Code {
    /// The empty bitstring.
    pub const fn empty() -> Self {
        Self {
            words: [0; WORDS],
            len: 0,
        }
    }

    /// Parse a string of `'0'`/`'1'` characters.
    ///
    /// Returns `None` for any other character or an over-long string.
    pub fn parse(bits: &str) -> Option<Self> {
        let mut code = Self::empty();
        for c in bits.chars() {
            if code.len() == MAX_CODE_BITS {
                return None;
            }
            match c {
                '0' => code.push(false),
                '1' => code.push(true),
                _ => return None,
            }
        }
        Some(code)
    }

    /// Number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True for the empty bitstring.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append one bit.
    ///
    /// # Panics
    /// Panics when the code already holds [`MAX_CODE_BITS`] bits.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let i = self.len();
        assert!(i < MAX_CODE_BITS, "code longer than {MAX_CODE_BITS} bits");
        if bit {
            self.words[i / 64] |= 1 << (63 - i % 64);
        }
        self.len += 1;
    }

    /// Copy of this code with one more bit.
    #[inline]
    pub fn with(mut self, bit: bool) -> Self {
        self.push(bit);
        self
    }

    /// Bit at position `i`, counted from the root edge.
    #[inline]
    pub fn bit(&self, i: usize) -> bool {
        debug_assert!(i < self.len());
        (self.words[i / 64] >> (63 - i % 64)) & 1 == 1
    }

    /// Iterate bits from the root edge.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(|i| self.bit(i))
    }

    /// True when `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len()).all(|i| self.bit(i) == other.bit(i))
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code(\"{self}\")")
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol → code mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    codes: Box<[Option<Code>; NUM_SYMBOLS]>,
}

impl CodeBook {
    /// Derive the codes of every leaf in `tree`.
    ///
    /// A lone leaf root has no edges and is assigned the one-bit code `1`.
    /// The empty tree yields an empty codebook.
    ///
    /// # Panics
    /// Panics if a leaf is deeper than [`MAX_CODE_BITS`]. Trees from
    /// [`assemble`](crate::assemble) or a parsed node table hold at most 255
    /// internal nodes and never reach it.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut book = Self::empty();
        let Some(root) = tree.root() else {
            return book;
        };

        if let Node::Leaf { symbol } = tree.node(root) {
            book.insert(*symbol, Code::empty().with(true));
            return book;
        }

        let mut stack = vec![(root, Code::empty())];
        while let Some((id, path)) = stack.pop() {
            match tree.node(id) {
                Node::Leaf { symbol } => book.insert(*symbol, path),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, path.with(true)));
                    stack.push((*left, path.with(false)));
                }
            }
        }
        book
    }

    /// Build a codebook from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (u8, Code)>) -> Self {
        let mut book = Self::empty();
        for (symbol, code) in entries {
            book.insert(symbol, code);
        }
        book
    }

    fn empty() -> Self {
        Self {
            codes: Box::new([None; NUM_SYMBOLS]),
        }
    }

    fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    /// Code for `symbol`, if present.
    #[inline]
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    /// True when no symbol has a code.
    pub fn is_empty(&self) -> bool {
        self.codes.iter().all(Option::is_none)
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }

    /// Length of the longest code, 0 when empty.
    pub fn max_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).max().unwrap_or(0)
    }

    /// Length of the shortest code, 0 when empty.
    pub fn min_code_len(&self) -> usize {
        self.iter().map(|(_, c)| c.len()).min().unwrap_or(0)
    }

    /// Check that no code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let entries: Vec<&Code> = self.iter().map(|(_, c)| c).collect();
        entries.iter().enumerate().all(|(i, a)| {
            entries[i + 1..]
                .iter()
                .all(|b| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }

    /// Total payload bits needed to encode a buffer with frequencies `freq`,
    /// saturating at `u64::MAX`.
    pub fn encoded_bits(&self, freq: &FrequencyTable) -> u64 {
        freq.iter()
            .map(|(s, count)| count.saturating_mul(self.get(s).map_or(0, |c| c.len() as u64)))
            .fold(0u64, u64::saturating_add)
    }

    /// Build the code → symbol map used for decoding.
    pub fn inverse(&self) -> InverseCodeBook {
        InverseCodeBook {
            map: self.iter().map(|(s, c)| (*c, s)).collect(),
            max_len: self.max_code_len(),
        }
    }
}

/// Code → symbol mapping.
#[derive(Debug, Clone, Default)]
pub struct InverseCodeBook {
    map: HashMap<Code, u8>,
    max_len: usize,
}

impl InverseCodeBook {
    /// Symbol whose code is exactly `code`.
    #[inline]
    pub fn lookup(&self, code: &Code) -> Option<u8> {
        self.map.get(code).copied()
    }

    /// Length of the longest code.
    #[inline]
    pub fn max_code_len(&self) -> usize {
        self.max_len
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Weighted average code length `Σ freq·len / Σ freq`.
///
/// Returns 0.0 for an empty table.
pub fn average_code_length(book: &CodeBook, freq: &FrequencyTable) -> f64 {
    let total = freq.total();
    if total == 0 {
        return 0.0;
    }
    book.encoded_bits(freq) as f64 / total as f64
}
