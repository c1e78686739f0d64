//! Byte frequency counting.

/// Number of distinct byte symbols.
pub const NUM_SYMBOLS: usize = 256;

/// Occurrence count of every byte value in one input buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; NUM_SYMBOLS],
}

impl FrequencyTable {
    /// Count symbol occurrences with a single pass over `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; NUM_SYMBOLS];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Build a table from explicit `(symbol, count)` pairs.
    ///
    /// Zero counts are ignored; repeated symbols accumulate, saturating at
    /// `u64::MAX`.
    pub fn from_counts(pairs: impl IntoIterator<Item = (u8, u64)>) -> Self {
        let mut counts = [0u64; NUM_SYMBOLS];
        for (symbol, count) in pairs {
            let slot = &mut counts[symbol as usize];
            *slot = slot.saturating_add(count);
        }
        Self { counts }
    }

    /// Occurrences of `symbol` (zero when absent).
    #[inline]
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols present.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when no symbol is present.
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Sum of all counts (the length of the counted buffer), saturating.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            counts: [0u64; NUM_SYMBOLS],
        }
    }
}
