//! Statistics for compression operations.

use crate::types::CompressionRatio;

/// Statistics from a single compression operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompressionStats {
    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Compressed container size in bytes.
    pub compressed_size: usize,

    /// Payload length in bits, before padding.
    pub payload_bits: u64,

    /// Number of internal tree nodes (serialized descriptors).
    pub internal_nodes: usize,

    /// Number of distinct symbols in the input.
    pub distinct_symbols: usize,

    /// Weighted average code length in bits per symbol.
    pub average_code_length: f64,

    /// Time taken in microseconds.
    pub time_us: u64,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }

    /// Get space savings as percentage.
    pub fn savings_percent(&self) -> f64 {
        self.ratio().savings_percent()
    }

    /// Zero bits padding the final payload byte.
    pub fn padding_bits(&self) -> u64 {
        (8 - self.payload_bits % 8) % 8
    }

    /// One-line summary for reporting.
    pub fn summary(&self) -> String {
        format!(
            "{} -> {} bytes (ratio: {:.2}x), {} symbols, {} nodes, avg code {:.3} bits",
            self.original_size,
            self.compressed_size,
            self.ratio().ratio(),
            self.distinct_symbols,
            self.internal_nodes,
            self.average_code_length,
        )
    }
}
