//! Bit packing of code sequences.
//!
//! Bits are written most-significant first within each byte; the final byte
//! is padded on the right with zero bits.

use huffpack_core::{Error, Result};

use crate::codebook::{Code, CodeBook, InverseCodeBook};

/// MSB-first bit writer.
#[derive(Debug)]
pub struct BitWriter {
    data: Vec<u8>,
    bit_buf: u8,
    bit_count: u8,
    total_bits: u64,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create with capacity in bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            bit_buf: 0,
            bit_count: 0,
            total_bits: 0,
        }
    }

    /// Write one bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) {
        self.bit_buf = (self.bit_buf << 1) | bit as u8;
        self.bit_count += 1;
        self.total_bits += 1;

        if self.bit_count == 8 {
            self.data.push(self.bit_buf);
            self.bit_buf = 0;
            self.bit_count = 0;
        }
    }

    /// Write every bit of `code`.
    #[inline]
    pub fn write_code(&mut self, code: &Code) {
        for bit in code.bits() {
            self.write_bit(bit);
        }
    }

    /// Bits written so far, excluding padding.
    pub fn bit_len(&self) -> u64 {
        self.total_bits
    }

    /// Flush remaining bits (pad with zeros).
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.data.push(self.bit_buf << (8 - self.bit_count));
        }
        self.data
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// MSB-first bit reader.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Read one bit, `None` at end of input.
    #[inline]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.data.get(self.pos / 8)?;
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Bits consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }
}

/// Bit-packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedBits {
    /// Packed bytes, zero padded.
    pub bytes: Vec<u8>,
    /// Meaningful bits before padding.
    pub bit_len: u64,
}

/// Concatenate the code of every input symbol and pack the result.
///
/// # Panics
/// Panics if `input` holds a symbol without a code. Codebooks built from the
/// same buffer always cover it.
pub fn pack(input: &[u8], book: &CodeBook) -> PackedBits {
    let mut writer = BitWriter::with_capacity(input.len() / 2 + 1);
    for &symbol in input {
        match book.get(symbol) {
            Some(code) => writer.write_code(code),
            None => panic!("symbol {symbol} has no code in the codebook"),
        }
    }
    let bit_len = writer.bit_len();
    PackedBits {
        bytes: writer.finish(),
        bit_len,
    }
}

/// Decode exactly `count` symbols from `data`.
///
/// Bits after the last symbol are ignored.
pub fn unpack(data: &[u8], inverse: &InverseCodeBook, count: usize) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(count);
    if count == 0 {
        return Ok(output);
    }
    if inverse.is_empty() {
        return Err(Error::corrupt_stream("no codes to decode with", 0));
    }

    let mut reader = BitReader::new(data);
    let mut candidate = Code::empty();

    while output.len() < count {
        let Some(bit) = reader.read_bit() else {
            return Err(Error::corrupt_stream(
                format!("bitstream exhausted after {} bits", reader.position()),
                output.len(),
            ));
        };
        candidate.push(bit);

        if let Some(symbol) = inverse.lookup(&candidate) {
            output.push(symbol);
            candidate = Code::empty();
        } else if candidate.len() >= inverse.max_code_len() {
            return Err(Error::corrupt_stream(
                format!(
                    "no code matches {} bits ending at bit {}",
                    candidate.len(),
                    reader.position()
                ),
                output.len(),
            ));
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_book() -> CodeBook {
        CodeBook::from_entries([
            (0, Code::parse("0").unwrap()),
            (1, Code::parse("10").unwrap()),
            (2, Code::parse("11").unwrap()),
        ])
    }

    #[test]
    fn test_pack_one_byte() {
        let packed = pack(&[1, 2, 1, 0], &scenario_book());
        assert_eq!(packed.bytes, vec![0b1011_1000]);
        assert_eq!(packed.bit_len, 7);
    }

    #[test]
    fn test_pack_two_bytes() {
        let packed = pack(&[1, 2, 1, 0, 2], &scenario_book());
        assert_eq!(packed.bytes, vec![0b1011_1001, 0b1000_0000]);
        assert_eq!(packed.bit_len, 9);
    }

    #[test]
    fn test_unpack_ignores_padding() {
        let inverse = scenario_book().inverse();
        let out = unpack(&[0b1011_1001, 0b1000_0000], &inverse, 5).unwrap();
        assert_eq!(out, vec![1, 2, 1, 0, 2]);

        // The padding zeros would decode as symbol 0 if the count were ignored.
        let out = unpack(&[0b1011_1000], &inverse, 4).unwrap();
        assert_eq!(out, vec![1, 2, 1, 0]);
    }

    #[test]
    fn test_unpack_exhausted() {
        let inverse = scenario_book().inverse();
        let err = unpack(&[0b1011_1000], &inverse, 9).unwrap_err();
        assert!(matches!(err, Error::CorruptStream { decoded: 8, .. }));
    }

    #[test]
    fn test_unpack_no_match() {
        // Only "0" and "11" exist; "10" never matches within two bits.
        let book = CodeBook::from_entries([
            (0, Code::parse("0").unwrap()),
            (2, Code::parse("11").unwrap()),
        ]);
        let err = unpack(&[0b1000_0000], &book.inverse(), 1).unwrap_err();
        assert!(matches!(err, Error::CorruptStream { decoded: 0, .. }));
    }

    #[test]
    fn test_bit_writer_reader() {
        let mut writer = BitWriter::new();
        for bit in [true, false, true, true, false, false, true, false, true] {
            writer.write_bit(bit);
        }
        assert_eq!(writer.bit_len(), 9);
        let bytes = writer.finish();
        assert_eq!(bytes, vec![0b1011_0010, 0b1000_0000]);

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.remaining(), 16);
        assert_eq!(reader.read_bit(), Some(true));
        assert_eq!(reader.read_bit(), Some(false));
        assert_eq!(reader.position(), 2);
    }

    #[test]
    #[should_panic(expected = "has no code")]
    fn test_pack_missing_symbol_panics() {
        pack(&[7], &scenario_book());
    }
}
