//! Container byte layout.
//!
//! ```text
//! +------------+--------------------------+-----------------+---------+
//! | node_count | node_table               | original_size   | payload |
//! | u8         | 4 * node_count bytes     | u32 LE          | ...     |
//! +------------+--------------------------+-----------------+---------+
//! ```
//!
//! A single-symbol input has a leaf root and no descriptors. Its container
//! stores `node_count = 0` and carries the symbol in one byte between the size
//! field and the payload. The empty input is exactly `[0, 0, 0, 0, 0]`.

use huffpack_core::{Error, Result};

use crate::tree_codec::{NodeTable, DESCRIPTOR_SIZE};

/// Largest node table the one-byte count can describe.
pub const MAX_NODE_COUNT: usize = u8::MAX as usize;

/// Length of the original size field.
pub const SIZE_FIELD_LEN: usize = 4;

/// Parsed container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Container {
    /// Postorder node table, root last.
    pub node_table: NodeTable,
    /// Number of symbols in the original buffer.
    pub original_size: u32,
    /// Symbol of a single-leaf tree.
    pub lone_symbol: Option<u8>,
    /// Bit-packed payload.
    pub payload: Vec<u8>,
}

impl Container {
    /// Number of descriptors.
    pub fn node_count(&self) -> usize {
        self.node_table.len()
    }

    /// Bytes preceding the payload.
    pub fn header_len(&self) -> usize {
        1 + self.node_table.byte_len() + SIZE_FIELD_LEN + usize::from(self.lone_symbol.is_some())
    }

    /// Serialize the container.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let node_count = u8::try_from(self.node_count()).map_err(|_| {
            Error::InvalidTree(format!(
                "{} descriptors exceed the {MAX_NODE_COUNT} entry node table",
                self.node_count()
            ))
        })?;
        if self.lone_symbol.is_some() && node_count != 0 {
            return Err(Error::InvalidTree(
                "lone symbol given alongside a node table".into(),
            ));
        }

        let mut out = Vec::with_capacity(self.header_len() + self.payload.len());
        out.push(node_count);
        self.node_table.write_to(&mut out);
        out.extend_from_slice(&self.original_size.to_le_bytes());
        if let Some(symbol) = self.lone_symbol {
            out.push(symbol);
        }
        out.extend_from_slice(&self.payload);
        Ok(out)
    }

    /// Parse a container. The payload is everything after the header.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let Some(&node_count) = data.first() else {
            return Err(Error::decode_at("missing node count", 0));
        };
        let node_count = node_count as usize;

        let table_end = 1 + node_count * DESCRIPTOR_SIZE;
        let size_end = table_end + SIZE_FIELD_LEN;
        if data.len() < size_end {
            return Err(Error::decode(format!(
                "container of {} bytes is too short for {} descriptors and the size field",
                data.len(),
                node_count
            )));
        }

        let node_table = NodeTable::from_bytes(&data[1..table_end])?;
        let original_size = u32::from_le_bytes([
            data[table_end],
            data[table_end + 1],
            data[table_end + 2],
            data[table_end + 3],
        ]);

        // An empty buffer has exactly one encoding: [0, 0, 0, 0, 0].
        if original_size == 0 {
            if node_count != 0 {
                return Err(Error::decode(format!(
                    "empty container carries {node_count} descriptors"
                )));
            }
            if data.len() > size_end {
                return Err(Error::decode_at(
                    "trailing bytes after empty container",
                    size_end,
                ));
            }
        }

        let mut payload_start = size_end;
        let mut lone_symbol = None;
        if node_count == 0 && original_size != 0 {
            let &symbol = data
                .get(size_end)
                .ok_or_else(|| Error::decode_at("missing lone symbol", size_end))?;
            lone_symbol = Some(symbol);
            payload_start += 1;
        }

        Ok(Self {
            node_table,
            original_size,
            lone_symbol,
            payload: data[payload_start..].to_vec(),
        })
    }
}
