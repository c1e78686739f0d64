//! # Huffpack
//!
//! Huffman coding of byte buffers into a compact, self-describing container.
//!
//! ## Pipeline
//!
//! ```text
//! bytes ─► FrequencyTable ─► assemble ─► HuffmanTree ─► [balance] ─► CodeBook
//!                                            │                          │
//!                                            ▼                          ▼
//!                                       NodeTable                  pack(bytes)
//!                                            └──────► Container ◄───────┘
//! ```
//!
//! Decompression parses the [`Container`], rebuilds the tree from the node
//! table with a [`TreeDecoder`], and unpacks exactly the declared number of
//! symbols.
//!
//! ## Container
//!
//! `node_count:u8 | node_table:4*node_count | original_size:u32 LE | payload`
//!
//! See [`container`] for the single-symbol layout.
//!
//! ## Example
//!
//! ```
//! use huffpack::{HuffmanCodec, Compressor, Decompressor};
//!
//! let codec = HuffmanCodec::new();
//! let compressed = codec.compress(b"abracadabra").unwrap();
//! let original = codec.decompress(&compressed).unwrap();
//! assert_eq!(original, b"abracadabra");
//! ```

pub mod assembler;
pub mod balancer;
pub mod bits;
pub mod codebook;
pub mod codec;
pub mod compress;
pub mod config;
pub mod container;
pub mod decompress;
pub mod frequency;
pub mod tree;
pub mod tree_codec;

// Re-export main types
pub use codebook::{average_code_length, Code, CodeBook, InverseCodeBook};
pub use codec::HuffmanCodec;
pub use config::HuffmanConfig;
pub use container::Container;
pub use frequency::FrequencyTable;
pub use tree::{HuffmanTree, Node, NodeId};
pub use tree_codec::{
    serialize as serialize_tree, ChildRef, DecodeStrategy, ImplicitPostorderDecoder,
    IndexedDecoder, NodeTable, ReadNode, TreeDecoder,
};

// Re-export raw functions for advanced use
pub use assembler::assemble;
pub use balancer::balance;
pub use bits::{pack, unpack, PackedBits};
pub use compress::{compress, compress_with};
pub use decompress::{decompress, decompress_with};

pub use huffpack_core::{
    Codec, CompressionRatio, CompressionStats, Compressor, Decompressor, Error, Result,
};
