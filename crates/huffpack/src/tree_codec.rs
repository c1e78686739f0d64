//! Node table serialization of Huffman trees.
//!
//! ## Descriptor Layout
//!
//! Each internal node is written as one 4-byte descriptor, in postorder:
//!
//! ```text
//! +-------------------+----------+--------------------+-----------+
//! | left_is_internal  | left_ref | right_is_internal  | right_ref |
//! +-------------------+----------+--------------------+-----------+
//! ```
//!
//! Flags are `0` or `1`. A leaf reference is the symbol value; an internal
//! reference is the child's postorder number, which is also its position in
//! the table.
//!
//! ## Decoding
//!
//! Two strategies read the same table:
//!
//! - [`IndexedDecoder`] follows internal references as absolute indices, so
//!   descriptor order does not matter.
//! - [`ImplicitPostorderDecoder`] ignores internal references and relies on
//!   postorder adjacency alone: the right child precedes its parent, and the
//!   left child precedes the right child's whole block.

use std::collections::HashMap;

use huffpack_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::tree::{HuffmanTree, Node, NodeId};

/// Size of one serialized descriptor in bytes.
pub const DESCRIPTOR_SIZE: usize = 4;

/// Largest table the one-byte references can address.
pub const MAX_TABLE_ENTRIES: usize = 256;

/// Reference from a descriptor to one child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRef {
    /// Leaf child holding a symbol.
    Leaf(u8),
    /// Internal child, by postorder number.
    Internal(u8),
}

impl ChildRef {
    fn to_bytes(self) -> [u8; 2] {
        match self {
            ChildRef::Leaf(symbol) => [0, symbol],
            ChildRef::Internal(number) => [1, number],
        }
    }

    fn from_bytes(flag: u8, value: u8, offset: usize) -> Result<Self> {
        match flag {
            0 => Ok(ChildRef::Leaf(value)),
            1 => Ok(ChildRef::Internal(value)),
            other => Err(Error::decode_at(
                format!("invalid child flag {other}"),
                offset,
            )),
        }
    }
}

/// Serialized form of one internal node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadNode {
    pub left: ChildRef,
    pub right: ChildRef,
}

impl ReadNode {
    /// Encode as 4 bytes.
    pub fn to_bytes(self) -> [u8; DESCRIPTOR_SIZE] {
        let [lf, lv] = self.left.to_bytes();
        let [rf, rv] = self.right.to_bytes();
        [lf, lv, rf, rv]
    }

    /// Decode 4 bytes found at `offset` of the enclosing buffer.
    pub fn from_bytes(bytes: [u8; DESCRIPTOR_SIZE], offset: usize) -> Result<Self> {
        Ok(Self {
            left: ChildRef::from_bytes(bytes[0], bytes[1], offset)?,
            right: ChildRef::from_bytes(bytes[2], bytes[3], offset + 2)?,
        })
    }
}

/// Postorder sequence of internal-node descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeTable {
    entries: Vec<ReadNode>,
}

impl NodeTable {
    /// Wrap raw descriptors.
    pub fn new(entries: Vec<ReadNode>) -> Self {
        Self { entries }
    }

    /// Number of descriptors.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no descriptors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptor at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ReadNode> {
        self.entries.get(index)
    }

    /// All descriptors in table order.
    pub fn entries(&self) -> &[ReadNode] {
        &self.entries
    }

    /// Index of the root descriptor of a postorder table.
    pub fn root_index(&self) -> Option<usize> {
        self.entries.len().checked_sub(1)
    }

    /// Serialized length in bytes.
    pub fn byte_len(&self) -> usize {
        self.entries.len() * DESCRIPTOR_SIZE
    }

    /// Concatenate all descriptors.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        self.write_to(&mut out);
        out
    }

    /// Append all descriptors to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for entry in &self.entries {
            out.extend_from_slice(&entry.to_bytes());
        }
    }

    /// Parse a descriptor sequence. `data` must be a whole number of
    /// descriptors.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() % DESCRIPTOR_SIZE != 0 {
            return Err(Error::decode(format!(
                "node table length {} is not a multiple of {}",
                data.len(),
                DESCRIPTOR_SIZE
            )));
        }

        let entries = data
            .chunks_exact(DESCRIPTOR_SIZE)
            .enumerate()
            .map(|(i, chunk)| {
                let bytes = [chunk[0], chunk[1], chunk[2], chunk[3]];
                ReadNode::from_bytes(bytes, i * DESCRIPTOR_SIZE)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { entries })
    }
}

/// Emit one descriptor per internal node of `tree`, in postorder.
///
/// Leaf-root and empty trees produce an empty table.
pub fn serialize(tree: &HuffmanTree) -> Result<NodeTable> {
    let mut numbers: HashMap<NodeId, u8> = HashMap::new();
    let mut entries = Vec::new();

    let child_ref = |id: NodeId, numbers: &HashMap<NodeId, u8>| match tree.node(id) {
        Node::Leaf { symbol } => ChildRef::Leaf(*symbol),
        Node::Internal { .. } => ChildRef::Internal(numbers[&id]),
    };

    for id in tree.postorder() {
        let Node::Internal { left, right, .. } = tree.node(id) else {
            continue;
        };
        let number = u8::try_from(entries.len()).map_err(|_| {
            Error::InvalidTree(format!(
                "more than {MAX_TABLE_ENTRIES} internal nodes cannot be addressed"
            ))
        })?;
        entries.push(ReadNode {
            left: child_ref(*left, &numbers),
            right: child_ref(*right, &numbers),
        });
        numbers.insert(id, number);
    }

    Ok(NodeTable { entries })
}

/// Reconstruction of a tree from a node table.
pub trait TreeDecoder {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Rebuild the tree rooted at descriptor `root_index`.
    ///
    /// The returned tree is numbered in postorder.
    fn decode(&self, table: &NodeTable, root_index: usize) -> Result<HuffmanTree>;
}

fn check_root(table: &NodeTable, root_index: usize) -> Result<()> {
    if root_index >= table.len() {
        return Err(Error::decode(format!(
            "root index {} outside node table of {} entries",
            root_index,
            table.len()
        )));
    }
    Ok(())
}

/// Decoder for tables whose internal references are absolute indices.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedDecoder;

impl TreeDecoder for IndexedDecoder {
    fn name(&self) -> &'static str {
        "indexed"
    }

    fn decode(&self, table: &NodeTable, root_index: usize) -> Result<HuffmanTree> {
        check_root(table, root_index)?;

        let mut tree = HuffmanTree::with_capacity(table.len() * 2 + 1);
        let mut claimed = vec![false; table.len()];
        claimed[root_index] = true;

        // (descriptor, children scheduled) work items; finished subtrees are
        // parked on `built` in left-then-right order.
        let mut work = vec![(root_index, false)];
        let mut built: Vec<NodeId> = Vec::new();

        while let Some((index, expanded)) = work.pop() {
            let desc = table.entries[index];
            if !expanded {
                work.push((index, true));
                for child in [desc.right, desc.left] {
                    if let ChildRef::Internal(target) = child {
                        let target = target as usize;
                        if target >= table.len() {
                            return Err(Error::decode(format!(
                                "descriptor {index} references missing descriptor {target}"
                            )));
                        }
                        if claimed[target] {
                            return Err(Error::decode(format!(
                                "descriptor {target} is referenced more than once"
                            )));
                        }
                        claimed[target] = true;
                        work.push((target, false));
                    }
                }
                continue;
            }

            let right = take_child(&mut tree, &mut built, desc.right)?;
            let left = take_child(&mut tree, &mut built, desc.left)?;
            built.push(tree.push_internal(left, right));
        }

        let root = built
            .pop()
            .ok_or_else(|| Error::decode("node table produced no root"))?;
        tree.set_root(root);
        tree.number_internal_nodes();
        Ok(tree)
    }
}

fn take_child(tree: &mut HuffmanTree, built: &mut Vec<NodeId>, child: ChildRef) -> Result<NodeId> {
    match child {
        ChildRef::Leaf(symbol) => Ok(tree.push_leaf(symbol)),
        ChildRef::Internal(_) => built
            .pop()
            .ok_or_else(|| Error::decode("internal child was never built")),
    }
}

/// Decoder for tables that rely on postorder adjacency alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImplicitPostorderDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Right,
    Left,
}

#[derive(Debug)]
struct Frame {
    index: usize,
    stage: Stage,
    /// Descriptors consumed so far by this subtree, itself included.
    consumed: usize,
    right: Option<NodeId>,
}

impl Frame {
    fn new(index: usize) -> Self {
        Self {
            index,
            stage: Stage::Right,
            consumed: 1,
            right: None,
        }
    }
}

impl TreeDecoder for ImplicitPostorderDecoder {
    fn name(&self) -> &'static str {
        "implicit_postorder"
    }

    fn decode(&self, table: &NodeTable, root_index: usize) -> Result<HuffmanTree> {
        check_root(table, root_index)?;

        let mut tree = HuffmanTree::with_capacity(table.len() * 2 + 1);
        let mut stack = vec![Frame::new(root_index)];
        // Subtree finished by the frame popped last: (root, descriptors used).
        let mut returned: Option<(NodeId, usize)> = None;

        while let Some(top) = stack.len().checked_sub(1) {
            let frame = &mut stack[top];
            let desc = table.entries[frame.index];

            match frame.stage {
                Stage::Right => {
                    if let Some((id, used)) = returned.take() {
                        frame.right = Some(id);
                        frame.consumed += used;
                        frame.stage = Stage::Left;
                        continue;
                    }
                    match desc.right {
                        ChildRef::Leaf(symbol) => {
                            frame.right = Some(tree.push_leaf(symbol));
                            frame.stage = Stage::Left;
                        }
                        ChildRef::Internal(_) => {
                            let child = preceding(frame.index, 1)?;
                            stack.push(Frame::new(child));
                        }
                    }
                }
                Stage::Left => {
                    let left = match (returned.take(), desc.left) {
                        (Some((id, used)), _) => {
                            frame.consumed += used;
                            id
                        }
                        (None, ChildRef::Leaf(symbol)) => tree.push_leaf(symbol),
                        (None, ChildRef::Internal(_)) => {
                            let child = preceding(frame.index, frame.consumed)?;
                            stack.push(Frame::new(child));
                            continue;
                        }
                    };
                    let right = frame
                        .right
                        .ok_or_else(|| Error::decode("right child missing"))?;
                    let consumed = frame.consumed;
                    let id = tree.push_internal(left, right);
                    stack.pop();
                    returned = Some((id, consumed));
                }
            }
        }

        let (root, _) = returned.ok_or_else(|| Error::decode("node table produced no root"))?;
        tree.set_root(root);
        tree.number_internal_nodes();
        Ok(tree)
    }
}

/// Index `distance` descriptors before `index`.
fn preceding(index: usize, distance: usize) -> Result<usize> {
    index.checked_sub(distance).ok_or_else(|| {
        Error::decode(format!(
            "descriptor {index} expects a child {distance} entries earlier, before the table start"
        ))
    })
}

/// Selectable tree reconstruction convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    /// Follow absolute indices ([`IndexedDecoder`]).
    #[default]
    Indexed,
    /// Use postorder adjacency ([`ImplicitPostorderDecoder`]).
    ImplicitPostorder,
}

impl DecodeStrategy {
    /// The decoder implementing this strategy.
    pub fn decoder(self) -> &'static dyn TreeDecoder {
        match self {
            DecodeStrategy::Indexed => &IndexedDecoder,
            DecodeStrategy::ImplicitPostorder => &ImplicitPostorderDecoder,
        }
    }

    /// Rebuild the tree rooted at `root_index` with this strategy.
    pub fn decode(self, table: &NodeTable, root_index: usize) -> Result<HuffmanTree> {
        self.decoder().decode(table, root_index)
    }
}
