//! Arena-backed binary Huffman tree.
//!
//! Nodes live in a single `Vec` and refer to their children by [`NodeId`].
//! Every node except the root has exactly one parent. All traversals use an
//! explicit stack, so near-linear trees cannot exhaust the call stack.

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf holding one symbol.
    Leaf { symbol: u8 },
    /// Internal node with exactly two children.
    ///
    /// `number` is the postorder id, set by
    /// [`HuffmanTree::number_internal_nodes`].
    Internal {
        left: NodeId,
        right: NodeId,
        number: Option<u32>,
    },
}

impl Node {
    /// True for leaf nodes.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Binary Huffman tree.
///
/// The empty tree has no root. A single-leaf tree has a leaf root and no
/// internal nodes.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree whose root is a single leaf.
    pub fn single_leaf(symbol: u8) -> Self {
        let mut tree = Self::new();
        let leaf = tree.push_leaf(symbol);
        tree.set_root(leaf);
        tree
    }

    /// Create an empty arena with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Add a leaf to the arena.
    pub fn push_leaf(&mut self, symbol: u8) -> NodeId {
        self.push(Node::Leaf { symbol })
    }

    /// Add an internal node owning `left` and `right`.
    pub fn push_internal(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.push(Node::Internal {
            left,
            right,
            number: None,
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Make `id` the root.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    /// Root node, if any.
    #[inline]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Access a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// True when the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// True when the root itself is a leaf.
    pub fn is_single_leaf(&self) -> bool {
        self.root.is_some_and(|r| self.node(r).is_leaf())
    }

    /// Symbol held by a leaf, `None` for internal nodes.
    pub fn symbol(&self, id: NodeId) -> Option<u8> {
        match self.node(id) {
            Node::Leaf { symbol } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Postorder id of an internal node.
    pub fn number(&self, id: NodeId) -> Option<u32> {
        match self.node(id) {
            Node::Internal { number, .. } => *number,
            Node::Leaf { .. } => None,
        }
    }

    /// Nodes reachable from the root, visited left, right, self.
    pub fn postorder(&self) -> Vec<NodeId> {
        let Some(root) = self.root else {
            return Vec::new();
        };

        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            match self.node(id) {
                Node::Internal { left, right, .. } if !expanded => {
                    stack.push((id, true));
                    stack.push((*right, false));
                    stack.push((*left, false));
                }
                _ => order.push(id),
            }
        }
        order
    }

    /// Assign `0..k-1` to the internal nodes in postorder and return `k`.
    ///
    /// The root of a tree with internal nodes receives `k - 1`.
    pub fn number_internal_nodes(&mut self) -> usize {
        let mut next = 0u32;
        for id in self.postorder() {
            if let Node::Internal { number, .. } = &mut self.nodes[id.index()] {
                *number = Some(next);
                next += 1;
            }
        }
        next as usize
    }

    /// Number of reachable internal nodes.
    pub fn internal_count(&self) -> usize {
        self.postorder()
            .into_iter()
            .filter(|&id| !self.node(id).is_leaf())
            .count()
    }

    /// Number of reachable leaves.
    pub fn leaf_count(&self) -> usize {
        self.postorder()
            .into_iter()
            .filter(|&id| self.node(id).is_leaf())
            .count()
    }

    /// Every reachable leaf with its depth (root = 0), left to right.
    pub fn leaves_with_depth(&self) -> Vec<(NodeId, usize)> {
        let Some(root) = self.root else {
            return Vec::new();
        };

        let mut leaves = Vec::new();
        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                Node::Leaf { .. } => leaves.push((id, depth)),
                Node::Internal { left, right, .. } => {
                    stack.push((*right, depth + 1));
                    stack.push((*left, depth + 1));
                }
            }
        }
        leaves
    }

    /// Leaf symbols left to right.
    pub fn leaf_symbols(&self) -> Vec<u8> {
        self.leaves_with_depth()
            .into_iter()
            .filter_map(|(id, _)| self.symbol(id))
            .collect()
    }

    /// Relabel a leaf. Has no effect on internal nodes.
    pub(crate) fn set_symbol(&mut self, id: NodeId, new_symbol: u8) {
        if let Node::Leaf { symbol } = &mut self.nodes[id.index()] {
            *symbol = new_symbol;
        }
    }

    /// True when both trees have the same topology, ignoring leaf symbols.
    pub fn same_shape(&self, other: &HuffmanTree) -> bool {
        self.compare(other, false)
    }

    /// True when both trees have the same topology and the same symbol at
    /// every leaf position.
    pub fn is_isomorphic(&self, other: &HuffmanTree) -> bool {
        self.compare(other, true)
    }

    fn compare(&self, other: &HuffmanTree, with_symbols: bool) -> bool {
        let (a, b) = match (self.root, other.root) {
            (None, None) => return true,
            (Some(a), Some(b)) => (a, b),
            _ => return false,
        };

        let mut stack = vec![(a, b)];
        while let Some((x, y)) = stack.pop() {
            match (self.node(x), other.node(y)) {
                (Node::Leaf { symbol: s }, Node::Leaf { symbol: t }) => {
                    if with_symbols && s != t {
                        return false;
                    }
                }
                (
                    Node::Internal {
                        left: l1,
                        right: r1,
                        ..
                    },
                    Node::Internal {
                        left: l2,
                        right: r2,
                        ..
                    },
                ) => {
                    stack.push((*l1, *l2));
                    stack.push((*r1, *r2));
                }
                _ => return false,
            }
        }
        true
    }
}
