//! Huffman tree construction with a pinned tie-break order.
//!
//! The tree is rebuilt on the decode side from nothing but the stored
//! frequency table, so every choice the builder makes has to be
//! reproducible. Nodes are ordered by the key `(frequency, kind, ordinal)`,
//! smallest first:
//!
//! - `frequency`: leaf count or sum of the children's counts
//! - `kind`: leaves sort before internal nodes of equal frequency
//! - `ordinal`: symbol value for leaves, creation sequence for internal nodes
//!
//! The first node taken off the queue becomes the left child of the merge,
//! the second becomes the right child.
//!
//! Nodes live in an arena and refer to their children by index. The tree is
//! built bottom-up and never mutated afterwards.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::trace;

use crate::frequency::FrequencyTable;

/// Index of a node inside a [`HuffmanTree`].
pub type NodeId = usize;

/// A single tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    Internal {
        freq: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } | Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Orders leaves ahead of internal nodes that share a frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Leaf,
    Internal,
}

/// Priority key; derived `Ord` compares fields in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MergeKey {
    freq: u64,
    kind: Kind,
    ordinal: usize,
    id: NodeId,
}

/// Shape of a built tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeShape {
    /// No symbols were counted
    Empty,
    /// Exactly one distinct symbol; the root is a leaf
    SingleLeaf,
    /// Two or more symbols; the root is internal
    Branching,
}

/// Binary prefix tree built from a [`FrequencyTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl HuffmanTree {
    /// Build the tree for `table`.
    ///
    /// An empty table yields an empty tree. One distinct symbol yields a
    /// single leaf with no merges.
    pub fn build(table: &FrequencyTable) -> Self {
        let leaves = table.len();
        if leaves == 0 {
            return Self {
                nodes: Vec::new(),
                root: None,
            };
        }

        // n leaves always produce n - 1 internal nodes
        let mut nodes = Vec::with_capacity(2 * leaves - 1);
        let mut queue = BinaryHeap::with_capacity(leaves);

        for (symbol, freq) in table.iter() {
            let id = nodes.len();
            nodes.push(Node::Leaf { symbol, freq });
            queue.push(Reverse(MergeKey {
                freq,
                kind: Kind::Leaf,
                ordinal: symbol as usize,
                id,
            }));
        }

        let mut sequence = 0;
        while queue.len() > 1 {
            let (Some(Reverse(left)), Some(Reverse(right))) = (queue.pop(), queue.pop()) else {
                break;
            };

            // Sums cannot overflow: every parsed table has a total that fits in u64
            let freq = left.freq + right.freq;
            let id = nodes.len();
            nodes.push(Node::Internal {
                freq,
                left: left.id,
                right: right.id,
            });
            trace!(id, freq, left = left.id, right = right.id, "merged nodes");

            queue.push(Reverse(MergeKey {
                freq,
                kind: Kind::Internal,
                ordinal: sequence,
                id,
            }));
            sequence += 1;
        }

        let root = queue.pop().map(|Reverse(key)| key.id);
        Self { nodes, root }
    }

    /// Root node id, or `None` for an empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node by id.
    ///
    /// # Panics
    /// If `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn shape(&self) -> TreeShape {
        match self.root.map(|id| self.nodes[id]) {
            None => TreeShape::Empty,
            Some(Node::Leaf { .. }) => TreeShape::SingleLeaf,
            Some(Node::Internal { .. }) => TreeShape::Branching,
        }
    }

    /// Total number of nodes (leaves plus internal).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}
