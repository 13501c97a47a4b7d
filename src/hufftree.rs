use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::histogram::{FrequencyTable, ALPHABET_SIZE};
use crate::min_heap::MinHeap;

/// Index of a node in the tree's arena.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Huffman tree over the full 256 symbol alphabet.
///
/// Nodes live in a flat arena. The leaf for byte `b` is always node `b`;
/// internal nodes follow in the order they were merged and the root is the
/// last node pushed. Nothing is mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
}

// Leaves sort before internal nodes of equal weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Kind {
    Leaf,
    Internal,
}

/// Heap entry. Ordering is weight, then kind, then arena index: ties among
/// leaves go to the smaller byte value and ties among internal nodes go to the
/// one merged first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    weight: u64,
    kind: Kind,
    id: NodeId,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_frequencies(&FrequencyTable::from_bytes(bytes)?)
    }

    /// Repeatedly merge the two lightest nodes until one remains. Zero count
    /// symbols take part, so every byte gets a codeword of at least one bit.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        let mut nodes = Vec::with_capacity(2 * ALPHABET_SIZE - 1);
        let mut candidates = Vec::with_capacity(ALPHABET_SIZE);
        for (byte, &count) in (0..=u8::MAX).zip(frequencies.counts()) {
            let weight = u64::from(count);
            candidates.push(Candidate {
                weight,
                kind: Kind::Leaf,
                id: nodes.len(),
            });
            nodes.push(HuffNode::Leaf { weight, byte });
        }

        let mut heap = MinHeap::build(candidates);
        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;

            let weight = x.weight + y.weight;
            let id = nodes.len();
            nodes.push(HuffNode::Internal {
                weight,
                left: x.id,
                right: y.id,
            });
            heap.insert(Candidate {
                weight,
                kind: Kind::Internal,
                id,
            });
        }
        let root = heap.extract_min()?.id;

        debug!(nodes = nodes.len(), weight = nodes[root].weight(), "built huffman tree");
        Ok(HuffmanTree { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// # Panics
    ///
    /// Panics if `id` is not a node of this tree. Use [`HuffmanTree::get`]
    /// for ids of unknown origin.
    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Option<&HuffNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Follow one edge: `false` goes left, `true` goes right. A leaf has no
    /// edges and is returned unchanged.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this tree.
    pub fn step(&self, id: NodeId, bit: bool) -> NodeId {
        match self.nodes[id] {
            HuffNode::Leaf { .. } => id,
            HuffNode::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
        }
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        depth: usize,
        first: &mut bool,
    ) -> fmt::Result {
        match self.nodes[id] {
            HuffNode::Leaf { weight: 0, .. } => Ok(()),
            HuffNode::Leaf { weight, byte } => {
                if !std::mem::take(first) {
                    write!(f, " ")?;
                }
                write!(f, "({}, {}, {})", byte as char, weight, depth)
            }
            HuffNode::Internal { left, right, .. } => {
                self.fmt_node(f, left, depth + 1, first)?;
                self.fmt_node(f, right, depth + 1, first)
            }
        }
    }
}

/// Left-to-right listing of the leaves that actually occur, each as
/// `(symbol, weight, depth)`.
impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        self.fmt_node(f, self.root, 0, &mut first)
    }
}
