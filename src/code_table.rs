use std::collections::BTreeMap;

use tracing::debug;

use crate::bit_vec::BitVec;
use crate::error::Result;
use crate::hufftree::{HuffNode, HuffmanTree, NodeId};

/// Codeword for every leaf of a tree that has a nonzero weight, keyed by
/// byte value. Bytes that never occurred have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, BitVec>,
}

impl CodeTable {
    /// Walk the tree depth first, pushing `0` for a left edge and `1` for a
    /// right edge and popping on the way back up.
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut table = CodeTable::default();
        let mut path = BitVec::new();
        table.walk(tree, tree.root(), &mut path)?;
        debug!(codes = table.codes.len(), "built code table");
        Ok(table)
    }

    fn walk(&mut self, tree: &HuffmanTree, id: NodeId, path: &mut BitVec) -> Result<()> {
        match *tree.node(id) {
            HuffNode::Leaf { weight: 0, .. } => {}
            HuffNode::Leaf { byte, .. } => {
                self.codes.insert(byte, path.clone());
            }
            HuffNode::Internal { left, right, .. } => {
                path.push_bit(false);
                self.walk(tree, left, path)?;
                path.pop_bit()?;

                path.push_bit(true);
                self.walk(tree, right, path)?;
                path.pop_bit()?;
            }
        }
        Ok(())
    }

    pub fn get(&self, symbol: u8) -> Option<&BitVec> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitVec)> + '_ {
        self.codes.iter().map(|(&symbol, code)| (symbol, code))
    }
}
