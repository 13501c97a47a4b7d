use tracing::{debug, warn};

use crate::bit_vec::BitVec;
use crate::code_table::CodeTable;
use crate::compressed_data::CompressedData;
use crate::error::{HuffmanError, Result};
use crate::histogram::FrequencyTable;
use crate::hufftree::{HuffNode, HuffmanTree};

/// Output of a decode. `aligned` is false when the bitstream stopped partway
/// through a codeword; `bytes` then holds everything decoded before that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub bytes: Vec<u8>,
    pub aligned: bool,
}

impl Decoded {
    /// Treat a misaligned bitstream as an error.
    pub fn into_result(self) -> Result<Vec<u8>> {
        if self.aligned {
            Ok(self.bytes)
        } else {
            Err(HuffmanError::MisalignedBitstream {
                decoded: self.bytes.len(),
            })
        }
    }
}

/// A histogram together with the tree and code table derived from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    histogram: FrequencyTable,
    tree: HuffmanTree,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(histogram: FrequencyTable) -> Result<Self> {
        let tree = HuffmanTree::from_frequencies(&histogram)?;
        let encode_table = CodeTable::from_tree(&tree)?;
        Ok(HuffmanCodec {
            histogram,
            tree,
            encode_table,
        })
    }

    /// Build a codec fitted to `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::new(FrequencyTable::from_bytes(data)?)
    }

    pub fn histogram(&self) -> &FrequencyTable {
        &self.histogram
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    pub fn code_for(&self, symbol: u8) -> Option<&BitVec> {
        self.encode_table.get(symbol)
    }

    pub fn encode(&self, data: &[u8]) -> Result<BitVec> {
        encode(data, &self.encode_table)
    }

    pub fn decode(&self, bits: &BitVec) -> Decoded {
        decode(bits, &self.tree)
    }

    /// Encode `data` and pair the result with this codec's histogram.
    pub fn compress(&self, data: &[u8]) -> Result<CompressedData> {
        Ok(CompressedData {
            histogram: self.histogram.clone(),
            payload: self.encode(data)?,
        })
    }
}

pub fn build_frequency_table(data: &[u8]) -> Result<FrequencyTable> {
    FrequencyTable::from_bytes(data)
}

pub fn build_tree(histogram: &FrequencyTable) -> Result<HuffmanTree> {
    HuffmanTree::from_frequencies(histogram)
}

pub fn build_code_table(tree: &HuffmanTree) -> Result<CodeTable> {
    CodeTable::from_tree(tree)
}

/// Concatenate the codeword of every byte of `data`.
pub fn encode(data: &[u8], table: &CodeTable) -> Result<BitVec> {
    let mut bit_vec = BitVec::new();
    for &byte in data {
        let code = table.get(byte).ok_or(HuffmanError::UnknownSymbol(byte))?;
        bit_vec.push_bits(code);
    }
    debug!(input_len = data.len(), bits = bit_vec.len(), "encoded");
    Ok(bit_vec)
}

/// Walk the tree one bit at a time, emitting a byte and returning to the root
/// at every leaf.
pub fn decode(bits: &BitVec, tree: &HuffmanTree) -> Decoded {
    let root = tree.root();
    let mut result = Vec::new();
    let mut current_node = root;

    for bit in bits {
        current_node = tree.step(current_node, bit);
        if let HuffNode::Leaf { byte, .. } = *tree.node(current_node) {
            result.push(byte);
            current_node = root;
        }
    }

    let aligned = current_node == root;
    if aligned {
        debug!(bits = bits.len(), output_len = result.len(), "decoded");
    } else {
        warn!(
            bits = bits.len(),
            output_len = result.len(),
            "bitstream ended mid-codeword"
        );
    }
    Decoded {
        bytes: result,
        aligned,
    }
}

pub fn serialize_histogram(histogram: &FrequencyTable) -> Vec<u8> {
    histogram.serialize()
}

pub fn deserialize_histogram(bytes: &[u8]) -> Result<FrequencyTable> {
    FrequencyTable::deserialize(bytes)
}

/// Compress `data` into a complete archive.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::from_bytes(data)?.compress(data)?.serialize()
}

/// Rebuild the tree from an archive's histogram and decode its payload.
pub fn decompress(archive: &[u8]) -> Result<Decoded> {
    let compressed = CompressedData::deserialize(archive)?;
    let codec = HuffmanCodec::new(compressed.histogram)?;
    Ok(codec.decode(&compressed.payload))
}
