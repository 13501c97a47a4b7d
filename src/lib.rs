//! # huffarc
//!
//! Order-0 Huffman compression over the full byte alphabet, with a compact
//! archive format that stores the histogram instead of the tree.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffarc::{compress, decompress};
//!
//! let archive = compress(b"abracadabra")?;
//! let decoded = decompress(&archive)?;
//! assert!(decoded.aligned);
//! assert_eq!(decoded.bytes, b"abracadabra");
//! # Ok::<(), huffarc::HuffmanError>(())
//! ```
//!
//! The pipeline can also be driven one stage at a time:
//!
//! ```rust
//! use huffarc::{build_code_table, build_frequency_table, build_tree, decode, encode};
//!
//! let histogram = build_frequency_table(b"aaab")?;
//! let tree = build_tree(&histogram)?;
//! let table = build_code_table(&tree)?;
//! let bits = encode(b"aaab", &table)?;
//! assert_eq!(bits.len(), 5);
//! assert_eq!(decode(&bits, &tree).into_result()?, b"aaab");
//! # Ok::<(), huffarc::HuffmanError>(())
//! ```

pub mod bit_vec;
pub mod code_table;
pub mod compressed_data;
pub mod error;
pub mod histogram;
pub mod huffman_codec;
pub mod hufftree;

mod min_heap;

pub use bit_vec::BitVec;
pub use code_table::CodeTable;
pub use compressed_data::CompressedData;
pub use error::{HuffmanError, Result};
pub use histogram::{data_segment, header_size, FrequencyTable};
pub use huffman_codec::{
    build_code_table, build_frequency_table, build_tree, compress, decode, decompress,
    deserialize_histogram, encode, serialize_histogram, Decoded, HuffmanCodec,
};
pub use hufftree::{HuffNode, HuffmanTree};
