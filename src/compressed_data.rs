use tracing::debug;

use crate::bit_vec::BitVec;
use crate::error::Result;
use crate::histogram::{data_segment, FrequencyTable};

/// A parsed archive: the histogram needed to rebuild the tree followed by
/// the encoded payload.
///
/// On the wire this is `[histogram][u32 LE bit count][packed bits]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub histogram: FrequencyTable,
    pub payload: BitVec,
}

impl CompressedData {
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut bytes = self.histogram.serialize();
        bytes.extend_from_slice(&self.payload.serialize()?);
        debug!(
            len = bytes.len(),
            payload_bits = self.payload.len(),
            "serialized archive"
        );
        Ok(bytes)
    }

    /// Parse an archive. Bytes after the payload are ignored.
    pub fn deserialize(archive: &[u8]) -> Result<CompressedData> {
        let histogram = FrequencyTable::deserialize(archive)?;
        let mut payload = BitVec::new();
        payload.deserialize(data_segment(archive)?)?;
        Ok(CompressedData { histogram, payload })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::HuffmanError;
    use crate::huffman_codec::HuffmanCodec;

    #[test]
    fn aaab_archive_layout() {
        let codec = HuffmanCodec::from_bytes(b"aaab").unwrap();
        let bytes = codec.compress(b"aaab").unwrap().serialize().unwrap();
        assert_eq!(
            bytes,
            vec![
                2, b'a', 3, 0, 0, 0, b'b', 1, 0, 0, 0, // histogram
                5, 0, 0, 0, 0b1110_1000, // payload
            ]
        );
    }

    #[test]
    fn roundtrip() {
        let codec = HuffmanCodec::from_bytes(b"hello, archive").unwrap();
        let compressed = codec.compress(b"hello, archive").unwrap();
        let bytes = compressed.serialize().unwrap();
        assert_eq!(CompressedData::deserialize(&bytes), Ok(compressed));
    }

    #[test]
    fn truncated_payload_fails() {
        let codec = HuffmanCodec::from_bytes(b"hello, archive").unwrap();
        let bytes = codec.compress(b"hello, archive").unwrap().serialize().unwrap();
        assert!(matches!(
            CompressedData::deserialize(&bytes[..bytes.len() - 1]),
            Err(HuffmanError::TruncatedBuffer { .. })
        ));

        // histogram intact, count header cut short
        let header = codec.histogram().serialized_len();
        assert_eq!(
            CompressedData::deserialize(&bytes[..header + 2]),
            Err(HuffmanError::TruncatedBuffer {
                needed: 4,
                available: 2
            })
        );
    }
}
