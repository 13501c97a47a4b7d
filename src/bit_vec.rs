use std::fmt;

use crate::error::{HuffmanError, Result};

/// Size of the bit-count header written in front of the packed bytes.
pub const COUNT_HEADER_LEN: usize = 4;

/// A growable sequence of bits packed most-significant-first into bytes.
///
/// `bit_count` is the only source of truth for the length. Bits in the last
/// backing byte past `bit_count` are unspecified and never read.
#[derive(Default, Debug, Clone)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    /// The backing bytes, `ceil(len / 8)` of them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn clear(&mut self) {
        self.bits.clear();
        self.bit_count = 0;
    }

    pub fn get(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.bits[index / 8] & mask(index) != 0)
    }

    /// Overwrite an existing bit. Returns the stored value.
    pub fn set(&mut self, index: usize, value: bool) -> Result<bool> {
        self.check_index(index)?;
        self.write(index, value);
        Ok(value)
    }

    pub fn push_bit(&mut self, bit: bool) {
        // make a new byte if needed
        if self.bit_count % 8 == 0 {
            self.bits.push(0);
        }
        self.bit_count += 1;
        self.write(self.bit_count - 1, bit);
    }

    /// Append every bit of `other` in order.
    pub fn push_bits(&mut self, other: &BitVec) {
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    /// Remove and return the last bit, releasing its byte once it is unused.
    pub fn pop_bit(&mut self) -> Result<bool> {
        if self.bit_count == 0 {
            return Err(HuffmanError::Underflow);
        }
        let bit = self.bits[(self.bit_count - 1) / 8] & mask(self.bit_count - 1) != 0;
        self.bit_count -= 1;
        if self.bit_count % 8 == 0 {
            self.bits.pop();
        }
        Ok(bit)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bits: self,
            index: 0,
        }
    }

    /// Number of bytes `serialize` produces.
    pub fn serialized_len(&self) -> usize {
        COUNT_HEADER_LEN + self.bits.len()
    }

    /// `u32` little-endian bit count followed by the packed bytes. Fails when
    /// the length does not fit the count header.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let header = count_header(self.bit_count)?;
        let mut bytes = Vec::with_capacity(self.serialized_len());
        bytes.extend_from_slice(&header);
        bytes.extend_from_slice(&self.bits);
        Ok(bytes)
    }

    /// Rebuild from the output of [`BitVec::serialize`], returning the number
    /// of bytes consumed. The vector is cleared first and stays empty on error.
    pub fn deserialize(&mut self, bytes: &[u8]) -> Result<usize> {
        self.clear();

        let Some(header) = bytes.get(..COUNT_HEADER_LEN) else {
            return Err(HuffmanError::TruncatedBuffer {
                needed: COUNT_HEADER_LEN,
                available: bytes.len(),
            });
        };
        let mut count_bytes = [0u8; COUNT_HEADER_LEN];
        count_bytes.copy_from_slice(header);
        let bit_count = u32::from_le_bytes(count_bytes) as usize;

        let needed = COUNT_HEADER_LEN + bit_count.div_ceil(8);
        if bytes.len() < needed {
            return Err(HuffmanError::TruncatedBuffer {
                needed,
                available: bytes.len(),
            });
        }

        self.bits.extend_from_slice(&bytes[COUNT_HEADER_LEN..needed]);
        self.bit_count = bit_count;
        Ok(needed)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.bit_count {
            return Err(HuffmanError::OutOfRange {
                index,
                len: self.bit_count,
            });
        }
        Ok(())
    }

    fn write(&mut self, index: usize, bit: bool) {
        if bit {
            self.bits[index / 8] |= mask(index);
        } else {
            self.bits[index / 8] &= !mask(index);
        }
    }
}

fn count_header(bit_count: usize) -> Result<[u8; COUNT_HEADER_LEN]> {
    u32::try_from(bit_count)
        .map(u32::to_le_bytes)
        .map_err(|_| HuffmanError::PayloadTooLarge { bits: bit_count })
}

// bit 0 of a byte is its highest-order bit
fn mask(index: usize) -> u8 {
    0x80 >> (index % 8)
}

impl PartialEq for BitVec {
    fn eq(&self, other: &Self) -> bool {
        self.bit_count == other.bit_count && self.iter().eq(other.iter())
    }
}

impl Eq for BitVec {}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bit_vec = BitVec::new();
        bit_vec.extend(iter);
        bit_vec
    }
}

impl Extend<bool> for BitVec {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push_bit(bit);
        }
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bit) in self.iter().enumerate() {
            if i > 0 && i % 4 == 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", u8::from(bit))?;
        }
        Ok(())
    }
}

pub struct Iter<'a> {
    bits: &'a BitVec,
    index: usize,
}

impl Iterator for Iter<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bit = self.bits.get(self.index).ok()?;
        self.index += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BitVec {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
