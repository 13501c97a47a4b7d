//! Byte histograms and their archive encoding.
//!
//! The serialized form starts with a one byte tag. A tag of `0` is followed by
//! all 256 counts as little-endian `u32`s. A tag of `n > 0` is followed by `n`
//! five byte entries `{symbol: u8, count: u32 LE}` for the nonzero counts only.

use tracing::debug;

use crate::error::{HuffmanError, Result};

pub const ALPHABET_SIZE: usize = 256;

/// Largest number of nonzero entries stored sparsely (`205 * 5 > 256 * 4`).
pub const SPARSE_LIMIT: usize = 204;

const COUNT_WIDTH: usize = 4;
const ENTRY_WIDTH: usize = 1 + COUNT_WIDTH;
const DENSE_TAG: u8 = 0;

/// Size of the dense encoding, tag included.
pub const DENSE_LEN: usize = 1 + ALPHABET_SIZE * COUNT_WIDTH;

/// Occurrence count for every byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u32; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET_SIZE],
        }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every byte of `bytes`. Fails with `CountOverflow` if a single
    /// byte value occurs more than `u32::MAX` times.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut table = Self::new();
        for &byte in bytes {
            table.increment(byte)?;
        }
        debug!(
            input_len = bytes.len(),
            distinct = table.distinct(),
            "built frequency table"
        );
        Ok(table)
    }

    fn increment(&mut self, symbol: u8) -> Result<()> {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot
            .checked_add(1)
            .ok_or(HuffmanError::CountOverflow(symbol))?;
        Ok(())
    }

    pub fn get(&self, symbol: u8) -> u32 {
        self.counts[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, count: u32) {
        self.counts[symbol as usize] = count;
    }

    pub fn counts(&self) -> &[u32; ALPHABET_SIZE] {
        &self.counts
    }

    /// Number of byte values with a nonzero count.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&count| u64::from(count)).sum()
    }

    /// Nonzero `(symbol, count)` pairs in ascending symbol order.
    pub fn nonzero(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        (0..=u8::MAX)
            .zip(self.counts.iter().copied())
            .filter(|&(_, count)| count > 0)
    }

    pub fn serialized_len(&self) -> usize {
        match self.distinct() {
            n @ 1..=SPARSE_LIMIT => 1 + ENTRY_WIDTH * n,
            _ => DENSE_LEN,
        }
    }

    /// Encode in whichever form is smaller. An all-zero table uses the dense
    /// form, since a sparse tag of `0` would read back as dense.
    pub fn serialize(&self) -> Vec<u8> {
        let distinct = self.distinct();
        let mut bytes = Vec::with_capacity(self.serialized_len());

        if (1..=SPARSE_LIMIT).contains(&distinct) {
            bytes.push(distinct as u8);
            for (symbol, count) in self.nonzero() {
                bytes.push(symbol);
                bytes.extend_from_slice(&count.to_le_bytes());
            }
        } else {
            bytes.push(DENSE_TAG);
            for count in &self.counts {
                bytes.extend_from_slice(&count.to_le_bytes());
            }
        }

        debug!(distinct, len = bytes.len(), "serialized histogram");
        bytes
    }

    /// Decode a histogram from the front of `bytes`. Anything past
    /// [`header_size`] is ignored.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let needed = header_size(bytes)?;
        if bytes.len() < needed {
            return Err(HuffmanError::TruncatedBuffer {
                needed,
                available: bytes.len(),
            });
        }

        let mut table = Self::new();
        let body = &bytes[1..needed];
        if bytes[0] == DENSE_TAG {
            for (slot, chunk) in table.counts.iter_mut().zip(body.chunks_exact(COUNT_WIDTH)) {
                *slot = read_count(chunk);
            }
        } else {
            let mut seen = [false; ALPHABET_SIZE];
            for entry in body.chunks_exact(ENTRY_WIDTH) {
                let symbol = entry[0];
                if std::mem::replace(&mut seen[symbol as usize], true) {
                    return Err(HuffmanError::DuplicateSymbol(symbol));
                }
                table.counts[symbol as usize] = read_count(&entry[1..]);
            }
        }
        Ok(table)
    }
}

impl From<[u32; ALPHABET_SIZE]> for FrequencyTable {
    fn from(counts: [u32; ALPHABET_SIZE]) -> Self {
        FrequencyTable { counts }
    }
}

fn read_count(chunk: &[u8]) -> u32 {
    let mut count = [0u8; COUNT_WIDTH];
    count.copy_from_slice(chunk);
    u32::from_le_bytes(count)
}

/// Length of the serialized histogram at the front of `archive`, judged
/// from its tag byte alone.
pub fn header_size(archive: &[u8]) -> Result<usize> {
    match archive.first() {
        None => Err(HuffmanError::TruncatedBuffer {
            needed: 1,
            available: 0,
        }),
        Some(&DENSE_TAG) => Ok(DENSE_LEN),
        Some(&n) => Ok(1 + ENTRY_WIDTH * n as usize),
    }
}

/// The bytes following the serialized histogram.
pub fn data_segment(archive: &[u8]) -> Result<&[u8]> {
    let start = header_size(archive)?;
    archive
        .get(start..)
        .ok_or(HuffmanError::TruncatedBuffer {
            needed: start,
            available: archive.len(),
        })
}
