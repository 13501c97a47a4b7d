use thiserror::Error;

/// Everything that can go wrong inside the codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    #[error("bit index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    #[error("pop from an empty bit vector")]
    Underflow,
    #[error("byte {0:#04x} has no codeword")]
    UnknownSymbol(u8),
    #[error("truncated buffer: need {needed} bytes, got {available}")]
    TruncatedBuffer { needed: usize, available: usize },
    #[error("bitstream ended mid-codeword after {decoded} decoded bytes")]
    MisalignedBitstream { decoded: usize },
    #[error("min-heap underflow")]
    HeapUnderflow,
    #[error("histogram lists byte {0:#04x} more than once")]
    DuplicateSymbol(u8),
    #[error("byte {0:#04x} occurs more than u32::MAX times")]
    CountOverflow(u8),
    #[error("payload of {bits} bits does not fit a u32 bit count")]
    PayloadTooLarge { bits: usize },
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
