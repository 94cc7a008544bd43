//! Error types for the huffcoder codec.
//!
//! Compression has no error path. Every failure surfaced here comes from
//! decoding a block that is empty, malformed, truncated, or corrupt. None of
//! them are transient, so callers should not retry.

use thiserror::Error;

/// Top-level error type for all codec operations.
///
/// Each variant corresponds to one failure category:
/// - Empty input handed to `decompress`
/// - Header: frequency table or padding byte cannot be parsed
/// - Payload: declared padding exceeds the payload
/// - Bitstream: the packed bits do not walk the rebuilt tree cleanly
#[derive(Debug, Error)]
pub enum Error {
    /// `decompress` was called with zero bytes
    #[error("empty input: nothing to decompress")]
    EmptyInput,

    /// Frequency table section or padding byte is truncated or invalid
    #[error("malformed header: {0}")]
    MalformedHeader(#[from] HeaderError),

    /// Declared padding exceeds the number of payload bits
    #[error("truncated payload: padding {padding} exceeds {available_bits} available bits")]
    TruncatedPayload { padding: u8, available_bits: usize },

    /// Bit sequence does not decode against the rebuilt tree
    #[error("corrupt bitstream: {0}")]
    CorruptBitstream(#[from] BitstreamError),
}

/// Coarse failure category, for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    MalformedHeader,
    TruncatedPayload,
    CorruptBitstream,
}

impl Error {
    /// Return the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::MalformedHeader(_) => ErrorKind::MalformedHeader,
            Error::TruncatedPayload { .. } => ErrorKind::TruncatedPayload,
            Error::CorruptBitstream(_) => ErrorKind::CorruptBitstream,
        }
    }
}

/// Block header errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    /// Block ends before the header is complete
    #[error("header truncated: need at least {required} bytes, got {actual}")]
    Truncated { required: usize, actual: usize },

    /// Entry count larger than the symbol alphabet
    #[error("frequency table declares {0} entries, maximum is 256")]
    TooManyEntries(u16),

    /// A stored symbol has a count of zero
    #[error("symbol {symbol:#04x} stored with zero count")]
    ZeroCount { symbol: u8 },

    /// Symbols are not strictly ascending (duplicate or out of order)
    #[error("symbol {symbol:#04x} follows {previous:#04x}; entries must be strictly ascending")]
    UnorderedSymbol { previous: u8, symbol: u8 },

    /// Sum of all counts does not fit in 64 bits
    #[error("frequency counts overflow a 64-bit total")]
    CountOverflow,

    /// Padding byte outside 0-7
    #[error("invalid padding count {0}, expected 0-7")]
    InvalidPadding(u8),
}

/// Bit walk errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitstreamError {
    /// A bit tried to move into a child the tree does not have
    #[error("no {} child for bit at position {position}", side(.bit))]
    MissingChild { position: usize, bit: bool },

    /// Bits ran out in the middle of a code
    #[error("stream ended mid-code after {trailing_bits} bits")]
    IncompleteCode { trailing_bits: usize },
}

fn side(bit: &bool) -> &'static str {
    if *bit {
        "right"
    } else {
        "left"
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
