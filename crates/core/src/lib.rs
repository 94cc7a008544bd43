//! huffcoder-core: byte-oriented Huffman entropy coder
//!
//! This library compresses a byte sequence into a self-describing block and
//! reverses the process losslessly:
//! - Counts how often each byte value occurs
//! - Builds a prefix tree with a pinned tie-break order
//! - Packs each byte's code into a padded bit stream
//! - Stores the frequency table so the decoder can rebuild the same tree
//!
//! # Architecture
//!
//! Modules, leaf-first:
//! - `frequency`: symbol counts and their serialized form
//! - `tree`: deterministic Huffman tree construction
//! - `codebook`: symbol to bit-code mapping
//! - `bitio`: MSB-first bit packing with padding
//! - `block`: compressed block layout
//! - `encoder` / `decoder`: the two directions of the codec
//! - `stats`: measurements for reporting
//!
//! # Example
//! ```
//! let block = huffcoder_core::compress(b"abracadabra");
//! let restored = huffcoder_core::decompress(&block).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```
//!
//! # Known Limitation
//!
//! Input made of a single distinct byte value (for example `[5, 5, 5]`)
//! produces a one-leaf tree with no codes. The block stores no length, so it
//! decompresses to empty output.
//!
//! # Design Principles
//!
//! - **No panics on input**: every malformed block yields a typed error
//! - **Deterministic**: identical input always produces identical blocks
//! - **Stateless**: calls share nothing and may run concurrently

pub mod bitio;
pub mod block;
pub mod codebook;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frequency;
pub mod stats;
pub mod tree;

// Re-export commonly used types
pub use block::CompressedBlock;
pub use error::{Error, ErrorKind, Result};
pub use stats::CompressionStats;

/// Compress `data` into a serialized block.
///
/// Never fails, including for empty input.
pub fn compress(data: &[u8]) -> Vec<u8> {
    encoder::encode(data).to_bytes()
}

/// Compress `data` and measure the result.
pub fn compress_with_stats(data: &[u8]) -> (Vec<u8>, CompressionStats) {
    let block = encoder::encode(data);
    let stats = CompressionStats::measure(data.len(), &block);
    (block.to_bytes(), stats)
}

/// Decompress a serialized block.
///
/// # Errors
/// - `EmptyInput` if `data` is empty
/// - `MalformedHeader` if the frequency table or padding byte is invalid
/// - `TruncatedPayload` if the padding exceeds the payload
/// - `CorruptBitstream` if the payload does not decode cleanly
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let block = CompressedBlock::parse(data)?;
    decoder::decode(&block)
}
