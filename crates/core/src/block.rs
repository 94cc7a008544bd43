//! Compressed block serialization and parsing.
//!
//! A block is everything `decompress` needs to rebuild the input:
//! - Frequency table: rebuilds the exact tree used by the encoder
//! - Padding count: how many trailing zero bits close out the payload
//! - Payload: concatenated codes, packed MSB-first
//!
//! # Block Format
//!
//! ```text
//! +------------------+
//! | freq table       |  see `frequency` (2 + 9 * entries bytes)
//! | (variable)       |
//! +------------------+
//! | padding (1)      |  0-7
//! +------------------+
//! | payload          |  packed code bits
//! | (variable)       |
//! +------------------+
//! ```
//!
//! The smallest valid block (empty input) is 3 bytes: a zero entry count and
//! a zero padding byte.

use crate::bitio::MAX_PADDING;
use crate::error::{HeaderError, Result};
use crate::frequency::{FrequencyTable, ENTRIES_SIZE};

/// Size of the shortest possible block in bytes.
pub const MIN_BLOCK_SIZE: usize = ENTRIES_SIZE + 1;

/// A parsed compressed block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedBlock {
    /// Symbol counts of the original input
    pub table: FrequencyTable,

    /// Number of zero bits appended to the last payload byte (0-7)
    pub padding: u8,

    /// Packed code bits
    pub payload: Vec<u8>,
}

impl CompressedBlock {
    /// Serialized size in bytes.
    pub fn serialized_len(&self) -> usize {
        self.table.serialized_len() + 1 + self.payload.len()
    }

    /// Serialize the block into its wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.serialized_len());
        self.table.write_to(&mut bytes);
        bytes.push(self.padding);
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Parse a block from its wire form.
    ///
    /// Only the header is validated here. Whether the payload actually walks
    /// the tree is checked by the decoder.
    ///
    /// # Errors
    /// - `MalformedHeader` if the table is unparseable, the padding byte is
    ///   missing, or the padding is outside 0-7
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_BLOCK_SIZE {
            return Err(HeaderError::Truncated {
                required: MIN_BLOCK_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let (table, consumed) = FrequencyTable::parse(bytes)?;

        let padding = *bytes.get(consumed).ok_or(HeaderError::Truncated {
            required: consumed + 1,
            actual: bytes.len(),
        })?;
        if padding > MAX_PADDING {
            return Err(HeaderError::InvalidPadding(padding).into());
        }

        Ok(Self {
            table,
            padding,
            payload: bytes[consumed + 1..].to_vec(),
        })
    }
}
