//! Symbol frequency counting and its serialized form.
//!
//! # Table Format
//!
//! ```text
//! +------------------+
//! | entries (2)      |  u16 little-endian, 0-256
//! +------------------+
//! | symbol (1)       |  repeated `entries` times,
//! | count (8)        |  symbols strictly ascending, counts > 0
//! +------------------+
//! ```

use crate::error::{HeaderError, Result};

/// Number of distinct byte values.
pub const SYMBOL_COUNT: usize = 256;

/// Size of the entry-count prefix in bytes.
pub const ENTRIES_SIZE: usize = 2;

/// Size of one serialized (symbol, count) entry in bytes.
pub const ENTRY_SIZE: usize = 9;

/// Occurrence count of every byte value in an input.
///
/// Immutable once built. Symbols with a count of zero are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
    distinct: usize,
    total: u64,
}

impl FrequencyTable {
    /// Count every byte in `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; SYMBOL_COUNT];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        let distinct = counts.iter().filter(|&&c| c > 0).count();
        Self {
            counts,
            distinct,
            total: data.len() as u64,
        }
    }

    /// Count for `symbol` (0 when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.distinct
    }

    pub fn is_empty(&self) -> bool {
        self.distinct == 0
    }

    /// Sum of all counts, equal to the length of the counted input.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    /// Size of the serialized table in bytes.
    pub fn serialized_len(&self) -> usize {
        ENTRIES_SIZE + self.distinct * ENTRY_SIZE
    }

    /// Append the serialized table to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.reserve(self.serialized_len());
        out.extend_from_slice(&(self.distinct as u16).to_le_bytes());
        for (symbol, count) in self.iter() {
            out.push(symbol);
            out.extend_from_slice(&count.to_le_bytes());
        }
    }

    /// Parse a serialized table from the front of `bytes`.
    ///
    /// Returns the table and the number of bytes consumed.
    ///
    /// # Errors
    /// `MalformedHeader` when the table is truncated, declares more than 256
    /// entries, stores a zero count, repeats or reorders symbols, or has a
    /// total that overflows `u64`.
    pub fn parse(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < ENTRIES_SIZE {
            return Err(HeaderError::Truncated {
                required: ENTRIES_SIZE,
                actual: bytes.len(),
            }
            .into());
        }

        let entries = u16::from_le_bytes([bytes[0], bytes[1]]);
        if entries as usize > SYMBOL_COUNT {
            return Err(HeaderError::TooManyEntries(entries).into());
        }

        let required = ENTRIES_SIZE + entries as usize * ENTRY_SIZE;
        if bytes.len() < required {
            return Err(HeaderError::Truncated {
                required,
                actual: bytes.len(),
            }
            .into());
        }

        let mut counts = [0u64; SYMBOL_COUNT];
        let mut total = 0u64;
        let mut previous: Option<u8> = None;

        for entry in bytes[ENTRIES_SIZE..required].chunks_exact(ENTRY_SIZE) {
            let symbol = entry[0];
            let mut count_bytes = [0u8; 8];
            count_bytes.copy_from_slice(&entry[1..]);
            let count = u64::from_le_bytes(count_bytes);

            if let Some(previous) = previous {
                if symbol <= previous {
                    return Err(HeaderError::UnorderedSymbol { previous, symbol }.into());
                }
            }
            if count == 0 {
                return Err(HeaderError::ZeroCount { symbol }.into());
            }

            total = total.checked_add(count).ok_or(HeaderError::CountOverflow)?;
            counts[symbol as usize] = count;
            previous = Some(symbol);
        }

        let table = Self {
            counts,
            distinct: entries as usize,
            total,
        };
        Ok((table, required))
    }
}
