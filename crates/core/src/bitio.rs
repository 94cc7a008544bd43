//! Bit-level packing for Huffman payloads.
//!
//! `BitWriter` and `BitReader` both work MSB-first: the first bit written
//! lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - BitWriter: pads the final partial byte with trailing zeros and reports
//!   how many pad bits it added (0-7)
//! - BitReader: takes that pad count and hides the pad bits from callers
//!
//! # Example
//! ```
//! use huffcoder_core::bitio::{BitReader, BitWriter};
//!
//! let mut writer = BitWriter::new();
//! for bit in [true, false, true, true, true] {
//!     writer.write_bit(bit);
//! }
//! // Total: 10111 -> padded to 10111000
//! let (bytes, padding) = writer.finish();
//! assert_eq!(bytes, vec![0b1011_1000]);
//! assert_eq!(padding, 3);
//!
//! let reader = BitReader::new(&bytes, padding).unwrap();
//! let bits: Vec<bool> = reader.collect();
//! assert_eq!(bits, vec![true, false, true, true, true]);
//! ```

use crate::error::{Error, HeaderError, Result};

/// Largest legal pad count.
pub const MAX_PADDING: u8 = 7;

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
/// - bits of `bit_buffer` below the fill position are zero
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    /// Create a new BitWriter with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer whose output buffer can hold `bytes` bytes without
    /// reallocating.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Append a sequence of bits in order.
    pub fn write_all<I>(&mut self, bits: I)
    where
        I: IntoIterator<Item = bool>,
    {
        for bit in bits {
            self.write_bit(bit);
        }
    }

    /// Finish writing and return the packed bytes plus the pad count.
    ///
    /// The final partial byte, if any, is completed with zero bits. The pad
    /// count is the number of those zero bits (0 when the bit length is a
    /// multiple of 8).
    pub fn finish(mut self) -> (Vec<u8>, u8) {
        let padding = if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            8 - self.bit_count
        } else {
            0
        };
        (self.bytes, padding)
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

/// Reads bits MSB-first from packed bytes, stopping before the pad bits.
///
/// # Invariants
/// - `bit_position <= bit_len <= data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    /// Source data
    data: &'a [u8],
    /// Number of meaningful bits (total minus padding)
    bit_len: usize,
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `data` whose last `padding` bits are filler.
    ///
    /// # Errors
    /// - `MalformedHeader` if `padding` is outside 0-7
    /// - `TruncatedPayload` if `padding` exceeds the bits in `data`
    pub fn new(data: &'a [u8], padding: u8) -> Result<Self> {
        if padding > MAX_PADDING {
            return Err(HeaderError::InvalidPadding(padding).into());
        }

        let available_bits = data.len() * 8;
        if padding as usize > available_bits {
            return Err(Error::TruncatedPayload {
                padding,
                available_bits,
            });
        }

        Ok(Self {
            data,
            bit_len: available_bits - padding as usize,
            bit_position: 0,
        })
    }

    /// Read the next bit, or `None` once only padding remains.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.bit_position >= self.bit_len {
            return None;
        }

        let byte = self.data[self.bit_position / 8];
        let bit = byte & (0x80 >> (self.bit_position % 8)) != 0;
        self.bit_position += 1;
        Some(bit)
    }

    /// Return the number of meaningful bits not yet read.
    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    /// Return the current bit position.
    pub fn position(&self) -> usize {
        self.bit_position
    }

    /// Check if every meaningful bit has been read.
    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bits_remaining();
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn bits_of(pattern: &str) -> Vec<bool> {
        pattern.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_all(bits_of("10110011"));

        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b10110011]);
        assert_eq!(padding, 0);

        let reader = BitReader::new(&bytes, padding).unwrap();
        assert_eq!(reader.collect::<Vec<_>>(), bits_of("10110011"));
    }

    #[test]
    fn test_padding() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);

        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b10000000]);
        assert_eq!(padding, 7);
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::new();
        writer.write_all(bits_of("1010101111110000101"));
        assert_eq!(writer.bit_len(), 19);

        let (bytes, padding) = writer.finish();
        assert_eq!(bytes, vec![0b10101011, 0b11110000, 0b10100000]);
        assert_eq!(padding, 5);

        let reader = BitReader::new(&bytes, padding).unwrap();
        assert_eq!(reader.collect::<Vec<_>>(), bits_of("1010101111110000101"));
    }

    #[test]
    fn test_empty_writer() {
        let (bytes, padding) = BitWriter::new().finish();
        assert!(bytes.is_empty());
        assert_eq!(padding, 0);

        let mut reader = BitReader::new(&bytes, 0).unwrap();
        assert!(reader.is_empty());
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn test_reader_hides_padding() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data, 3).unwrap();

        assert_eq!(reader.bits_remaining(), 5);
        for _ in 0..5 {
            assert_eq!(reader.read_bit(), Some(true));
        }
        assert_eq!(reader.position(), 5);
        assert!(reader.is_empty());
        assert_eq!(reader.read_bit(), None);
    }

    #[test]
    fn test_padding_out_of_range() {
        let err = BitReader::new(&[0x00], 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedHeader);
    }

    #[test]
    fn test_padding_exceeds_payload() {
        let err = BitReader::new(&[], 2).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedPayload {
                padding: 2,
                available_bits: 0
            }
        ));
    }

    #[test]
    fn test_size_hint() {
        let data = [0xAA, 0x55];
        let mut reader = BitReader::new(&data, 4).unwrap();
        assert_eq!(reader.size_hint(), (12, Some(12)));
        reader.read_bit();
        assert_eq!(reader.size_hint(), (11, Some(11)));
    }
}
