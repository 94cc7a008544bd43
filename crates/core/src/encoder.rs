//! Input bytes to [`CompressedBlock`].

use tracing::debug;

use crate::bitio::BitWriter;
use crate::block::CompressedBlock;
use crate::codebook::CodeBook;
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, TreeShape};

/// Compress `data` into a block.
///
/// Never fails. Empty input produces a block with an empty table and no
/// payload. Input with a single distinct byte produces a block with a
/// one-entry table and no payload bits, which decodes to empty output.
pub fn encode(data: &[u8]) -> CompressedBlock {
    let table = FrequencyTable::from_bytes(data);
    let tree = HuffmanTree::build(&table);

    if tree.shape() != TreeShape::Branching {
        debug!(
            input_len = data.len(),
            symbols = table.len(),
            "no branching tree, emitting empty payload"
        );
        return CompressedBlock {
            table,
            padding: 0,
            payload: Vec::new(),
        };
    }

    let book = CodeBook::from_tree(&tree);

    let bit_len: usize = table
        .iter()
        .map(|(symbol, count)| code_len(&book, symbol) * count as usize)
        .sum();
    let mut writer = BitWriter::with_capacity(bit_len.div_ceil(8));

    for &byte in data {
        let code = book
            .get(byte)
            .unwrap_or_else(|| unreachable!("symbol {:#04x} counted but has no code", byte));
        writer.write_all(code.bits().iter().copied());
    }

    let (payload, padding) = writer.finish();
    debug!(
        input_len = data.len(),
        symbols = table.len(),
        payload_bits = bit_len,
        padding,
        "encoded block"
    );

    CompressedBlock {
        table,
        padding,
        payload,
    }
}

fn code_len(book: &CodeBook, symbol: u8) -> usize {
    book.get(symbol).map_or(0, |code| code.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aaab() {
        // b -> 0, a -> 1: bits 1110, padded to 11100000
        let block = encode(b"aaab");
        assert_eq!(block.table, FrequencyTable::from_bytes(b"aaab"));
        assert_eq!(block.payload, vec![0b1110_0000]);
        assert_eq!(block.padding, 4);
    }

    #[test]
    fn test_empty_input() {
        let block = encode(b"");
        assert!(block.table.is_empty());
        assert_eq!(block.padding, 0);
        assert!(block.payload.is_empty());
    }

    #[test]
    fn test_single_symbol() {
        let block = encode(&[5, 5, 5]);
        assert_eq!(block.table.get(5), 3);
        assert!(block.padding <= 7);
        assert!(block.payload.is_empty());
    }

    #[test]
    fn test_byte_aligned_payload_has_no_padding() {
        // Four symbols of equal weight get 2-bit codes; 4 symbols -> 8 bits
        let block = encode(b"abcd");
        assert_eq!(block.padding, 0);
        assert_eq!(block.payload, vec![0b0001_1011]);
    }

    #[test]
    fn test_deterministic() {
        let data = b"the quick brown fox jumps over the lazy dog";
        assert_eq!(encode(data), encode(data));
    }
}
