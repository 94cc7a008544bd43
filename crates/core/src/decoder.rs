//! [`CompressedBlock`] back to the original bytes.
//!
//! The decoder rebuilds the tree from the stored frequency table and walks
//! the payload one bit at a time:
//!
//! - at the root, or at an internal node: `0` moves left, `1` moves right
//! - landing on a leaf emits its symbol and resets the cursor to the root
//!
//! The walk must end at the root once the payload (minus padding) runs out.
//! Ending anywhere else means the stream was cut mid-code.

use tracing::debug;

use crate::bitio::BitReader;
use crate::block::CompressedBlock;
use crate::error::{BitstreamError, Result};
use crate::tree::{HuffmanTree, Node, NodeId, TreeShape};

/// Recover the original bytes from `block`.
///
/// # Errors
/// - `TruncatedPayload` if the padding exceeds the payload bits
/// - `CorruptBitstream` if a bit has no child to move into, or the stream
///   ends mid-code
pub fn decode(block: &CompressedBlock) -> Result<Vec<u8>> {
    let bits = BitReader::new(&block.payload, block.padding)?;
    let tree = HuffmanTree::build(&block.table);

    match tree.shape() {
        TreeShape::Empty => return Ok(Vec::new()),
        TreeShape::SingleLeaf => {
            // The block carries no repeat count, so the run length is lost
            debug!(
                symbols = block.table.len(),
                count = block.table.total(),
                "single-symbol block decodes to empty output"
            );
            return Ok(Vec::new());
        }
        TreeShape::Branching => {}
    }

    let output = walk(&tree, bits, block.table.total())?;
    debug!(
        payload_len = block.payload.len(),
        output_len = output.len(),
        "decoded block"
    );
    Ok(output)
}

fn walk(tree: &HuffmanTree, mut bits: BitReader<'_>, expected_len: u64) -> Result<Vec<u8>> {
    let Some(root) = tree.root() else {
        return Ok(Vec::new());
    };

    // Each byte costs at least one bit, so a lying table cannot inflate this
    let capacity = usize::try_from(expected_len)
        .unwrap_or(usize::MAX)
        .min(bits.bits_remaining());
    let mut output = Vec::with_capacity(capacity);
    let mut cursor: NodeId = root;
    let mut depth = 0;

    while let Some(bit) = bits.read_bit() {
        let position = bits.position() - 1;
        let next = match *tree.node(cursor) {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            Node::Leaf { .. } => {
                return Err(BitstreamError::MissingChild { position, bit }.into());
            }
        };

        match *tree.node(next) {
            Node::Leaf { symbol, .. } => {
                output.push(symbol);
                cursor = root;
                depth = 0;
            }
            Node::Internal { .. } => {
                cursor = next;
                depth += 1;
            }
        }
    }

    if cursor != root {
        debug!(trailing_bits = depth, "bitstream ended mid-code");
        return Err(BitstreamError::IncompleteCode {
            trailing_bits: depth,
        }
        .into());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::error::{Error, ErrorKind};
    use crate::frequency::FrequencyTable;

    #[test]
    fn test_round_trip() {
        let data = b"abracadabra";
        assert_eq!(decode(&encode(data)).unwrap(), data);
    }

    #[test]
    fn test_output_sized_from_table_total() {
        let data = b"the quick brown fox jumps over the lazy dog".repeat(32);
        let block = encode(&data);
        assert!(block.payload.len() * 8 > data.len());

        let decoded = decode(&block).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(decoded.capacity(), data.len());
    }

    #[test]
    fn test_aaab() {
        assert_eq!(decode(&encode(b"aaab")).unwrap(), b"aaab");
    }

    #[test]
    fn test_empty_table_ignores_payload() {
        let block = CompressedBlock {
            table: FrequencyTable::from_bytes(b""),
            padding: 2,
            payload: vec![0xAB, 0xCD],
        };
        assert_eq!(decode(&block).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_symbol_decodes_empty() {
        assert_eq!(decode(&encode(&[5, 5, 5])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_padding_exceeds_payload() {
        let block = CompressedBlock {
            table: FrequencyTable::from_bytes(b"ab"),
            padding: 3,
            payload: Vec::new(),
        };
        assert_eq!(decode(&block).unwrap_err().kind(), ErrorKind::TruncatedPayload);
    }

    #[test]
    fn test_stream_ends_mid_code() {
        // c -> 0, a -> 10, b -> 11; a single `1` stops inside the right subtree
        let table = FrequencyTable::from_bytes(b"abcc");
        let block = CompressedBlock {
            table,
            padding: 7,
            payload: vec![0b1000_0000],
        };
        let err = decode(&block).unwrap_err();
        assert!(matches!(
            err,
            Error::CorruptBitstream(BitstreamError::IncompleteCode { trailing_bits: 1 })
        ));
    }

    #[test]
    fn test_zero_bits_decode_to_nothing() {
        let block = CompressedBlock {
            table: FrequencyTable::from_bytes(b"ab"),
            padding: 0,
            payload: Vec::new(),
        };
        assert_eq!(decode(&block).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_padding_bits_are_not_decoded() {
        // a -> 0, b -> 1; one meaningful bit then seven pad bits that would
        // otherwise decode as seven more a's
        let block = CompressedBlock {
            table: FrequencyTable::from_bytes(b"ab"),
            padding: 7,
            payload: vec![0b1000_0000],
        };
        assert_eq!(decode(&block).unwrap(), b"b");
    }
}
