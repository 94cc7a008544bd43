use huffcoder_core::{compress, decompress, ErrorKind};
use proptest::prelude::*;

/// Byte vectors holding at least two distinct values.
fn multi_symbol_input() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 2..2048)
        .prop_filter("needs two distinct bytes", |v| v.iter().any(|&b| b != v[0]))
}

proptest! {
    #[test]
    fn prop_round_trip(data in multi_symbol_input()) {
        let block = compress(&data);
        prop_assert_eq!(decompress(&block).unwrap(), data);
    }

    #[test]
    fn prop_deterministic(data in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(compress(&data), compress(&data));
    }

    #[test]
    fn prop_single_symbol_decodes_empty(byte in any::<u8>(), len in 1usize..512) {
        let block = compress(&vec![byte; len]);
        prop_assert!(decompress(&block).unwrap().is_empty());
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decompress(&data);
    }

    #[test]
    fn prop_flipped_tail_is_detected_or_differs(
        data in multi_symbol_input(),
        mask in 0x80u8..=0xFF,
    ) {
        // The first bit of the last byte is never padding
        let mut block = compress(&data);
        let last = block.len() - 1;
        block[last] ^= mask;

        match decompress(&block) {
            Ok(decoded) => prop_assert_ne!(decoded, data),
            Err(err) => prop_assert!(matches!(
                err.kind(),
                ErrorKind::CorruptBitstream | ErrorKind::TruncatedPayload
            )),
        }
    }
}
