//! Symbol to bit-code mapping derived from a [`HuffmanTree`].
//!
//! Codes are assigned by a depth-first walk from the root with an explicit
//! stack: a left edge appends `0`, a right edge appends `1`, and a code is
//! recorded only when the walk reaches a leaf. Because only leaves carry
//! codes, the book is prefix-free.
//!
//! A tree whose root is itself a leaf (one distinct symbol) has no edges, so
//! the book is empty. The block format has no repeat count to fall back on,
//! which makes single-symbol input a known lossy case.

use std::fmt;

use crate::frequency::SYMBOL_COUNT;
use crate::tree::{HuffmanTree, Node};

/// A variable-length code, most significant (first emitted) bit first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    fn extended(&self, bit: bool) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Self { bits }
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True if `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Codes for every symbol present in a branching tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBook {
    codes: Vec<Option<Code>>,
    len: usize,
}

impl CodeBook {
    /// Walk `tree` and record a code for each leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; SYMBOL_COUNT];
        let mut len = 0;

        let root = match tree.root() {
            Some(root) if !tree.node(root).is_leaf() => root,
            _ => return Self { codes, len },
        };

        let mut stack = vec![(root, Code::default())];
        while let Some((id, code)) = stack.pop() {
            match *tree.node(id) {
                Node::Leaf { symbol, .. } => {
                    codes[symbol as usize] = Some(code);
                    len += 1;
                }
                Node::Internal { left, right, .. } => {
                    // Right first so the left subtree is visited first
                    stack.push((right, code.extended(true)));
                    stack.push((left, code.extended(false)));
                }
            }
        }

        Self { codes, len }
    }

    /// Code for `symbol`, if it appeared in the tree.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn book_for(data: &[u8]) -> CodeBook {
        CodeBook::from_tree(&HuffmanTree::build(&FrequencyTable::from_bytes(data)))
    }

    #[test]
    fn test_two_symbols() {
        let book = book_for(b"aaab");
        assert_eq!(book.len(), 2);
        assert_eq!(book.get(b'b').unwrap().to_string(), "0");
        assert_eq!(book.get(b'a').unwrap().to_string(), "1");
        assert!(book.get(b'c').is_none());
    }

    #[test]
    fn test_single_symbol_has_no_codes() {
        let book = book_for(&[5, 5, 5]);
        assert!(book.is_empty());
        assert!(book.get(5).is_none());
    }

    #[test]
    fn test_empty_input_has_no_codes() {
        assert!(book_for(b"").is_empty());
    }

    #[test]
    fn test_frequent_symbols_get_shorter_codes() {
        let book = book_for(b"eeeeeeeeeeeeeeeettaz");
        let e = book.get(b'e').unwrap().len();
        let z = book.get(b'z').unwrap().len();
        assert!(e < z, "e={} z={}", e, z);
    }

    #[test]
    fn test_prefix_free() {
        let data: Vec<u8> = (0u8..64)
            .flat_map(|b| std::iter::repeat(b).take(b as usize + 1))
            .collect();
        let book = book_for(&data);
        assert_eq!(book.len(), 64);

        let codes: Vec<&Code> = book.iter().map(|(_, code)| code).collect();
        for (i, a) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_balanced_codes() {
        let book = book_for(b"abcd");
        let rendered: Vec<String> = book.iter().map(|(_, c)| c.to_string()).collect();
        assert_eq!(rendered, vec!["00", "01", "10", "11"]);
    }
}
