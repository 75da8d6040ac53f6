use bitvec::prelude::*;
use std::collections::BTreeMap;

use crate::tree::{HuffmanTree, Node};

/// Bit string type used for codes and packed streams, MSB first.
pub type Bits = BitVec<u8, Msb0>;

/// Renders a bit string as `'0'`/`'1'` characters.
pub fn bits_to_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter()
        .by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}

/// Symbol to code mapping used by the packer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Bits>,
}

impl CodeTable {
    /// Walks the tree, `0` for every left edge and `1` for every right edge.
    ///
    /// A tree made of a lone leaf gives that symbol the code `0`, so every
    /// occurrence still costs one bit.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        fn traverse(node: &Node, path: &mut Bits, codes: &mut BTreeMap<u8, Bits>) {
            if let Some(sym) = node.symbol() {
                codes.insert(sym, path.clone());
                return;
            }

            if let Some((left, right)) = node.children() {
                path.push(false);
                traverse(left, path, codes);
                path.pop();

                path.push(true);
                traverse(right, path, codes);
                path.pop();
            }
        }

        let mut path = Bits::new();
        if tree.root().is_leaf() {
            path.push(false);
        }

        let mut codes = BTreeMap::new();
        traverse(tree.root(), &mut path, &mut codes);

        Self { codes }
    }

    pub fn code(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes.get(&symbol).map(|c| c.as_bitslice())
    }

    /// `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes.iter().map(|(&s, c)| (s, c.as_bitslice()))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
