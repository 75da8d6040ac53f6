//! Static Huffman compression of byte buffers.
//!
//! [`encode`] turns a buffer into a [`Codebook`] plus packed bytes, and
//! [`decode`] reverses it. The codebook is self-contained: it holds the
//! bit-string to byte mapping and the exact stream lengths, so decoding never
//! rebuilds the tree.
//!
//! ```
//! let encoded = huffpack::encode(b"aaab").unwrap();
//! assert_eq!(encoded.packed, vec![0b1110_0000]);
//!
//! let stored = encoded.codebook.to_bytes().unwrap();
//! let codebook = huffpack::Codebook::from_bytes(&stored).unwrap();
//! assert_eq!(huffpack::decode(&codebook, &encoded.packed).unwrap(), b"aaab");
//! ```

pub mod batch;
pub mod code_table;
pub mod codebook;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod packer;
pub mod tree;

pub use code_table::{Bits, CodeTable};
pub use codebook::Codebook;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyMap;
pub use packer::PackedBits;
pub use tree::HuffmanTree;

/// Output of [`encode`]: the persisted codebook and the packed data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub codebook: Codebook,
    pub packed: Vec<u8>,
}

/// Compresses `buffer`. An empty buffer yields an empty codebook and no data.
pub fn encode(buffer: &[u8]) -> Result<Encoded> {
    let frequencies = FrequencyMap::count(buffer);
    let Some(tree) = HuffmanTree::build(&frequencies) else {
        return Ok(Encoded::default());
    };

    let table = CodeTable::from_tree(&tree);
    let packed = packer::pack(buffer, &table)?;

    Ok(Encoded {
        codebook: Codebook::from_table(&table, packed.bit_len, buffer.len() as u64),
        packed: packed.bytes,
    })
}

/// Restores the buffer that produced `codebook` and `packed`.
pub fn decode(codebook: &Codebook, packed: &[u8]) -> Result<Vec<u8>> {
    decoder::decode(codebook, packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compresses_english_text() {
        let s = String::from(
            "She sells sea shells by the sea shore, and the shells she sells are surely sea shells.",
        );
        let enc = encode(s.as_bytes()).unwrap();
        let dec = String::from_utf8(decode(&enc.codebook, &enc.packed).unwrap()).unwrap();

        assert_eq!(dec, s);
        assert!(enc.packed.len() < s.len());
    }

    #[test]
    fn aaab() {
        let enc = encode(b"aaab").unwrap();
        assert_eq!(enc.codebook.len(), 2);
        assert_eq!(enc.codebook.total_bits(), 4);
        assert_eq!(enc.packed.len(), 1);
        assert_eq!(decode(&enc.codebook, &enc.packed).unwrap(), b"aaab");
    }

    #[test]
    fn single_repeated_byte() {
        let enc = encode(b"zzzz").unwrap();
        assert_eq!(enc.codebook.len(), 1);
        assert_eq!(enc.codebook.total_bits(), 4);
        assert_eq!(decode(&enc.codebook, &enc.packed).unwrap(), b"zzzz");
    }

    #[test]
    fn empty_input() {
        let enc = encode(&[]).unwrap();
        assert!(enc.codebook.is_empty());
        assert!(enc.packed.is_empty());
        assert!(decode(&enc.codebook, &enc.packed).unwrap().is_empty());
    }

    #[test]
    fn every_byte_value_once() {
        let input: Vec<u8> = (0..=255).collect();
        let enc = encode(&input).unwrap();
        assert_eq!(enc.codebook.len(), 256);
        assert_eq!(enc.codebook.max_code_len(), 8);
        assert_eq!(enc.packed.len(), 256);
        assert_eq!(decode(&enc.codebook, &enc.packed).unwrap(), input);
    }

    #[test]
    fn equal_frequencies_are_reproducible() {
        let first = encode(b"xyxyxyzz").unwrap();
        for _ in 0..20 {
            let again = encode(b"xyxyxyzz").unwrap();
            assert_eq!(again, first);
            assert_eq!(
                again.codebook.to_bytes().unwrap(),
                first.codebook.to_bytes().unwrap()
            );
        }
    }

    #[test]
    fn roundtrip_through_persisted_codebook() {
        let input = b"mississippi river banks";
        let enc = encode(input).unwrap();
        let codebook = Codebook::from_bytes(&enc.codebook.to_bytes().unwrap()).unwrap();
        assert_eq!(decode(&codebook, &enc.packed).unwrap(), input);
    }
}
