//! The decode-side code mapping and its persisted form.
//!
//! A [`Codebook`] maps bit strings back to symbols and records the exact
//! number of packed bits and decoded bytes, so trailing pad bits are never
//! mistaken for codes. It is persisted as named-field MessagePack where each
//! code is an explicit `"0"`/`"1"` string.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::code_table::{bits_to_string, Bits, CodeTable};
use crate::error::{HuffmanError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebook {
    pub(crate) codes: HashMap<Bits, u8>,
    pub(crate) max_code_len: usize,
    pub(crate) total_bits: u64,
    pub(crate) decoded_len: u64,
}

impl Codebook {
    /// Inverts `table` and records the stream lengths produced with it.
    pub(crate) fn from_table(table: &CodeTable, total_bits: u64, decoded_len: u64) -> Self {
        Self {
            codes: table.iter().map(|(s, c)| (c.to_bitvec(), s)).collect(),
            max_code_len: table.max_code_len(),
            total_bits,
            decoded_len,
        }
    }

    pub fn lookup(&self, code: &Bits) -> Option<u8> {
        self.codes.get(code).copied()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }

    /// Exact number of meaningful bits in the packed stream.
    pub fn total_bits(&self) -> u64 {
        self.total_bits
    }

    /// Length of the buffer the stream decodes to.
    pub fn decoded_len(&self) -> u64 {
        self.decoded_len
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Bits, u8)> + '_ {
        self.codes.iter().map(|(c, &s)| (c, s))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(&SerializableCodebook::from(self))?)
    }

    /// Parses and validates a persisted codebook.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw: SerializableCodebook = rmp_serde::from_slice(bytes)?;
        raw.try_into()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableCodebook {
    total_bits: u64,
    decoded_len: u64,
    codes: Vec<(String, u8)>,
}

impl<'a> From<&'a Codebook> for SerializableCodebook {
    fn from(other: &'a Codebook) -> Self {
        let mut codes: Vec<_> = other
            .codes
            .iter()
            .map(|(k, &v)| (bits_to_string(k), v))
            .collect();
        codes.sort();

        Self {
            total_bits: other.total_bits,
            decoded_len: other.decoded_len,
            codes,
        }
    }
}

impl TryFrom<SerializableCodebook> for Codebook {
    type Error = HuffmanError;

    fn try_from(mut other: SerializableCodebook) -> Result<Self> {
        let corrupt = |msg: String| HuffmanError::CorruptCodebook(msg);

        other.codes.sort();
        for pair in other.codes.windows(2) {
            let (shorter, longer) = (&pair[0].0, &pair[1].0);
            if shorter == longer {
                return Err(corrupt(format!("duplicate code {shorter:?}")));
            }
            // any code sharing a prefix sorts right after it
            if longer.starts_with(shorter.as_str()) {
                return Err(corrupt(format!("code {shorter:?} is a prefix of {longer:?}")));
            }
        }

        let mut symbols = HashSet::new();
        let mut codes = HashMap::with_capacity(other.codes.len());
        let mut max_code_len = 0;
        for (code, symbol) in other.codes {
            if code.is_empty() {
                return Err(corrupt(format!("empty code for symbol {symbol:#04x}")));
            }
            if !symbols.insert(symbol) {
                return Err(corrupt(format!("symbol {symbol:#04x} has more than one code")));
            }

            let bits = code
                .chars()
                .map(|ch| match ch {
                    '0' => Ok(false),
                    '1' => Ok(true),
                    _ => Err(corrupt(format!("code {code:?} is not a bit string"))),
                })
                .collect::<Result<Bits>>()?;

            max_code_len = max_code_len.max(bits.len());
            codes.insert(bits, symbol);
        }

        // every symbol costs between 1 and max_code_len bits
        let max_bits = other.decoded_len.saturating_mul(max_code_len as u64);
        if other.total_bits < other.decoded_len || other.total_bits > max_bits {
            return Err(corrupt(format!(
                "{} bit(s) cannot encode {} byte(s) with codes of at most {} bit(s)",
                other.total_bits, other.decoded_len, max_code_len
            )));
        }

        Ok(Self {
            codes,
            max_code_len,
            total_bits: other.total_bits,
            decoded_len: other.decoded_len,
        })
    }
}
