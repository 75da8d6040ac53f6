use bitvec::prelude::*;

use crate::code_table::Bits;
use crate::codebook::Codebook;
use crate::error::{HuffmanError, Result};

/// Rebuilds the original buffer from `packed` using `codebook`.
///
/// Bits past `codebook.total_bits()` are padding and never consulted.
pub fn decode(codebook: &Codebook, packed: &[u8]) -> Result<Vec<u8>> {
    let total_bits = usize::try_from(codebook.total_bits()).map_err(|_| {
        HuffmanError::InvalidInput(format!("bit count {} too large", codebook.total_bits()))
    })?;

    if codebook.is_empty() {
        if !packed.is_empty() || total_bits != 0 {
            return Err(HuffmanError::InvalidInput(
                "empty codebook with non-empty packed data".into(),
            ));
        }
        return Ok(Vec::new());
    }

    if packed.len() != total_bits.div_ceil(8) {
        return Err(HuffmanError::InvalidInput(format!(
            "packed data is {} byte(s), codebook records {} bit(s)",
            packed.len(),
            total_bits
        )));
    }

    let bits = &packed.view_bits::<Msb0>()[..total_bits];
    // every symbol costs at least one bit
    let claimed = usize::try_from(codebook.decoded_len()).unwrap_or(usize::MAX);
    let mut out = Vec::with_capacity(claimed.min(total_bits));
    let mut candidate = Bits::new();

    for (offset, bit) in bits.iter().by_vals().enumerate() {
        candidate.push(bit);
        if let Some(sym) = codebook.lookup(&candidate) {
            out.push(sym);
            candidate.clear();
        } else if candidate.len() >= codebook.max_code_len() {
            return Err(HuffmanError::InvalidCode {
                offset: offset + 1 - candidate.len(),
            });
        }
    }

    if !candidate.is_empty() {
        return Err(HuffmanError::TruncatedStream {
            pending: candidate.len(),
        });
    }

    if out.len() as u64 != codebook.decoded_len() {
        return Err(HuffmanError::LengthMismatch {
            expected: codebook.decoded_len(),
            actual: out.len() as u64,
        });
    }

    Ok(out)
}
