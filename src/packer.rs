use crate::code_table::{Bits, CodeTable};
use crate::error::{HuffmanError, Result};

/// A packed bitstream together with its exact length in bits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    pub bit_len: u64,
}

/// Concatenates the code of every byte of `buffer`, MSB first, padding the
/// final byte with zero bits.
pub fn pack(buffer: &[u8], table: &CodeTable) -> Result<PackedBits> {
    let mut out = Bits::with_capacity(buffer.len());
    for &byte in buffer {
        let code = table
            .code(byte)
            .ok_or_else(|| HuffmanError::InvalidInput(format!("byte {byte:#04x} has no code")))?;
        out.extend_from_bitslice(code);
    }

    let bit_len = out.len() as u64;
    out.set_uninitialized(false);

    Ok(PackedBits {
        bytes: out.into_vec(),
        bit_len,
    })
}
