//! Packing of '0'/'1' strings into bytes.
//!
//! The packed form starts with a padding block of zero bits closed by a
//! single one bit, sized so the total is a whole number of bytes. A bit
//! string that is already byte aligned still gets a full padding byte.

use bitvec::prelude::*;
use tracing::trace;

use crate::error::{HuffmanError, Result};

pub fn padding_len(bit_len: usize) -> usize {
    8 - bit_len % 8
}

/// Packs a bit string MSB-first behind its padding block.
pub fn pack(bits: &str) -> Result<Vec<u8>> {
    let padding = padding_len(bits.len());
    let mut packed = BitVec::<u8, Msb0>::with_capacity(bits.len() + padding);
    packed.resize(padding - 1, false);
    packed.push(true);

    for (position, found) in bits.chars().enumerate() {
        match found {
            '0' => packed.push(false),
            '1' => packed.push(true),
            _ => return Err(HuffmanError::InvalidBit { found, position }),
        }
    }

    debug_assert_eq!(packed.len() % 8, 0);
    trace!(bits = bits.len(), padding, bytes = packed.len() / 8, "packed bit string");
    Ok(packed.into_vec())
}

/// Expands bytes MSB-first and strips the padding block.
///
/// If the first byte holds no one bit, exactly eight bits are dropped.
pub fn unpack(bytes: &[u8]) -> String {
    let bits = bytes.view_bits::<Msb0>();
    let head = bits.len().min(8);
    let start = bits[..head].first_one().map_or(head, |one| one + 1);

    bits[start..].iter()
        .map(|bit| if *bit { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_packs_into_one_byte() {
        assert_eq!(pack("101").unwrap(), vec![0b0000_1101]);
        assert_eq!(unpack(&[0b0000_1101]), "101");
    }

    #[test]
    fn aligned_string_gets_full_padding_byte() {
        let packed = pack("10110011").unwrap();
        assert_eq!(packed, vec![0b0000_0001, 0b1011_0011]);
        assert_eq!(unpack(&packed), "10110011");
    }

    #[test]
    fn empty_string_is_one_padding_byte() {
        assert_eq!(pack("").unwrap(), vec![0b0000_0001]);
        assert_eq!(unpack(&[0b0000_0001]), "");
    }

    #[test]
    fn seven_bits_use_single_padding_bit() {
        assert_eq!(pack("0000000").unwrap(), vec![0b1000_0000]);
        assert_eq!(unpack(&[0b1000_0000]), "0000000");
    }

    #[test]
    fn padding_lengths() {
        assert_eq!(padding_len(0), 8);
        assert_eq!(padding_len(3), 5);
        assert_eq!(padding_len(7), 1);
        assert_eq!(padding_len(16), 8);
    }

    #[test]
    fn invalid_character_aborts() {
        let err = pack("10a1").unwrap_err();
        assert!(matches!(err, HuffmanError::InvalidBit { found: 'a', position: 2 }));
    }

    #[test]
    fn zero_first_byte_drops_eight_bits() {
        assert_eq!(unpack(&[0x00, 0b1010_0000]), "10100000");
    }

    #[test]
    fn empty_bytes_unpack_to_nothing() {
        assert_eq!(unpack(&[]), "");
    }
}
