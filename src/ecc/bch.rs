//! BCH codes for the 15-bit format info and 18-bit version info.

use super::galois::gf2_residue;
use crate::models::{ECLevel, MaskPattern, Version};

/// Generator polynomial of the (15,5) format code
const FORMAT_GENERATOR: u32 = 0x537;

/// Fixed XOR mask applied to the finished format codeword
const FORMAT_MASK: u32 = 0x5412;

/// Generator polynomial of the (18,6) version code
const VERSION_GENERATOR: u32 = 0x1F25;

/// Build the 15-bit format codeword for an EC level and mask pattern
pub fn encode_format(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = ((ec_level.bits() as u32) << 3) | mask.index() as u32;
    let shifted = data << 10;
    ((shifted | gf2_residue(shifted, FORMAT_GENERATOR)) ^ FORMAT_MASK) as u16
}

/// BCH residue of an observed format codeword, zero when undamaged
pub fn format_check(bits: u16) -> u32 {
    gf2_residue(bits as u32 ^ FORMAT_MASK, FORMAT_GENERATOR)
}

/// Extract EC level and mask pattern from a format codeword.
/// No error correction; callers gate on [`format_check`] first.
pub fn decode_format(bits: u16) -> (ECLevel, MaskPattern) {
    let data = (bits as u32 ^ FORMAT_MASK) >> 10;
    (
        ECLevel::from_bits((data >> 3) as u8),
        MaskPattern::from_bits((data & 0x07) as u8),
    )
}

/// Build the 18-bit version codeword; only versions 7-40 carry one
pub fn encode_version(version: Version) -> u32 {
    let shifted = (version.number() as u32) << 12;
    shifted | gf2_residue(shifted, VERSION_GENERATOR)
}

/// Recover a version from an observed 18-bit codeword by nearest match.
/// Every candidate 7-40 is re-encoded and compared by Hamming distance;
/// an exact match short-circuits. Returns the best version and its
/// distance so callers can pick the cleaner of two mirrored copies.
pub fn decode_version(bits: u32) -> (Version, u32) {
    let mut best = (Version::MIN, u32::MAX);
    for candidate in (7..=40).filter_map(Version::new) {
        let distance = (encode_version(candidate) ^ bits).count_ones();
        if distance == 0 {
            return (candidate, 0);
        }
        if distance < best.1 {
            best = (candidate, distance);
        }
    }
    best
}
