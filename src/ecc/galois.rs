//! Field arithmetic shared by the Reed-Solomon and BCH coders.

/// GF(2^8) reduction polynomial x^8 + x^4 + x^3 + x^2 + 1
const GF256_POLY: u16 = 0x11D;

/// Multiply two elements of GF(2^8) by Russian peasant multiplication,
/// reducing modulo [`GF256_POLY`] after each doubling.
pub fn mult(a: u8, b: u8) -> u8 {
    let mut product: u16 = 0;
    let mut a = a as u16;
    let mut b = b as u16;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        a <<= 1;
        if a & 0x100 != 0 {
            a ^= GF256_POLY;
        }
        b >>= 1;
    }
    product as u8
}

/// Residue of `value` modulo `modulus`, both taken as GF(2) polynomials.
/// Plain XOR long division; the result has fewer bits than `modulus`.
pub fn gf2_residue(value: u32, modulus: u32) -> u32 {
    debug_assert!(modulus != 0);
    let degree = 31 - modulus.leading_zeros();
    let mut residue = value;
    for shift in (0..=(31 - degree)).rev() {
        if residue & (1 << (shift + degree)) != 0 {
            residue ^= modulus << shift;
        }
    }
    residue
}
