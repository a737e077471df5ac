//! Systematic Reed-Solomon parity generation over GF(2^8).

use super::galois;

/// Coefficients of the generator polynomial with roots 2^0 .. 2^(degree-1),
/// ascending from the constant term. The monic leading term is included
/// as the final 1.
fn generator(degree: usize) -> Vec<u8> {
    let mut coeffs = vec![1u8];
    let mut root: u8 = 1;
    for _ in 0..degree {
        // multiply by (x + root): each coefficient picks up the one below
        coeffs.push(0);
        for j in (1..coeffs.len()).rev() {
            coeffs[j] = coeffs[j - 1] ^ galois::mult(coeffs[j], root);
        }
        coeffs[0] = galois::mult(coeffs[0], root);
        root = galois::mult(root, 2);
    }
    coeffs
}

/// Compute `degree` parity words for `data`. Run the division LFSR over
/// the data bytes; the registers hold ascending powers, so the parity
/// stream reads them back highest first.
pub fn compute_parity(data: &[u8], degree: usize) -> Vec<u8> {
    debug_assert!(degree > 0);
    let gen_poly = generator(degree);
    let mut state = vec![0u8; degree];
    for &byte in data {
        let factor = byte ^ state[degree - 1];
        for j in (1..degree).rev() {
            state[j] = state[j - 1] ^ galois::mult(factor, gen_poly[j]);
        }
        state[0] = galois::mult(factor, gen_poly[0]);
    }
    state.reverse();
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Evaluate a codeword polynomial (first byte = highest power) at `x`
    fn eval(codeword: &[u8], x: u8) -> u8 {
        codeword
            .iter()
            .fold(0, |acc, &b| galois::mult(acc, x) ^ b)
    }

    #[test]
    fn test_small_generator() {
        // (x+1)(x+2) = x^2 + 3x + 2
        assert_eq!(generator(2), vec![2, 3, 1]);
    }

    #[test]
    fn test_single_byte_parity() {
        // 1*x^2 mod (x^2 + 3x + 2) leaves 3x + 2
        assert_eq!(compute_parity(&[1], 2), vec![3, 2]);
    }

    #[test]
    fn test_known_vector() {
        // Worked example: "HELLO WORLD", alphanumeric, version 1-M
        let data = [
            0x20, 0x5B, 0x0B, 0x78, 0xD1, 0x72, 0xDC, 0x4D, 0x43, 0x40, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ];
        let parity = compute_parity(&data, 10);
        assert_eq!(
            parity,
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_codeword_vanishes_at_generator_roots() {
        let data: Vec<u8> = (0..32).map(|i| (i * 37 + 5) as u8).collect();
        for degree in [7usize, 10, 13, 17, 22, 30] {
            let parity = compute_parity(&data, degree);
            assert_eq!(parity.len(), degree);

            let mut codeword = data.clone();
            codeword.extend_from_slice(&parity);

            let mut root: u8 = 1;
            for _ in 0..degree {
                assert_eq!(eval(&codeword, root), 0);
                root = galois::mult(root, 2);
            }
        }
    }

    #[test]
    fn test_zero_data_gives_zero_parity() {
        assert_eq!(compute_parity(&[0; 19], 7), vec![0; 7]);
    }
}
