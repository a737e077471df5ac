//! Error correction primitives: GF(256) arithmetic, Reed-Solomon parity
//! generation, and the BCH codes protecting format and version metadata.

pub mod bch;
pub mod galois;
pub mod reed_solomon;
