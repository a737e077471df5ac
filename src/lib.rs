//! QR Code Model 2 symbol encoder and decoder
//!
//! A pure Rust implementation of the symbol layer: segment encoding,
//! Reed-Solomon block assembly, mask selection and the zig-zag module
//! layout, plus the reverse path from a sampled module matrix back to
//! the payload. Image handling (detection, sampling, rectification)
//! is out of scope; [`decode`] takes an already-rectified [`BitMatrix`]
//! with one bit per module.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Codeword block splitting, padding and interleaving
pub mod blocks;
/// Symbol decoding (format/version recovery, unmasking, segment parsing)
pub mod decoder;
/// Error correction primitives (GF(256), Reed-Solomon, BCH)
pub mod ecc;
/// Symbol encoding (segments, masking, version selection)
pub mod encoder;
/// Error and result types
pub mod error;
/// The zig-zag codeword placement walk
pub mod layout;
/// Core data structures (BitStream, BitMatrix, ModuleGrid, QRCode)
pub mod models;
/// Function pattern drawing and the reserved-region map
pub mod patterns;
/// Capacity, block structure and alignment tables
pub mod tables;

pub use error::{Error, Result};
pub use models::{
    BitMatrix, BitStream, ECLevel, MaskPattern, Mode, ModuleGrid, QRCode, Segment, Symbol, Version,
};

pub use decoder::decode;
pub use encoder::encode;
