//! Per-mode segment payload decoders.

pub mod alphanumeric;
pub mod byte;
pub mod numeric;
