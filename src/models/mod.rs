pub mod bitstream;
pub mod grid;
pub mod matrix;
pub mod qr_code;

pub use bitstream::BitStream;
pub use grid::ModuleGrid;
pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, MaskPattern, Mode, QRCode, Segment, Symbol, Version};
