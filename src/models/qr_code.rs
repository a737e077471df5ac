use super::ModuleGrid;

/// QR Code version (Model 2, 1-40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    /// Smallest Model 2 version
    pub const MIN: Version = Version(1);
    /// Largest Model 2 version
    pub const MAX: Version = Version(40);

    /// Create a version, `None` outside 1-40
    pub fn new(number: u8) -> Option<Self> {
        if (1..=40).contains(&number) {
            Some(Version(number))
        } else {
            None
        }
    }

    /// Infer the version from a symbol dimension (21, 25, .., 177)
    pub fn from_size(size: usize) -> Option<Self> {
        if size < 21 || size > 177 || (size - 17) % 4 != 0 {
            return None;
        }
        Some(Version(((size - 17) / 4) as u8))
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// All levels in capacity-table order
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Wire encoding used in the format info: L=1, M=0, Q=3, H=2.
    /// Not the natural ordinal order; fixed by the symbol format.
    pub fn bits(self) -> u8 {
        match self {
            ECLevel::L => 1,
            ECLevel::M => 0,
            ECLevel::Q => 3,
            ECLevel::H => 2,
        }
    }

    /// Inverse of [`ECLevel::bits`]; every 2-bit value is a valid level
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            1 => ECLevel::L,
            0 => ECLevel::M,
            3 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Row index into the capacity tables (ordered L, M, Q, H).
    /// Flipping the low wire bit happens to map onto table order.
    pub(crate) fn table_index(self) -> usize {
        (self.bits() ^ 0x1) as usize
    }
}

/// Data segment mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Digits 0-9, packed three to 10 bits
    Numeric,
    /// 45-symbol charset, packed two to 11 bits
    Alphanumeric,
    /// Raw octets, 8 bits each
    Byte,
    /// Shift-JIS double-byte characters (unsupported)
    Kanji,
}

impl Mode {
    /// 4-bit mode indicator written before each segment
    pub fn indicator(self) -> u8 {
        match self {
            Mode::Numeric => 1,
            Mode::Alphanumeric => 2,
            Mode::Byte => 4,
            Mode::Kanji => 8,
        }
    }

    /// Map a 4-bit indicator back to a mode
    pub fn from_indicator(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Mode::Numeric),
            2 => Some(Mode::Alphanumeric),
            4 => Some(Mode::Byte),
            8 => Some(Mode::Kanji),
            _ => None,
        }
    }

    /// Column index into the length-field width table
    pub(crate) fn table_index(self) -> usize {
        match self {
            Mode::Numeric => 0,
            Mode::Alphanumeric => 1,
            Mode::Byte => 2,
            Mode::Kanji => 3,
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All patterns in trial order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its 3-bit index
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Pattern index (0-7)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Check if module at row `i`, column `j` should be flipped
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// A finished QR symbol: metadata plus the final module grid.
///
/// Version and EC level are fixed at creation; the mask index is chosen
/// during encoding and immutable afterwards. Rendering layers only need
/// [`Symbol::module`] and [`Symbol::dim`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    version: Version,
    ec_level: ECLevel,
    mask: MaskPattern,
    grid: ModuleGrid,
}

impl Symbol {
    pub(crate) fn new(
        version: Version,
        ec_level: ECLevel,
        mask: MaskPattern,
        grid: ModuleGrid,
    ) -> Self {
        Self {
            version,
            ec_level,
            mask,
            grid,
        }
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn ec_level(&self) -> ECLevel {
        self.ec_level
    }

    /// Mask pattern selected during encoding
    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    /// The underlying module grid
    pub fn grid(&self) -> &ModuleGrid {
        &self.grid
    }

    /// Width = height in modules
    pub fn dim(&self) -> usize {
        self.grid.dim()
    }

    /// True if the module at (x, y) is dark
    pub fn module(&self, x: usize, y: usize) -> bool {
        self.grid.module(x, y)
    }
}

/// One decoded data segment: the mode its payload was packed in plus
/// the payload bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Encoding mode of this segment
    pub mode: Mode,
    /// Decoded payload bytes
    pub data: Vec<u8>,
}

/// Decoded QR code payload and metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    /// Decoded segments in stream order, each carrying its mode
    pub segments: Vec<Segment>,
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern that was applied
    pub mask_pattern: MaskPattern,
}

impl QRCode {
    /// Create a new QR code from its decoded segments
    pub fn new(
        segments: Vec<Segment>,
        version: Version,
        error_correction: ECLevel,
        mask_pattern: MaskPattern,
    ) -> Self {
        Self {
            segments,
            version,
            error_correction,
            mask_pattern,
        }
    }

    /// All segment payloads concatenated in stream order
    pub fn data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.segments.iter().map(|s| s.data.len()).sum());
        for segment in &self.segments {
            out.extend_from_slice(&segment.data);
        }
        out
    }

    /// Payload as text; non-UTF-8 byte payloads are replaced lossily
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data()).into_owned()
    }
}
