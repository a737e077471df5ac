/// Compact bit matrix backing module and mask planes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions, all bits clear
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height + 7) / 8;
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Build a matrix from a packed row-major bitmap.
    ///
    /// Each row occupies `row_stride` bytes; bits are LSB-first within a
    /// byte (the XBM convention), so bit 0 of `data[y * row_stride]` is
    /// module `(0, y)`. This is the layout scanners hand over. Returns
    /// `None` if `data` is too short for the described dimensions.
    pub fn from_packed_rows(
        data: &[u8],
        row_stride: usize,
        width: usize,
        height: usize,
    ) -> Option<Self> {
        let row_bits = row_stride.checked_mul(8)?;
        let rows_len = row_stride.checked_mul(height)?;
        if row_bits < width || data.len() < rows_len {
            return None;
        }
        let mut matrix = Self::new(width, height);
        for y in 0..height {
            let row = &data[y * row_stride..(y + 1) * row_stride];
            for x in 0..width {
                let bit = (row[x / 8] >> (x % 8)) & 1 == 1;
                matrix.set(x, y, bit);
            }
        }
        Some(matrix)
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y); out-of-range reads as false
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y); out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Toggle bit at (x, y)
    pub fn toggle(&mut self, x: usize, y: usize) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        self.data[index / 8] ^= 1 << (index % 8);
    }

    /// Clear all bits to 0
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Number of set bits
    pub fn count_set(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Get raw data as bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
