use super::{BitMatrix, MaskPattern, Version};
use crate::error::{Error, Result};
use crate::patterns;

/// The module grid of one symbol, paired with the mask of positions
/// reserved for function patterns. Everything outside that mask is
/// assignable and carries data/EC payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGrid {
    version: Version,
    modules: BitMatrix,
    function: BitMatrix,
}

impl ModuleGrid {
    /// All-light grid for a version with its function mask prepared
    pub fn blank(version: Version) -> Self {
        let dim = version.size();
        Self {
            version,
            modules: BitMatrix::new(dim, dim),
            function: patterns::reserved(version),
        }
    }

    /// Wrap sampled modules. The matrix must be square with a valid
    /// symbol dimension (21, 25, .., 177).
    pub fn from_modules(modules: BitMatrix) -> Result<Self> {
        if modules.width() != modules.height() {
            return Err(Error::InvalidSize(modules.width()));
        }
        let version = Version::from_size(modules.width())
            .ok_or(Error::InvalidSize(modules.width()))?;
        Ok(Self {
            version,
            function: patterns::reserved(version),
            modules,
        })
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Width = height in modules
    pub fn dim(&self) -> usize {
        self.modules.width()
    }

    /// True if the module at (x, y) is dark
    pub fn module(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    /// Set the module at (x, y)
    pub fn set_module(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
    }

    /// True if (x, y) may carry payload rather than a function pattern
    pub fn is_assignable(&self, x: usize, y: usize) -> bool {
        !self.function.get(x, y)
    }

    /// Number of assignable modules in the grid
    pub fn assignable_count(&self) -> usize {
        self.dim() * self.dim() - self.function.count_set()
    }

    /// XOR the mask formula over every assignable module. Applying the
    /// same pattern twice restores the original grid.
    pub fn apply_mask(&mut self, mask: MaskPattern) {
        let dim = self.dim();
        for y in 0..dim {
            for x in 0..dim {
                if self.is_assignable(x, y) && mask.is_masked(y, x) {
                    self.modules.toggle(x, y);
                }
            }
        }
    }

    /// The raw module plane, for renderers
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }
}
