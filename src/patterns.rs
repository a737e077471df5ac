//! Function patterns: finder, timing, alignment, format and version
//! regions. Reservation computes where payload may not go; drawing
//! renders the fixed patterns and the BCH-protected metadata.

use crate::ecc::bch;
use crate::models::{BitMatrix, ECLevel, MaskPattern, ModuleGrid, Version};
use crate::tables;

fn fill(mask: &mut BitMatrix, x0: usize, y0: usize, w: usize, h: usize) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            mask.set(x, y, true);
        }
    }
}

/// Centers of the alignment grid, minus the three finder-coincident ones
fn alignment_centers(version: Version) -> Vec<(usize, usize)> {
    let positions = tables::alignment_positions(version);
    let last = version.size() - 7;
    let mut centers = Vec::new();
    for &cy in positions {
        for &cx in positions {
            let finder =
                (cx == 6 && cy == 6) || (cx == 6 && cy == last) || (cx == last && cy == 6);
            if !finder {
                centers.push((cx, cy));
            }
        }
    }
    centers
}

/// Bit matrix of the modules reserved for function patterns at a
/// version; everything left clear is assignable.
pub fn reserved(version: Version) -> BitMatrix {
    let dim = version.size();
    let mut mask = BitMatrix::new(dim, dim);

    // timing strips
    for i in 0..dim {
        mask.set(i, 6, true);
        mask.set(6, i, true);
    }

    // finder corners including separators and the format strips
    fill(&mut mask, 0, 0, 9, 9);
    fill(&mut mask, dim - 8, 0, 8, 9);
    fill(&mut mask, 0, dim - 8, 9, 8);

    // version blocks sit beside the top-right and bottom-left finders
    if version.number() >= 7 {
        fill(&mut mask, dim - 11, 0, 3, 6);
        fill(&mut mask, 0, dim - 11, 6, 3);
    }

    for (cx, cy) in alignment_centers(version) {
        fill(&mut mask, cx - 2, cy - 2, 5, 5);
    }

    mask
}

/// Draw the fixed function patterns: timing strips, finders with their
/// separator fringe, alignment patterns and the lone dark module.
pub fn draw(grid: &mut ModuleGrid) {
    let dim = grid.dim();

    for i in 0..dim {
        grid.set_module(i, 6, i % 2 == 0);
        grid.set_module(6, i, i % 2 == 0);
    }

    // finder rings are light at Chebyshev distance 2 and 4 from center
    for (cx, cy) in [(3, 3), (dim - 4, 3), (3, dim - 4)] {
        for dy in -4i32..=4 {
            for dx in -4i32..=4 {
                let x = cx as i32 + dx;
                let y = cy as i32 + dy;
                if x < 0 || y < 0 || x >= dim as i32 || y >= dim as i32 {
                    continue;
                }
                let ring = dx.abs().max(dy.abs());
                grid.set_module(x as usize, y as usize, ring != 2 && ring != 4);
            }
        }
    }

    // alignment patterns are light only on the middle ring
    for (cx, cy) in alignment_centers(grid.version()) {
        for dy in 0..5usize {
            for dx in 0..5usize {
                let ring = (dx as i32 - 2).abs().max((dy as i32 - 2).abs());
                grid.set_module(cx - 2 + dx, cy - 2 + dy, ring != 1);
            }
        }
    }

    grid.set_module(8, dim - 8, true);
}

/// Write the BCH format codeword into both mirrored locations
pub fn draw_format(grid: &mut ModuleGrid, ec_level: ECLevel, mask: MaskPattern) {
    let bits = bch::encode_format(ec_level, mask);
    let dim = grid.dim();

    // first copy wraps around the top-left finder
    for i in 0..6 {
        grid.set_module(8, i, (bits >> i) & 1 != 0);
    }
    grid.set_module(8, 7, (bits >> 6) & 1 != 0);
    grid.set_module(8, 8, (bits >> 7) & 1 != 0);
    grid.set_module(7, 8, (bits >> 8) & 1 != 0);
    for i in 9..15 {
        grid.set_module(14 - i, 8, (bits >> i) & 1 != 0);
    }

    // second copy splits between the other two finders
    for i in 0..8 {
        grid.set_module(dim - 1 - i, 8, (bits >> i) & 1 != 0);
    }
    for i in 8..15 {
        grid.set_module(8, dim - 15 + i, (bits >> i) & 1 != 0);
    }
}

/// Read both mirrored format codewords, top-left copy first
pub fn read_format(grid: &ModuleGrid) -> (u16, u16) {
    let dim = grid.dim();
    let mut first = 0u16;
    let mut second = 0u16;

    for i in 0..6 {
        if grid.module(8, i) {
            first |= 1 << i;
        }
    }
    if grid.module(8, 7) {
        first |= 1 << 6;
    }
    if grid.module(8, 8) {
        first |= 1 << 7;
    }
    if grid.module(7, 8) {
        first |= 1 << 8;
    }
    for i in 9..15 {
        if grid.module(14 - i, 8) {
            first |= 1 << i;
        }
    }

    for i in 0..8 {
        if grid.module(dim - 1 - i, 8) {
            second |= 1 << i;
        }
    }
    for i in 8..15 {
        if grid.module(8, dim - 15 + i) {
            second |= 1 << i;
        }
    }

    (first, second)
}

/// Write the BCH version codeword into both 6x3 blocks (version >= 7)
pub fn draw_version(grid: &mut ModuleGrid) {
    if grid.version().number() < 7 {
        return;
    }
    let bits = bch::encode_version(grid.version());
    let dim = grid.dim();
    for i in 0..18 {
        let dark = (bits >> i) & 1 != 0;
        let a = dim - 11 + i % 3;
        let b = i / 3;
        grid.set_module(a, b, dark);
        grid.set_module(b, a, dark);
    }
}

/// Read both 18-bit version codewords, top-right block first
pub fn read_version(grid: &ModuleGrid) -> (u32, u32) {
    let dim = grid.dim();
    let mut first = 0u32;
    let mut second = 0u32;
    for i in 0..18 {
        let a = dim - 11 + i % 3;
        let b = i / 3;
        if grid.module(a, b) {
            first |= 1 << i;
        }
        if grid.module(b, a) {
            second |= 1 << i;
        }
    }
    (first, second)
}
