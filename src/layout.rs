//! Zig-zag codeword layout over a symbol's assignable modules.

use crate::error::{Error, Result};
use crate::models::{BitMatrix, ModuleGrid, Version};
use crate::patterns;

/// Cursor over the module placement order: two-column strips walked
/// boustrophedon from the bottom-right corner, timing column skipped,
/// reserved modules passed over. Iteration yields each assignable
/// module exactly once and stops when column 0 reaches the bottom
/// finder band.
pub struct LayoutWalk {
    reserved: BitMatrix,
    dim: usize,
    x: usize,
    y: usize,
    upward: bool,
    done: bool,
}

impl LayoutWalk {
    /// Walk for a version, starting at the bottom-right module
    pub fn new(version: Version) -> Self {
        let dim = version.size();
        Self {
            reserved: patterns::reserved(version),
            dim,
            x: dim - 1,
            y: dim - 1,
            upward: true,
            done: false,
        }
    }

    /// One raw cursor step in placement order, reserved or not.
    /// Within a strip the cursor ping-pongs between the right and left
    /// column; at a strip's edge it flips direction and moves two
    /// columns left, jumping over the timing column.
    fn step(&mut self) {
        let right_half = (self.x < 6) ^ (self.x % 2 == 0);
        if right_half {
            self.x -= 1;
            return;
        }
        let at_edge = if self.upward {
            self.y == 0
        } else {
            self.y == self.dim - 1
        };
        if at_edge {
            self.upward = !self.upward;
            if self.x == 0 {
                self.done = true;
                return;
            }
            self.x -= 1;
            if self.x == 6 {
                self.x -= 1;
            }
        } else {
            self.x += 1;
            self.y = if self.upward { self.y - 1 } else { self.y + 1 };
        }
    }
}

impl Iterator for LayoutWalk {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<(usize, usize)> {
        while !self.done {
            if self.x == 0 && self.y >= self.dim - 8 {
                self.done = true;
                return None;
            }
            let pos = (self.x, self.y);
            self.step();
            if !self.reserved.get(pos.0, pos.1) {
                return Some(pos);
            }
        }
        None
    }
}

/// Write codewords into the grid's assignable modules, MSB first.
/// Leftover modules past the last word keep their light value.
pub fn write_words(grid: &mut ModuleGrid, words: &[u8]) -> Result<()> {
    let mut walk = LayoutWalk::new(grid.version());
    for &word in words {
        for bit in (0..8).rev() {
            let (x, y) = walk
                .next()
                .ok_or(Error::RangeError("codeword write past last assignable module"))?;
            grid.set_module(x, y, (word >> bit) & 1 != 0);
        }
    }
    Ok(())
}

/// Read `count` codewords back out of the grid in placement order
pub fn read_words(grid: &ModuleGrid, count: usize) -> Result<Vec<u8>> {
    let mut walk = LayoutWalk::new(grid.version());
    let mut words = Vec::new();
    words.try_reserve(count)?;
    for _ in 0..count {
        let mut word = 0u8;
        for _ in 0..8 {
            let (x, y) = walk
                .next()
                .ok_or(Error::RangeError("codeword read past last assignable module"))?;
            word = (word << 1) | grid.module(x, y) as u8;
        }
        words.push(word);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables;

    fn v(n: u8) -> Version {
        Version::new(n).unwrap()
    }

    #[test]
    fn test_walk_starts_bottom_right() {
        let positions: Vec<_> = LayoutWalk::new(v(1)).take(8).collect();
        assert_eq!(
            positions,
            vec![
                (20, 20),
                (19, 20),
                (20, 19),
                (19, 19),
                (20, 18),
                (19, 18),
                (20, 17),
                (19, 17),
            ]
        );
    }

    #[test]
    fn test_walk_visits_every_assignable_module_once() {
        for number in 1..=40u8 {
            let version = v(number);
            let dim = version.size();
            let reserved = patterns::reserved(version);
            let assignable = dim * dim - reserved.count_set();

            let mut seen = BitMatrix::new(dim, dim);
            let mut visited = 0usize;
            for (x, y) in LayoutWalk::new(version) {
                assert!(!reserved.get(x, y), "reserved module visited at ({x}, {y})");
                assert!(!seen.get(x, y), "module visited twice at ({x}, {y})");
                seen.set(x, y, true);
                visited += 1;
            }
            assert_eq!(visited, assignable, "version {number}");
        }
    }

    #[test]
    fn test_walk_matches_codeword_capacity_exactly() {
        // Versions without leftover remainder bits
        for number in [1u8, 7, 13, 35, 40] {
            let visited = LayoutWalk::new(v(number)).count();
            assert_eq!(visited, 8 * tables::total_words(v(number)));
        }
    }

    #[test]
    fn test_write_is_msb_first() {
        let mut grid = ModuleGrid::blank(v(1));
        write_words(&mut grid, &[0xA0]).unwrap();
        assert!(grid.module(20, 20));
        assert!(!grid.module(19, 20));
        assert!(grid.module(20, 19));
        assert!(!grid.module(19, 19));
    }

    #[test]
    fn test_word_round_trip() {
        for number in [1u8, 7] {
            let version = v(number);
            let count = tables::total_words(version);
            let words: Vec<u8> = (0..count).map(|i| (i * 89 + 3) as u8).collect();

            let mut grid = ModuleGrid::blank(version);
            write_words(&mut grid, &words).unwrap();
            assert_eq!(read_words(&grid, count).unwrap(), words);
        }
    }

    #[test]
    fn test_overrun_is_an_error() {
        let mut grid = ModuleGrid::blank(v(1));
        // version 1 holds exactly 26 codewords
        let words = vec![0u8; 27];
        assert!(matches!(
            write_words(&mut grid, &words),
            Err(Error::RangeError(_))
        ));

        let mut grid = ModuleGrid::blank(v(1));
        write_words(&mut grid, &vec![0xFF; 26]).unwrap();
        assert!(matches!(
            read_words(&grid, 27),
            Err(Error::RangeError(_))
        ));
    }
}
