//! Symbol encoding: segment stream, block assembly, layout, masking,
//! function patterns.

pub mod mask;
pub mod segments;

use crate::blocks;
use crate::error::{Error, Result};
use crate::layout;
use crate::models::{BitStream, ECLevel, Mode, ModuleGrid, Symbol, Version};
use crate::patterns;
use crate::tables;

/// Encode a payload into a finished symbol.
///
/// `version` 0 picks the smallest version the payload fits at the
/// requested EC level; an explicit version fails with `InvalidInput`
/// when the payload does not fit it.
pub fn encode(data: &[u8], mode: Mode, ec_level: ECLevel, version: u8) -> Result<Symbol> {
    let version = resolve_version(data, mode, ec_level, version)?;

    let mut stream = BitStream::with_capacity(8 * tables::data_words(version, ec_level))?;
    segments::encode_segment(&mut stream, mode, data, version)?;
    let words = blocks::assemble(&mut stream, version, ec_level)?;

    let mut grid = ModuleGrid::blank(version);
    layout::write_words(&mut grid, &words)?;

    // the mask is chosen on the data-only grid, before any function
    // pattern is drawn
    let mask = mask::select(&grid);
    grid.apply_mask(mask);

    patterns::draw(&mut grid);
    patterns::draw_format(&mut grid, ec_level, mask);
    patterns::draw_version(&mut grid);

    Ok(Symbol::new(version, ec_level, mask, grid))
}

fn resolve_version(data: &[u8], mode: Mode, ec_level: ECLevel, version: u8) -> Result<Version> {
    if version == 0 {
        let version = segments::smallest_version(mode, data.len(), ec_level)
            .ok_or(Error::InvalidInput("payload too long for any version"))?;
        tracing::debug!(
            "auto-selected version {} for {} input bytes",
            version.number(),
            data.len()
        );
        return Ok(version);
    }
    let version =
        Version::new(version).ok_or(Error::RangeError("version must be between 0 and 40"))?;
    if !segments::fits(mode, data.len(), version, ec_level) {
        return Err(Error::InvalidInput("payload too long for the requested version"));
    }
    Ok(version)
}
