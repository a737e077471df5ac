//! Mask trial scoring and selection.

use rayon::prelude::*;

use crate::models::{MaskPattern, ModuleGrid};

const RUN_PENALTY: u32 = 3;
const BOX_PENALTY: u32 = 3;
const FINDER_PENALTY: u32 = 40;
const BALANCE_PENALTY: u32 = 10;

/// Run penalty along one line: 3 points for a run of five same-colored
/// modules plus one per extra module.
fn line_run_score(len: usize, module: impl Fn(usize) -> bool) -> u32 {
    let mut score = 0;
    let mut run: u32 = 1;
    let mut prev = module(0);
    for i in 1..len {
        let cur = module(i);
        if cur == prev {
            run += 1;
        } else {
            if run >= 5 {
                score += RUN_PENALTY + (run - 5);
            }
            run = 1;
            prev = cur;
        }
    }
    if run >= 5 {
        score += RUN_PENALTY + (run - 5);
    }
    score
}

fn score_runs(grid: &ModuleGrid) -> u32 {
    let dim = grid.dim();
    let mut score = 0;
    for y in 0..dim {
        score += line_run_score(dim, |x| grid.module(x, y));
    }
    for x in 0..dim {
        score += line_run_score(dim, |y| grid.module(x, y));
    }
    score
}

/// Penalty for every 2x2 block of uniform color
fn score_boxes(grid: &ModuleGrid) -> u32 {
    let dim = grid.dim();
    let mut score = 0;
    for y in 0..dim - 1 {
        for x in 0..dim - 1 {
            let color = grid.module(x, y);
            if grid.module(x + 1, y) == color
                && grid.module(x, y + 1) == color
                && grid.module(x + 1, y + 1) == color
            {
                score += BOX_PENALTY;
            }
        }
    }
    score
}

/// Penalty for finder-like 1:1:3:1:1 silhouettes in either orientation
fn score_finder_shapes(grid: &ModuleGrid) -> u32 {
    const SHAPE: [bool; 7] = [true, false, true, true, true, false, true];
    let dim = grid.dim();
    let mut score = 0;
    for y in 0..dim {
        for x in 0..dim - 6 {
            if (0..7).all(|i| grid.module(x + i, y) == SHAPE[i]) {
                score += FINDER_PENALTY;
            }
        }
    }
    for x in 0..dim {
        for y in 0..dim - 6 {
            if (0..7).all(|i| grid.module(x, y + i) == SHAPE[i]) {
                score += FINDER_PENALTY;
            }
        }
    }
    score
}

/// Penalty for dark/light imbalance, 10 points per 5% away from even
fn score_balance(grid: &ModuleGrid) -> u32 {
    let dim = grid.dim();
    let percent = 100 * grid.modules().count_set() / (dim * dim);
    let deviation = percent.abs_diff(50);
    BALANCE_PENALTY * deviation.div_ceil(5) as u32
}

/// Total penalty of a grid under the four standard criteria
pub fn score(grid: &ModuleGrid) -> u32 {
    score_runs(grid) + score_boxes(grid) + score_finder_shapes(grid) + score_balance(grid)
}

/// Try all eight mask patterns on clones of the data-only grid and
/// keep the lowest-scoring one; ties keep the lowest index.
pub fn select(grid: &ModuleGrid) -> MaskPattern {
    let best = MaskPattern::ALL
        .par_iter()
        .map(|&mask| {
            let mut trial = grid.clone();
            trial.apply_mask(mask);
            (score(&trial), mask.index(), mask)
        })
        .min_by_key(|&(score, index, _)| (score, index));

    match best {
        Some((score, _, mask)) => {
            tracing::debug!("selected mask {} with penalty {}", mask.index(), score);
            mask
        }
        None => MaskPattern::Pattern0,
    }
}
