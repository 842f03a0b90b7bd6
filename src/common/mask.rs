use std::ops::Deref;

use tracing::trace;

use super::metadata::Color;
use crate::builder::QR;
use crate::error::{EncodingError, EncodingResult};

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> EncodingResult<Self> {
        if pattern < 8 {
            Ok(Self(pattern))
        } else {
            Err(EncodingError::InvalidMaskingPattern(pattern))
        }
    }

    pub(crate) fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Row r, column c
mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        ((r * c) & 1) + ((r * c) % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        (((r * c) & 1) + ((r * c) % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        (((r + c) & 1) + ((r * c) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            _ => mask_functions::meadow,
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

/// Applies every mask to a copy of `qr`, keeps the one with the lowest penalty.
/// Ties go to the lower pattern number.
pub fn apply_best_mask(qr: &mut QR) -> MaskPattern {
    let mut best = (u32::MAX, MaskPattern(0));
    for mask in MaskPattern::all() {
        let mut candidate = qr.clone();
        candidate.apply_mask(mask);
        let penalty = compute_total_penalty(&candidate);
        trace!("Mask {} penalty {penalty}", *mask);
        if penalty < best.0 {
            best = (penalty, mask);
        }
    }
    qr.apply_mask(best.1);
    best.1
}

pub fn compute_total_penalty(qr: &QR) -> u32 {
    let adj_pen = compute_adjacent_penalty(qr);
    let blk_pen = compute_block_penalty(qr);
    let fp_pen_h = compute_finder_pattern_penalty(qr, true);
    let fp_pen_v = compute_finder_pattern_penalty(qr, false);
    let bal_pen = compute_balance_penalty(qr);
    adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
}

// Rule 1: runs of five or more same colored modules in a row or column
fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let w = qr.width() as i16;
    let mut pen = 0;
    for is_hor in [true, false] {
        for i in 0..w {
            let mut last = None;
            let mut run = 0;
            for j in 0..w {
                let clr = if is_hor { *qr.get(i, j) } else { *qr.get(j, i) };
                if last == Some(clr) {
                    run += 1;
                    if run == 5 {
                        pen += PENALTY_N1;
                    } else if run > 5 {
                        pen += 1;
                    }
                } else {
                    last = Some(clr);
                    run = 1;
                }
            }
        }
    }
    pen
}

// Rule 2: 2x2 blocks of the same color
fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += PENALTY_N2;
            }
        }
    }
    pen
}

// Rule 3: 1:1:3:1:1 finder-like pattern with four light modules on either side.
// Modules beyond the symbol edge count as light.
fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let get = |j: i16| if is_hor { *qr.get(i, j) } else { *qr.get(j, i) };
        let is_light = |j: i16| j < 0 || j >= w || get(j) == Color::Light;
        for j in 0..w - 6 {
            if (j..j + 7).map(get).ne(FINDER_PATTERN.iter().copied()) {
                continue;
            }
            if (j - 4..j).all(is_light) || (j + 7..j + 11).all(is_light) {
                pen += PENALTY_N3;
            }
        }
    }
    pen
}

// Rule 4: deviation of the dark module ratio from 50%, in 5% steps
fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let tot = w * w;
    let deviation = (dark_cnt * 2).abs_diff(tot) * 10 / tot;
    deviation as u32 * PENALTY_N4
}


// Global constants
//------------------------------------------------------------------------------

const PENALTY_N1: u32 = 3;

const PENALTY_N2: u32 = 3;

const PENALTY_N3: u32 = 40;

const PENALTY_N4: u32 = 10;

static FINDER_PATTERN: [Color; 7] = [
    Color::Dark,
    Color::Light,
    Color::Dark,
    Color::Dark,
    Color::Dark,
    Color::Light,
    Color::Dark,
];
