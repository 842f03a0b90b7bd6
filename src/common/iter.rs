use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

/// Walks every module outside the vertical timing column in data placement
/// order: two-column strips from the right edge, alternating upwards and
/// downwards, right module before left. Callers skip function modules.
pub struct EncRegionIter {
    // Right column of the current strip
    right: i16,
    // Steps taken along the current strip
    vert: i16,
    // 0 for the right module of the pair, 1 for the left
    side: i16,
    width: i16,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { right: w - 1, vert: 0, side: 0, width: w }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.right < 1 {
            return None;
        }

        let upward = (self.right + 1) & 2 == 0;
        let r = if upward { self.width - 1 - self.vert } else { self.vert };
        let c = self.right - self.side;

        self.side += 1;
        if self.side == 2 {
            self.side = 0;
            self.vert += 1;
            if self.vert == self.width {
                self.vert = 0;
                self.right -= 2;
                if self.right == VERT_TIMING_COL {
                    self.right -= 1;
                }
            }
        }

        Some((r, c))
    }
}


// Global constants
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;
