use std::ops::{Deref, Not};

use serde::{Deserialize, Serialize};

use super::codec::Mode;
use crate::error::{EncodingError, EncodingResult};

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub fn select<T>(&self, light: T, dark: T) -> T {
        match self {
            Self::Light => light,
            Self::Dark => dark,
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ECLevel {
    /// Recovers ~7% of codewords.
    L = 0,
    /// Recovers ~15% of codewords.
    M = 1,
    /// Recovers ~25% of codewords.
    Q = 2,
    /// Recovers ~30% of codewords.
    H = 3,
}

// Version
//------------------------------------------------------------------------------

/// Symbol size tier, 1 (21x21 modules) through 40 (177x177 modules).
#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    pub fn new(version: u8) -> EncodingResult<Self> {
        if (1..=40).contains(&version) {
            Ok(Self(version))
        } else {
            Err(EncodingError::InvalidVersion(version))
        }
    }

    /// Versions from `self` up to [`Version::MAX`], smallest first.
    pub fn upwards(self) -> impl Iterator<Item = Self> {
        (self.0..=Self::MAX.0).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 as usize - 1]
    }

    // Modules left for codewords once function patterns, format and version
    // info are carved out
    fn raw_data_modules(self) -> usize {
        let v = self.0 as usize;
        let mut modules = (16 * v + 128) * v + 64;
        if v >= 2 {
            let align_cnt = v / 7 + 2;
            modules -= (25 * align_cnt - 10) * align_cnt - 55;
            if v >= 7 {
                modules -= 36;
            }
        }
        modules
    }

    pub fn total_codewords(self) -> usize {
        self.raw_data_modules() >> 3
    }

    pub fn remainder_bits(self) -> usize {
        self.raw_data_modules() & 7
    }

    pub fn ecc_per_block(self, ecl: ECLevel) -> usize {
        ECC_CODEWORDS_PER_BLOCK[ecl as usize][self.0 as usize] as usize
    }

    pub fn block_count(self, ecl: ECLevel) -> usize {
        ERROR_CORRECTION_BLOCKS[ecl as usize][self.0 as usize] as usize
    }

    /// Data codewords per block as `(block1_size, block1_count, block2_size, block2_count)`.
    /// Group 2 blocks are one codeword longer than group 1 blocks.
    pub fn data_codewords_per_block(self, ecl: ECLevel) -> (usize, usize, usize, usize) {
        let total = self.total_codewords();
        let blocks = self.block_count(ecl);
        let ecc = self.ecc_per_block(ecl);

        let block2_count = total % blocks;
        let block1_count = blocks - block2_count;
        let block1_size = total / blocks - ecc;
        let block2_size = if block2_count > 0 { block1_size + 1 } else { 0 };
        (block1_size, block1_count, block2_size, block2_count)
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_per_block(ecl) * self.block_count(ecl)
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub const fn mode_bits(self) -> usize {
        4
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        match (self.0, mode) {
            (1..=9, Mode::Numeric) => 10,
            (1..=9, Mode::Alphanumeric) => 9,
            (1..=9, Mode::Byte) => 8,
            (10..=26, Mode::Numeric) => 12,
            (10..=26, Mode::Alphanumeric) => 11,
            (10..=26, Mode::Byte) => 16,
            (_, Mode::Numeric) => 14,
            (_, Mode::Alphanumeric) => 13,
            (_, Mode::Byte) => 16,
        }
    }

    /// 18-bit version information word: 6 bits of version followed by a
    /// BCH(18, 6) remainder. Only drawn for versions 7 and above.
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only drawn from version 7: {}", self.0);

        let ver = self.0 as u32;
        let mut rem = ver;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_INFO_GENERATOR);
        }
        ver << 12 | rem
    }
}

#[cfg(test)]
mod version_tests {
    use test_case::test_case;

    use super::{ECLevel, Version};
    use crate::common::codec::Mode;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(41).is_err());
        assert_eq!(*Version::new(40).unwrap(), 40);
    }

    #[test]
    fn test_width() {
        assert_eq!(Version::MIN.width(), 21);
        assert_eq!(Version::MAX.width(), 177);
    }

    #[test_case(1, 26, 0)]
    #[test_case(2, 44, 7)]
    #[test_case(7, 196, 0)]
    #[test_case(14, 581, 3)]
    #[test_case(21, 1156, 4)]
    #[test_case(40, 3706, 0)]
    fn test_total_codewords(ver: u8, exp_codewords: usize, exp_remainder: usize) {
        let ver = Version::new(ver).unwrap();
        assert_eq!(ver.total_codewords(), exp_codewords);
        assert_eq!(ver.remainder_bits(), exp_remainder);
    }

    #[test_case(1, ECLevel::L, 19)]
    #[test_case(1, ECLevel::M, 16)]
    #[test_case(1, ECLevel::Q, 13)]
    #[test_case(1, ECLevel::H, 9)]
    #[test_case(5, ECLevel::Q, 62)]
    #[test_case(40, ECLevel::L, 2956)]
    #[test_case(40, ECLevel::M, 2334)]
    #[test_case(40, ECLevel::Q, 1666)]
    #[test_case(40, ECLevel::H, 1276)]
    fn test_data_codewords(ver: u8, ecl: ECLevel, exp: usize) {
        assert_eq!(Version::new(ver).unwrap().data_codewords(ecl), exp);
    }

    #[test]
    fn test_data_codewords_per_block() {
        let ver = Version::new(5).unwrap();
        assert_eq!(ver.data_codewords_per_block(ECLevel::Q), (15, 2, 16, 2));
        let ver = Version::new(1).unwrap();
        assert_eq!(ver.data_codewords_per_block(ECLevel::M), (16, 1, 0, 0));
    }

    #[test]
    fn test_blocks_cover_data_codewords() {
        for ver in Version::MIN.upwards() {
            for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
                let (s1, c1, s2, c2) = ver.data_codewords_per_block(ecl);
                assert_eq!(s1 * c1 + s2 * c2, ver.data_codewords(ecl), "{ver:?} {ecl:?}");
            }
        }
    }

    #[test]
    fn test_char_cnt_bits() {
        let v9 = Version::new(9).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(v9.char_cnt_bits(Mode::Byte), 8);
        assert_eq!(v10.char_cnt_bits(Mode::Byte), 16);
        assert_eq!(v10.char_cnt_bits(Mode::Alphanumeric), 11);
        assert_eq!(v27.char_cnt_bits(Mode::Numeric), 14);
    }

    #[test_case(7, 0x07C94)]
    #[test_case(8, 0x085BC)]
    #[test_case(21, 0x15683)]
    #[test_case(40, 0x28C69)]
    fn test_version_info(ver: u8, exp: u32) {
        assert_eq!(Version::new(ver).unwrap().info(), exp);
    }
}

// Format information
//------------------------------------------------------------------------------

/// 15-bit format information word: 2 bits of error correction level and 3 bits
/// of mask pattern, followed by a BCH(15, 5) remainder, XORed with the fixed
/// format mask.
pub fn format_info_qr(ecl: ECLevel, mask_pattern: u8) -> u32 {
    debug_assert!(mask_pattern < 8, "Invalid mask pattern: {mask_pattern}");

    // Level indicators are L = 01, M = 00, Q = 11, H = 10
    let data = ((ecl as u32) ^ 1) << 3 | mask_pattern as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_INFO_GENERATOR);
    }
    (data << 10 | rem) ^ FORMAT_MASK
}


// Global constants
//------------------------------------------------------------------------------

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_INFO_GENERATOR: u32 = 0x537;

const FORMAT_MASK: u32 = 0x5412;

const VERSION_INFO_GENERATOR: u32 = 0x1F25;

// Most significant bit first. Negative coordinates wrap from the far edge.
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (8, -8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];

pub static VERSION_INFO_COORDS_TR: [(i16, i16); 18] = [
    (5, -9),
    (5, -10),
    (5, -11),
    (4, -9),
    (4, -10),
    (4, -11),
    (3, -9),
    (3, -10),
    (3, -11),
    (2, -9),
    (2, -10),
    (2, -11),
    (1, -9),
    (1, -10),
    (1, -11),
    (0, -9),
    (0, -10),
    (0, -11),
];

pub static VERSION_INFO_COORDS_BL: [(i16, i16); 18] = [
    (-9, 5),
    (-10, 5),
    (-11, 5),
    (-9, 4),
    (-10, 4),
    (-11, 4),
    (-9, 3),
    (-10, 3),
    (-11, 3),
    (-9, 2),
    (-10, 2),
    (-11, 2),
    (-9, 1),
    (-10, 1),
    (-11, 1),
    (-9, 0),
    (-10, 0),
    (-11, 0),
];

static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

// Indexed by [ec level][version], version 0 unused
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
