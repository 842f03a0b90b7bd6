use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    /// Most compact mode able to hold every byte of `data`.
    pub fn select(data: &[u8]) -> Self {
        MODES.iter().copied().find(|m| data.iter().all(|b| m.contains(*b))).unwrap_or(Self::Byte)
    }

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            _ => 44,
        }
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data.first().copied().unwrap_or_default() as u16
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    /// Chars packed per chunk and the bit width of a full chunk.
    pub const fn chunk_shape(&self) -> (usize, usize) {
        match self {
            Self::Numeric => (3, 10),
            Self::Alphanumeric => (2, 11),
            Self::Byte => (1, 8),
        }
    }

    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10 + 2) / 3,
            Self::Alphanumeric => (len * 11 + 1) / 2,
            Self::Byte => len * 8,
        }
    }

    /// Largest char count whose segment fits in `bit_capacity` bits.
    pub fn max_chars(&self, ver: Version, bit_capacity: usize) -> usize {
        let header = ver.mode_bits() + ver.char_cnt_bits(*self);
        let Some(avail) = bit_capacity.checked_sub(header) else {
            return 0;
        };
        let (chunk_chars, chunk_bits) = self.chunk_shape();
        let mut chars = avail / chunk_bits * chunk_chars;
        while self.encoded_len(chars + 1) <= avail {
            chars += 1;
        }
        chars
    }
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Segment<'a> {
    pub mode: Mode,
    pub mode_bits: usize,
    pub len_bits: usize,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(mode: Mode, ver: Version, data: &'a [u8]) -> Self {
        Self { mode, mode_bits: ver.mode_bits(), len_bits: ver.char_cnt_bits(mode), data }
    }

    pub fn bit_len(&self) -> usize {
        let encoded_bits = self.mode.encoded_len(self.data.len());
        self.mode_bits + self.len_bits + encoded_bits
    }
}

#[cfg(test)]
mod segment_tests {
    use super::{Mode, Segment};
    use crate::common::metadata::Version;

    #[test]
    fn test_bit_len_numeric_mode() {
        let v1 = Version::new(1).unwrap();
        let v10 = Version::new(10).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(Segment::new(Mode::Numeric, v1, b"123").bit_len(), 24);
        assert_eq!(Segment::new(Mode::Numeric, v1, b"45").bit_len(), 21);
        assert_eq!(Segment::new(Mode::Numeric, v10, b"6").bit_len(), 20);
        assert_eq!(Segment::new(Mode::Numeric, v27, b"123").bit_len(), 28);
    }

    #[test]
    fn test_bit_len_alphanumeric_mode() {
        let v1 = Version::new(1).unwrap();
        let v27 = Version::new(27).unwrap();
        assert_eq!(Segment::new(Mode::Alphanumeric, v1, b"AZ").bit_len(), 24);
        assert_eq!(Segment::new(Mode::Alphanumeric, v1, b"-").bit_len(), 19);
        assert_eq!(Segment::new(Mode::Alphanumeric, v27, b"-").bit_len(), 23);
    }

    #[test]
    fn test_bit_len_byte_mode() {
        let v1 = Version::new(1).unwrap();
        let v10 = Version::new(10).unwrap();
        assert_eq!(Segment::new(Mode::Byte, v1, b"a").bit_len(), 20);
        assert_eq!(Segment::new(Mode::Byte, v10, b"ab").bit_len(), 36);
    }
}

// Global constants
//------------------------------------------------------------------------------

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

pub static MODES: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];
