// GF(256) arithmetic over the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

const PRIMITIVE_POLYNOMIAL: u16 = 0x11D;

const fn build_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        log[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLYNOMIAL;
        }
        i += 1;
    }
    exp[255] = exp[0];
    (exp, log)
}

const TABLES: ([u8; 256], [u8; 256]) = build_tables();

pub(crate) static EXP_TABLE: [u8; 256] = TABLES.0;

pub(crate) static LOG_TABLE: [u8; 256] = TABLES.1;

pub(crate) fn gf_mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}

/// Alpha raised to `power`.
pub(crate) fn gf_exp(power: usize) -> u8 {
    EXP_TABLE[power % 255]
}

#[cfg(test)]
mod galois_tests {
    use super::{gf_exp, gf_mul, EXP_TABLE, LOG_TABLE};

    #[test]
    fn test_tables() {
        assert_eq!(&EXP_TABLE[..12], [1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232]);
        assert_eq!(EXP_TABLE[254], 142);
        assert_eq!(EXP_TABLE[255], 1);
        assert_eq!(&LOG_TABLE[1..8], [0, 1, 25, 2, 50, 26, 198]);
        assert_eq!(LOG_TABLE[255], 175);
    }

    #[test]
    fn test_log_exp_inverse() {
        for x in 1..=255u8 {
            assert_eq!(EXP_TABLE[LOG_TABLE[x as usize] as usize], x);
        }
    }

    #[test]
    fn test_mul() {
        assert_eq!(gf_mul(0, 7), 0);
        assert_eq!(gf_mul(1, 7), 7);
        assert_eq!(gf_mul(2, 128), 29);
        assert_eq!(gf_mul(3, 7), 9);
        for x in 1..=255u8 {
            assert_eq!(gf_mul(x, gf_exp(255 - LOG_TABLE[x as usize] as usize)), 1);
        }
    }
}
