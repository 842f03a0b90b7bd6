mod galois;

use galois::{gf_exp, gf_mul};

// Reed-Solomon error correction codewords
//------------------------------------------------------------------------------

/// Coefficients of the generator polynomial `(x - a^0)(x - a^1)..(x - a^(degree - 1))`,
/// highest power first, without the leading monic term.
pub fn generator_polynomial(degree: usize) -> Vec<u8> {
    debug_assert!((1..=MAX_EC_SIZE).contains(&degree), "Invalid generator degree: {degree}");

    let mut poly = vec![0u8; degree];
    poly[degree - 1] = 1;
    for i in 0..degree {
        let root = gf_exp(i);
        for j in 0..degree {
            poly[j] = gf_mul(poly[j], root);
            if j + 1 < degree {
                poly[j] ^= poly[j + 1];
            }
        }
    }
    poly
}

// Performs polynomial long division with data polynomial(num)
// and generator polynomial(den) to compute remainder polynomial,
// the coefficients of which are the ecc
pub fn ecc_per_block(block: &[u8], ecc_count: usize) -> Vec<u8> {
    let len = block.len();
    let gen_poly = generator_polynomial(ecc_count);

    let mut res = block.to_vec();
    res.resize(len + ecc_count, 0);

    for i in 0..len {
        let lead_coeff = res[i];
        if lead_coeff == 0 {
            continue;
        }
        for (u, v) in res[i + 1..].iter_mut().zip(gen_poly.iter()) {
            *u ^= gf_mul(*v, lead_coeff);
        }
    }

    res.split_off(len)
}


// Global constants
//------------------------------------------------------------------------------

pub static MAX_EC_SIZE: usize = 30;
