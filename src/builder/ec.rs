use std::ops::Deref;

use crate::common::{
    ec::ecc_per_block,
    metadata::{ECLevel, Version},
};

// Error correction codewords for every block of the data codewords
pub fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> (Vec<&[u8]>, Vec<Vec<u8>>) {
    let data_blocks = blockify(data, version, ec_level);

    let ecc_size_per_block = version.ecc_per_block(ec_level);
    let ecc_blocks =
        data_blocks.iter().map(|b| ecc_per_block(b, ecc_size_per_block)).collect::<Vec<_>>();

    (data_blocks, ecc_blocks)
}

// Splits data codewords into group 1 blocks followed by the one codeword
// longer group 2 blocks
pub fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
    let (block1_size, block1_count, block2_size, block2_count) =
        version.data_codewords_per_block(ec_level);

    let total_blocks = block1_count + block2_count;
    let total_block1_size = block1_size * block1_count;
    let total_size = total_block1_size + block2_size * block2_count;

    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut data_blocks = Vec::with_capacity(total_blocks);
    data_blocks.extend(data[..total_block1_size].chunks(block1_size));
    if block2_size > 0 {
        data_blocks.extend(data[total_block1_size..].chunks(block2_size));
    }
    data_blocks
}

// Takes the i-th codeword of every block in turn, skipping blocks that are
// already exhausted
pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if let Some(&cw) = b.get(i) {
                res.push(cw);
            }
        }
    }
    res
}
