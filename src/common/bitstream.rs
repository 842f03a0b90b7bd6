use std::{fmt::Display, mem};

use num_traits::PrimInt;

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        for i in (0..size).rev() {
            let bit = (bits >> i) & T::one() == T::one();
            self.push(bit);
        }
    }

    pub fn push(&mut self, bit: bool) {
        debug_assert!(
            self.len < self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + 1
        );

        if bit {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            self.data[pos] |= 0b1000_0000 >> offset;
        }

        self.len += 1;
    }

    /// Appends whole bytes. The stream must be byte aligned.
    pub fn extend(&mut self, bytes: &[u8]) {
        debug_assert!(self.len & 7 == 0, "Bit stream is not byte aligned: {}", self.len);
        debug_assert!(
            self.len + (bytes.len() << 3) <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + (bytes.len() << 3)
        );

        let pos = self.len >> 3;
        self.data[pos..pos + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len() << 3;
    }
}


// Take bits from bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take(&mut self) -> Option<bool> {
        if self.cursor >= self.len {
            return None;
        }
        let bit = self.data[self.cursor >> 3] & (0b1000_0000 >> (self.cursor & 7)) != 0;
        self.cursor += 1;
        Some(bit)
    }
}

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take()
    }
}
