//! Bit array backing a Bloom filter
//!
//! INVARIANTS:
//! - Length is always `m = 2^e`
//! - Every index is reduced modulo `m` before touching storage
//! - Bits only ever go from 0 to 1 (there is no clear operation)

use std::fmt;

use bitvec::prelude::*;

/// Fixed-size, monotonic bit vector of length `2^exponent`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterArray {
    bits: BitVec<u8, Lsb0>,
    /// `m - 1`, used to reduce positions without a division
    mask: usize,
}

impl FilterArray {
    /// Create an all-zero array of `2^exponent` bits
    pub fn new(exponent: u32) -> Self {
        let m = 1usize << exponent;
        Self {
            bits: bitvec![u8, Lsb0; 0; m],
            mask: m - 1,
        }
    }

    /// Set the bit at `position mod m`
    pub fn set(&mut self, position: usize) {
        let index = position & self.mask;
        self.bits.set(index, true);
    }

    /// Read the bit at `position mod m`
    pub fn get(&self, position: usize) -> bool {
        self.bits[position & self.mask]
    }

    /// Size in bits (m)
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false: the smallest supported array has 4 bits
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of bits set to 1
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set to 1
    pub fn fill_ratio(&self) -> f64 {
        self.count_ones() as f64 / self.len() as f64
    }

    /// Iterate over the indices of set bits
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}

/// Renders the array as a string of `0`/`1`, index 0 first
impl fmt::Display for FilterArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter() {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_array_is_all_zero() {
        let array = FilterArray::new(4);

        assert_eq!(array.len(), 16);
        assert_eq!(array.count_ones(), 0);
        assert_eq!(array.to_string(), "0000000000000000");
    }

    #[test]
    fn test_set_and_get() {
        let mut array = FilterArray::new(3);
        array.set(5);

        assert!(array.get(5));
        assert!(!array.get(4));
        assert_eq!(array.to_string(), "00000100");
    }

    #[test]
    fn test_positions_wrap_modulo_size() {
        let mut array = FilterArray::new(2);

        // 4 bits: 13 mod 4 = 1
        array.set(13);

        assert!(array.get(1));
        assert!(array.get(5), "5 mod 4 = 1 reads the same bit");
        assert!(array.get(usize::MAX - 2), "MAX - 2 mod 4 = 1");
        assert_eq!(array.count_ones(), 1);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut array = FilterArray::new(4);
        array.set(7);
        let once = array.clone();
        array.set(7);

        assert_eq!(array, once);
    }

    #[test]
    fn test_fill_ratio_and_iter_ones() {
        let mut array = FilterArray::new(2);
        array.set(0);
        array.set(3);

        assert_eq!(array.fill_ratio(), 0.5);
        assert_eq!(array.iter_ones().collect::<Vec<_>>(), vec![0, 3]);
    }
}
