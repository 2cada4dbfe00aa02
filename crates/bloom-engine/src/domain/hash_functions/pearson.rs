//! Pearson hashing with a multi-byte digest
//!
//! The permutation table is generated once per filter from a fixed seed and
//! the digest length is tied to the filter's size exponent, so the table is
//! scoped to one filter instance and reused for every call.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::HashFunction;

/// Seed for the permutation table; fixed so positions are reproducible
const TABLE_SEED: u64 = 0x5045_4152_534f_4e21;

/// 256-entry permutation table plus the digest length in bytes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PearsonTable {
    table: [u8; 256],
    digest_len: usize,
}

impl PearsonTable {
    /// Build the table for a filter of `2^exponent` bits
    ///
    /// The digest is `exponent` bytes long (at least one).
    pub fn new(exponent: u32) -> Self {
        let mut table = [0u8; 256];
        for (slot, value) in table.iter_mut().zip(0u8..=255) {
            *slot = value;
        }
        let mut rng = StdRng::seed_from_u64(TABLE_SEED);
        table.shuffle(&mut rng);

        Self {
            table,
            digest_len: (exponent as usize).max(1),
        }
    }

    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        self.digest_len
    }

    /// Hash `item` into `digest_len` bytes
    ///
    /// Byte `i` of the digest starts the table walk from `item[0] + i`, so
    /// every output byte is a distinct walk over the same input. An empty
    /// item yields `table[i]` for each byte.
    pub fn hash(&self, item: &[u8]) -> Vec<u8> {
        let (first, rest) = match item.split_first() {
            Some((first, rest)) => (*first, rest),
            None => (0, item),
        };

        (0..self.digest_len)
            .map(|i| {
                let start = first.wrapping_add(i as u8);
                rest.iter()
                    .fold(self.table[start as usize], |h, &byte| {
                        self.table[(h ^ byte) as usize]
                    })
            })
            .collect()
    }
}

/// Pearson hashing backed by a per-filter [`PearsonTable`]
#[derive(Clone, Debug)]
pub struct Pearson {
    table: PearsonTable,
}

impl Pearson {
    pub fn new(exponent: u32) -> Self {
        Self {
            table: PearsonTable::new(exponent),
        }
    }

    pub fn table(&self) -> &PearsonTable {
        &self.table
    }
}

impl HashFunction for Pearson {
    fn name(&self) -> &'static str {
        "pearson"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        self.table.hash(item)
    }
}
