//! Inbound Ports (Driving Ports)
//!
//! The narrow interface the interactive controller and the evaluation
//! harness use. Neither holds any filter-internal state.

use crate::domain::BloomFilter;

/// Membership filter API (Driving Port)
pub trait MembershipFilter {
    /// Add an item to the set
    fn insert(&mut self, item: &[u8]);

    /// `false` means definitely absent, `true` means probably present
    fn check(&self, item: &[u8]) -> bool;

    /// Read-only dump of the bit array as a `0`/`1` string
    fn render_bits(&self) -> String;

    /// Size of the bit array
    fn size_bits(&self) -> usize;

    /// Number of bits currently set
    fn bits_set(&self) -> usize;

    /// Switch per-instance verbose tracing on or off
    fn set_trace(&mut self, trace: bool);

    fn is_tracing(&self) -> bool;
}

impl MembershipFilter for BloomFilter {
    fn insert(&mut self, item: &[u8]) {
        BloomFilter::insert(self, item);
    }

    fn check(&self, item: &[u8]) -> bool {
        BloomFilter::check(self, item)
    }

    fn render_bits(&self) -> String {
        self.bits().to_string()
    }

    fn size_bits(&self) -> usize {
        BloomFilter::size_bits(self)
    }

    fn bits_set(&self) -> usize {
        BloomFilter::bits_set(self)
    }

    fn set_trace(&mut self, trace: bool) {
        BloomFilter::set_trace(self, trace);
    }

    fn is_tracing(&self) -> bool {
        BloomFilter::is_tracing(self)
    }
}
