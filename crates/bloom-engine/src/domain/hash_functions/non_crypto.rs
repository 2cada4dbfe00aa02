//! Non-cryptographic hash functions

use std::io::Cursor;

use super::{position_from_digest, position_from_int, HashFunction};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// MurmurHash3 x86 32-bit, seed 0
#[derive(Clone, Copy, Debug, Default)]
pub struct Murmur;

impl Murmur {
    fn hash(item: &[u8]) -> u32 {
        // Reading from an in-memory cursor cannot fail
        murmur3::murmur3_32(&mut Cursor::new(item), 0).unwrap_or(0)
    }
}

impl HashFunction for Murmur {
    fn name(&self) -> &'static str {
        "murmur"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        Self::hash(item).to_be_bytes().to_vec()
    }

    fn position(&self, item: &[u8], exponent: u32) -> usize {
        position_from_int(u64::from(Self::hash(item)), exponent)
    }
}

/// FNV-1a, 32-bit
pub fn fnv1a_32(item: &[u8]) -> u32 {
    item.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Fowler-Noll-Vo 1a, 32-bit
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1a;

impl HashFunction for Fnv1a {
    fn name(&self) -> &'static str {
        "fnv1a"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        fnv1a_32(item).to_be_bytes().to_vec()
    }

    fn position(&self, item: &[u8], exponent: u32) -> usize {
        position_from_int(u64::from(fnv1a_32(item)), exponent)
    }
}

#[inline]
#[rustfmt::skip]
fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c); *a ^= c.rotate_left(4);  *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a); *b ^= a.rotate_left(6);  *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b); *c ^= b.rotate_left(8);  *b = b.wrapping_add(*a);
    *a = a.wrapping_sub(*c); *a ^= c.rotate_left(16); *c = c.wrapping_add(*b);
    *b = b.wrapping_sub(*a); *b ^= a.rotate_left(19); *a = a.wrapping_add(*c);
    *c = c.wrapping_sub(*b); *c ^= b.rotate_left(4);  *b = b.wrapping_add(*a);
}

#[inline]
#[rustfmt::skip]
fn finalize(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b; *c = c.wrapping_sub(b.rotate_left(14));
    *a ^= *c; *a = a.wrapping_sub(c.rotate_left(11));
    *b ^= *a; *b = b.wrapping_sub(a.rotate_left(25));
    *c ^= *b; *c = c.wrapping_sub(b.rotate_left(16));
    *a ^= *c; *a = a.wrapping_sub(c.rotate_left(4));
    *b ^= *a; *b = b.wrapping_sub(a.rotate_left(14));
    *c ^= *b; *c = c.wrapping_sub(b.rotate_left(24));
}

#[inline]
fn le_word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Bob Jenkins' lookup3 `hashlittle`
pub fn jenkins_hashlittle(item: &[u8], initval: u32) -> u32 {
    // Lengths beyond u32 wrap, as in the reference implementation
    let seed = 0xdead_beef_u32
        .wrapping_add(item.len() as u32)
        .wrapping_add(initval);
    let (mut a, mut b, mut c) = (seed, seed, seed);

    let mut rest = item;
    while rest.len() > 12 {
        a = a.wrapping_add(le_word(&rest[0..4]));
        b = b.wrapping_add(le_word(&rest[4..8]));
        c = c.wrapping_add(le_word(&rest[8..12]));
        mix(&mut a, &mut b, &mut c);
        rest = &rest[12..];
    }

    // Zero-length tails need no final mixing
    if rest.is_empty() {
        return c;
    }

    let mut tail = [0u8; 12];
    tail[..rest.len()].copy_from_slice(rest);
    a = a.wrapping_add(le_word(&tail[0..4]));
    b = b.wrapping_add(le_word(&tail[4..8]));
    c = c.wrapping_add(le_word(&tail[8..12]));
    finalize(&mut a, &mut b, &mut c);
    c
}

/// Jenkins lookup3 (`hashlittle`, initval 0)
#[derive(Clone, Copy, Debug, Default)]
pub struct Jenkins;

impl HashFunction for Jenkins {
    fn name(&self) -> &'static str {
        "jenkins"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        jenkins_hashlittle(item, 0).to_be_bytes().to_vec()
    }

    fn position(&self, item: &[u8], exponent: u32) -> usize {
        position_from_int(u64::from(jenkins_hashlittle(item, 0)), exponent)
    }
}

/// The item's own bytes, read as a big-endian integer
///
/// Not a hash: the position is the low bits of the item's hex encoding
/// parsed as a number, so it is fully determined by the item's trailing
/// bytes. Kept to show that the filter does not care how positions are
/// derived; it does not give independence from the input's structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawHex;

impl HashFunction for RawHex {
    fn name(&self) -> &'static str {
        "raw-hex"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        item.to_vec()
    }

    fn position(&self, item: &[u8], exponent: u32) -> usize {
        position_from_digest(item, exponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_vectors() {
        assert_eq!(fnv1a_32(b""), 0x811c9dc5);
        assert_eq!(fnv1a_32(b"a"), 0xe40c292c);
        assert_eq!(fnv1a_32(b"foobar"), 0xbf9cf968);
    }

    #[test]
    fn test_jenkins_known_vectors() {
        assert_eq!(jenkins_hashlittle(b"", 0), 0xdeadbeef);
        assert_eq!(
            jenkins_hashlittle(b"Four score and seven years ago", 0),
            0x17770551
        );
        assert_eq!(
            jenkins_hashlittle(b"Four score and seven years ago", 1),
            0xcd628161
        );
    }

    #[test]
    fn test_murmur_empty_input() {
        assert_eq!(Murmur.digest(b""), vec![0, 0, 0, 0]);
        assert_eq!(Murmur.position(b"", 10), 0);
    }

    #[test]
    fn test_integer_hash_digest_matches_position() {
        let item = b"bloom";
        let hashes: [&dyn HashFunction; 3] = [&Murmur, &Fnv1a, &Jenkins];
        for hash in hashes {
            assert_eq!(
                hash.position(item, 12),
                position_from_digest(&hash.digest(item), 12),
                "{} digest and position disagree",
                hash.name()
            );
        }
    }

    #[test]
    fn test_raw_hex_uses_item_bytes() {
        // "apple" = 61 70 70 6c 65
        assert_eq!(RawHex.digest_hex(b"apple"), "6170706c65");
        assert_eq!(RawHex.position(b"apple", 4), 0x5);
        assert_eq!(RawHex.position(b"apple", 8), 0x65);
        assert_eq!(RawHex.position(b"apple", 16), 0x6c65);
        assert_eq!(RawHex.position(b"", 16), 0);
    }

    #[test]
    fn test_raw_hex_correlates_with_trailing_bytes() {
        // Items sharing a last byte collide for every e <= 8
        assert_eq!(RawHex.position(b"cat", 8), RawHex.position(b"hat", 8));
    }
}
