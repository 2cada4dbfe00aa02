//! Cryptographic hash functions
//!
//! Slower than the non-cryptographic family, but with well-distributed
//! output bits: the low bits of each digest are as good as any other bits.

use blake2::Blake2s256;
use sha2::Digest;
use sha3::Sha3_256 as Sha3_256Hasher;

use super::HashFunction;

/// MD5 (128-bit digest)
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5;

impl HashFunction for Md5 {
    fn name(&self) -> &'static str {
        "md5"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        md5::compute(item).0.to_vec()
    }
}

/// BLAKE2s (256-bit digest)
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake2s;

impl HashFunction for Blake2s {
    fn name(&self) -> &'static str {
        "blake2s"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        Blake2s256::digest(item).to_vec()
    }
}

/// SHA-256
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl HashFunction for Sha256 {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        sha2::Sha256::digest(item).to_vec()
    }
}

/// SHA-512
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha512;

impl HashFunction for Sha512 {
    fn name(&self) -> &'static str {
        "sha512"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        sha2::Sha512::digest(item).to_vec()
    }
}

/// SHA3-256
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha3_256;

impl HashFunction for Sha3_256 {
    fn name(&self) -> &'static str {
        "sha3-256"
    }

    fn digest(&self, item: &[u8]) -> Vec<u8> {
        Sha3_256Hasher::digest(item).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_md5_empty_digest() {
        assert_eq!(Md5.digest_hex(b""), "d41d8cd98f00b204e9800998ecf8427e");
        // 0x7e = 126
        assert_eq!(Md5.position(b"", 8), 126);
        assert_eq!(Md5.position(b"", 4), 14);
    }

    #[test]
    fn test_sha256_empty_digest() {
        assert_eq!(
            Sha256.digest_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(Sha256.position(b"", 8), 0x55);
        assert_eq!(Sha256.position(b"", 16), 0xb855);
    }

    #[test]
    fn test_digest_lengths() {
        assert_eq!(Md5.digest(b"x").len(), 16);
        assert_eq!(Blake2s.digest(b"x").len(), 32);
        assert_eq!(Sha256.digest(b"x").len(), 32);
        assert_eq!(Sha512.digest(b"x").len(), 64);
        assert_eq!(Sha3_256.digest(b"x").len(), 32);
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(Sha256.digest(b"apple"), Sha256.digest(b"Apple"));
        assert_ne!(Blake2s.digest(b"apple"), Blake2s.digest(b"Apple"));
    }
}
