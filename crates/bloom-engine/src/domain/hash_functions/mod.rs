//! Hash functions for the Bloom filter
//!
//! Every function maps an arbitrary byte string to a bit position in
//! `[0, 2^e)`. The native output of a function (a 32-bit integer or a
//! digest) is read as a big-endian unsigned integer and reduced modulo
//! `2^e`. Because `2^e` divides `2^64`, only the trailing 8 bytes of a
//! digest influence the position.
//!
//! Two families exist and are selected as a whole:
//!
//! | index | non-cryptographic | cryptographic |
//! |-------|-------------------|---------------|
//! | 0     | murmur            | md5           |
//! | 1     | fnv1a             | blake2s       |
//! | 2     | jenkins           | sha256        |
//! | 3     | pearson           | sha512        |
//! | 4     | raw-hex           | sha3-256      |

mod crypto;
mod non_crypto;
mod pearson;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use crypto::{Blake2s, Md5, Sha256, Sha3_256, Sha512};
pub use non_crypto::{fnv1a_32, jenkins_hashlittle, Fnv1a, Jenkins, Murmur, RawHex};
pub use pearson::{Pearson, PearsonTable};

/// Number of functions in each family
pub const FAMILY_SIZE: usize = 5;

/// A position-deriving hash function
///
/// Implementations are pure: the same item always yields the same digest.
/// Any size-dependent state is built once in the constructor.
pub trait HashFunction: Send + Sync {
    /// Short stable name, e.g. `"murmur"`
    fn name(&self) -> &'static str;

    /// Native output as big-endian bytes
    fn digest(&self, item: &[u8]) -> Vec<u8>;

    /// Bit position in `[0, 2^exponent)`
    fn position(&self, item: &[u8], exponent: u32) -> usize {
        position_from_digest(&self.digest(item), exponent)
    }

    /// Native output as lowercase hex (for tracing)
    fn digest_hex(&self, item: &[u8]) -> String {
        hex::encode(self.digest(item))
    }
}

/// Reduce an integer hash to a position in `[0, 2^exponent)`
pub fn position_from_int(value: u64, exponent: u32) -> usize {
    let mask = (1u64 << exponent) - 1;
    (value & mask) as usize
}

/// Reduce a big-endian digest to a position in `[0, 2^exponent)`
///
/// Equivalent to parsing the digest's hex encoding as an integer and taking
/// it modulo `2^exponent`. An empty digest reduces to 0.
pub fn position_from_digest(digest: &[u8], exponent: u32) -> usize {
    let tail = &digest[digest.len().saturating_sub(8)..];
    let value = tail.iter().fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));
    position_from_int(value, exponent)
}

/// The two interchangeable hash families
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashFamily {
    /// murmur, fnv1a, jenkins, pearson, raw-hex
    #[default]
    NonCryptographic,
    /// md5, blake2s, sha256, sha512, sha3-256
    Cryptographic,
}

impl HashFamily {
    /// Number of functions available in this family
    pub fn size(self) -> usize {
        FAMILY_SIZE
    }

    /// Function names in index order
    pub fn names(self) -> [&'static str; FAMILY_SIZE] {
        match self {
            HashFamily::NonCryptographic => ["murmur", "fnv1a", "jenkins", "pearson", "raw-hex"],
            HashFamily::Cryptographic => ["md5", "blake2s", "sha256", "sha512", "sha3-256"],
        }
    }

    /// Instantiate every function of the family for a filter of `2^exponent` bits
    pub fn build(self, exponent: u32) -> HashStrategies {
        let functions: Vec<Box<dyn HashFunction>> = match self {
            HashFamily::NonCryptographic => vec![
                Box::new(Murmur),
                Box::new(Fnv1a),
                Box::new(Jenkins),
                Box::new(Pearson::new(exponent)),
                Box::new(RawHex),
            ],
            HashFamily::Cryptographic => vec![
                Box::new(Md5),
                Box::new(Blake2s),
                Box::new(Sha256),
                Box::new(Sha512),
                Box::new(Sha3_256),
            ],
        };
        HashStrategies {
            family: self,
            functions,
        }
    }
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFamily::NonCryptographic => f.write_str("non-cryptographic"),
            HashFamily::Cryptographic => f.write_str("cryptographic"),
        }
    }
}

impl FromStr for HashFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "non-crypto" | "non-cryptographic" => Ok(HashFamily::NonCryptographic),
            "crypto" | "cryptographic" => Ok(HashFamily::Cryptographic),
            other => Err(format!("unknown hash family: {other}")),
        }
    }
}

/// Ordered, indexable set of hash functions of one family
pub struct HashStrategies {
    family: HashFamily,
    functions: Vec<Box<dyn HashFunction>>,
}

impl HashStrategies {
    /// Family these functions were drawn from
    pub fn family(&self) -> HashFamily {
        self.family
    }

    /// Number of functions in the set
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// True if the set holds no functions
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Function at `index`
    ///
    /// # Panics
    /// Panics if `index >= len()`. Hash counts are validated when a filter
    /// is configured, so this is unreachable from the filter.
    pub fn get(&self, index: usize) -> &dyn HashFunction {
        self.functions[index].as_ref()
    }

    /// The first `k` functions in index order
    pub fn take(&self, k: usize) -> impl Iterator<Item = &dyn HashFunction> + '_ {
        self.functions.iter().take(k).map(|f| f.as_ref())
    }

    /// `position(family, index, exponent, item)`
    pub fn position(&self, index: usize, exponent: u32, item: &[u8]) -> usize {
        self.get(index).position(item, exponent)
    }
}

impl fmt::Debug for HashStrategies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashStrategies")
            .field("family", &self.family)
            .field(
                "functions",
                &self.functions.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
