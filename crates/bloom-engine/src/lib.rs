//! # Bloom Engine
//!
//! A probabilistic set-membership filter: a bit array of `m = 2^e` bits
//! queried and mutated through `k` independent hash functions drawn from a
//! non-cryptographic or a cryptographic family.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `BloomFilter`: the engine (`insert`, `check`)
//!   - `FilterArray`: monotonic bit array, indices reduced modulo `m`
//!   - `HashFamily` / `HashStrategies`: the two hash families
//!   - `FilterConfig`: configuration with validation and clamping
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: driving port used by controllers
//!   - `ItemSource`: driven port supplying evaluation items
//!
//! - **Adapters Layer** (`adapters/`): `WordListSource`, `SequentialSource`
//!
//! - **Service Layer** (`service/`): `EvaluationService`, the batch
//!   false-positive harness
//!
//! ## Invariants
//!
//! - No false negatives: if inserted, `check()` MUST return true
//! - `check()` returning false is certain; true is probabilistic with
//!   FPR ≈ (1 - e^(-kn/m))^k
//! - Any size-dependent hash state (the Pearson table) is built once per
//!   filter
//!
//! ## Usage Example
//!
//! ```
//! use bloom_engine::{BloomFilter, FilterConfigBuilder, HashFamily};
//!
//! let config = FilterConfigBuilder::new()
//!     .exponent(4)
//!     .hash_count(3)
//!     .family(HashFamily::NonCryptographic)
//!     .build()
//!     .unwrap();
//!
//! let mut filter = BloomFilter::new(&config);
//! filter.insert(b"apple");
//!
//! assert!(filter.check(b"apple"));
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{SequentialSource, WordListSource};
pub use domain::{
    BloomFilter, EvaluationConfig, FilterArray, FilterConfig, FilterConfigBuilder, HashFamily,
    HashFunction, MembershipProbe,
};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::{ItemSource, MembershipFilter};
pub use service::{EvaluationReport, EvaluationService, SweepPoint};
