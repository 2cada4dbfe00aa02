//! Service Layer - Orchestration
//!
//! - `EvaluationService`: batch false-positive measurement over many filters

pub mod evaluation;

pub use evaluation::{EvaluationReport, EvaluationService, SweepPoint, UNSEEN_POOL_FACTOR};
