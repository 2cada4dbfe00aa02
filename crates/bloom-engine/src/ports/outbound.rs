//! Outbound Ports (Driven Ports)
//!
//! Dependencies the evaluation harness needs from the outside world.

use crate::error::FilterError;

/// Supplier of test items (Driven Port)
pub trait ItemSource: Send + Sync {
    /// Return exactly `count` distinct, non-empty items
    ///
    /// Returns [`FilterError::InsufficientItems`] if the source cannot
    /// produce that many.
    fn items(&self, count: usize) -> Result<Vec<String>, FilterError>;
}
