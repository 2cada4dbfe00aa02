//! Ports Layer - Trait definitions
//!
//! - Inbound (driving): what controllers call on a filter
//! - Outbound (driven): where the evaluation harness gets its items

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilter;
pub use outbound::ItemSource;
