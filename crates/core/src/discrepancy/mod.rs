//! Stored-vs-ledger balance audit.

pub mod detector;
pub mod types;

pub use detector::{DEFAULT_TOLERANCE, DiscrepancyDetector};
pub use types::{ContributingEntry, DiscrepancyRecord};
