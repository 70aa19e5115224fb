//! Posting balances, hierarchical aggregation, and display visibility.
//!
//! This module is the engine behind every financial report:
//! - Posting balance of a single account (window, status, currency)
//! - The debit/credit presentation split
//! - Recursive subtree roll-up with memoization and cycle protection
//! - Visible-leaf resolution for collapsed display depths

pub mod engine;
pub mod error;
pub mod posting;
pub mod split;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod props;

pub use engine::{AggregationEngine, BuildDiagnostics};
pub use error::BalanceError;
pub use posting::PostingBalanceCalculator;
pub use split::split_by_nature;
pub use types::{AggregatedBalance, BalanceWindow, LineIndex, PostingFilter};
pub use visibility::{DisplayRow, LevelVisibilityResolver};
