//! Chart of accounts tree and registry.
//!
//! This module defines the account hierarchy:
//! - Account classification (type, nature) and status rules
//! - Ledger line model
//! - The per-build registry index (by-id and parent->children lookup)

pub mod registry;
pub mod types;

pub use registry::AccountRegistry;
pub use types::{Account, AccountNature, AccountType, EntryStatus, LedgerLine};
