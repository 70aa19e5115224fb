//! External data source interfaces.
//!
//! A report build fetches one read-only snapshot (accounts, ledger
//! lines, currencies) at the start and never touches shared state again.
//! The sources are traits so the engine stays free of persistence
//! concerns; callers may cancel a long fetch, in which case the whole
//! build fails atomically.

pub mod memory;

use branchbook_shared::types::AccountId;
use thiserror::Error;

use crate::balance::BalanceWindow;
use crate::chart::{Account, EntryStatus, LedgerLine};
use crate::currency::Currency;

pub use memory::InMemoryBooks;

/// Errors surfaced by a data source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The caller cancelled or timed out the fetch.
    #[error("Data fetch was cancelled")]
    Cancelled,

    /// The source is unavailable.
    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Status selection for a ledger fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Posted lines only.
    PostedOnly,
    /// Everything except cancelled lines.
    NotCancelled,
    /// All lines regardless of status.
    All,
}

impl StatusFilter {
    /// Returns true if a line with this status passes the filter.
    #[must_use]
    pub fn admits(self, status: EntryStatus) -> bool {
        match self {
            Self::PostedOnly => status.is_posted(),
            Self::NotCancelled => !matches!(status, EntryStatus::Cancelled),
            Self::All => true,
        }
    }
}

/// Source of chart of accounts data.
pub trait AccountSource {
    /// Lists all active accounts.
    fn list_active(&self) -> Result<Vec<Account>, SourceError>;
}

/// Source of ledger movement.
pub trait LedgerSource {
    /// Lines for the given accounts whose entry date falls inside the
    /// window and whose status passes the filter.
    fn lines_for(
        &self,
        accounts: &[AccountId],
        window: &BalanceWindow,
        filter: StatusFilter,
    ) -> Result<Vec<LedgerLine>, SourceError>;
}

/// Source of currency configuration.
pub trait CurrencySource {
    /// All currencies configured for the ledger.
    fn currencies(&self) -> Result<Vec<Currency>, SourceError>;
}
