//! Balance computation error types.

use branchbook_shared::types::AccountId;
use thiserror::Error;

use crate::currency::CurrencyError;

/// Errors that can occur while computing balances.
///
/// All of these are fatal to the report build: a partially aggregated
/// report must never be returned.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// Currency configuration or conversion failure.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Account not found in the registry.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),
}

impl BalanceError {
    /// Returns the error code for diagnostics and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Currency(err) => err.error_code(),
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
        }
    }
}
