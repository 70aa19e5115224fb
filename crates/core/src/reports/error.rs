//! Report error types.
//!
//! Every variant here is fatal to the specific report: the caller gets
//! "unable to generate report" with the cause, never partial rows.

use chrono::NaiveDate;
use thiserror::Error;

use crate::balance::BalanceError;
use crate::currency::CurrencyError;
use crate::source::SourceError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Balance computation failed (conversion, unknown account).
    #[error(transparent)]
    Balance(#[from] BalanceError),

    /// Currency configuration failure (base currency).
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Snapshot fetch failed or was cancelled.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

impl ReportError {
    /// Returns the error code for diagnostics and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Balance(err) => err.error_code(),
            Self::Currency(err) => err.error_code(),
            Self::Source(SourceError::Cancelled) => "FETCH_CANCELLED",
            Self::Source(SourceError::Unavailable(_)) => "SOURCE_UNAVAILABLE",
            Self::InvalidDateRange { .. } => "INVALID_DATE_RANGE",
        }
    }
}
