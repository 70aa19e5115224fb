//! Currency error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during currency configuration and conversion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// No currency is flagged as the ledger base currency.
    #[error("No base currency is configured for the ledger")]
    MissingBaseCurrency,

    /// More than one currency is flagged as base.
    #[error("{0} currencies are flagged as base, expected exactly one")]
    MultipleBaseCurrencies(usize),

    /// No exchange rate is available for the currency pair.
    ///
    /// Fatal: a report build must abort rather than substitute a
    /// sentinel rate.
    #[error("No exchange rate available for {from} to {to}")]
    UnknownRate {
        /// Source currency code.
        from: String,
        /// Target currency code.
        to: String,
    },

    /// Exchange rate must be positive.
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(Decimal),
}

impl CurrencyError {
    /// Returns the error code for diagnostics and structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingBaseCurrency => "MISSING_BASE_CURRENCY",
            Self::MultipleBaseCurrencies(_) => "MULTIPLE_BASE_CURRENCIES",
            Self::UnknownRate { .. } => "UNKNOWN_EXCHANGE_RATE",
            Self::InvalidRate(_) => "INVALID_EXCHANGE_RATE",
        }
    }
}
