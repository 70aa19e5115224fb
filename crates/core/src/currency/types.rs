//! Currency configuration types.

use branchbook_shared::types::CurrencyId;
use serde::{Deserialize, Serialize};

use super::error::CurrencyError;

/// A currency configured for the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// The currency ID.
    pub id: CurrencyId,
    /// ISO 4217 currency code (e.g., "USD", "IDR").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Whether this is the ledger-wide base currency.
    pub is_base: bool,
}

/// Resolves the single base currency of the ledger.
///
/// # Errors
///
/// Returns `MissingBaseCurrency` when no currency is flagged base, and
/// `MultipleBaseCurrencies` when more than one is. Both are fatal
/// configuration errors: every report build depends on an unambiguous
/// base currency.
pub fn base_currency(currencies: &[Currency]) -> Result<&Currency, CurrencyError> {
    let mut bases = currencies.iter().filter(|currency| currency.is_base);
    let first = bases.next().ok_or(CurrencyError::MissingBaseCurrency)?;
    let extra = bases.count();
    if extra > 0 {
        return Err(CurrencyError::MultipleBaseCurrencies(extra + 1));
    }
    Ok(first)
}
