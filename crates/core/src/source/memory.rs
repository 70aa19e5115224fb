//! In-memory data sources for tests and fixtures.

use branchbook_shared::types::AccountId;

use crate::balance::BalanceWindow;
use crate::chart::{Account, LedgerLine};
use crate::currency::Currency;

use super::{AccountSource, CurrencySource, LedgerSource, SourceError, StatusFilter};

/// A complete in-memory ledger: accounts, lines, and currencies.
///
/// Implements every source trait; used by unit tests and the fixture
/// loader.
#[derive(Debug, Default)]
pub struct InMemoryBooks {
    accounts: Vec<Account>,
    lines: Vec<LedgerLine>,
    currencies: Vec<Currency>,
}

impl InMemoryBooks {
    /// Creates empty books.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates books from complete parts.
    #[must_use]
    pub fn from_parts(
        accounts: Vec<Account>,
        lines: Vec<LedgerLine>,
        currencies: Vec<Currency>,
    ) -> Self {
        Self {
            accounts,
            lines,
            currencies,
        }
    }

    /// Adds an account.
    pub fn push_account(&mut self, account: Account) {
        self.accounts.push(account);
    }

    /// Adds a ledger line.
    pub fn push_line(&mut self, line: LedgerLine) {
        self.lines.push(line);
    }

    /// Adds a currency.
    pub fn push_currency(&mut self, currency: Currency) {
        self.currencies.push(currency);
    }

    /// All accounts, active or not.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All ledger lines.
    #[must_use]
    pub fn lines(&self) -> &[LedgerLine] {
        &self.lines
    }
}

impl AccountSource for InMemoryBooks {
    fn list_active(&self) -> Result<Vec<Account>, SourceError> {
        Ok(self
            .accounts
            .iter()
            .filter(|account| account.is_active)
            .cloned()
            .collect())
    }
}

impl LedgerSource for InMemoryBooks {
    fn lines_for(
        &self,
        accounts: &[AccountId],
        window: &BalanceWindow,
        filter: StatusFilter,
    ) -> Result<Vec<LedgerLine>, SourceError> {
        Ok(self
            .lines
            .iter()
            .filter(|line| {
                accounts.contains(&line.account_id)
                    && window.contains(line.entry_date)
                    && filter.admits(line.status)
            })
            .cloned()
            .collect())
    }
}

impl CurrencySource for InMemoryBooks {
    fn currencies(&self) -> Result<Vec<Currency>, SourceError> {
        Ok(self.currencies.clone())
    }
}
