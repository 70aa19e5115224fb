//! Posting balance computation for a single account.
//!
//! A posting balance is an account's own direct balance: opening balance
//! plus the signed ledger movement admitted by the filter, converted to
//! the selected and base currencies and split into a debit/credit pair.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::chart::{Account, LedgerLine};
use crate::currency::CurrencyConverter;

use super::error::BalanceError;
use super::split::split_by_nature;
use super::types::{AggregatedBalance, PostingFilter};

/// Computes per-account posting balances for one report build.
pub struct PostingBalanceCalculator<'a> {
    converter: &'a CurrencyConverter<'a>,
    selected_currency: &'a str,
    base_currency: &'a str,
    rate_date: NaiveDate,
}

impl<'a> PostingBalanceCalculator<'a> {
    /// Creates a calculator converting into `selected_currency` and
    /// `base_currency` at the rates effective on `rate_date`.
    #[must_use]
    pub fn new(
        converter: &'a CurrencyConverter<'a>,
        selected_currency: &'a str,
        base_currency: &'a str,
        rate_date: NaiveDate,
    ) -> Self {
        Self {
            converter,
            selected_currency,
            base_currency,
            rate_date,
        }
    }

    /// Computes the account's own balance under the filter.
    ///
    /// Non-postable accounts always yield the zero balance; they exist
    /// purely to aggregate children.
    ///
    /// For a bounded window the balance decomposes as
    /// `prior_balance + window_movement`, where the prior balance covers
    /// start-of-history up to the window start (exclusive) under the
    /// same status rule.
    ///
    /// The native balance is converted to the selected and base
    /// currencies independently (not chained through one another) to
    /// preserve rounding fidelity, then each converted balance is split
    /// by sign relative to the account's nature.
    ///
    /// # Errors
    ///
    /// Returns a fatal error when either conversion has no rate.
    pub fn posting_balance(
        &self,
        account: &Account,
        lines: &[LedgerLine],
        filter: &PostingFilter,
    ) -> Result<AggregatedBalance, BalanceError> {
        if !account.allow_posting {
            return Ok(AggregatedBalance::zero(account.id));
        }

        let window_movement = Self::movement(account, lines, filter);
        let prior_movement = filter
            .prior()
            .map(|prior| Self::movement(account, lines, &prior))
            .unwrap_or_default();
        let native = account.opening_balance + prior_movement + window_movement;

        let selected = self.converter.convert(
            native,
            &account.currency,
            self.selected_currency,
            self.rate_date,
        )?;
        let base = self.converter.convert(
            native,
            &account.currency,
            self.base_currency,
            self.rate_date,
        )?;

        let (debit_selected, credit_selected) = split_by_nature(selected, account.nature);
        let (debit_base, credit_base) = split_by_nature(base, account.nature);

        Ok(AggregatedBalance {
            account_id: account.id,
            debit_selected,
            credit_selected,
            debit_base,
            credit_base,
        })
    }

    /// Signed net movement of the admitted lines under the account's
    /// nature. Debits and credits are summed separately first.
    fn movement(account: &Account, lines: &[LedgerLine], filter: &PostingFilter) -> Decimal {
        let (debit, credit) = lines
            .iter()
            .filter(|line| filter.admits(line))
            .fold((Decimal::ZERO, Decimal::ZERO), |(d, c), line| {
                (d + line.debit, c + line.credit)
            });
        account.nature.signed_movement(debit, credit)
    }
}
