//! The debit/credit presentation split.
//!
//! One pure function, because the "split by sign, relative to nature"
//! rule is easy to get backwards when inlined per report.

use rust_decimal::Decimal;

use crate::chart::AccountNature;

/// Splits a signed balance into a `(debit, credit)` presentation pair.
///
/// A non-negative balance sits on the side matching the account's
/// nature; a negative balance sits on the opposite side as `abs(balance)`.
/// This yields a presentation-correct trial-balance pair even for contra
/// balances (e.g., a liability account sitting in debit).
#[must_use]
pub fn split_by_nature(balance: Decimal, nature: AccountNature) -> (Decimal, Decimal) {
    if balance >= Decimal::ZERO {
        match nature {
            AccountNature::Debit => (balance, Decimal::ZERO),
            AccountNature::Credit => (Decimal::ZERO, balance),
        }
    } else {
        match nature {
            AccountNature::Debit => (Decimal::ZERO, -balance),
            AccountNature::Credit => (-balance, Decimal::ZERO),
        }
    }
}
