//! Discrepancy audit record types.

use branchbook_shared::types::AccountId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A posted entry contributing to an account's ledger-derived balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributingEntry {
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry reference.
    pub reference: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Signed impact under the account's nature.
    pub net_impact: Decimal,
}

/// A stored-vs-ledger balance mismatch.
///
/// Discrepancies are data, not errors: the audit always completes and
/// reports whatever it finds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    /// The affected account.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// The balance stored by the upstream system (native currency).
    pub stored_balance: Decimal,
    /// The balance recomputed from posted history (native currency).
    pub ledger_balance: Decimal,
    /// `stored_balance - ledger_balance`.
    pub difference: Decimal,
    /// The posted entries that make up the ledger balance.
    pub entries: Vec<ContributingEntry>,
}
