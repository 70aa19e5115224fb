//! Chart of accounts domain types.
//!
//! Defines accounts, their classification, and the ledger lines that
//! accumulate against them.

use branchbook_shared::types::{AccountId, BranchId, LedgerEntryId, LedgerLineId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level account classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Asset accounts (cash, receivables, inventory, fixed assets).
    Assets,
    /// Liability accounts (payables, loans).
    Liabilities,
    /// Equity accounts (capital, retained earnings).
    Equity,
    /// Revenue accounts.
    Revenue,
    /// Expense accounts.
    Expenses,
}

impl AccountType {
    /// The natural balance side for this account type.
    #[must_use]
    pub const fn natural_nature(self) -> AccountNature {
        match self {
            Self::Assets | Self::Expenses => AccountNature::Debit,
            Self::Liabilities | Self::Equity | Self::Revenue => AccountNature::Credit,
        }
    }
}

/// Whether an account's natural positive balance is a debit or a credit.
///
/// Determines the sign convention for movement:
/// - Debit-natured: movement = debits - credits
/// - Credit-natured: movement = credits - debits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountNature {
    /// Debit-natured (Assets, Expenses).
    Debit,
    /// Credit-natured (Liabilities, Equity, Revenue).
    Credit,
}

impl AccountNature {
    /// Signed net movement for a (debit, credit) pair under this nature.
    #[must_use]
    pub fn signed_movement(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Journal entry status.
///
/// Only posted lines contribute to balances unless a report explicitly
/// asks to include pending (non-cancelled) activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted.
    Draft,
    /// Entry has been posted to the ledger.
    Posted,
    /// Entry has been approved but not yet posted.
    Approved,
    /// Entry has been cancelled and never affects balances.
    Cancelled,
}

impl EntryStatus {
    /// Returns true if the entry is posted.
    #[must_use]
    pub fn is_posted(self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Returns true if a line with this status contributes to a balance.
    ///
    /// Posted only by default; everything but cancelled when pending
    /// activity is requested.
    #[must_use]
    pub fn counts_toward_balance(self, include_pending: bool) -> bool {
        if include_pending {
            !matches!(self, Self::Cancelled)
        } else {
            self.is_posted()
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// Hierarchical account code (e.g., "1201").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Parent account, `None` for roots.
    pub parent_id: Option<AccountId>,
    /// Depth in the tree (root = 1, child = parent + 1).
    pub level: u32,
    /// Top-level classification.
    pub account_type: AccountType,
    /// Natural balance side.
    pub nature: AccountNature,
    /// Native currency code (ISO 4217).
    pub currency: String,
    /// Opening balance in native currency.
    pub opening_balance: Decimal,
    /// Stored balance kept by the upstream system, in native currency.
    ///
    /// Audited against the ledger-derived balance by the discrepancy
    /// detector; never trusted by the aggregation engine itself.
    pub cached_balance: Decimal,
    /// Whether ledger lines may post directly to this account.
    ///
    /// Non-postable accounts exist purely to aggregate children.
    pub allow_posting: bool,
    /// Whether the account is active.
    pub is_active: bool,
    /// Owning branch, if the account is branch-scoped.
    pub branch_id: Option<BranchId>,
}

/// A single debit/credit line within a journal entry.
///
/// Either side may be zero; a line with both sides nonzero is tolerated
/// (its net movement is still well defined).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The line ID.
    pub id: LedgerLineId,
    /// The owning journal entry.
    pub entry_id: LedgerEntryId,
    /// The account this line posts to.
    pub account_id: AccountId,
    /// Entry reference (e.g., journal number).
    pub reference: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Status of the owning entry.
    pub status: EntryStatus,
    /// Debit amount (>= 0), in the account's native currency.
    pub debit: Decimal,
    /// Credit amount (>= 0), in the account's native currency.
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
}

impl LedgerLine {
    /// Signed impact of this line under the given account nature.
    #[must_use]
    pub fn net_movement(&self, nature: AccountNature) -> Decimal {
        nature.signed_movement(self.debit, self.credit)
    }
}
