//! Balance value types, report windows, and the ledger line index.

use std::collections::HashMap;

use branchbook_shared::types::AccountId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chart::LedgerLine;

/// An account's balance including all descendant postings, split into
/// debit/credit presentation pairs.
///
/// Carries the pair twice: once in the report's selected currency and
/// once in the ledger base currency. Computed fresh per report build,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedBalance {
    /// The account this balance belongs to.
    pub account_id: AccountId,
    /// Debit side in the selected display currency.
    pub debit_selected: Decimal,
    /// Credit side in the selected display currency.
    pub credit_selected: Decimal,
    /// Debit side in the base currency.
    pub debit_base: Decimal,
    /// Credit side in the base currency.
    pub credit_base: Decimal,
}

impl AggregatedBalance {
    /// The zero balance for an account.
    #[must_use]
    pub fn zero(account_id: AccountId) -> Self {
        Self {
            account_id,
            debit_selected: Decimal::ZERO,
            credit_selected: Decimal::ZERO,
            debit_base: Decimal::ZERO,
            credit_base: Decimal::ZERO,
        }
    }

    /// Adds another balance into this one, component-wise.
    ///
    /// The owning `account_id` is kept; only the amounts accumulate.
    pub fn accumulate(&mut self, other: &Self) {
        self.debit_selected += other.debit_selected;
        self.credit_selected += other.credit_selected;
        self.debit_base += other.debit_base;
        self.credit_base += other.credit_base;
    }

    /// Net amount (debit - credit) in the selected currency.
    #[must_use]
    pub fn net_selected(&self) -> Decimal {
        self.debit_selected - self.credit_selected
    }

    /// Net amount (debit - credit) in the base currency.
    #[must_use]
    pub fn net_base(&self) -> Decimal {
        self.debit_base - self.credit_base
    }

    /// Collapses each pair onto a single side for display.
    ///
    /// An aggregated subtree can carry weight on both sides (one child
    /// in debit, a sibling in credit). A collapsed row shows the net on
    /// one side: `(debit - credit, 0)` or `(0, credit - debit)`. Netting
    /// both sides by the same amount leaves trial-balance differences
    /// unchanged.
    #[must_use]
    pub fn normalized(&self) -> Self {
        fn collapse(debit: Decimal, credit: Decimal) -> (Decimal, Decimal) {
            let net = debit - credit;
            if net >= Decimal::ZERO {
                (net, Decimal::ZERO)
            } else {
                (Decimal::ZERO, -net)
            }
        }
        let (debit_selected, credit_selected) =
            collapse(self.debit_selected, self.credit_selected);
        let (debit_base, credit_base) = collapse(self.debit_base, self.credit_base);
        Self {
            account_id: self.account_id,
            debit_selected,
            credit_selected,
            debit_base,
            credit_base,
        }
    }

    /// Returns true if every component is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.debit_selected.is_zero()
            && self.credit_selected.is_zero()
            && self.debit_base.is_zero()
            && self.credit_base.is_zero()
    }
}

/// Date window for a balance computation.
///
/// `from = None` means start-of-history; `to = None` means up to now.
/// Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceWindow {
    /// Inclusive lower bound, `None` for start-of-history.
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound, `None` for unbounded.
    pub to: Option<NaiveDate>,
}

impl BalanceWindow {
    /// Full history, no bounds.
    #[must_use]
    pub const fn full_history() -> Self {
        Self {
            from: None,
            to: None,
        }
    }

    /// Everything up to and including `to` (as-of-date reports).
    #[must_use]
    pub const fn as_of(to: NaiveDate) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    /// A bounded period `[from, to]`.
    #[must_use]
    pub const fn period(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Returns true if `date` falls inside the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    /// The prior-period window: start-of-history up to (but excluding)
    /// `from`. `None` when the window is already unbounded below.
    #[must_use]
    pub fn prior(&self) -> Option<Self> {
        let from = self.from?;
        let day_before = from.pred_opt()?;
        Some(Self::as_of(day_before))
    }
}

/// Line selection rule for a posting balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingFilter {
    /// The date window.
    pub window: BalanceWindow,
    /// When set, draft and approved (non-cancelled) lines also count.
    pub include_pending: bool,
}

impl PostingFilter {
    /// Posted lines over the full history.
    #[must_use]
    pub const fn posted_full_history() -> Self {
        Self {
            window: BalanceWindow::full_history(),
            include_pending: false,
        }
    }

    /// Returns true if the line contributes under this filter.
    #[must_use]
    pub fn admits(&self, line: &LedgerLine) -> bool {
        line.status.counts_toward_balance(self.include_pending)
            && self.window.contains(line.entry_date)
    }

    /// The same status rule over the prior-period window, if any.
    #[must_use]
    pub fn prior(&self) -> Option<Self> {
        self.window.prior().map(|window| Self {
            window,
            include_pending: self.include_pending,
        })
    }
}

/// Ledger lines grouped by account for one build snapshot.
#[derive(Debug, Default)]
pub struct LineIndex {
    by_account: HashMap<AccountId, Vec<LedgerLine>>,
}

impl LineIndex {
    /// Groups a flat line list by account.
    #[must_use]
    pub fn from_lines(lines: Vec<LedgerLine>) -> Self {
        let mut by_account: HashMap<AccountId, Vec<LedgerLine>> = HashMap::new();
        for line in lines {
            by_account.entry(line.account_id).or_default().push(line);
        }
        Self { by_account }
    }

    /// Lines for one account; empty when the account has none.
    #[must_use]
    pub fn for_account(&self, id: AccountId) -> &[LedgerLine] {
        self.by_account
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of indexed lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_account.values().map(Vec::len).sum()
    }

    /// Returns true if no lines are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_account.is_empty()
    }
}
