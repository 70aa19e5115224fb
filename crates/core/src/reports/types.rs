//! Report data types.

use branchbook_shared::config::ReportConfig;
use branchbook_shared::types::{AccountId, BranchId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::balance::{BalanceWindow, BuildDiagnostics};
use crate::chart::AccountType;

/// Parameters for one report build.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Display currency (ISO 4217 code).
    pub currency: String,
    /// Date window for the report.
    pub window: BalanceWindow,
    /// Maximum account level shown; deeper subtrees collapse into their
    /// visible-leaf ancestor.
    pub max_level: u32,
    /// When set, draft and approved entries count toward balances.
    pub include_pending: bool,
}

impl ReportRequest {
    /// A request using the configured defaults for the given window.
    #[must_use]
    pub fn with_defaults(config: &ReportConfig, window: BalanceWindow) -> Self {
        Self {
            currency: config.default_currency.clone(),
            window,
            max_level: config.default_max_level,
            include_pending: false,
        }
    }
}

/// One visible-leaf row of a report.
///
/// Amounts are the collapsed subtree's aggregated balance, normalized
/// onto a single side per currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// The account (a visible leaf at the requested level).
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account level (indentation depth).
    pub level: u32,
    /// Account classification.
    pub account_type: AccountType,
    /// Owning branch, if branch-scoped.
    pub branch_id: Option<BranchId>,
    /// Debit side in the selected currency.
    pub debit: Decimal,
    /// Credit side in the selected currency.
    pub credit: Decimal,
    /// Debit side in the base currency.
    pub debit_base: Decimal,
    /// Credit side in the base currency.
    pub credit_base: Decimal,
}

impl ReportRow {
    /// Net amount under the account type's natural sign convention
    /// (positive when the balance sits on its natural side).
    #[must_use]
    pub fn natural_net(&self) -> Decimal {
        self.account_type
            .natural_nature()
            .signed_movement(self.debit, self.credit)
    }
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit in the selected currency.
    pub total_debit: Decimal,
    /// Total credit in the selected currency.
    pub total_credit: Decimal,
    /// Whether debits equal credits within the configured tolerance.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Selected display currency.
    pub currency: String,
    /// Ledger base currency.
    pub base_currency: String,
    /// The report window.
    pub window: BalanceWindow,
    /// Display depth.
    pub max_level: u32,
    /// Visible-leaf rows.
    pub rows: Vec<ReportRow>,
    /// Totals and the balanced flag.
    pub totals: TrialBalanceTotals,
    /// Non-fatal hierarchy conditions observed during the build.
    pub diagnostics: BuildDiagnostics,
}

/// A section of visible-leaf rows sharing an account type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section total (natural sign convention of the section's type).
    pub total: Decimal,
    /// Rows in this section.
    pub rows: Vec<ReportRow>,
}

impl ReportSection {
    /// Adds a row, keeping the running total.
    pub fn push(&mut self, row: ReportRow) {
        self.total += row.natural_net();
        self.rows.push(row);
    }
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Selected display currency.
    pub currency: String,
    /// The report window.
    pub window: BalanceWindow,
    /// Assets section.
    pub assets: ReportSection,
    /// Liabilities section.
    pub liabilities: ReportSection,
    /// Equity section.
    pub equity: ReportSection,
    /// Current-period net income (closed into equity for balancing).
    pub net_income: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Liabilities + equity + net income.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities and equity within tolerance.
    pub is_balanced: bool,
    /// Non-fatal hierarchy conditions observed during the build.
    pub diagnostics: BuildDiagnostics,
}

/// Income statement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Selected display currency.
    pub currency: String,
    /// The report window.
    pub window: BalanceWindow,
    /// Revenue section.
    pub revenue: ReportSection,
    /// Expenses section.
    pub expenses: ReportSection,
    /// Net income (revenue - expenses).
    pub net_income: Decimal,
    /// Non-fatal hierarchy conditions observed during the build.
    pub diagnostics: BuildDiagnostics,
}

/// Executive dashboard summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Selected display currency.
    pub currency: String,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Total revenue.
    pub total_revenue: Decimal,
    /// Total expenses.
    pub total_expenses: Decimal,
    /// Net income (revenue - expenses).
    pub net_income: Decimal,
    /// Whether the underlying trial balance is balanced.
    pub is_balanced: bool,
    /// Non-fatal hierarchy conditions observed during the build.
    pub diagnostics: BuildDiagnostics,
}

/// Per-branch totals over visible leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSummaryRow {
    /// The branch; `None` groups accounts without a branch.
    pub branch_id: Option<BranchId>,
    /// Total debit in the selected currency.
    pub total_debit: Decimal,
    /// Total credit in the selected currency.
    pub total_credit: Decimal,
    /// Net (debit - credit).
    pub net: Decimal,
}

/// Branch performance summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSummaryReport {
    /// Selected display currency.
    pub currency: String,
    /// The report window.
    pub window: BalanceWindow,
    /// Per-branch rows, unassigned accounts first.
    pub rows: Vec<BranchSummaryRow>,
    /// Non-fatal hierarchy conditions observed during the build.
    pub diagnostics: BuildDiagnostics,
}
