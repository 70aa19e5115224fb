//! Report assembly.
//!
//! One builder call = one build: fetch a read-only snapshot, index it,
//! aggregate, resolve visibility, shape rows. All memoization lives in
//! engine/resolver instances created inside the call and discarded with
//! it, so concurrent builds can never serve each other stale balances.

use std::collections::BTreeMap;

use branchbook_shared::config::ReportConfig;
use branchbook_shared::types::{AccountId, BranchId};
use rust_decimal::Decimal;
use tracing::debug;

use crate::balance::{
    AggregationEngine, BalanceError, BalanceWindow, BuildDiagnostics, DisplayRow,
    LevelVisibilityResolver, LineIndex, PostingBalanceCalculator, PostingFilter,
};
use crate::chart::{AccountRegistry, AccountType};
use crate::currency::{CurrencyConverter, RateLookup, base_currency};
use crate::discrepancy::{DiscrepancyDetector, DiscrepancyRecord};
use crate::source::{AccountSource, CurrencySource, LedgerSource, StatusFilter};

use super::error::ReportError;
use super::types::{
    BalanceSheetReport, BranchSummaryReport, BranchSummaryRow, DashboardSummary,
    IncomeStatementReport, ReportRequest, ReportRow, ReportSection, TrialBalanceReport,
    TrialBalanceTotals,
};

/// Snapshot of everything one build needs.
struct BuildContext {
    registry: AccountRegistry,
    lines: LineIndex,
}

/// Display rows plus build diagnostics, the shared shape all reports
/// are cut from.
struct Assembled {
    rows: Vec<ReportRow>,
    diagnostics: BuildDiagnostics,
}

/// Assembles financial reports from external sources.
pub struct ReportBuilder<'a> {
    accounts: &'a dyn AccountSource,
    ledger: &'a dyn LedgerSource,
    currencies: &'a dyn CurrencySource,
    rates: &'a dyn RateLookup,
    config: ReportConfig,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a builder over the given sources.
    #[must_use]
    pub fn new(
        accounts: &'a dyn AccountSource,
        ledger: &'a dyn LedgerSource,
        currencies: &'a dyn CurrencySource,
        rates: &'a dyn RateLookup,
        config: ReportConfig,
    ) -> Self {
        Self {
            accounts,
            ledger,
            currencies,
            rates,
            config,
        }
    }

    /// Generates a trial balance report.
    ///
    /// # Errors
    ///
    /// Fatal on missing base currency, unknown exchange rates, or a
    /// cancelled snapshot fetch.
    pub fn trial_balance(&self, request: &ReportRequest) -> Result<TrialBalanceReport, ReportError> {
        let base_code = self.base_code()?;
        let assembled = self.assemble(request, &base_code)?;

        let total_debit: Decimal = assembled.rows.iter().map(|row| row.debit).sum();
        let total_credit: Decimal = assembled.rows.iter().map(|row| row.credit).sum();
        let is_balanced = (total_debit - total_credit).abs() <= self.config.balance_tolerance;

        Ok(TrialBalanceReport {
            currency: request.currency.clone(),
            base_currency: base_code,
            window: request.window,
            max_level: request.max_level,
            rows: assembled.rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced,
            },
            diagnostics: assembled.diagnostics,
        })
    }

    /// Generates a balance sheet report.
    ///
    /// Revenue and expense rows are not listed; their net income is
    /// closed into the liabilities-and-equity side so the sheet balances
    /// without explicit closing entries.
    pub fn balance_sheet(&self, request: &ReportRequest) -> Result<BalanceSheetReport, ReportError> {
        let base_code = self.base_code()?;
        let assembled = self.assemble(request, &base_code)?;

        let mut assets = ReportSection::default();
        let mut liabilities = ReportSection::default();
        let mut equity = ReportSection::default();
        let mut net_income = Decimal::ZERO;

        for row in assembled.rows {
            match row.account_type {
                AccountType::Assets => assets.push(row),
                AccountType::Liabilities => liabilities.push(row),
                AccountType::Equity => equity.push(row),
                AccountType::Revenue => net_income += row.natural_net(),
                AccountType::Expenses => net_income -= row.natural_net(),
            }
        }

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total;
        let liabilities_and_equity = total_liabilities + total_equity + net_income;
        let is_balanced =
            (total_assets - liabilities_and_equity).abs() <= self.config.balance_tolerance;

        Ok(BalanceSheetReport {
            currency: request.currency.clone(),
            window: request.window,
            assets,
            liabilities,
            equity,
            net_income,
            total_assets,
            total_liabilities,
            total_equity,
            liabilities_and_equity,
            is_balanced,
            diagnostics: assembled.diagnostics,
        })
    }

    /// Generates an income statement report.
    pub fn income_statement(
        &self,
        request: &ReportRequest,
    ) -> Result<IncomeStatementReport, ReportError> {
        let base_code = self.base_code()?;
        let assembled = self.assemble(request, &base_code)?;

        let mut revenue = ReportSection::default();
        let mut expenses = ReportSection::default();
        for row in assembled.rows {
            match row.account_type {
                AccountType::Revenue => revenue.push(row),
                AccountType::Expenses => expenses.push(row),
                _ => {}
            }
        }
        let net_income = revenue.total - expenses.total;

        Ok(IncomeStatementReport {
            currency: request.currency.clone(),
            window: request.window,
            revenue,
            expenses,
            net_income,
            diagnostics: assembled.diagnostics,
        })
    }

    /// Generates the executive dashboard summary.
    pub fn dashboard(&self, request: &ReportRequest) -> Result<DashboardSummary, ReportError> {
        let base_code = self.base_code()?;
        let assembled = self.assemble(request, &base_code)?;

        let mut totals: BTreeMap<&'static str, Decimal> = BTreeMap::new();
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        for row in &assembled.rows {
            let key = match row.account_type {
                AccountType::Assets => "assets",
                AccountType::Liabilities => "liabilities",
                AccountType::Equity => "equity",
                AccountType::Revenue => "revenue",
                AccountType::Expenses => "expenses",
            };
            *totals.entry(key).or_default() += row.natural_net();
            total_debit += row.debit;
            total_credit += row.credit;
        }

        let get = |key: &str| totals.get(key).copied().unwrap_or_default();
        let total_revenue = get("revenue");
        let total_expenses = get("expenses");

        Ok(DashboardSummary {
            currency: request.currency.clone(),
            total_assets: get("assets"),
            total_liabilities: get("liabilities"),
            total_equity: get("equity"),
            total_revenue,
            total_expenses,
            net_income: total_revenue - total_expenses,
            is_balanced: (total_debit - total_credit).abs() <= self.config.balance_tolerance,
            diagnostics: assembled.diagnostics,
        })
    }

    /// Generates the branch performance summary.
    pub fn branch_summary(
        &self,
        request: &ReportRequest,
    ) -> Result<BranchSummaryReport, ReportError> {
        let base_code = self.base_code()?;
        let assembled = self.assemble(request, &base_code)?;

        let mut by_branch: BTreeMap<Option<BranchId>, (Decimal, Decimal)> = BTreeMap::new();
        for row in &assembled.rows {
            let entry = by_branch.entry(row.branch_id).or_default();
            entry.0 += row.debit;
            entry.1 += row.credit;
        }

        let rows = by_branch
            .into_iter()
            .map(|(branch_id, (total_debit, total_credit))| BranchSummaryRow {
                branch_id,
                total_debit,
                total_credit,
                net: total_debit - total_credit,
            })
            .collect();

        Ok(BranchSummaryReport {
            currency: request.currency.clone(),
            window: request.window,
            rows,
            diagnostics: assembled.diagnostics,
        })
    }

    /// Runs the stored-vs-ledger balance audit over posted history.
    ///
    /// Discrepancies are data, not errors; only a failed snapshot fetch
    /// aborts.
    pub fn discrepancies(&self) -> Result<Vec<DiscrepancyRecord>, ReportError> {
        let ctx = self.snapshot_for(&BalanceWindow::full_history(), StatusFilter::PostedOnly)?;
        let detector = DiscrepancyDetector::new(self.config.discrepancy_tolerance);
        Ok(detector.scan(&ctx.registry, &ctx.lines))
    }

    /// Builds display rows for one request.
    fn assemble(&self, request: &ReportRequest, base_code: &str) -> Result<Assembled, ReportError> {
        validate_window(&request.window)?;
        let ctx = self.snapshot(request)?;

        let converter = CurrencyConverter::new(self.rates);
        let rate_date = request
            .window
            .to
            .unwrap_or_else(|| chrono::Utc::now().date_naive());
        let calculator =
            PostingBalanceCalculator::new(&converter, &request.currency, base_code, rate_date);
        let filter = PostingFilter {
            window: request.window,
            include_pending: request.include_pending,
        };
        let mut engine = AggregationEngine::new(&ctx.registry, calculator, &ctx.lines, filter);
        let mut resolver = LevelVisibilityResolver::new(&ctx.registry);

        let mut rows = Vec::new();
        for display_row in resolver.display_rows(request.max_level) {
            let balance = match display_row {
                DisplayRow::Subtree(id) => engine.aggregate(id)?,
                // Postable account collapsed past: its subtree is shown
                // by deeper rows, only its direct postings go here.
                DisplayRow::OwnPostings(id) => engine.posting_only(id)?,
            }
            .normalized();
            let id = display_row.account_id();
            let account = ctx
                .registry
                .get(id)
                .ok_or(BalanceError::AccountNotFound(id))?;
            rows.push(ReportRow {
                account_id: id,
                code: account.code.clone(),
                name: account.name.clone(),
                level: account.level,
                account_type: account.account_type,
                branch_id: account.branch_id,
                debit: balance.debit_selected,
                credit: balance.credit_selected,
                debit_base: balance.debit_base,
                credit_base: balance.credit_base,
            });
        }

        let diagnostics = engine.diagnostics();
        debug!(
            rows = rows.len(),
            accounts = ctx.registry.len(),
            lines = ctx.lines.len(),
            clean = diagnostics.is_clean(),
            "report build complete"
        );
        Ok(Assembled { rows, diagnostics })
    }

    /// Fetches the snapshot for a report request.
    ///
    /// Lines are fetched from start-of-history up to the window end so
    /// bounded windows can compute their prior-period balance; the
    /// precise status rule is applied per line by the posting filter.
    fn snapshot(&self, request: &ReportRequest) -> Result<BuildContext, ReportError> {
        let fetch_window = BalanceWindow {
            from: None,
            to: request.window.to,
        };
        let status = if request.include_pending {
            StatusFilter::NotCancelled
        } else {
            StatusFilter::PostedOnly
        };
        self.snapshot_for(&fetch_window, status)
    }

    fn snapshot_for(
        &self,
        window: &BalanceWindow,
        status: StatusFilter,
    ) -> Result<BuildContext, ReportError> {
        let accounts = self.accounts.list_active()?;
        let registry = AccountRegistry::new(accounts);
        let ids: Vec<AccountId> = registry.ids();
        let lines = self.ledger.lines_for(&ids, window, status)?;
        Ok(BuildContext {
            registry,
            lines: LineIndex::from_lines(lines),
        })
    }

    /// Resolves the ledger base currency; its absence is fatal.
    fn base_code(&self) -> Result<String, ReportError> {
        let currencies = self.currencies.currencies()?;
        let base = base_currency(&currencies)?;
        Ok(base.code.clone())
    }
}

fn validate_window(window: &BalanceWindow) -> Result<(), ReportError> {
    if let (Some(start), Some(end)) = (window.from, window.to)
        && start > end
    {
        return Err(ReportError::InvalidDateRange { start, end });
    }
    Ok(())
}
