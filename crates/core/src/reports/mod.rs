//! Report assembly over the aggregation engine.
//!
//! - Trial balance with configurable display depth and currency
//! - Balance sheet and income statement
//! - Executive dashboard and branch summary
//! - Stored-vs-ledger discrepancy audit

pub mod builder;
pub mod error;
pub mod types;


pub use builder::ReportBuilder;
pub use error::ReportError;
pub use types::{
    BalanceSheetReport, BranchSummaryReport, BranchSummaryRow, DashboardSummary,
    IncomeStatementReport, ReportRequest, ReportRow, ReportSection, TrialBalanceReport,
    TrialBalanceTotals,
};
