//! Branchbook report generator.
//!
//! Loads a JSON ledger fixture and prints the requested report as JSON.
//!
//! Usage: cargo run --bin reportgen -- trial-balance demos/sample.json

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use branchbook_core::balance::BalanceWindow;
use branchbook_core::reports::{ReportBuilder, ReportRequest};
use branchbook_shared::AppConfig;

mod fixture;

#[derive(Parser)]
#[command(name = "reportgen", about = "Generate financial reports from a ledger fixture")]
struct Cli {
    #[command(subcommand)]
    report: Report,

    /// Path to the ledger fixture file.
    #[arg(long, global = true, default_value = "demos/sample.json")]
    fixture: PathBuf,

    /// Display currency (defaults to the configured currency).
    #[arg(long, global = true)]
    currency: Option<String>,

    /// Maximum account level to display.
    #[arg(long, global = true)]
    level: Option<u32>,

    /// Window start date (YYYY-MM-DD).
    #[arg(long, global = true)]
    from: Option<NaiveDate>,

    /// Window end date (YYYY-MM-DD).
    #[arg(long, global = true)]
    to: Option<NaiveDate>,

    /// Include draft and approval-pending entries.
    #[arg(long, global = true)]
    include_pending: bool,
}

#[derive(Subcommand)]
enum Report {
    /// Trial balance at the requested display depth.
    TrialBalance,
    /// Balance sheet with net income closed into equity.
    BalanceSheet,
    /// Income statement.
    IncomeStatement,
    /// Executive dashboard totals.
    Dashboard,
    /// Per-branch debit/credit summary.
    BranchSummary,
    /// Stored-vs-ledger balance audit.
    Discrepancies,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "branchbook=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("loading configuration")?;

    let loaded = fixture::load(&cli.fixture)?;
    info!(fixture = %cli.fixture.display(), "fixture loaded");

    let window = BalanceWindow {
        from: cli.from,
        to: cli.to,
    };
    let mut request = ReportRequest::with_defaults(&config.report, window);
    if let Some(currency) = cli.currency {
        request.currency = currency;
    }
    if let Some(level) = cli.level {
        request.max_level = level;
    }
    request.include_pending = cli.include_pending;

    let builder = ReportBuilder::new(
        &loaded.books,
        &loaded.books,
        &loaded.books,
        &loaded.rates,
        config.report.clone(),
    );

    match cli.report {
        Report::TrialBalance => print_json(&builder.trial_balance(&request)?),
        Report::BalanceSheet => print_json(&builder.balance_sheet(&request)?),
        Report::IncomeStatement => print_json(&builder.income_statement(&request)?),
        Report::Dashboard => print_json(&builder.dashboard(&request)?),
        Report::BranchSummary => print_json(&builder.branch_summary(&request)?),
        Report::Discrepancies => print_json(&builder.discrepancies()?),
    }
}

fn print_json<T: Serialize>(report: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(report).context("serializing report")?;
    println!("{rendered}");
    Ok(())
}
