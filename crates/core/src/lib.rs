//! Core business logic for Branchbook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, the balance aggregation engine, and report shaping live here.
//!
//! # Modules
//!
//! - `chart` - Chart of accounts tree and registry
//! - `currency` - Multi-currency handling and exchange rates
//! - `balance` - Posting balances, hierarchical aggregation, display visibility
//! - `discrepancy` - Stored-vs-ledger balance audit
//! - `source` - External data source interfaces (accounts, ledger, currencies)
//! - `reports` - Report assembly (trial balance, balance sheet, income statement)

pub mod balance;
pub mod chart;
pub mod currency;
pub mod discrepancy;
pub mod reports;
pub mod source;
