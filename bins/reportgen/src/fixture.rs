//! JSON fixture model for describing a complete ledger in one file.
//!
//! Fixtures reference accounts and branches by human-readable code and
//! name; loading resolves those references into generated IDs and
//! produces in-memory sources ready for report builds.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use branchbook_shared::types::{AccountId, BranchId, CurrencyId, LedgerEntryId, LedgerLineId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use branchbook_core::chart::{Account, AccountType, EntryStatus, LedgerLine};
use branchbook_core::currency::{Currency, ExchangeRate, RateTable};
use branchbook_core::source::InMemoryBooks;

/// A complete ledger fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// Currencies; exactly one must be flagged base.
    pub currencies: Vec<FixtureCurrency>,
    /// Exchange rates.
    #[serde(default)]
    pub rates: Vec<FixtureRate>,
    /// Chart of accounts; parents must appear before their children.
    pub accounts: Vec<FixtureAccount>,
    /// Journal entries.
    #[serde(default)]
    pub entries: Vec<FixtureEntry>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureCurrency {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_base: bool,
}

#[derive(Debug, Deserialize)]
pub struct FixtureRate {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub effective_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct FixtureAccount {
    pub code: String,
    pub name: String,
    /// Parent account code; absent for roots.
    #[serde(default)]
    pub parent: Option<String>,
    pub account_type: AccountType,
    /// Native currency; defaults to the base currency.
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub opening_balance: Decimal,
    /// Stored balance for discrepancy audits; defaults to the opening
    /// balance.
    #[serde(default)]
    pub cached_balance: Option<Decimal>,
    #[serde(default = "default_true")]
    pub allow_posting: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Branch name; branches are created on first reference.
    #[serde(default)]
    pub branch: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureEntry {
    pub reference: String,
    pub date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: EntryStatus,
    pub lines: Vec<FixtureLine>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureLine {
    /// Account code.
    pub account: String,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_status() -> EntryStatus {
    EntryStatus::Posted
}

/// A loaded fixture: resolved sources plus the rate table.
#[derive(Debug)]
pub struct LoadedFixture {
    pub books: InMemoryBooks,
    pub rates: RateTable,
}

/// Reads and resolves a fixture file.
pub fn load(path: &Path) -> anyhow::Result<LoadedFixture> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    let fixture: Fixture = serde_json::from_str(&raw)
        .with_context(|| format!("parsing fixture {}", path.display()))?;
    resolve(fixture)
}

fn resolve(fixture: Fixture) -> anyhow::Result<LoadedFixture> {
    let base_code = fixture
        .currencies
        .iter()
        .find(|currency| currency.is_base)
        .map(|currency| currency.code.clone())
        .context("fixture declares no base currency")?;

    let currencies: Vec<Currency> = fixture
        .currencies
        .into_iter()
        .map(|currency| Currency {
            id: CurrencyId::new(),
            name: currency.name.unwrap_or_else(|| currency.code.clone()),
            code: currency.code,
            is_base: currency.is_base,
        })
        .collect();

    let mut rates = RateTable::new();
    for rate in fixture.rates {
        let pair = format!("{}/{}", rate.from, rate.to);
        rates
            .insert(ExchangeRate::new(
                rate.from,
                rate.to,
                rate.rate,
                rate.effective_date,
            ))
            .with_context(|| format!("exchange rate {pair} is not positive"))?;
    }

    let mut by_code: HashMap<String, (AccountId, u32)> = HashMap::new();
    let mut branches: HashMap<String, BranchId> = HashMap::new();
    let mut accounts = Vec::new();
    for decl in fixture.accounts {
        if by_code.contains_key(&decl.code) {
            bail!("duplicate account code {}", decl.code);
        }
        let (parent_id, level) = match &decl.parent {
            None => (None, 1),
            Some(parent_code) => {
                let (id, parent_level) = by_code
                    .get(parent_code)
                    .with_context(|| {
                        format!(
                            "account {} references undeclared parent {parent_code}",
                            decl.code
                        )
                    })?;
                (Some(*id), parent_level + 1)
            }
        };
        let id = AccountId::new();
        by_code.insert(decl.code.clone(), (id, level));
        let branch_id = decl
            .branch
            .map(|name| *branches.entry(name).or_insert_with(BranchId::new));
        accounts.push(Account {
            id,
            code: decl.code,
            name: decl.name,
            parent_id,
            level,
            account_type: decl.account_type,
            nature: decl.account_type.natural_nature(),
            currency: decl.currency.unwrap_or_else(|| base_code.clone()),
            opening_balance: decl.opening_balance,
            cached_balance: decl.cached_balance.unwrap_or(decl.opening_balance),
            allow_posting: decl.allow_posting,
            is_active: decl.is_active,
            branch_id,
        });
    }

    let mut lines = Vec::new();
    for entry in fixture.entries {
        let entry_id = LedgerEntryId::new();
        for line in entry.lines {
            let (account_id, _) = by_code
                .get(&line.account)
                .with_context(|| {
                    format!(
                        "entry {} references undeclared account {}",
                        entry.reference, line.account
                    )
                })?;
            lines.push(LedgerLine {
                id: LedgerLineId::new(),
                entry_id,
                account_id: *account_id,
                reference: entry.reference.clone(),
                entry_date: entry.date,
                status: entry.status,
                debit: line.debit,
                credit: line.credit,
                description: line.description,
            });
        }
    }

    debug!(
        accounts = accounts.len(),
        lines = lines.len(),
        currencies = currencies.len(),
        "fixture resolved"
    );
    Ok(LoadedFixture {
        books: InMemoryBooks::from_parts(accounts, lines, currencies),
        rates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FIXTURE: &str = r#"{
        "currencies": [
            { "code": "USD", "is_base": true },
            { "code": "EUR" }
        ],
        "rates": [
            { "from": "EUR", "to": "USD", "rate": "1.25", "effective_date": "2026-01-01" }
        ],
        "accounts": [
            { "code": "1", "name": "Assets", "account_type": "assets", "allow_posting": false },
            { "code": "11", "name": "Cash", "parent": "1", "account_type": "assets",
              "opening_balance": "1000", "branch": "Jakarta" }
        ],
        "entries": [
            { "reference": "JE-1", "date": "2026-01-10",
              "lines": [ { "account": "11", "debit": "500" } ] }
        ]
    }"#;

    #[test]
    fn test_resolves_codes_and_levels() {
        let fixture: Fixture = serde_json::from_str(FIXTURE).unwrap();
        let loaded = resolve(fixture).unwrap();

        let accounts = loaded.books.accounts();
        assert_eq!(accounts.len(), 2);
        let cash = &accounts[1];
        assert_eq!(cash.level, 2);
        assert_eq!(cash.parent_id, Some(accounts[0].id));
        assert_eq!(cash.cached_balance, dec!(1000));
        assert!(cash.branch_id.is_some());

        let lines = loaded.books.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].account_id, cash.id);
        assert_eq!(lines[0].status, EntryStatus::Posted);
    }

    #[test]
    fn test_missing_base_currency_is_rejected() {
        let fixture: Fixture = serde_json::from_str(r#"{ "currencies": [], "accounts": [] }"#).unwrap();
        assert!(resolve(fixture).is_err());
    }

    #[test]
    fn test_zero_rate_is_rejected() {
        let raw = r#"{
            "currencies": [ { "code": "USD", "is_base": true }, { "code": "EUR" } ],
            "rates": [
                { "from": "EUR", "to": "USD", "rate": "0", "effective_date": "2026-01-01" }
            ],
            "accounts": []
        }"#;
        let fixture: Fixture = serde_json::from_str(raw).unwrap();
        let err = resolve(fixture).unwrap_err();
        assert!(err.to_string().contains("EUR/USD"));
    }

    #[test]
    fn test_undeclared_parent_is_rejected() {
        let raw = r#"{
            "currencies": [ { "code": "USD", "is_base": true } ],
            "accounts": [
                { "code": "11", "name": "Cash", "parent": "1", "account_type": "assets" }
            ]
        }"#;
        let fixture: Fixture = serde_json::from_str(raw).unwrap();
        assert!(resolve(fixture).is_err());
    }
}
